use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{MovieId, UserId};

/// A rating strictly above this value counts as an endorsement
pub const APPROVAL_THRESHOLD: f32 = 3.5;

/// Raw row of the ratings table (`userId,movieId,rating,timestamp`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRow {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f32,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// A single user's rating of a single title
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f32,
    pub rated_at: Option<DateTime<Utc>>,
}

impl Rating {
    pub fn new(user_id: UserId, movie_id: MovieId, rating: f32) -> Self {
        Self {
            user_id,
            movie_id,
            rating,
            rated_at: None,
        }
    }

    /// Whether this rating endorses the title
    pub fn is_approval(&self) -> bool {
        is_approval(self.rating)
    }
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Self {
            user_id: row.user_id,
            movie_id: row.movie_id,
            rating: row.rating,
            rated_at: row
                .timestamp
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        }
    }
}

pub(crate) fn is_approval(rating: f32) -> bool {
    rating > APPROVAL_THRESHOLD
}

/// Ratings grouped by user and by title
///
/// Each `(user, title)` pair appears at most once; the first occurrence wins.
#[derive(Debug, Default)]
pub struct RatingTable {
    by_user: HashMap<UserId, Vec<(MovieId, f32)>>,
    by_movie: HashMap<MovieId, Vec<(UserId, f32)>>,
    len: usize,
}

impl RatingTable {
    pub fn from_ratings(ratings: impl IntoIterator<Item = Rating>) -> Self {
        let mut by_user: HashMap<UserId, Vec<(MovieId, f32)>> = HashMap::new();
        for rating in ratings {
            by_user
                .entry(rating.user_id)
                .or_default()
                .push((rating.movie_id, rating.rating));
        }

        let mut by_movie: HashMap<MovieId, Vec<(UserId, f32)>> = HashMap::new();
        let mut len = 0;
        for (&user_id, rated) in by_user.iter_mut() {
            // stable sort keeps the first rating of a duplicated pair in front
            rated.sort_by_key(|&(movie_id, _)| movie_id);
            rated.dedup_by_key(|&mut (movie_id, _)| movie_id);
            len += rated.len();
            for &(movie_id, rating) in rated.iter() {
                by_movie.entry(movie_id).or_default().push((user_id, rating));
            }
        }

        Self {
            by_user,
            by_movie,
            len,
        }
    }

    /// Number of distinct `(user, title)` ratings
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }

    /// Users who endorsed the given title
    pub fn approvers(&self, movie_id: MovieId) -> impl Iterator<Item = UserId> + '_ {
        self.by_movie
            .get(&movie_id)
            .into_iter()
            .flatten()
            .filter(|&&(_, rating)| is_approval(rating))
            .map(|&(user_id, _)| user_id)
    }

    /// Titles the given user endorsed
    pub fn approved_by(&self, user_id: UserId) -> impl Iterator<Item = MovieId> + '_ {
        self.by_user
            .get(&user_id)
            .into_iter()
            .flatten()
            .filter(|&&(_, rating)| is_approval(rating))
            .map(|&(movie_id, _)| movie_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_is_strictly_above_threshold() {
        assert!(!Rating::new(1, 1, 3.5).is_approval());
        assert!(Rating::new(1, 1, 4.0).is_approval());
        assert!(!Rating::new(1, 1, 0.5).is_approval());
    }

    #[test]
    fn test_rating_row_timestamp_conversion() {
        let row = RatingRow {
            user_id: 1,
            movie_id: 296,
            rating: 5.0,
            timestamp: Some(1147880044),
        };
        let rating: Rating = row.into();
        assert_eq!(
            rating.rated_at.map(|t| t.to_rfc3339()),
            Some("2006-05-17T15:34:04+00:00".to_string())
        );
    }

    #[test]
    fn test_table_groups_and_filters_approvals() {
        let table = RatingTable::from_ratings(vec![
            Rating::new(1, 10, 5.0),
            Rating::new(1, 20, 2.0),
            Rating::new(2, 10, 4.0),
            Rating::new(3, 10, 3.5),
        ]);

        assert_eq!(table.len(), 4);
        assert_eq!(table.user_count(), 3);

        let mut approvers: Vec<UserId> = table.approvers(10).collect();
        approvers.sort_unstable();
        assert_eq!(approvers, vec![1, 2]);

        assert_eq!(table.approved_by(1).collect::<Vec<_>>(), vec![10]);
        assert_eq!(table.approvers(99).count(), 0);
        assert_eq!(table.approved_by(99).count(), 0);
    }

    #[test]
    fn test_duplicate_pair_keeps_first_rating() {
        let table = RatingTable::from_ratings(vec![
            Rating::new(1, 10, 5.0),
            Rating::new(1, 10, 1.0),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.approvers(10).collect::<Vec<_>>(), vec![1]);
    }
}
