//! Co-rating recommendations.
//!
//! Users who endorsed the seed title form the affinity cohort. A candidate's
//! score is its lift: the share of the cohort endorsing it divided by the
//! share of everyone endorsing any candidate who endorse it. Titles every
//! audience likes score near 1; titles the cohort distinctly favours score
//! higher.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Deserialize;

use crate::{
    catalog::Catalog,
    models::{GenreFilter, MovieId, Recommendation, UserId},
};

/// Minimum share of the cohort that must endorse a candidate (exclusive)
pub const RELEVANCE_FLOOR: f64 = 0.10;

/// Maximum number of recommendations returned
pub const RECOMMENDATION_LIMIT: usize = 10;

/// How a genre filter adjusts scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreBonus {
    /// Closer genre strings keep more of their score
    #[default]
    Similarity,
    /// Closer genre strings lose more of their score
    Inverted,
}

impl GenreBonus {
    /// Multiplier in [0, 1] for a title's genres against the requested genre
    ///
    /// String closeness is a normalized Levenshtein ratio rounded to a whole
    /// percentage. It is not the Indel ratio, so values differ from an
    /// LCS-based `fuzz.ratio` for strings of unequal length.
    pub fn factor(self, genres: &str, genre: &str) -> f64 {
        let ratio = (strsim::normalized_levenshtein(genres, genre) * 100.0).round() / 100.0;
        match self {
            GenreBonus::Similarity => ratio,
            GenreBonus::Inverted => 1.0 - ratio,
        }
    }
}

/// Produces ranked recommendations for a seed title
#[cfg_attr(test, mockall::automock)]
pub trait Recommender: Send + Sync {
    fn recommend(&self, movie_id: MovieId, genre: &GenreFilter) -> Vec<Recommendation>;
}

/// Recommender backed by the catalog's rating table
pub struct CoRatingRecommender {
    catalog: Arc<Catalog>,
    genre_bonus: GenreBonus,
}

impl CoRatingRecommender {
    pub fn new(catalog: Arc<Catalog>, genre_bonus: GenreBonus) -> Self {
        Self {
            catalog,
            genre_bonus,
        }
    }
}

impl Recommender for CoRatingRecommender {
    fn recommend(&self, movie_id: MovieId, genre: &GenreFilter) -> Vec<Recommendation> {
        recommend(&self.catalog, movie_id, genre, self.genre_bonus)
    }
}

/// Ranks titles endorsed by the seed title's affinity cohort
///
/// Returns at most [`RECOMMENDATION_LIMIT`] rows sorted by descending score,
/// ties by ascending movie id. The seed title is never recommended. An empty
/// cohort (unknown title, or nobody endorsed it) yields no rows.
pub fn recommend(
    catalog: &Catalog,
    movie_id: MovieId,
    genre: &GenreFilter,
    genre_bonus: GenreBonus,
) -> Vec<Recommendation> {
    let ratings = catalog.ratings();

    let cohort: HashSet<UserId> = ratings.approvers(movie_id).collect();
    if cohort.is_empty() {
        tracing::debug!(movie_id, "No affinity cohort");
        return Vec::new();
    }
    let cohort_size = cohort.len() as f64;

    let mut cohort_approvals: HashMap<MovieId, usize> = HashMap::new();
    for &user_id in &cohort {
        for approved in ratings.approved_by(user_id) {
            *cohort_approvals.entry(approved).or_default() += 1;
        }
    }

    let candidates: Vec<(MovieId, f64)> = cohort_approvals
        .into_iter()
        .filter(|&(candidate, _)| candidate != movie_id)
        .map(|(candidate, count)| (candidate, count as f64 / cohort_size))
        .filter(|&(_, similar)| similar > RELEVANCE_FLOOR)
        .filter(|&(candidate, _)| {
            catalog
                .title(candidate)
                .is_some_and(|title| genre.admits(&title.genres))
        })
        .collect();

    // baseline population: anyone endorsing at least one surviving candidate
    let mut population: HashSet<UserId> = HashSet::new();
    let mut approvals: HashMap<MovieId, usize> = HashMap::with_capacity(candidates.len());
    for &(candidate, _) in &candidates {
        let mut count = 0;
        for user_id in ratings.approvers(candidate) {
            population.insert(user_id);
            count += 1;
        }
        approvals.insert(candidate, count);
    }
    let population_size = population.len();

    let mut rows: Vec<Recommendation> = candidates
        .into_iter()
        .filter_map(|(candidate, similar_score)| {
            let approvers = approvals.get(&candidate).copied().unwrap_or(0);
            if approvers == 0 || population_size == 0 {
                return None;
            }
            let baseline_score = approvers as f64 / population_size as f64;
            let title = catalog.title(candidate)?;

            let mut score = similar_score / baseline_score;
            if let Some(requested) = genre.genre() {
                score *= genre_bonus.factor(&title.display_genres, requested);
            }

            Some(Recommendation {
                movie_id: candidate,
                display_title: title.display_title.clone(),
                display_genres: title.display_genres.clone(),
                score,
                similar_score,
                baseline_score,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.movie_id.cmp(&b.movie_id))
    });
    rows.truncate(RECOMMENDATION_LIMIT);

    tracing::debug!(
        movie_id,
        genre = ?genre.genre(),
        cohort = cohort.len(),
        population = population_size,
        returned = rows.len(),
        "Recommendations computed"
    );

    rows
}
