use serde::Serialize;

use super::MovieId;

/// Genre value that means "no filter"
pub const ANY_GENRE: &str = "Any";

/// Optional genre restriction applied to recommendations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    Any,
    Genre(String),
}

impl GenreFilter {
    /// Parses a form value; blank input and the wildcard both mean no filter
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => GenreFilter::Any,
            Some(v) if v.eq_ignore_ascii_case(ANY_GENRE) => GenreFilter::Any,
            Some(v) => GenreFilter::Genre(v.to_string()),
        }
    }

    pub fn genre(&self) -> Option<&str> {
        match self {
            GenreFilter::Any => None,
            GenreFilter::Genre(genre) => Some(genre.as_str()),
        }
    }

    /// Case-insensitive substring test against a genre string
    pub fn admits(&self, genres: &str) -> bool {
        match self {
            GenreFilter::Any => true,
            GenreFilter::Genre(genre) => genres.to_lowercase().contains(&genre.to_lowercase()),
        }
    }
}

/// A title matched by a free-text query
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchHit {
    pub movie_id: MovieId,
    pub display_title: String,
    pub display_genres: String,
    /// Cosine similarity between the query and the title, in [0, 1]
    pub similarity: f64,
}

/// A title recommended for a seed title
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub display_title: String,
    pub display_genres: String,
    /// Final ranking score (lift, adjusted by the genre bonus when filtering)
    pub score: f64,
    /// Share of the affinity cohort that endorsed this title
    pub similar_score: f64,
    /// Share of the general approving population that endorsed this title
    pub baseline_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_filter_parse() {
        assert_eq!(GenreFilter::parse(None), GenreFilter::Any);
        assert_eq!(GenreFilter::parse(Some("  ")), GenreFilter::Any);
        assert_eq!(GenreFilter::parse(Some("Any")), GenreFilter::Any);
        assert_eq!(
            GenreFilter::parse(Some("Comedy")),
            GenreFilter::Genre("Comedy".to_string())
        );
    }

    #[test]
    fn test_genre_filter_admits_case_insensitive() {
        let filter = GenreFilter::Genre("sci-fi".to_string());
        assert!(filter.admits("Action|Sci-Fi"));
        assert!(!filter.admits("Comedy|Romance"));
        assert!(GenreFilter::Any.admits("(no genres listed)"));
    }
}
