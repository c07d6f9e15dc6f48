use serde::{Deserialize, Serialize};

use crate::services::normalize::{normalize_for_display, normalize_for_search, normalize_genre_tag};

/// Movie identifier as it appears in the dataset
pub type MovieId = u32;

/// User identifier as it appears in the ratings table
pub type UserId = u32;

/// Raw row of the movies table (`movieId,title,genres`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRow {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
}

/// A movie with its normalized forms, immutable once loaded
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TitleRecord {
    pub movie_id: MovieId,
    /// Title exactly as stored in the dataset
    pub title: String,
    /// Form used to build the search index and to match queries
    pub search_title: String,
    /// Form shown to users
    pub display_title: String,
    /// Delimiter-joined genre tags, e.g. "Adventure|Animation"
    pub genres: String,
    /// Readable genre string, e.g. "Adventure, Animation"
    pub display_genres: String,
}

impl TitleRecord {
    /// Creates a record, deriving the normalized forms from the raw fields
    pub fn new(movie_id: MovieId, title: impl Into<String>, genres: impl Into<String>) -> Self {
        let title = title.into();
        let genres = genres.into();
        Self {
            movie_id,
            search_title: normalize_for_search(&title),
            display_title: normalize_for_display(&title),
            display_genres: normalize_genre_tag(&genres),
            title,
            genres,
        }
    }
}

impl From<MovieRow> for TitleRecord {
    fn from(row: MovieRow) -> Self {
        TitleRecord::new(row.movie_id, row.title, row.genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_title_record_derives_forms() {
        let record = TitleRecord::new(89745, "Avengers, The (2012)", "Action|Adventure|Sci-Fi|IMAX");
        assert_eq!(record.search_title, "The Avengers 2012");
        assert_eq!(record.display_title, "The Avengers (2012)");
        assert_eq!(record.display_genres, "Action, Adventure, Sci, Fi, IMAX");
        assert_eq!(record.title, "Avengers, The (2012)");
    }

    #[test]
    fn test_movie_row_deserialization() {
        let data = "movieId,title,genres\n1,Toy Story (1995),Adventure|Animation\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let row: MovieRow = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(row.movie_id, 1);
        assert_eq!(row.title, "Toy Story (1995)");

        let record: TitleRecord = row.into();
        assert_eq!(record.search_title, "Toy Story 1995");
        assert_eq!(record.display_genres, "Adventure, Animation");
    }
}
