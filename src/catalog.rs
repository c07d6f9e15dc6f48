use std::collections::HashMap;

use crate::{
    dataset::Dataset,
    models::{MovieId, Rating, RatingTable, TitleRecord},
    services::{normalize::extract_genre_vocabulary, title_index::TitleIndex},
};

/// Read-only view of one dataset snapshot
///
/// Holds the title and rating tables, the search index and the genre
/// vocabulary. Built once at startup and shared behind an `Arc`; nothing
/// mutates it afterwards.
#[derive(Debug)]
pub struct Catalog {
    titles: Vec<TitleRecord>,
    positions: HashMap<MovieId, usize>,
    ratings: RatingTable,
    index: TitleIndex,
    genres: Vec<String>,
}

impl Catalog {
    /// Builds the catalog, dropping duplicate titles and ratings of unknown titles
    pub fn new(titles: Vec<TitleRecord>, ratings: impl IntoIterator<Item = Rating>) -> Self {
        let mut positions = HashMap::with_capacity(titles.len());
        let mut unique_titles = Vec::with_capacity(titles.len());
        for title in titles {
            if positions.contains_key(&title.movie_id) {
                tracing::warn!(movie_id = title.movie_id, "Skipping duplicate movie id");
                continue;
            }
            positions.insert(title.movie_id, unique_titles.len());
            unique_titles.push(title);
        }

        let mut dropped = 0usize;
        let ratings = RatingTable::from_ratings(ratings.into_iter().filter(|r| {
            let known = positions.contains_key(&r.movie_id);
            if !known {
                dropped += 1;
            }
            known
        }));
        if dropped > 0 {
            tracing::warn!(dropped, "Dropped ratings referring to unknown movies");
        }

        let search_titles: Vec<&str> = unique_titles.iter().map(|t| t.search_title.as_str()).collect();
        let index = TitleIndex::fit(&search_titles);
        let genres = extract_genre_vocabulary(&unique_titles);

        tracing::info!(
            titles = unique_titles.len(),
            ratings = ratings.len(),
            users = ratings.user_count(),
            features = index.vocabulary_len(),
            genres = genres.len() - 1,
            "Catalog built"
        );

        Self {
            titles: unique_titles,
            positions,
            ratings,
            index,
            genres,
        }
    }

    pub fn titles(&self) -> &[TitleRecord] {
        &self.titles
    }

    pub fn title(&self, movie_id: MovieId) -> Option<&TitleRecord> {
        self.positions.get(&movie_id).map(|&pos| &self.titles[pos])
    }

    pub fn ratings(&self) -> &RatingTable {
        &self.ratings
    }

    pub fn index(&self) -> &TitleIndex {
        &self.index
    }

    /// Genre choices for the form, starting with the "Any" wildcard
    pub fn genres(&self) -> &[String] {
        &self.genres
    }
}

impl From<Dataset> for Catalog {
    fn from(dataset: Dataset) -> Self {
        Catalog::new(dataset.titles, dataset.ratings)
    }
}
