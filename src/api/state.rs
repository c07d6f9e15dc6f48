use std::sync::Arc;

use crate::{
    catalog::Catalog,
    config::Config,
    services::{CoRatingRecommender, Recommender, TitleSearcher},
};

/// Shared application state
///
/// Everything here is read-only after startup, so handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    pub searcher: Arc<dyn TitleSearcher>,
    pub recommender: Arc<dyn Recommender>,
    /// Genre choices for the form, "Any" first
    pub genres: Arc<[String]>,
    /// Web search endpoint used for result links
    pub search_url: Arc<str>,
}

impl AppState {
    pub fn new(
        searcher: Arc<dyn TitleSearcher>,
        recommender: Arc<dyn Recommender>,
        genres: Vec<String>,
        search_url: impl Into<String>,
    ) -> Self {
        let search_url: String = search_url.into();
        Self {
            searcher,
            recommender,
            genres: genres.into(),
            search_url: search_url.into(),
        }
    }

    /// Wires search and recommendation to one loaded catalog
    pub fn from_catalog(catalog: Arc<Catalog>, config: &Config) -> Self {
        let recommender = CoRatingRecommender::new(catalog.clone(), config.genre_bonus);
        let genres = catalog.genres().to_vec();
        Self::new(
            catalog,
            Arc::new(recommender),
            genres,
            config.search_url.clone(),
        )
    }
}
