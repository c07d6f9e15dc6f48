use std::path::PathBuf;

use serde::Deserialize;

use crate::services::GenreBonus;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Movies table (`movieId,title,genres`)
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// Ratings table (`userId,movieId,rating,timestamp`)
    #[serde(default = "default_ratings_path")]
    pub ratings_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Genre bonus mode: `similarity` or `inverted`
    #[serde(default)]
    pub genre_bonus: GenreBonus,

    /// Web search endpoint used for result links, receives `q=<title>`
    #[serde(default = "default_search_url")]
    pub search_url: String,
}

fn default_movies_path() -> PathBuf {
    PathBuf::from("data/movies.csv")
}

fn default_ratings_path() -> PathBuf {
    PathBuf::from("data/ratings.csv")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_search_url() -> String {
    "https://www.google.com/search".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
