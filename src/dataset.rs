//! CSV loading for the movies and ratings tables (MovieLens layout).

use std::{io::Read, path::Path};

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{rating::RatingRow, title::MovieRow, Rating, TitleRecord},
};

/// Raw tables as read from disk, before the catalog is built
#[derive(Debug, Default)]
pub struct Dataset {
    pub titles: Vec<TitleRecord>,
    pub ratings: Vec<Rating>,
}

impl Dataset {
    /// Loads both tables from CSV files
    pub fn load(movies_path: &Path, ratings_path: &Path) -> AppResult<Self> {
        let titles = load_titles(movies_path)?;
        let ratings = load_ratings(ratings_path)?;
        Ok(Self { titles, ratings })
    }
}

pub fn load_titles(path: &Path) -> AppResult<Vec<TitleRecord>> {
    let reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::dataset(path.display().to_string(), e))?;
    let titles = read_titles(reader)
        .map_err(|e| AppError::dataset(path.display().to_string(), e))?;

    tracing::info!(path = %path.display(), count = titles.len(), "Loaded movies");
    Ok(titles)
}

pub fn load_ratings(path: &Path) -> AppResult<Vec<Rating>> {
    let reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::dataset(path.display().to_string(), e))?;
    let ratings = read_ratings(reader)
        .map_err(|e| AppError::dataset(path.display().to_string(), e))?;

    let span = rating_span(&ratings);
    tracing::info!(
        path = %path.display(),
        count = ratings.len(),
        first = ?span.map(|(first, _)| first.date_naive()),
        last = ?span.map(|(_, last)| last.date_naive()),
        "Loaded ratings"
    );
    Ok(ratings)
}

/// Reads `movieId,title,genres` rows
pub fn read_titles<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<TitleRecord>, csv::Error> {
    reader
        .deserialize::<MovieRow>()
        .map(|row| row.map(TitleRecord::from))
        .collect()
}

/// Reads `userId,movieId,rating[,timestamp]` rows
pub fn read_ratings<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Rating>, csv::Error> {
    reader
        .deserialize::<RatingRow>()
        .map(|row| row.map(Rating::from))
        .collect()
}

/// Earliest and latest rating time, if any rating carries one
fn rating_span(ratings: &[Rating]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let mut times = ratings.iter().filter_map(|r| r.rated_at);
    let first = times.next()?;
    Some(times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
}
