//! Title and genre normalization.
//!
//! Dataset titles put leading articles at the end ("Avengers, The (2012)").
//! Search wants plain tokens, display wants the natural reading order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{recommendation::ANY_GENRE, TitleRecord};

/// Genre tag used by the dataset for movies without genres
pub const NO_GENRES: &str = "(no genres listed)";

/// Separator between tags in a raw genre string
pub const GENRE_DELIMITER: char = '|';

static TRAILING_ARTICLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*), (The|A) \((\d{4})\)$").expect("valid regex"));

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ]").expect("valid regex"));

/// Rewrites a title into the form indexed for search
///
/// "Avengers, The (2012)" becomes "The Avengers 2012". Other titles only lose
/// characters that are not ASCII letters, digits or spaces.
pub fn normalize_for_search(title: &str) -> String {
    if let Some(caps) = TRAILING_ARTICLE.captures(title) {
        return format!("{} {} {}", &caps[2], &caps[1], &caps[3]);
    }
    NON_ALPHANUMERIC.replace_all(title, "").into_owned()
}

/// Rewrites a title into the form shown to users
///
/// "Avengers, The (2012)" becomes "The Avengers (2012)". Other titles are
/// returned unchanged.
pub fn normalize_for_display(title: &str) -> String {
    match TRAILING_ARTICLE.captures(title) {
        Some(caps) => format!("{} {} ({})", &caps[2], &caps[1], &caps[3]),
        None => title.to_string(),
    }
}

/// Turns "Adventure|Animation" into "Adventure, Animation"
pub fn normalize_genre_tag(tag: &str) -> String {
    if tag == NO_GENRES {
        return tag.to_string();
    }
    NON_ALPHANUMERIC.replace_all(tag, ", ").into_owned()
}

/// Distinct genres across all records, in first-seen order, led by "Any"
pub fn extract_genre_vocabulary<'a>(
    records: impl IntoIterator<Item = &'a TitleRecord>,
) -> Vec<String> {
    let mut vocabulary = vec![ANY_GENRE.to_string()];
    for record in records {
        for genre in record.genres.split(GENRE_DELIMITER).map(str::trim) {
            if genre.is_empty() || genre == NO_GENRES {
                continue;
            }
            if !vocabulary.iter().any(|known| known == genre) {
                vocabulary.push(genre.to_string());
            }
        }
    }
    vocabulary
}
