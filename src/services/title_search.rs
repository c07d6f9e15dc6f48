use crate::{
    catalog::Catalog,
    models::SearchHit,
    services::normalize::normalize_for_search,
};

/// Number of candidates returned by a title search
pub const SEARCH_LIMIT: usize = 5;

/// Maps free text to the closest known titles
///
/// Implementations return at most a handful of hits ordered best first and
/// never fail: an unmatched query yields an empty list.
#[cfg_attr(test, mockall::automock)]
pub trait TitleSearcher: Send + Sync {
    fn search(&self, query: &str) -> Vec<SearchHit>;
}

impl TitleSearcher for Catalog {
    fn search(&self, query: &str) -> Vec<SearchHit> {
        search_titles(self, query, SEARCH_LIMIT)
    }
}

/// TF-IDF search over the catalog's title index
///
/// The query is normalized like the indexed titles, scored by cosine
/// similarity against every row, and the `limit` best rows are returned best
/// first. Equal scores keep catalog order. Rows sharing no feature with the
/// query are never returned.
pub fn search_titles(catalog: &Catalog, query: &str, limit: usize) -> Vec<SearchHit> {
    let index = catalog.index();
    if index.is_empty() || limit == 0 {
        return Vec::new();
    }

    let normalized = normalize_for_search(query);
    let query_vector = index.transform(&normalized);
    if query_vector.is_empty() {
        tracing::debug!(query = %query, "Query shares no feature with the index");
        return Vec::new();
    }

    let mut scored: Vec<(usize, f64)> = index
        .rows()
        .iter()
        .map(|row| query_vector.cosine_similarity(row))
        .enumerate()
        .filter(|&(_, similarity)| similarity > 0.0)
        .collect();

    let best_first =
        |a: &(usize, f64), b: &(usize, f64)| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0));
    if scored.len() > limit {
        scored.select_nth_unstable_by(limit - 1, best_first);
        scored.truncate(limit);
    }
    scored.sort_by(best_first);

    let titles = catalog.titles();
    let hits: Vec<SearchHit> = scored
        .into_iter()
        .map(|(pos, similarity)| {
            let title = &titles[pos];
            SearchHit {
                movie_id: title.movie_id,
                display_title: title.display_title.clone(),
                display_genres: title.display_genres.clone(),
                similarity,
            }
        })
        .collect();

    tracing::debug!(
        query = %query,
        normalized = %normalized,
        hits = hits.len(),
        top = ?hits.first().map(|h| h.movie_id),
        "Title search"
    );

    hits
}
