use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::Html,
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::{GenreFilter, Recommendation},
};

use super::pages::{self, HomeView, Notice};
use super::AppState;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a valid movie title and genre.";
pub const NO_RESULTS_MESSAGE: &str = "No search results found. Please try a different movie title.";

/// Submitted search form
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
}

/// What a form submission produced
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub notices: Vec<Notice>,
    pub rows: Vec<Recommendation>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Home page with an empty form
pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(pages::home(&HomeView {
        genres: &state.genres,
        search_url: &state.search_url,
        ..Default::default()
    }))
}

/// Form submission: search, then recommend from the best match
pub async fn submit_search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    let outcome = search_and_recommend(&state, &form);

    Html(pages::home(&HomeView {
        genres: &state.genres,
        query: &form.title,
        selected_genre: form.genre.as_deref(),
        notices: outcome.notices,
        rows: outcome.rows,
        search_url: &state.search_url,
    }))
}

/// About page
pub async fn about() -> Html<String> {
    Html(pages::about())
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No page at {}", uri.path()))
}

/// Runs search and recommendation for one submission
///
/// A blank title stops before anything is computed; a title matching nothing
/// stops before recommending.
pub fn search_and_recommend(state: &AppState, form: &SearchForm) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();

    let query = form.title.trim();
    if query.is_empty() {
        outcome
            .notices
            .push(Notice::Error(EMPTY_QUERY_MESSAGE.to_string()));
        return outcome;
    }

    let genre = GenreFilter::parse(form.genre.as_deref());
    let echo = match genre.genre() {
        Some(requested) => format!("You searched for {} and {}", query, requested),
        None => format!("You searched for {}", query),
    };
    outcome.notices.push(Notice::Success(echo));

    let hits = state.searcher.search(query);
    let Some(best) = hits.first() else {
        tracing::info!(query = %query, "No title matched");
        outcome
            .notices
            .push(Notice::Warning(NO_RESULTS_MESSAGE.to_string()));
        return outcome;
    };
    outcome.notices.push(Notice::Info(format!(
        "Movies similar to {}",
        best.display_title
    )));

    outcome.rows = state.recommender.recommend(best.movie_id, &genre);
    if outcome.rows.is_empty() {
        outcome.notices.push(Notice::Warning(format!(
            "No recommendations found for {}.",
            best.display_title
        )));
    }

    tracing::info!(
        query = %query,
        genre = ?genre.genre(),
        matched = best.movie_id,
        recommendations = outcome.rows.len(),
        "Search handled"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::SearchHit;
    use crate::services::recommendations::MockRecommender;
    use crate::services::title_search::MockTitleSearcher;

    fn create_state(searcher: MockTitleSearcher, recommender: MockRecommender) -> AppState {
        AppState::new(
            Arc::new(searcher),
            Arc::new(recommender),
            vec!["Any".to_string(), "Comedy".to_string()],
            "https://www.google.com/search",
        )
    }

    fn toy_story_hit() -> SearchHit {
        SearchHit {
            movie_id: 1,
            display_title: "Toy Story (1995)".to_string(),
            display_genres: "Adventure, Animation".to_string(),
            similarity: 1.0,
        }
    }

    fn recommendation(movie_id: u32, title: &str) -> Recommendation {
        Recommendation {
            movie_id,
            display_title: title.to_string(),
            display_genres: "Comedy".to_string(),
            score: 1.5,
            similar_score: 0.6,
            baseline_score: 0.4,
        }
    }

    #[tokio::test]
    async fn test_blank_title_never_searches() {
        let mut searcher = MockTitleSearcher::new();
        searcher.expect_search().never();
        let mut recommender = MockRecommender::new();
        recommender.expect_recommend().never();
        let state = create_state(searcher, recommender);

        for title in ["", "   "] {
            let form = SearchForm {
                title: title.to_string(),
                genre: Some("Comedy".to_string()),
            };
            let Html(body) = submit_search(State(state.clone()), Form(form)).await;
            assert!(body.contains(EMPTY_QUERY_MESSAGE));
            assert!(!body.contains("You searched for"));
        }
    }

    #[test]
    fn test_no_hits_skips_recommender() {
        let mut searcher = MockTitleSearcher::new();
        searcher
            .expect_search()
            .withf(|query| query == "Godzilla")
            .times(1)
            .returning(|_| Vec::new());
        let mut recommender = MockRecommender::new();
        recommender.expect_recommend().never();
        let state = create_state(searcher, recommender);

        let outcome = search_and_recommend(
            &state,
            &SearchForm {
                title: "  Godzilla ".to_string(),
                genre: None,
            },
        );

        assert_eq!(
            outcome.notices,
            vec![
                Notice::Success("You searched for Godzilla".to_string()),
                Notice::Warning(NO_RESULTS_MESSAGE.to_string()),
            ]
        );
        assert!(outcome.rows.is_empty());
    }

    #[test]
    fn test_top_hit_and_genre_reach_recommender() {
        let mut searcher = MockTitleSearcher::new();
        searcher.expect_search().times(1).returning(|_| {
            let mut second = toy_story_hit();
            second.movie_id = 3114;
            vec![toy_story_hit(), second]
        });
        let mut recommender = MockRecommender::new();
        recommender
            .expect_recommend()
            .withf(|&movie_id, genre| {
                movie_id == 1 && matches!(genre, GenreFilter::Genre(g) if g == "Comedy")
            })
            .times(1)
            .returning(|_, _| vec![recommendation(2, "Jumanji (1995)")]);
        let state = create_state(searcher, recommender);

        let outcome = search_and_recommend(
            &state,
            &SearchForm {
                title: "toy story".to_string(),
                genre: Some("Comedy".to_string()),
            },
        );

        assert_eq!(
            outcome.notices[0],
            Notice::Success("You searched for toy story and Comedy".to_string())
        );
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].movie_id, 2);
    }

    #[test]
    fn test_any_genre_means_no_filter() {
        let mut searcher = MockTitleSearcher::new();
        searcher
            .expect_search()
            .returning(|_| vec![toy_story_hit()]);
        let mut recommender = MockRecommender::new();
        recommender
            .expect_recommend()
            .withf(|_, genre| matches!(genre, GenreFilter::Any))
            .times(1)
            .returning(|_, _| Vec::new());
        let state = create_state(searcher, recommender);

        let outcome = search_and_recommend(
            &state,
            &SearchForm {
                title: "toy story".to_string(),
                genre: Some("Any".to_string()),
            },
        );

        assert_eq!(
            outcome.notices.first(),
            Some(&Notice::Success("You searched for toy story".to_string()))
        );
        assert_eq!(
            outcome.notices.last(),
            Some(&Notice::Warning(
                "No recommendations found for Toy Story (1995).".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_submit_renders_table() {
        let mut searcher = MockTitleSearcher::new();
        searcher
            .expect_search()
            .returning(|_| vec![toy_story_hit()]);
        let mut recommender = MockRecommender::new();
        recommender
            .expect_recommend()
            .returning(|_, _| vec![recommendation(2, "Jumanji (1995)")]);
        let state = create_state(searcher, recommender);

        let form = SearchForm {
            title: "toy story".to_string(),
            genre: None,
        };
        let Html(body) = submit_search(State(state), Form(form)).await;

        assert!(body.contains("<table"));
        assert!(body.contains("https://www.google.com/search?q=Jumanji%20%281995%29"));
        assert!(body.contains(r#"name="title" value="toy story""#));
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}
