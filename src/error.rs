use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Dataset error in {path}: {source}")]
    Dataset {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Attaches the offending file to a CSV error
    pub fn dataset(path: impl Into<String>, source: csv::Error) -> Self {
        AppError::Dataset {
            path: path.into(),
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Dataset { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        tracing::warn!(status = %status, error = %message, "Request failed");

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = AppError::NotFound("page".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_dataset_error_names_file() {
        let source = csv::Reader::from_reader("a\nnot-a-number\n".as_bytes())
            .deserialize::<(u32,)>()
            .next()
            .unwrap()
            .unwrap_err();
        let err = AppError::dataset("data/movies.csv", source);
        assert!(err.to_string().contains("data/movies.csv"));
    }
}
