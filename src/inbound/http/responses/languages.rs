use crate::domain::portfolio::{Language, ListLanguagesResult};
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
pub struct LanguageResponse {
    id: i64,
    name: String,
}

impl From<Language> for LanguageResponse {
    fn from(value: Language) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl IntoResponse for ListLanguagesResult {
    fn into_response(self) -> Response {
        let response: Vec<LanguageResponse> =
            self.languages.into_iter().map(|language| language.into()).collect();

        (StatusCode::OK, Json(response)).into_response()
    }
}
