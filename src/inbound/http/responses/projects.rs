use crate::domain::portfolio::{
    CreateProjectResult, DeleteProjectResult, EditProjectResult, ListProjectsResult,
    ProjectWithLanguages,
};
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use time::OffsetDateTime;

////////////////////////////////////////////////////////////////////////////////////////////////////
// List
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
pub struct ProjectResponse {
    id: i64,
    name: String,
    description: Option<String>,
    github_url: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    languages: Vec<String>,
}

impl From<ProjectWithLanguages> for ProjectResponse {
    fn from(value: ProjectWithLanguages) -> Self {
        Self {
            id: value.project.id,
            name: value.project.name,
            description: value.project.description,
            github_url: value.project.link,
            created_at: value.project.created_at,
            languages: value.languages,
        }
    }
}

impl IntoResponse for ListProjectsResult {
    fn into_response(self) -> Response {
        let response: Vec<ProjectResponse> =
            self.projects.into_iter().map(|project| project.into()).collect();

        (StatusCode::OK, Json(response)).into_response()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Create
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreatedResponse {
    message: String,
    project_id: i64,
}

impl IntoResponse for CreateProjectResult {
    fn into_response(self) -> Response {
        let response = ProjectCreatedResponse {
            message: "Project successfully created".to_string(),
            project_id: self.project_id,
        };

        (StatusCode::CREATED, Json(response)).into_response()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Edit
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdatedResponse {
    message: String,
    project_id: i64,
    rows_affected: u64,
    changed_fields: Vec<&'static str>,
    languages_added: Vec<String>,
    languages_removed: Vec<String>,
}

impl IntoResponse for EditProjectResult {
    fn into_response(self) -> Response {
        let response = ProjectUpdatedResponse {
            message: "Project successfully updated".to_string(),
            project_id: self.project_id,
            rows_affected: self.rows_affected,
            changed_fields: self.changed_fields,
            languages_added: self.languages_added,
            languages_removed: self.languages_removed,
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Delete
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeletedResponse {
    message: String,
    project_id: i64,
}

impl IntoResponse for DeleteProjectResult {
    fn into_response(self) -> Response {
        let response = ProjectDeletedResponse {
            message: "Project successfully deleted".to_string(),
            project_id: self.project_id,
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}
