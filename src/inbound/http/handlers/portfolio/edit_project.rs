use crate::core::application::ApplicationServices;
use crate::domain::auth::Identity;
use crate::domain::portfolio::{
    EditProjectError, EditProjectServiceParams, PortfolioService, ProjectId, ProjectPatch,
};
use crate::errors::{AppError, bad_request, bad_request_invalid_languages, internal_error};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;

/// Every field is optional. `null` is treated like an absent field.
#[derive(Debug, Default, Deserialize)]
pub struct EditProjectRequest {
    name: Option<String>,
    description: Option<String>,
    link: Option<String>,
    languages: Option<Vec<String>>,
}

pub async fn edit_project<S: ApplicationServices>(
    State(state): State<S>,
    Extension(identity): Extension<Identity>,
    project_id: Result<Path<ProjectId>, PathRejection>,
    payload: Result<Json<EditProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(project_id) = project_id.map_err(|e| bad_request(e.body_text()))?;
    let Json(request) = payload.map_err(|e| {
        tracing::debug!("rejected project body: {}", e);
        bad_request("Invalid field types: 'name', 'description' and 'link' must be strings and 'languages' an array of strings.")
    })?;
    let portfolio_service = state.portfolio_service();

    let result = portfolio_service
        .edit_project(EditProjectServiceParams {
            project_id,
            patch: ProjectPatch {
                name: request.name,
                description: request.description,
                link: request.link,
            },
            languages: request.languages,
        })
        .await
        .map_err(|e| match e {
            EditProjectError::NotFound => AppError::NotFound,
            EditProjectError::InvalidLanguages(e) => bad_request_invalid_languages(e),
            EditProjectError::DatabaseError(e) => internal_error(e),
        })?;

    tracing::info!(
        project_id,
        subject = identity.subject,
        changed = ?result.changed_fields,
        "project updated"
    );
    Ok(result)
}
