use crate::core::application::ApplicationServices;
use crate::domain::portfolio::{ListLanguagesError, PortfolioService};
use crate::errors::{AppError, internal_error};
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn list_languages<S: ApplicationServices>(
    State(state): State<S>,
) -> Result<impl IntoResponse, AppError> {
    let portfolio_service = state.portfolio_service();

    let result = portfolio_service
        .list_languages()
        .await
        .map_err(|e| match e {
            ListLanguagesError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}
