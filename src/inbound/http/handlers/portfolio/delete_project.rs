use crate::core::application::ApplicationServices;
use crate::domain::auth::Identity;
use crate::domain::portfolio::{
    DeleteProjectError, DeleteProjectServiceParams, PortfolioService, ProjectId,
};
use crate::errors::{AppError, bad_request, internal_error};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Extension;

pub async fn delete_project<S: ApplicationServices>(
    State(state): State<S>,
    Extension(identity): Extension<Identity>,
    project_id: Result<Path<ProjectId>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(project_id) = project_id.map_err(|e| bad_request(e.body_text()))?;

    let result = state
        .portfolio_service()
        .delete_project(DeleteProjectServiceParams { project_id })
        .await
        .map_err(|e| match e {
            DeleteProjectError::NotFound => AppError::NotFound,
            DeleteProjectError::DatabaseError(e) => internal_error(e),
        })?;

    tracing::info!(project_id, subject = identity.subject, "project deleted");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::core::application::Application;
    use crate::core::application::tests::MockAppInstanceParameters;
    use crate::domain::auth::MockAuthService;
    use crate::domain::portfolio::{DeleteProjectError, DeleteProjectResult, MockPortfolioService};
    use crate::inbound::http::handlers::portfolio::fixtures::{authenticated_admin, bearer};
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use http::header::AUTHORIZATION;
    use serde_json::json;
    use std::future;

    fn server(portfolio_service: MockPortfolioService) -> TestServer {
        let app = Application::<MockAuthService, MockPortfolioService>::mock_instance(
            MockAppInstanceParameters {
                config: None,
                auth_service: Some(authenticated_admin()),
                portfolio_service: Some(portfolio_service),
            },
        );

        TestServer::new(router(app)).unwrap()
    }

    #[tokio::test]
    async fn test_delete_project() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service
            .expect_delete_project()
            .withf(|params| params.project_id == 9)
            .times(1)
            .returning(|params| {
                Box::pin(future::ready(Ok(DeleteProjectResult {
                    project_id: params.project_id,
                })))
            });

        let response = server(portfolio_service)
            .delete("/admin/delete-project/9")
            .add_header(AUTHORIZATION, bearer())
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "message": "Project successfully deleted",
            "projectId": 9
        }));
    }

    #[tokio::test]
    async fn test_delete_project_not_found() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service
            .expect_delete_project()
            .times(1)
            .returning(|_| Box::pin(future::ready(Err(DeleteProjectError::NotFound))));

        let response = server(portfolio_service)
            .delete("/admin/delete-project/9")
            .add_header(AUTHORIZATION, bearer())
            .await;

        response.assert_status_not_found();
    }
}
