use crate::core::application::ApplicationServices;
use crate::domain::auth::Identity;
use crate::domain::portfolio::{CreateProjectError, CreateProjectServiceParams, PortfolioService};
use crate::errors::{
    AppError, bad_request_invalid_languages, bad_request_missing_fields, internal_error,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AddProjectRequest {
    name: Option<String>,
    description: Option<String>,
    link: Option<String>,
    languages: Option<Vec<String>>,
}

pub async fn add_project<S: ApplicationServices>(
    State(state): State<S>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<AddProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!("rejected project body: {}", e);
        bad_request_missing_fields()
    })?;
    let portfolio_service = state.portfolio_service();

    let result = portfolio_service
        .create_project(CreateProjectServiceParams {
            name: request.name,
            description: request.description,
            link: request.link,
            languages: request.languages,
        })
        .await
        .map_err(|e| match e {
            CreateProjectError::MissingFields => bad_request_missing_fields(),
            CreateProjectError::InvalidLanguages(e) => bad_request_invalid_languages(e),
            CreateProjectError::DatabaseError(e) => internal_error(e),
        })?;

    tracing::info!(
        project_id = result.project_id,
        subject = identity.subject,
        "project created"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::core::application::Application;
    use crate::core::application::tests::MockAppInstanceParameters;
    use crate::core::config::Config;
    use crate::domain::auth::MockAuthService;
    use crate::domain::portfolio::{
        CreateProjectError, CreateProjectResult, Language, MockDatabaseRepository,
        MockPortfolioService, Service, UnknownLanguages,
    };
    use crate::inbound::http::handlers::portfolio::fixtures::{authenticated_admin, bearer};
    use crate::inbound::http::router;
    use crate::outbound::db::error::Error as DatabaseError;
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
    async fn test_add_project() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service
            .expect_create_project()
            .withf(|params| {
                params.name.as_deref() == Some("A")
                    && params.description.is_none()
                    && params.languages == Some(vec!["Go".to_string()])
            })
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(CreateProjectResult { project_id: 7 }))));

        let response = server(portfolio_service)
            .post("/admin/add-project")
            .add_header(AUTHORIZATION, bearer())
            .json(&json!({
                "name": "A",
                "link": "https://github.com/example/a",
                "languages": ["Go"]
            }))
            .await;

        response.assert_status(http::StatusCode::CREATED);
        response.assert_json(&json!({
            "message": "Project successfully created",
            "projectId": 7
        }));
    }

    #[tokio::test]
    async fn test_add_project_requires_token() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service.expect_create_project().times(0);
        let app = Application::<MockAuthService, MockPortfolioService>::mock_instance(
            MockAppInstanceParameters {
                config: None,
                auth_service: None,
                portfolio_service: Some(portfolio_service),
            },
        );
        let server = TestServer::new(router(app)).unwrap();

        let response = server
            .post("/admin/add-project")
            .json(&json!({ "name": "A", "link": "u", "languages": ["Go"] }))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_add_project_languages_not_an_array() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service.expect_create_project().times(0);

        let response = server(portfolio_service)
            .post("/admin/add-project")
            .add_header(AUTHORIZATION, bearer())
            .json(&json!({ "name": "A", "link": "u", "languages": "Go" }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_add_project_missing_fields() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service
            .expect_create_project()
            .times(1)
            .returning(|_| Box::pin(future::ready(Err(CreateProjectError::MissingFields))));

        let response = server(portfolio_service)
            .post("/admin/add-project")
            .add_header(AUTHORIZATION, bearer())
            .json(&json!({ "name": "A", "languages": [] }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_add_project_unknown_language() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service.expect_create_project().times(1).returning(|_| {
            Box::pin(future::ready(Err(CreateProjectError::InvalidLanguages(
                UnknownLanguages(vec!["Cobol".to_string()]),
            ))))
        });

        let response = server(portfolio_service)
            .post("/admin/add-project")
            .add_header(AUTHORIZATION, bearer())
            .json(&json!({ "name": "A", "link": "u", "languages": ["Cobol"] }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_add_project_database_error() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service.expect_create_project().times(1).returning(|_| {
            Box::pin(future::ready(Err(CreateProjectError::DatabaseError(
                DatabaseError::DatabaseError(sqlx::Error::PoolTimedOut),
            ))))
        });

        let response = server(portfolio_service)
            .post("/admin/add-project")
            .add_header(AUTHORIZATION, bearer())
            .json(&json!({ "name": "A", "link": "u", "languages": ["Go"] }))
            .await;

        response.assert_status_internal_server_error();
    }

    #[tokio::test]
    async fn test_add_project_through_service() {
        let mut db = MockDatabaseRepository::new();
        db.expect_list_languages().times(2).returning(|| {
            Box::pin(future::ready(Ok(vec![
                Language {
                    id: 1,
                    name: "Go".to_string(),
                },
                Language {
                    id: 2,
                    name: "Python".to_string(),
                },
            ])))
        });
        db.expect_create_project()
            .withf(|params| params.language_ids == vec![1])
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(1))));

        let mut auth_service = MockAuthService::new();
        auth_service.expect_authenticate().times(2).returning(|_| {
            Box::pin(future::ready(Ok(crate::domain::auth::Identity {
                subject: "admin-uid".to_string(),
                email: None,
            })))
        });

        let app = Application::new(Config::default(), auth_service, Service::new(db));
        let server = TestServer::new(router(app)).unwrap();

        let created = server
            .post("/admin/add-project")
            .add_header(AUTHORIZATION, bearer())
            .json(&json!({ "name": "A", "link": "u", "languages": ["Go"] }))
            .await;
        let rejected = server
            .post("/admin/add-project")
            .add_header(AUTHORIZATION, bearer())
            .json(&json!({ "name": "B", "link": "u", "languages": ["Go", "Cobol"] }))
            .await;

        created.assert_status(http::StatusCode::CREATED);
        rejected.assert_status_bad_request();
    }
}
