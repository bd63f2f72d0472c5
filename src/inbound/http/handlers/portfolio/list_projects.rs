use crate::core::application::ApplicationServices;
use crate::domain::portfolio::{ListProjectsError, ListProjectsServiceParams, PortfolioService};
use crate::errors::{AppError, bad_request, bad_request_invalid_languages, internal_error};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListProjectsQueryParams {
    lang: Option<String>,
}

impl ListProjectsQueryParams {
    /// Comma separated language names; blank entries are dropped.
    fn languages(&self) -> Vec<String> {
        self.lang
            .as_deref()
            .map(|lang| {
                lang.split(',')
                    .map(str::trim)
                    .filter(|language| !language.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub async fn list_projects<S: ApplicationServices>(
    State(state): State<S>,
    query_params: Result<Query<ListProjectsQueryParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query_params) = query_params.map_err(|e| bad_request(e.body_text()))?;
    let portfolio_service = state.portfolio_service();

    let result = portfolio_service
        .list_projects(ListProjectsServiceParams {
            languages: query_params.languages(),
        })
        .await
        .map_err(|e| match e {
            ListProjectsError::InvalidLanguages(e) => bad_request_invalid_languages(e),
            ListProjectsError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::ListProjectsQueryParams;
    use crate::core::application::Application;
    use crate::core::application::tests::MockAppInstanceParameters;
    use crate::domain::auth::MockAuthService;
    use crate::domain::portfolio::{
        ListProjectsError, ListProjectsResult, MockPortfolioService, ProjectWithLanguages,
        UnknownLanguages,
    };
    use crate::inbound::http::handlers::portfolio::fixtures::project;
    use crate::inbound::http::router;
    use crate::outbound::db::error::Error as DatabaseError;
    use axum_test::TestServer;
    use serde_json::json;
    use std::future;

    fn server(portfolio_service: MockPortfolioService) -> TestServer {
        let app = Application::<MockAuthService, MockPortfolioService>::mock_instance(
            MockAppInstanceParameters {
                config: None,
                auth_service: None,
                portfolio_service: Some(portfolio_service),
            },
        );

        TestServer::new(router(app)).unwrap()
    }

    #[test]
    fn test_query_languages() {
        let params = ListProjectsQueryParams {
            lang: Some("Go, Python,,".to_string()),
        };

        assert_eq!(vec!["Go", "Python"], params.languages());
        assert!(
            ListProjectsQueryParams { lang: None }
                .languages()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_list_projects() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service
            .expect_list_projects()
            .withf(|params| params.languages.is_empty())
            .times(1)
            .returning(|_| {
                Box::pin(future::ready(Ok(ListProjectsResult {
                    projects: vec![
                        ProjectWithLanguages {
                            project: project(1, "a"),
                            languages: vec!["Go".to_string()],
                        },
                        ProjectWithLanguages {
                            project: project(2, "b"),
                            languages: vec![],
                        },
                    ],
                })))
            });

        let response = server(portfolio_service).get("/projects").await;

        response.assert_status_ok();
        response.assert_json(&json!([
            {
                "id": 1,
                "name": "a",
                "description": null,
                "github_url": "https://github.com/example/a",
                "created_at": "2025-01-01T12:00:00Z",
                "languages": ["Go"]
            },
            {
                "id": 2,
                "name": "b",
                "description": null,
                "github_url": "https://github.com/example/b",
                "created_at": "2025-01-01T12:00:00Z",
                "languages": []
            }
        ]));
    }

    #[tokio::test]
    async fn test_list_projects_filter() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service
            .expect_list_projects()
            .withf(|params| params.languages == vec!["Go".to_string(), "Python".to_string()])
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(ListProjectsResult { projects: vec![] }))));

        let response = server(portfolio_service)
            .get("/projects?lang=Go,Python")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_list_projects_invalid_language() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service.expect_list_projects().times(1).returning(|_| {
            Box::pin(future::ready(Err(ListProjectsError::InvalidLanguages(
                UnknownLanguages(vec!["Cobol".to_string()]),
            ))))
        });

        let response = server(portfolio_service)
            .get("/projects?lang=Cobol")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_list_projects_repeated_lang_parameter() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service.expect_list_projects().times(0);

        let response = server(portfolio_service)
            .get("/projects?lang=Go&lang=Python")
            .await;

        response.assert_status_bad_request();
        let body = response.json::<serde_json::Value>();
        assert_eq!(400, body["code"]);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_list_projects_database_error() {
        let mut portfolio_service = MockPortfolioService::new();
        portfolio_service.expect_list_projects().times(1).returning(|_| {
            Box::pin(future::ready(Err(ListProjectsError::DatabaseError(
                DatabaseError::DatabaseError(sqlx::Error::PoolTimedOut),
            ))))
        });

        let response = server(portfolio_service).get("/projects").await;

        response.assert_status_internal_server_error();
    }
}
