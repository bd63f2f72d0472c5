use crate::core::application::{Application, ApplicationServices};
use crate::domain::auth::AuthService;
use crate::domain::portfolio::PortfolioService;
use crate::inbound::http::handlers::{
    add_project, delete_project, edit_project, list_languages, list_projects, server_health,
};
use crate::inbound::http::middleware::auth;
use axum::Router;
use axum::extract::{MatchedPath, Request};
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method, StatusCode};
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn router<
    AUTH: AuthService + Send + Sync + 'static,
    PORTFOLIO: PortfolioService + Send + Sync + 'static,
>(
    application: Application<AUTH, PORTFOLIO>,
) -> Router {
    let config = application.config();

    let hosts: Vec<HeaderValue> = config
        .cors_hosts
        .iter()
        .filter_map(|host| match host.parse() {
            Ok(host) => Some(host),
            Err(_) => {
                tracing::warn!(host, "ignoring invalid cors host");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![ORIGIN, AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_origin(hosts);

    let admin_routes = admin_routes(application.clone());

    Router::new()
        .route("/healthz", get(server_health))
        .route("/projects", get(list_projects::<Application<AUTH, PORTFOLIO>>))
        .route("/languages", get(list_languages::<Application<AUTH, PORTFOLIO>>))
        .nest("/admin", admin_routes)
        .layer(cors)
        .layer((
            SetSensitiveHeadersLayer::new([AUTHORIZATION]),
            CompressionLayer::new(),
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    let method = req.method();
                    let uri = req.uri();

                    let matched_path = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::debug_span!("request", %method, %uri, matched_path)
                })
                .on_failure(()),
            TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, Duration::from_secs(30)),
            CatchPanicLayer::new(),
        ))
        .with_state(application)
}

/// Routes that mutate the portfolio; every one requires a verified bearer token.
fn admin_routes<APP>(application: APP) -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route("/add-project", post(add_project::<APP>))
        .route("/edit-project/{id}", put(edit_project::<APP>))
        .route("/delete-project/{id}", delete(delete_project::<APP>))
        .route_layer(from_fn_with_state(application, auth::<APP>))
}

#[cfg(test)]
mod tests {
    use super::router;
    use crate::core::application::Application;
    use crate::core::application::tests::MockAppInstanceParameters;
    use crate::core::config::Config;
    use crate::domain::auth::MockAuthService;
    use crate::domain::portfolio::MockPortfolioService;
    use axum_test::TestServer;
    use http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
    use http::{HeaderValue, StatusCode};

    fn server(config: Config) -> TestServer {
        let mut auth_service = MockAuthService::new();
        auth_service.expect_authenticate().times(0);
        let app = Application::<MockAuthService, MockPortfolioService>::mock_instance(
            MockAppInstanceParameters {
                config: Some(config),
                auth_service: Some(auth_service),
                portfolio_service: None,
            },
        );

        TestServer::new(router(app)).unwrap()
    }

    #[tokio::test]
    async fn test_admin_routes_require_token() {
        let server = server(Config::default());

        server
            .post("/admin/add-project")
            .await
            .assert_status_unauthorized();
        server
            .put("/admin/edit-project/1")
            .await
            .assert_status_unauthorized();
        server
            .delete("/admin/delete-project/1")
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let server = server(Config::default());

        server
            .get("/admin/unknown")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allowed_host() {
        let server = server(Config {
            cors_hosts: vec!["https://portfolio.example.com".to_string(), "\n".to_string()],
            ..Default::default()
        });

        let response = server
            .get("/healthz")
            .add_header(ORIGIN, HeaderValue::from_static("https://portfolio.example.com"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            "https://portfolio.example.com",
            response.header(ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }
}
