use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, BearerToken, ServiceAuthenticateParams};
use crate::errors::{AppError, unauthorized_missing_token, unauthorized_verification_failed};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;

/// Requires a bearer ID token verified by the identity provider. The resulting
/// `Identity` is made available to handlers as a request extension.
pub async fn auth<S: ApplicationServices>(
    State(state): State<S>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(BearerToken::from_header)
        .ok_or_else(unauthorized_missing_token)?;

    let identity = state
        .auth_service()
        .authenticate(ServiceAuthenticateParams { token })
        .await
        .map_err(|_| unauthorized_verification_failed())?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
