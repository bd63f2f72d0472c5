use crate::domain::auth::{BearerToken, Identity};
use async_trait::async_trait;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    async fn authenticate(
        &self,
        params: ServiceAuthenticateParams,
    ) -> Result<Identity, ServiceAuthenticateError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Ports
////////////////////////////////////////////////////////////////////////////////////////////////////

/// The external identity provider that issued the admin's ID token.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait IdentityPort: Send + Sync {
    async fn verify_id_token(
        &self,
        params: VerifyIdTokenParams,
    ) -> Result<VerifyIdTokenResult, VerifyIdTokenError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Results
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct VerifyIdTokenResult {
    pub subject: String,
    pub email: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct ServiceAuthenticateParams {
    pub token: BearerToken,
}

#[derive(Debug)]
pub struct VerifyIdTokenParams {
    pub token: BearerToken,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum ServiceAuthenticateError {
    #[error("token verification failed")]
    VerificationError(#[from] VerifyIdTokenError),
}

#[derive(Debug, Error)]
pub enum VerifyIdTokenError {
    #[error("malformed id token")]
    MalformedToken,

    #[error(transparent)]
    ClaimsError(#[from] openidconnect::ClaimsVerificationError),

    #[error("failed to fetch signing keys")]
    SigningKeysError,
}
