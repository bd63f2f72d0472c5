use crate::domain::auth::{
    AuthService, Identity, IdentityPort, ServiceAuthenticateError, ServiceAuthenticateParams,
    VerifyIdTokenParams,
};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Service<IDENTITY>
where
    IDENTITY: IdentityPort + Send + Sync + 'static,
{
    identity_adapter: Arc<IDENTITY>,
}

impl<IDENTITY> Service<IDENTITY>
where
    IDENTITY: IdentityPort + Send + Sync + 'static,
{
    pub fn new(identity_adapter: IDENTITY) -> Self {
        Self {
            identity_adapter: Arc::new(identity_adapter),
        }
    }
}

#[async_trait]
impl<IDENTITY> AuthService for Service<IDENTITY>
where
    IDENTITY: IdentityPort + Send + Sync + 'static,
{
    async fn authenticate(
        &self,
        params: ServiceAuthenticateParams,
    ) -> Result<Identity, ServiceAuthenticateError> {
        let verified = self
            .identity_adapter
            .verify_id_token(VerifyIdTokenParams {
                token: params.token,
            })
            .await
            .inspect_err(|e| tracing::debug!("id token rejected: {}", e))?;

        tracing::debug!(subject = verified.subject, "authenticated admin");

        Ok(Identity {
            subject: verified.subject,
            email: verified.email,
        })
    }
}
