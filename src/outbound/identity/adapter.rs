use crate::domain::auth::{
    IdentityPort, VerifyIdTokenError, VerifyIdTokenParams, VerifyIdTokenResult,
};
use async_trait::async_trait;
use oauth2::{HttpClientError, url};
use openidconnect::core::{
    CoreIdToken, CoreIdTokenVerifier, CoreJsonWebKeySet, CoreProviderMetadata,
};
use openidconnect::{
    ClaimsVerificationError, ClientId, DiscoveryError, IssuerUrl, JsonWebKeySetUrl, Nonce,
};
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    URLParseError(#[from] url::ParseError),

    #[error(transparent)]
    DiscoveryError(#[from] DiscoveryError<HttpClientError<reqwest::Error>>),
}

/// Signing keys are re-fetched at most once per interval, whatever the
/// outcome of the previous fetch.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct SigningKeys {
    keys: CoreJsonWebKeySet,
    fetched_at: Instant,
}

impl SigningKeys {
    fn refresh_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) >= MIN_REFRESH_INTERVAL
    }
}

/// Verifies ID tokens issued by an OpenID Connect provider against its
/// published signing keys.
#[derive(Debug)]
pub struct IdentityAdapter {
    http_client: reqwest::Client,
    client_id: ClientId,
    issuer_url: IssuerUrl,
    jwks_url: JsonWebKeySetUrl,
    signing_keys: RwLock<SigningKeys>,
}

pub struct NewIdentityAdapterParams {
    pub issuer_url: String,
    pub audience: String,
}

impl IdentityAdapter {
    pub async fn new(params: NewIdentityAdapterParams) -> Result<Self, Error> {
        tracing::debug!(
            issuer = params.issuer_url,
            audience = params.audience,
            "retrieving identity provider metadata"
        );
        let issuer_url = IssuerUrl::new(params.issuer_url)?;

        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let provider_metadata =
            CoreProviderMetadata::discover_async(issuer_url.clone(), &http_client).await?;
        tracing::debug!(
            keys = provider_metadata.jwks().keys().len(),
            "retrieved identity provider metadata"
        );

        Ok(Self {
            http_client,
            client_id: ClientId::new(params.audience),
            issuer_url,
            jwks_url: provider_metadata.jwks_uri().clone(),
            signing_keys: RwLock::new(SigningKeys {
                keys: provider_metadata.jwks().clone(),
                fetched_at: Instant::now(),
            }),
        })
    }

    async fn verify(
        &self,
        id_token: &CoreIdToken,
    ) -> Result<VerifyIdTokenResult, ClaimsVerificationError> {
        let signing_keys = self.signing_keys.read().await.keys.clone();
        let verifier = CoreIdTokenVerifier::new_public_client(
            self.client_id.clone(),
            self.issuer_url.clone(),
            signing_keys,
        );

        // admin ID tokens are obtained out of band, so there is no nonce to match
        let claims = id_token.claims(&verifier, |_: Option<&Nonce>| Ok::<(), String>(()))?;

        Ok(VerifyIdTokenResult {
            subject: claims.subject().as_str().to_string(),
            email: claims.email().map(|email| email.as_str().to_string()),
        })
    }

    /// Returns `false` without contacting the provider when the keys were
    /// fetched less than `MIN_REFRESH_INTERVAL` ago.
    async fn refresh_signing_keys(&self) -> Result<bool, VerifyIdTokenError> {
        let mut signing_keys = self.signing_keys.write().await;
        let now = Instant::now();
        if !signing_keys.refresh_due(now) {
            return Ok(false);
        }
        signing_keys.fetched_at = now;

        signing_keys.keys = CoreJsonWebKeySet::fetch_async(&self.jwks_url, &self.http_client)
            .await
            .map_err(|e| {
                error!("failed to fetch signing keys: {}", e);
                VerifyIdTokenError::SigningKeysError
            })?;

        Ok(true)
    }
}

#[async_trait]
impl IdentityPort for IdentityAdapter {
    async fn verify_id_token(
        &self,
        params: VerifyIdTokenParams,
    ) -> Result<VerifyIdTokenResult, VerifyIdTokenError> {
        let id_token = CoreIdToken::from_str(params.token.secret()).map_err(|e| {
            debug!("failed to parse id token: {}", e);
            VerifyIdTokenError::MalformedToken
        })?;

        match self.verify(&id_token).await {
            // signing keys rotate; retry once with a fresh key set
            Err(ClaimsVerificationError::SignatureVerification(e)) => {
                debug!("signature verification failed: {}", e);
                if !self.refresh_signing_keys().await? {
                    return Err(ClaimsVerificationError::SignatureVerification(e).into());
                }

                Ok(self.verify(&id_token).await?)
            }
            result => Ok(result?),
        }
    }
}
