use crate::core::config::Config;
use crate::domain::auth::AuthService;
use crate::domain::portfolio::PortfolioService;
use std::sync::Arc;

/// Shared handler state. Cloning is cheap: every clone points at the same
/// config and services.
pub trait ApplicationServices: Clone + Send + Sync {
    type AUTH: AuthService + Send;
    type PORTFOLIO: PortfolioService + Send;

    fn config(&self) -> &Config;

    fn auth_service(&self) -> Arc<Self::AUTH>;

    fn portfolio_service(&self) -> Arc<Self::PORTFOLIO>;
}

pub struct Application<AUTH, PORTFOLIO> {
    config: Arc<Config>,
    auth_service: Arc<AUTH>,
    portfolio_service: Arc<PORTFOLIO>,
}

impl<AUTH, PORTFOLIO> Application<AUTH, PORTFOLIO>
where
    AUTH: AuthService + Send + Sync + 'static,
    PORTFOLIO: PortfolioService + Send + Sync + 'static,
{
    pub fn new(config: Config, auth_service: AUTH, portfolio_service: PORTFOLIO) -> Self {
        Self {
            config: Arc::new(config),
            auth_service: Arc::new(auth_service),
            portfolio_service: Arc::new(portfolio_service),
        }
    }
}

// derive(Clone) would require AUTH: Clone and PORTFOLIO: Clone
impl<AUTH, PORTFOLIO> Clone for Application<AUTH, PORTFOLIO> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            auth_service: Arc::clone(&self.auth_service),
            portfolio_service: Arc::clone(&self.portfolio_service),
        }
    }
}

impl<AUTH, PORTFOLIO> ApplicationServices for Application<AUTH, PORTFOLIO>
where
    AUTH: AuthService + Send + Sync + 'static,
    PORTFOLIO: PortfolioService + Send + Sync + 'static,
{
    type AUTH = AUTH;
    type PORTFOLIO = PORTFOLIO;

    fn config(&self) -> &Config {
        &self.config
    }

    fn auth_service(&self) -> Arc<Self::AUTH> {
        Arc::clone(&self.auth_service)
    }

    fn portfolio_service(&self) -> Arc<Self::PORTFOLIO> {
        Arc::clone(&self.portfolio_service)
    }
}

#[cfg(test)]
pub mod tests {
    use crate::core::application::{Application, ApplicationServices};
    use crate::core::config::Config;
    use crate::domain::auth::MockAuthService;
    use crate::domain::portfolio::MockPortfolioService;
    use std::sync::Arc;

    /// Unset fields fall back to a default config and mocks without expectations.
    #[derive(Default)]
    pub struct MockAppInstanceParameters {
        pub config: Option<Config>,
        pub auth_service: Option<MockAuthService>,
        pub portfolio_service: Option<MockPortfolioService>,
    }

    impl Application<MockAuthService, MockPortfolioService> {
        pub fn mock_instance(params: MockAppInstanceParameters) -> Self {
            Application::new(
                params.config.unwrap_or_default(),
                params.auth_service.unwrap_or_default(),
                params.portfolio_service.unwrap_or_default(),
            )
        }
    }

    #[test]
    fn test_clones_share_state() {
        let app = Application::mock_instance(MockAppInstanceParameters {
            config: Some(Config {
                bind_address: Some("127.0.0.1:8080".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });
        let clone = app.clone();

        assert!(Arc::ptr_eq(&app.auth_service(), &clone.auth_service()));
        assert!(Arc::ptr_eq(&app.portfolio_service(), &clone.portfolio_service()));
        assert!(std::ptr::eq(app.config(), clone.config()));
        assert_eq!("127.0.0.1:8080", clone.config().bind_address());
    }
}
