use anyhow::anyhow;
use clap::{Parser, Subcommand};
use portfolio::core::application::{Application, ApplicationServices};
use portfolio::core::config::Config;
use portfolio::domain::auth;
use portfolio::inbound::http::router;
use portfolio::outbound::db::connection::Db;
use portfolio::outbound::db::repository::Repository;
use portfolio::outbound::identity::adapter::{IdentityAdapter, NewIdentityAdapterParams};
use std::process::exit;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type ApplicationAlias = Application<
    auth::Service<IdentityAdapter>,
    portfolio::domain::portfolio::Service<Repository>,
>;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long)]
    config_path: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the portfolio API.
    Run,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = start(cli).await {
        error!("Error: {:#?}", e);
        exit(1);
    }
}

async fn start(cli: Cli) -> anyhow::Result<()> {
    let config = Config::parse(cli.config_path)?;
    if !config.is_valid() {
        return Err(anyhow!("config is not valid"));
    }

    let db = Db::connect(config.db.connection_string().as_str()).await?;
    db.migrate().await?;
    tracing::debug!("database schema is up to date");

    let application = create_application(db, config).await?;

    match cli.command {
        None => Ok(()),
        Some(Commands::Run) => run_server(application).await,
    }
}

async fn create_application(db: Db, config: Config) -> anyhow::Result<ApplicationAlias> {
    tracing::debug!("creating identity adapter");
    let identity_adapter = IdentityAdapter::new(NewIdentityAdapterParams {
        issuer_url: config.identity.issuer_url.clone(),
        audience: config.identity.audience.clone(),
    })
    .await
    .map_err(|e| anyhow!(e.to_string()))?;
    tracing::debug!("created identity adapter");

    let auth_service = auth::Service::new(identity_adapter);
    let portfolio_service = portfolio::domain::portfolio::Service::new(Repository::from_db(&db));

    Ok(Application::new(config, auth_service, portfolio_service))
}

async fn run_server(app: ApplicationAlias) -> anyhow::Result<()> {
    let bind_address = app.config().bind_address().to_string();
    let router = router(app);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| anyhow!("server failed to bind {}: {}", bind_address, e))?;

    tracing::info!(
        "listening on {}",
        listener
            .local_addr()
            .map_err(|_| anyhow!("failed to get local_addr"))?
    );

    axum::serve(listener, router)
        .await
        .map_err(|_| anyhow!("failed to start server"))
}
