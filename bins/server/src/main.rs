//! Payroll configuration API server.
//!
//! Main entry point for the payroll configuration service.

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payroll_config_api::{AppState, create_router};
use payroll_config_core::rules::RuleSettings;
use payroll_config_db::connect;
use payroll_config_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payroll_config=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let rules = RuleSettings::from(&config.payroll);
    info!(
        minimum_wage = %rules.minimum_wage,
        max_gross_multiplier = %rules.max_gross_multiplier,
        "Payroll rules loaded"
    );

    let state = if config.database.url.is_some() {
        let db = connect(&config.database).await?;
        info!("Connected to database");
        AppState::with_database(db, &rules)
    } else {
        warn!("database.url is not set, configurations are kept in memory only");
        AppState::in_memory(&rules)
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
