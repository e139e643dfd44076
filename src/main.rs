//! Pulse Insights - terminal dashboard for the PhonePe Pulse dataset.

mod cli;

use cli::Cli;
use pulse_insights::assets;
use pulse_insights::catalog;
use pulse_insights::config::{Config, ConnectionConfig};
use pulse_insights::dashboard::{Dashboard, Notice};
use pulse_insights::error::{DashboardError, Result};
use pulse_insights::logging;
use pulse_insights::tui::{self, headless};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    if cli.headless || cli.check_catalog {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.check_catalog {
        let checked = catalog::verify_catalog()?;
        println!("{checked} catalogued queries verified against the known schema");
        return Ok(());
    }

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    if let Some(geojson) = &cli.geojson {
        config.dashboard.geojson = Some(geojson.clone());
    }

    let selection = cli.selection()?;
    let connection = resolve_connection(&cli, &config)?;
    info!("Connection: {}", connection.display_string());

    let startup_notices: Vec<Notice> = assets::check_assets(&config.dashboard)
        .iter()
        .map(Notice::from)
        .collect();

    let dashboard = Dashboard::new(connection, &config.dashboard);

    if cli.headless {
        let headless_config = cli.headless_config()?;
        let result = headless::run(&dashboard, selection, startup_notices, &headless_config).await?;
        print!(
            "{}",
            headless::HeadlessOutput::new(headless_config.output_format).format(&result)
        );
        return Ok(());
    }

    tui::run(&dashboard, selection, startup_notices).await
}

/// Resolves the connection with precedence: CLI arguments, the named
/// connection, the default connection, then `MYSQL_*` environment variables.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<ConnectionConfig> {
    let mut connection = cli.to_connection_config()?;

    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = Some(config.get_connection(Some(name)).cloned().ok_or_else(|| {
                DashboardError::config(format!("Connection '{name}' not found in config file"))
            })?);
        }
    }

    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    let mut connection = connection.unwrap_or_default();
    connection.apply_env_defaults();
    Ok(connection)
}
