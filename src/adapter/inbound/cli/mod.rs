//! CLI module graph and dispatch.

pub mod analysis;
pub mod command;
pub mod config;
pub mod optimize;
pub mod output;
pub mod securities;

use std::sync::Arc;

use tracing::debug;

use self::command::{Cli, Commands, ConfigCommand, SecuritiesCommand};
use crate::adapter::outbound::http::HttpPortfolioService;
use crate::application::request::RequestState;
use crate::application::session::PortfolioSession;
use crate::error::{Error, Result};
use crate::infrastructure::config::logging::LoggingConfig;
use crate::infrastructure::config::settings::Config;

/// Run the parsed command line.
///
/// Loads configuration, installs logging and dispatches to the handler.
///
/// # Errors
///
/// Returns the first configuration, validation or request error.
pub async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config(ConfigCommand::Validate) = cli.command {
        return config::execute_validate(&cli.config);
    }

    let config = Config::load_or_default(&cli.config)?;
    logging_for(&config.logging, cli.verbose, cli.quiet).init();
    debug!(path = %cli.config.display(), base_url = %config.service.base_url, "Configuration loaded");

    if let Commands::Config(ConfigCommand::Show) = cli.command {
        config::execute_show(&config);
        return Ok(());
    }

    let service = HttpPortfolioService::from_config(&config.service)?;
    let session = PortfolioSession::new(Arc::new(service), config.session_settings());

    match cli.command {
        Commands::Securities(SecuritiesCommand::List(args)) => {
            securities::execute_list(&session, args.grouped).await
        }
        Commands::Securities(SecuritiesCommand::Add(args)) => {
            securities::execute_add(&session, &args.ticker).await
        }
        Commands::Stats(args) => analysis::execute_stats(&session, args.tickers).await,
        Commands::Matrices(args) => analysis::execute_matrices(&session, args.tickers).await,
        Commands::Optimize(args) => optimize::execute(&session, &config, args).await,
        Commands::Config(_) => Ok(()),
    }
}

/// `-v` raises the level to debug, `-vv` to trace; `-q` lowers it to warn.
fn logging_for(base: &LoggingConfig, verbose: u8, quiet: bool) -> LoggingConfig {
    let level = match (verbose, quiet) {
        (0, true) => "warn".to_string(),
        (0, false) => base.level.clone(),
        (1, _) => "debug".to_string(),
        _ => "trace".to_string(),
    };
    LoggingConfig {
        level,
        format: base.format.clone(),
    }
}

/// The value of a settled request, or its banner message as an error.
pub(crate) fn settled<T>(state: RequestState<T>) -> Result<T> {
    match state {
        RequestState::Ready(value) => Ok(value),
        RequestState::Failed(message) => Err(Error::RequestFailed(message)),
        RequestState::Idle | RequestState::Loading => {
            Err(Error::RequestFailed("request did not complete".to_string()))
        }
    }
}
