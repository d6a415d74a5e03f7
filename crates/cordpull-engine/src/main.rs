//! Engine binary for the Cordpull stop-work decision model.
//!
//! Wires the configuration, the decision session, and the Observer API
//! together, then serves until the process is terminated.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `cordpull-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the decision session and run the initial decision
//! 4. Start the Observer API server and wait on it

mod error;

use std::path::Path;
use std::sync::Arc;

use cordpull_core::config::{CordpullConfig, DEFAULT_CONFIG_PATH};
use cordpull_core::session::DecisionSession;
use cordpull_observer::{AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, session setup, or the Observer
/// server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so report the
    //    fallback after the subscriber is installed.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    let default_level = config.logging.level.clone();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(true)
        .init();

    info!("cordpull-engine starting");
    if from_file {
        info!(path = DEFAULT_CONFIG_PATH, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }
    info!(
        environment = config.scenario.environment.code(),
        log_capacity = config.event_log.capacity,
        host = %config.server.host,
        port = config.server.port,
        "Configuration resolved"
    );

    // 3. Build the session and make the first decision.
    let mut session = DecisionSession::from_config(&config).map_err(EngineError::from)?;
    let initial = session.run_with_thread_rng();
    info!(
        decision_id = %initial.id,
        action = ?initial.outcome.selected_action,
        q_continue = initial.outcome.q_continue_total,
        q_stop = initial.outcome.q_stop_total,
        "Initial decision made"
    );

    // 4. Serve.
    let app_state = Arc::new(AppState::new(session));
    let handle = cordpull_observer::spawn_observer(ServerConfig::from(&config.server), app_state)
        .map_err(EngineError::from)?;

    handle.await.map_err(|e| EngineError::ObserverTask {
        message: format!("{e}"),
    })?;

    info!("cordpull-engine shutdown complete");

    Ok(())
}

/// Load configuration from `cordpull-config.yaml` in the working directory.
///
/// Returns the config and whether it came from the file.
fn load_config() -> Result<(CordpullConfig, bool), EngineError> {
    let config_path = Path::new(DEFAULT_CONFIG_PATH);
    if config_path.exists() {
        let config = CordpullConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        let mut config = CordpullConfig::default();
        config.server.apply_env_overrides();
        Ok((config, false))
    }
}
