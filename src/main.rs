//! Subpool - escrow-backed subscription pool service
//!
//! Entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌──────────┐
//! │  Config  │───▶│ PoolService │───▶│ Gateway  │
//! │  (YAML)  │    │ (lifecycle) │    │  (HTTP)  │
//! └──────────┘    └─────────────┘    └──────────┘
//!
//! PoolService responsibilities:
//! - Pool registry with per-pool locking
//! - Escrow transfers through the Ledger Port
//! - Fee split and prorated refund math
//! ```

use std::sync::Arc;

use subpool::clock::SystemClock;
use subpool::config::AppConfig;
use subpool::gateway::{self, state::AppState};
use subpool::ledger::InMemoryLedger;
use subpool::logging::init_logging;
use subpool::service::PoolService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn main() {
    let env = get_env();
    let app_config = AppConfig::load(&env);
    let _log_guard = init_logging(&app_config);

    tracing::info!("Starting Subpool service in {} env (rev {})", env, env!("GIT_HASH"));

    let ledger = Arc::new(InMemoryLedger::new());
    let clock = Arc::new(SystemClock);

    let service = match PoolService::new(
        ledger.clone(),
        clock,
        app_config.platform.owner_account,
        app_config.platform.escrow_account,
        app_config.platform.fee_bps,
    ) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("FATAL: Invalid platform config: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Platform: owner={} escrow={} fee={}bps",
        app_config.platform.owner_account,
        app_config.platform.escrow_account,
        service.platform_fee_bps()
    );

    #[cfg(feature = "mock-ledger")]
    let state = Arc::new(AppState::new(service, ledger));
    #[cfg(not(feature = "mock-ledger"))]
    let state = Arc::new(AppState::new(service));

    let host = app_config.gateway.host.clone();
    let port = get_port_override().unwrap_or(app_config.gateway.port);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime");

    runtime.block_on(gateway::run_server(&host, port, state));
}
