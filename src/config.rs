use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
    pub gateway: GatewayConfig,
    pub platform: PlatformConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Platform-level accounts and the initial fee setting.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlatformConfig {
    /// Account receiving platform fees and holding the admin role
    pub owner_account: u64,
    /// Ledger account all pool escrow is held in
    pub escrow_account: u64,
    /// Initial platform fee in basis points (max 1000 = 10%)
    pub fee_bps: u64,
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}
