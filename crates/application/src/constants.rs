/// Directory under the platform config dir holding POMA settings
pub const CONFIG_DIR_NAME: &str = "poma";

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Overrides the URL of the selected backend
pub const ENV_API_URL: &str = "POMA_API_URL";

/// "local" or "cloud"
pub const ENV_BACKEND: &str = "POMA_BACKEND";

/// Reconciliation interval for the active-session list
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 10_000; // 10 seconds

/// Filter used when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info,poma=debug";
