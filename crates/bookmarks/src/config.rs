//! Backend selection.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCAL_URL: &str = "http://localhost:8001/";
pub const DEFAULT_CLOUD_URL: &str = "https://poma-2sxi.onrender.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Development server on this machine.
    #[default]
    Local,
    /// Hosted production server.
    Cloud,
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Backend::Local),
            "cloud" => Ok(Backend::Cloud),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

/// Where the bookmark backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub backend: Backend,
    pub local_url: String,
    pub cloud_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            local_url: DEFAULT_LOCAL_URL.to_string(),
            cloud_url: DEFAULT_CLOUD_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn is_local(&self) -> bool {
        self.backend == Backend::Local
    }

    /// Base URL of the selected backend, always ending in `/`.
    pub fn base_url(&self) -> String {
        let url = match self.backend {
            Backend::Local => &self.local_url,
            Backend::Cloud => &self.cloud_url,
        };
        if url.ends_with('/') {
            url.clone()
        } else {
            format!("{}/", url)
        }
    }

    pub fn api_v1_url(&self) -> String {
        format!("{}api/v1/", self.base_url())
    }

    /// One-line description for settings screens.
    pub fn describe(&self) -> String {
        match self.backend {
            Backend::Local => format!("Local Development ({})", self.local_url),
            Backend::Cloud => format!("Cloud Production ({})", self.cloud_url),
        }
    }
}
