//! Process configuration

use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Request body cap for the form endpoint. Gmail rejects raw messages over
/// 25 MiB; the headroom covers multipart framing and base64 growth.
pub const MAX_FORM_BYTES: usize = 35 * 1024 * 1024;

/// Configuration read once at startup.
///
/// The credential values stay optional: a missing one fails the request that
/// needs it, not process start, so the health endpoint keeps answering on a
/// misconfigured deployment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the service account key JSON (`SERVICE_ACCOUNT_FILE`)
    pub service_account_file: Option<PathBuf>,
    /// User to impersonate, and the default sender (`DELEGATED_USER`)
    pub delegated_user: Option<String>,
    /// Socket address to listen on (`BIND_ADDR`)
    pub bind_addr: String,
}

impl ServerConfig {
    /// Read configuration from the environment
    pub fn from_env() -> Self {
        Self {
            service_account_file: env_var("SERVICE_ACCOUNT_FILE").map(PathBuf::from),
            delegated_user: env_var("DELEGATED_USER"),
            bind_addr: env_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}

/// Empty values count as unset
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
