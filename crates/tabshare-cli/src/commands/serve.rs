//! Web server command

use anyhow::Result;
use tracing::warn;

use tabshare_server::ServerConfig;

/// Start the web server
///
/// Auth and CORS come from the environment:
/// - `TABSHARE_API_KEYS`: comma-separated API keys
/// - `TABSHARE_ALLOWED_ORIGINS`: comma-separated CORS origins
pub async fn cmd_serve(host: &str, port: u16, no_auth: bool) -> Result<()> {
    let config = ServerConfig {
        require_auth: !no_auth,
        allowed_origins: env_list("TABSHARE_ALLOWED_ORIGINS"),
        api_keys: env_list("TABSHARE_API_KEYS"),
    };

    if config.require_auth && config.api_keys.is_empty() {
        warn!("No API keys configured; every request will be rejected. Set TABSHARE_API_KEYS or use --no-auth for local development.");
    }

    tabshare_server::serve(host, port, config).await
}

/// Read a comma-separated environment variable into a list
fn env_list(var: &str) -> Vec<String> {
    std::env::var(var)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
