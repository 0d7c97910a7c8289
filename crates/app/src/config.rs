//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::backend::BackendConfig;

/// Hosted-backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct BackendArgs {
    /// Backend project base URL
    #[arg(long, env = "BENABAZAR_BACKEND_URL")]
    pub backend_url: String,

    /// Backend project API key
    #[arg(long, env = "BENABAZAR_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

impl From<BackendArgs> for BackendConfig {
    fn from(args: BackendArgs) -> Self {
        BackendConfig {
            base_url: args.backend_url.trim_end_matches('/').to_string(),
            api_key: args.api_key,
        }
    }
}

/// Local session settings: where the cart snapshot lives and how often the
/// exchange rate is refreshed.
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Path of the durable cart snapshot
    #[arg(
        long,
        env = "BENABAZAR_CART_PATH",
        default_value = ".benabazar/cart.json"
    )]
    pub cart_path: PathBuf,

    /// Exchange-rate refresh interval in seconds
    #[arg(long, env = "BENABAZAR_RATE_REFRESH_SECONDS", default_value_t = 60)]
    pub rate_refresh_seconds: u64,
}

impl SessionArgs {
    /// The refresh interval as a [`Duration`].
    #[must_use]
    pub fn rate_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.rate_refresh_seconds)
    }
}
