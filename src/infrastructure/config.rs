// Client configuration
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Total attempts per request, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Directory the durable key-value store writes into.
    pub path: String,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_attempts() -> u32 {
    2
}

pub fn load_client_config() -> anyhow::Result<ClientConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/client"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
