//! Layered configuration: built-in defaults, then an optional `soko.toml`,
//! then `SOKO_`-prefixed environment variables.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    pub bind_addr: String,
    pub catalog_path: String,
    pub queue_capacity: usize,
    pub executor_workers: usize,
    pub log_format: String,
}

impl DaemonConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("bind_addr", "0.0.0.0:8000")?
            .set_default("catalog_path", "soko.yml")?
            .set_default("queue_capacity", 1024)?
            .set_default("executor_workers", 1)?
            .set_default("log_format", "pretty")?
            .add_source(config::File::with_name("soko").required(false))
            .add_source(config::Environment::with_prefix("SOKO"))
            .build()?
            .try_deserialize()
    }
}
