// path: crates/broker/src/config.rs
use serde::Deserialize;

#[derive(Clone, Deserialize)]
pub struct BrokerConfig {
    pub addr: String,
    pub store_dir: String,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_limit() -> usize {
    1000
}

impl BrokerConfig {
    pub fn from_env() -> Self {
        let addr = std::env::var("WM_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
        let store_dir = std::env::var("WM_STORE_DIR").unwrap_or_else(|_| "store".into());
        let default_limit = std::env::var("WM_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default_limit());

        Self {
            addr,
            store_dir,
            default_limit,
        }
    }
}
