use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ConfigurationError;

const DEFAULT_SCHEMA_PATH: &str = "assets/road_columns.json";
const DEFAULT_MODEL_PATH: &str = "assets/road_accident_model.json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub schema_path: PathBuf,
    pub model_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let schema_path = lookup("SCHEMA_PATH").unwrap_or_else(|| DEFAULT_SCHEMA_PATH.to_string());
        let model_path = lookup("MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let bind_addr = bind.parse().map_err(|_| ConfigurationError::InvalidSetting {
            name: "BIND_ADDR",
            value: bind.clone(),
        })?;

        Ok(Self {
            schema_path: schema_path.into(),
            model_path: model_path.into(),
            bind_addr,
        })
    }
}
