use crate::error::AppError;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment prefix used by every deployed binary (`APP_SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "APP";

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP gRPC collector, e.g. `http://tempo:4317`. Export is disabled when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolve `<crate>/config`, whether the process runs from the workspace root
/// or from inside the crate directory.
pub fn configuration_directory(crate_dir: &str) -> Result<PathBuf, AppError> {
    let base_path = std::env::current_dir()?;

    if base_path.ends_with(crate_dir) {
        Ok(base_path.join("config"))
    } else {
        Ok(base_path.join(crate_dir).join("config"))
    }
}

/// Load `base.yaml` from `directory`, overlaid by `{prefix}_SECTION__KEY`
/// environment variables.
pub fn load_layered<T: DeserializeOwned>(directory: &Path, prefix: &str) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .add_source(File::from(directory.join("base.yaml")).required(true))
        .add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<T>()?)
}
