use serde::Deserialize;
use tracker_core::config::{configuration_directory, load_layered, TelemetrySettings, ENV_PREFIX};
use tracker_core::error::AppError;
use validator::Validate;

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub server: ServerSettings,
    #[validate(nested)]
    pub api: ApiSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct ServerSettings {
    #[validate(length(min = 1))]
    pub host: String,
    /// 0 binds an ephemeral port.
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct ApiSettings {
    /// Documents API root, e.g. `http://127.0.0.1:8000`.
    #[validate(url)]
    pub base_url: String,
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let directory = configuration_directory("tracker-frontend")?;
    let settings: Settings = load_layered(&directory, ENV_PREFIX)?;
    settings.validate()?;
    Ok(settings)
}
