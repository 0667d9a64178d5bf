use crate::domain::Branding;
use secrecy::Secret;
use serde::Deserialize;
use std::path::PathBuf;
use telemetry::TelemetrySettings;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub ai: AiSettings,
    pub template: TemplateSettings,
    pub preferences: PreferenceSettings,
    pub branding: Branding,
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct AiSettings {
    pub base_url: String,
    /// Checked when a call is made, not at startup.
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    pub text_model: String,
    pub image_model: String,
    pub timeout_milliseconds: u64,
    #[serde(default)]
    pub seo_metadata: bool,
}

impl AiSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Deserialize, Clone)]
pub struct TemplateSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Takes precedence over `path` when set.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct PreferenceSettings {
    pub path: PathBuf,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    get_configuration_from(&configuration_directory, environment)
}

pub fn get_configuration_from(
    configuration_directory: &std::path::Path,
    environment: Environment,
) -> Result<Settings, config::ConfigError> {
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_AI__API_KEY=... would set `Settings.ai.api_key`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
