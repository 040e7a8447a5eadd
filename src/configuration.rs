use config::{Config, ConfigBuilder, Environment};
use serde::Deserialize;

use crate::dispatch::Dispatch;

#[derive(Deserialize, Debug, Clone)]
pub struct Configuration {
    pub app: AppSettings,
    pub log_level: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub dispatch: Dispatch,
}

impl Configuration {
    pub fn address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.address())
    }
}

fn with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("log_level", Some("INFO"))?
        .set_default("app.host", "127.0.0.1")?
        .set_default("app.port", 8000)?
        .set_default("app.dispatch", "cooperative")
}

pub fn get_configuration() -> Result<Configuration, config::ConfigError> {
    get_test_configuration("config/prod")
}

pub fn get_test_configuration(path: &str) -> Result<Configuration, config::ConfigError> {
    let conf = with_defaults()?
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix("app")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;
    conf.try_deserialize()
}
