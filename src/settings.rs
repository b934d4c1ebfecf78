use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    pub total_bikes: u32,
    /// Flat rate charged per reservation, used for the income estimate.
    pub class_rate: u64,
    pub currency: String,
    pub activity_capacity: usize,
    pub activity_display: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            enable_swagger: true,
            port: 8080,
            total_bikes: 20,
            class_rate: 120,
            currency: "MXN".to_string(),
            activity_capacity: 20,
            activity_display: 10,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let defaults = Settings::default();
        let config = Config::builder()
            // Load from environment variables with APP_ prefix
            .add_source(Environment::with_prefix("APP"))
            .set_default("debug", defaults.debug)?
            .set_default("enable_swagger", defaults.enable_swagger)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("total_bikes", i64::from(defaults.total_bikes))?
            .set_default("class_rate", defaults.class_rate as i64)?
            .set_default("currency", defaults.currency)?
            .set_default("activity_capacity", defaults.activity_capacity as i64)?
            .set_default("activity_display", defaults.activity_display as i64)?
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_bikes == 0 {
            return Err(ConfigError::Message(
                "total_bikes must be at least 1".into(),
            ));
        }
        if self.activity_capacity == 0 {
            return Err(ConfigError::Message(
                "activity_capacity must be at least 1".into(),
            ));
        }
        if self.activity_display > self.activity_capacity {
            return Err(ConfigError::Message(
                "activity_display cannot exceed activity_capacity".into(),
            ));
        }
        Ok(())
    }
}
