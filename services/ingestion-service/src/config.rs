use gps_common::{env_opt, env_or};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub mongo_url: String,
    pub mongo_database: Option<String>,
    // Relational store is only connected when this is set.
    pub postgres_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongo_url = env_opt("MONGO_URL").ok_or(ConfigError::Missing("MONGO_URL"))?;

        Ok(Self {
            port: env_or("PORT", DEFAULT_PORT),
            mongo_url,
            mongo_database: env_opt("MONGO_DATABASE"),
            postgres_url: env_opt("POSTGRES_URL"),
        })
    }
}

// Connection strings carry credentials, so keep them out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("mongo_database", &self.mongo_database)
            .field("relational_store", &self.postgres_url.is_some())
            .finish_non_exhaustive()
    }
}
