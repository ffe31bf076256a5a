use std::env;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Load `.env.{RUST_ENV}` first, then fall back to `.env`.
pub fn load_env_files() -> String {
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    let env_file = format!(".env.{}", rust_env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    rust_env
}

pub(crate) fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

pub(crate) fn parsed_or<T: std::str::FromStr>(
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rust_env: String,
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Public base URL used in links sent by email.
    pub app_url: String,
    pub max_db_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let rust_env = load_env_files();

        let database_url = required("DATABASE_URL")?;
        let host = required("HOST")?;
        let port = parsed_or::<u16>("PORT", 8080)?;
        let app_url = env::var("APP_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let max_db_connections = parsed_or::<u32>("DB_MAX_CONNECTIONS", 20)?;

        Ok(Self {
            rust_env,
            database_url,
            host,
            port,
            app_url,
            max_db_connections,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.rust_env == "production"
    }
}
