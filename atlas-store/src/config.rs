use sqlx::postgres::PgConnectOptions;
use std::env;

/// Connection settings for both stores, read from the environment with the
/// deployment's stock defaults.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_db: String,
    pub postgres_user: String,
    pub postgres_password: String,
    pub mongodb_uri: String,
    pub mongodb_db: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            postgres_host: "localhost".to_string(),
            postgres_port: 5432,
            postgres_db: "atlas".to_string(),
            postgres_user: "user".to_string(),
            postgres_password: "password".to_string(),
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_db: "atlas".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            postgres_host: env::var("POSTGRES_HOST").unwrap_or(defaults.postgres_host),
            postgres_port: env::var("POSTGRES_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.postgres_port),
            postgres_db: env::var("POSTGRES_DB").unwrap_or(defaults.postgres_db),
            postgres_user: env::var("POSTGRES_USER").unwrap_or(defaults.postgres_user),
            postgres_password: env::var("POSTGRES_PASSWORD").unwrap_or(defaults.postgres_password),
            mongodb_uri: env::var("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            mongodb_db: defaults.mongodb_db,
        }
    }

    /// Discrete connection parameters, never a spliced URL: credentials may
    /// contain `@`, `/`, or `:` and must not be able to shift the host split.
    pub fn postgres_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.postgres_host)
            .port(self.postgres_port)
            .username(&self.postgres_user)
            .password(&self.postgres_password)
            .database(&self.postgres_db)
    }
}
