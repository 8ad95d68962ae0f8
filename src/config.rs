// src/config.rs
use std::{env, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    host: String,
    port: u16,
    database: String,
    user: String,
    password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    database: DatabaseConfig,
    ping_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_host() -> String {
    "localhost".into()
}

fn default_port() -> u16 {
    5432
}

fn default_database() -> String {
    "news_agency".into()
}

fn default_user() -> String {
    "postgres".into()
}

fn default_ping_timeout_secs() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: String::new(),
        }
    }
}

impl DatabaseConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Reads the standard libpq variables (`PGHOST`, `PGPORT`, `PGDATABASE`,
    /// `PGUSER`, `PGPASSWORD`). Unset or empty variables fall back to the
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PGPORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid(format!("PGPORT must be a port number, got {raw:?}")))?,
            None => default_port(),
        };

        Ok(Self {
            host: get("PGHOST").unwrap_or_else(default_host),
            port,
            database: get("PGDATABASE").unwrap_or_else(default_database),
            user: get("PGUSER").unwrap_or_else(default_user),
            password: lookup("PGPASSWORD").unwrap_or_default(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl AppConfig {
    /// Build configuration from environment variables, loading a `.env` file
    /// first when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig::from_lookup(&lookup)?;

        let ping_timeout_secs = match lookup("NEWS_DB_PING_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!(
                    "NEWS_DB_PING_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                ))
            })?,
            _ => default_ping_timeout_secs(),
        };

        Ok(Self {
            database,
            ping_timeout: Duration::from_secs(ping_timeout_secs),
        })
    }

    pub fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    /// Deadline for the connection validity check.
    pub fn ping_timeout(&self) -> Duration {
        self.ping_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database(), &DatabaseConfig::default());
        assert_eq!(config.database().host(), "localhost");
        assert_eq!(config.database().port(), 5432);
        assert_eq!(config.database().database(), "news_agency");
        assert_eq!(config.database().user(), "postgres");
        assert_eq!(config.database().password(), "");
        assert_eq!(config.ping_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PGHOST", "db.internal"),
            ("PGPORT", "6543"),
            ("PGDATABASE", "newsroom"),
            ("PGUSER", "editor"),
            ("PGPASSWORD", "s3cret"),
            ("NEWS_DB_PING_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();

        assert_eq!(
            config.database(),
            &DatabaseConfig::new("db.internal", 6543, "newsroom", "editor", "s3cret")
        );
        assert_eq!(config.ping_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config =
            DatabaseConfig::from_lookup(lookup_from(&[("PGHOST", ""), ("PGPORT", " ")])).unwrap();
        assert_eq!(config.host(), "localhost");
        assert_eq!(config.port(), 5432);
    }

    #[test]
    fn rejects_invalid_numbers() {
        let err = DatabaseConfig::from_lookup(lookup_from(&[("PGPORT", "fivefour")])).unwrap_err();
        assert!(err.to_string().contains("PGPORT"));

        let err = AppConfig::from_lookup(lookup_from(&[("NEWS_DB_PING_TIMEOUT_SECS", "-1")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
