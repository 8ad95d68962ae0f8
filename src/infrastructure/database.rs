use crate::config::DatabaseConfig;
use crate::domain::errors::{DomainError, DomainResult};
use sqlx::{
    Connection, PgConnection,
    migrate::{MigrateError, Migrator},
    postgres::PgConnectOptions,
};
use std::{future::Future, pin::Pin, time::Duration};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let options = PgConnectOptions::new_without_pgpass()
        .host(config.host())
        .port(config.port())
        .database(config.database())
        .username(config.user())
        .application_name("news_agency");

    if config.password().is_empty() {
        options
    } else {
        options.password(config.password())
    }
}

/// Future returned by [`establish`]. Boxed and `'static` so store methods
/// running inside `#[async_trait]` futures can await it.
pub type EstablishFuture = Pin<Box<dyn Future<Output = DomainResult<PgConnection>> + Send + 'static>>;

/// Opens a connection and bootstraps the schema on it.
pub fn establish(options: &PgConnectOptions) -> EstablishFuture {
    let options = options.clone();
    Box::pin(async move {
        let mut conn = PgConnection::connect_with(&options)
            .await
            .map_err(|e| DomainError::persistence("failed to establish database connection", e))?;

        tracing::info!(
            host = options.get_host(),
            database = options.get_database().unwrap_or_default(),
            "database connection established"
        );

        run_migrations(&mut conn)
            .await
            .map_err(|e| DomainError::persistence("failed to initialise database schema", e))?;

        tracing::info!("database schema initialised");
        Ok(conn)
    })
}

/// Creates the `articles` table and its indexes when they are missing.
pub async fn run_migrations(conn: &mut PgConnection) -> Result<(), MigrateError> {
    MIGRATOR.run_direct(conn).await
}

/// Round-trips a ping, giving up after `timeout`.
pub async fn is_alive(conn: &mut PgConnection, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, conn.ping()).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "database ping failed");
            false
        }
        Err(_) => {
            tracing::warn!(?timeout, "database ping timed out");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_follow_config() {
        let config = DatabaseConfig::new("db.example", 6000, "newsroom", "editor", "pw");
        let options = connect_options(&config);
        assert_eq!(options.get_host(), "db.example");
        assert_eq!(options.get_port(), 6000);
        assert_eq!(options.get_database(), Some("newsroom"));
        assert_eq!(options.get_username(), "editor");
    }
}
