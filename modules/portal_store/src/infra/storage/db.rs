//! Database connection bootstrap

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use super::migrations::Migrator;

/// Open a connection pool and apply migrations when configured to
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout)
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to {}", redact(&cfg.url)))?;

    if cfg.run_migrations {
        migrate(&db).await?;
    }

    tracing::info!(url = %redact(&cfg.url), "portal database ready");
    Ok(db)
}

/// Apply every pending migration
pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .context("failed to apply portal migrations")?;
    tracing::info!("portal migrations completed");
    Ok(())
}

/// Hide the password part of a connection URL
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.find(':') {
                Some(colon) => format!(
                    "{}{}:***{}",
                    &url[..scheme_end + 3],
                    &credentials[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::redact;

    #[test]
    fn redact_hides_password() {
        assert_eq!(
            redact("postgres://portal:s3cret@db:5432/portal"),
            "postgres://portal:***@db:5432/portal"
        );
    }

    #[test]
    fn redact_keeps_urls_without_password() {
        assert_eq!(redact("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            redact("postgres://portal@db/portal"),
            "postgres://portal@db/portal"
        );
    }
}
