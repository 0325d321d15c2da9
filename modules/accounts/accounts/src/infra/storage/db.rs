//! Store lifecycle and database error conversion.

use accounts_sdk::AccountsError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::infra::storage::migrations::Migrator;

/// Convert a store error into the module error.
///
/// Unique violations become `Conflict`, naming the column when it can be
/// told from the backend message. Everything else is `Storage`.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn db_err(e: DbErr) -> AccountsError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            AccountsError::conflict(conflict_field(&message))
        }
        _ => AccountsError::storage(e.to_string()),
    }
}

fn conflict_field(message: &str) -> &'static str {
    if message.contains("sso_id") {
        "sso_id"
    } else if message.contains("email") {
        "email"
    } else if message.contains("ownerships") || message.contains("user_view") {
        "ownership"
    } else {
        "unique key"
    }
}

/// Open the connection pool and apply migrations when configured.
///
/// # Errors
/// `Storage` if the store is unreachable within `connect_timeout` or a
/// migration fails.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection, AccountsError> {
    // Every pooled connection to an in-memory SQLite gets its own database.
    let max_connections = if cfg.url.contains(":memory:") {
        1
    } else {
        cfg.max_connections
    };

    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(max_connections)
        .connect_timeout(cfg.connect_timeout)
        .sqlx_logging(false);

    let db = Database::connect(opts).await.map_err(db_err)?;
    debug!(max_connections, "database pool opened");

    if cfg.run_migrations {
        migrate(&db).await?;
    }
    Ok(db)
}

/// Apply all pending migrations.
///
/// # Errors
/// `Storage` if a migration fails.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), AccountsError> {
    Migrator::up(db, None).await.map_err(db_err)?;
    info!("accounts schema is up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_field_is_detected_per_backend() {
        assert_eq!(
            conflict_field("UNIQUE constraint failed: users.email"),
            "email"
        );
        assert_eq!(
            conflict_field("UNIQUE constraint failed: users.sso_id"),
            "sso_id"
        );
        assert_eq!(
            conflict_field(
                r#"duplicate key value violates unique constraint "uk_users_sso_id""#
            ),
            "sso_id"
        );
        assert_eq!(
            conflict_field("Duplicate entry 'a@b.c' for key 'users.uk_users_email'"),
            "email"
        );
        assert_eq!(
            conflict_field(
                "UNIQUE constraint failed: ownerships.user_id, ownerships.view_id"
            ),
            "ownership"
        );
    }

    #[test]
    fn other_errors_are_storage() {
        let err = db_err(DbErr::Custom("connection reset".to_owned()));
        assert!(
            matches!(err, AccountsError::Storage { ref message } if message.contains("connection reset"))
        );
    }
}
