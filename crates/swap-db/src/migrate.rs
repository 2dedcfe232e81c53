//! Embedded schema migrations
//!
//! The SQL files under `migrations/` are compiled into the binary and
//! applied in order at startup. They also install the aggregate
//! functions and triggers the repositories read from
//! (`unread_message_count`, `profile_rating`, the rating and
//! completed-swap triggers).

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;

/// All migrations, embedded at compile time
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply any migrations the database has not seen yet
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
