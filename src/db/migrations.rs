//! Database schema migration management and versioning system.
//!
//! Keeps the schema evolving in versioned steps while preserving existing
//! data. Every migration runs inside a transaction and is recorded in a
//! tracking table, so initialization is idempotent.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vigil::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("vigil.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # anyhow::Ok(())
//! ```

use crate::msg_debug;
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// SQL schema for the migrations tracking table.
///
/// Each applied migration is recorded with its version, name, and timestamp,
/// providing an audit trail of schema changes.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Represents a single database migration with execution logic.
#[derive(Debug, Clone)]
struct Migration {
    /// Unique version number for ordering and tracking
    version: u32,
    /// Human-readable name describing the migration's purpose
    name: &'static str,
    /// Function that applies the schema changes within a transaction
    up: fn(&Transaction) -> Result<()>,
}

/// Central migration manager holding the registry of available migrations.
///
/// Migrations are stored in version order; each one builds on the schema
/// state created by its predecessors. Designed for single-threaded use
/// during application startup.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    /// Creates a new migration manager with all registered migrations.
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    /// Registers all database migrations in chronological order.
    fn register_migrations(&mut self) {
        self.migrations.push(Migration {
            version: 1,
            name: "initial_schema",
            up: |tx| {
                // Activity samples written once per monitor tick
                tx.execute(
                    "CREATE TABLE IF NOT EXISTS activities (
                        id INTEGER NOT NULL PRIMARY KEY,
                        timestamp TIMESTAMP NOT NULL,
                        activity_type TEXT NOT NULL,
                        details TEXT
                    )",
                    [],
                )?;
                // Work sessions; end IS NULL marks the single open session
                tx.execute(
                    "CREATE TABLE IF NOT EXISTS sessions (
                        id INTEGER NOT NULL PRIMARY KEY,
                        start TIMESTAMP NOT NULL,
                        end TIMESTAMP,
                        active_seconds INTEGER NOT NULL DEFAULT 0
                    )",
                    [],
                )?;
                // Append-only log of fired reminders and logged breaks
                tx.execute(
                    "CREATE TABLE IF NOT EXISTS health_events (
                        id INTEGER NOT NULL PRIMARY KEY,
                        timestamp TIMESTAMP NOT NULL,
                        event_type TEXT NOT NULL,
                        metadata TEXT
                    )",
                    [],
                )?;
                tx.execute(
                    "CREATE TABLE IF NOT EXISTS tasks (
                        id INTEGER NOT NULL PRIMARY KEY,
                        title TEXT NOT NULL,
                        description TEXT NOT NULL DEFAULT '',
                        priority INTEGER NOT NULL DEFAULT 3,
                        status TEXT NOT NULL DEFAULT 'pending',
                        due_date TIMESTAMP,
                        created_at TIMESTAMP DEFAULT (datetime(CURRENT_TIMESTAMP, 'localtime')),
                        completed_at TIMESTAMP
                    )",
                    [],
                )?;
                Ok(())
            },
        });
    }

    /// Applies all pending migrations to the database.
    ///
    /// Each migration runs in its own transaction together with the insert
    /// into the tracking table, so a failure leaves the schema at the last
    /// fully applied version.
    pub fn migrate(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current = get_db_version(conn)?;
        for migration in self.migrations.iter().filter(|m| m.version > current) {
            msg_debug!(format!("Applying migration v{}: {}", migration.version, migration.name));
            let tx = conn.transaction()?;
            (migration.up)(&tx)?;
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
            tx.commit()?;
        }

        Ok(())
    }
}

/// Initializes the database schema, applying any pending migrations.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().migrate(conn)
}

/// Returns the current schema version, 0 for a fresh database.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let version = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM migrations", [], |row| row.get::<_, u32>(0))
        .unwrap_or(0);
    Ok(version)
}
