//! Database layer: connection management, schema migrations and export
//! query execution on SQLite.
//!
//! ## Usage
//!
//! ```rust
//! use taskies::db::{db::Db, export::ExportRows};
//!
//! let db = Db::open_in_memory()?;
//! let rows = ExportRows::new(&db.conn).fetch("SELECT task_id, description FROM tasks", 1)?;
//! assert!(rows.is_empty());
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Core database connection and initialization module.
///
/// Provides the `Db` struct that opens SQLite connections and applies
/// migrations before handing the connection out.
pub mod db;

/// Database schema migration system.
pub mod migrations;

/// Execution of compiled export queries and positional row decoding.
pub mod export;
