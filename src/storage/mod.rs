//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - products(id, name, quantity, price)

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;
