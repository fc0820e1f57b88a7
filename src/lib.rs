//! # Stockpile - single-user inventory tracker
//!
//! Items (id, name, quantity, price) live in an in-memory index that is
//! written through to a SQLite file on every mutation.
//!
//! Stockpile provides:
//! - `Item` value type and typed single-field updates
//! - SQLite-backed persistent store with a fixed `products` table
//! - `Inventory` index: O(1) lookups, substring search, write-through mutations
//! - Interactive console shell and a CLI built on top of the index

pub mod item;
pub mod storage;
pub mod inventory;
pub mod shell;
pub mod ui;
pub mod output;
pub mod config;

// Re-exports for convenient access
pub use item::{FieldUpdate, Item};
pub use inventory::{Inventory, InventoryStats};
pub use storage::SqliteStore;

/// Result type alias for Stockpile operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Stockpile operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Item {0} is already persisted")]
    DuplicateKey(i64),

    #[error("Item {0} not found in storage")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
