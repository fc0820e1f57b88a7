//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params};
use rusqlite::ffi::{SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE};
use crate::{Result, Error};
use crate::item::{FieldUpdate, Item};
use super::schema;

const SELECT_ALL: &str = "SELECT id, name, quantity, price FROM products";
const UPDATE_QUANTITY: &str = "UPDATE products SET quantity = ?1 WHERE id = ?2";
const UPDATE_PRICE: &str = "UPDATE products SET price = ?1 WHERE id = ?2";

/// SQLite-backed storage for inventory items.
///
/// Every mutating call runs in autocommit mode with `synchronous = FULL`,
/// so a successful return means the row is on disk. Dropping the store
/// closes the connection; `close` does the same but reports failures.
pub struct SqliteStore {
    conn: Connection,
    path: String,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let location = path.display().to_string();
        let conn = Connection::open(path).map_err(|source| Error::StorageUnavailable {
            path: location.clone(),
            source,
        })?;
        Self::configure(conn, location)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let location = ":memory:".to_string();
        let conn = Connection::open_in_memory().map_err(|source| Error::StorageUnavailable {
            path: location.clone(),
            source,
        })?;
        Self::configure(conn, location)
    }

    fn configure(conn: Connection, path: String) -> Result<Self> {
        if let Err(source) = conn.pragma_update(None, "synchronous", "FULL") {
            return Err(Error::StorageUnavailable { path, source });
        }
        tracing::debug!("Opened store at {}", path);
        Ok(Self { conn, path })
    }

    /// Location this store was opened at
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Create the products table if it is missing
    pub fn ensure_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn
                .execute(stmt, [])
                .map_err(|source| Error::StorageUnavailable {
                    path: self.path.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    // ========== Item Operations ==========

    /// Load every stored item. Order is unspecified.
    pub fn load_all(&self) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;

        let items = stmt
            .query_map([], |row| Self::row_to_item(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("Loaded {} items from {}", items.len(), self.path);
        Ok(items)
    }

    /// Insert a new item; fails with `DuplicateKey` if the id is already stored
    pub fn insert(&self, item: &Item) -> Result<()> {
        let result = self.conn.execute(
            "INSERT INTO products (id, name, quantity, price) VALUES (?1, ?2, ?3, ?4)",
            params![item.id, item.name, item.quantity, item.price],
        );

        match result {
            Ok(_) => Ok(()),
            // `id` is the only unique column, so either code means the key is taken
            Err(rusqlite::Error::SqliteFailure(err, _))
                if matches!(err.extended_code, SQLITE_CONSTRAINT_PRIMARYKEY | SQLITE_CONSTRAINT_UNIQUE) =>
            {
                Err(Error::DuplicateKey(item.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite one field of a stored item
    pub fn update(&self, id: i64, update: FieldUpdate) -> Result<()> {
        let changed = match update {
            FieldUpdate::Quantity(quantity) => self.conn.execute(UPDATE_QUANTITY, params![quantity, id])?,
            FieldUpdate::Price(price) => self.conn.execute(UPDATE_PRICE, params![price, id])?,
        };

        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// Delete a stored item
    pub fn delete(&self, id: i64) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM products WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// Count stored items
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Release the connection
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, source)| Error::StorageUnavailable {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Closed store at {}", path);
        Ok(())
    }

    /// Helper to convert a row to an Item
    fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
        Ok(Item {
            id: row.get(0)?,
            name: row.get(1)?,
            quantity: row.get(2)?,
            price: row.get(3)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn test_item_crud() {
        let store = open_store();

        store.insert(&Item::new(1, "Pen", 10, 1.5)).unwrap();
        store.insert(&Item::new(2, "Pencil", 20, 0.5)).unwrap();
        assert_eq!(store.count().unwrap(), 2);

        store.update(1, FieldUpdate::Quantity(7)).unwrap();
        store.update(2, FieldUpdate::Price(0.75)).unwrap();

        let mut items = store.load_all().unwrap();
        items.sort_by_key(|i| i.id);
        assert_eq!(items, vec![Item::new(1, "Pen", 7, 1.5), Item::new(2, "Pencil", 20, 0.75)]);

        store.delete(1).unwrap();
        let items = store.load_all().unwrap();
        assert_eq!(items, vec![Item::new(2, "Pencil", 20, 0.75)]);
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let store = open_store();
        store.insert(&Item::new(1, "Pen", 10, 1.5)).unwrap();

        store.ensure_schema().unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_insert() {
        let store = open_store();
        store.insert(&Item::new(1, "Pen", 10, 1.5)).unwrap();

        let err = store.insert(&Item::new(1, "Other", 1, 1.0)).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(1)));

        let items = store.load_all().unwrap();
        assert_eq!(items, vec![Item::new(1, "Pen", 10, 1.5)]);
    }

    #[test]
    fn test_non_key_constraint_is_not_duplicate() {
        let store = open_store();

        // NaN binds as NULL and trips `price REAL NOT NULL`
        let err = store.insert(&Item::new(7, "Ghost", 1, f64::NAN)).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_missing_rows() {
        let store = open_store();

        assert!(matches!(store.update(9, FieldUpdate::Quantity(1)), Err(Error::NotFound(9))));
        assert!(matches!(store.update(9, FieldUpdate::Price(1.0)), Err(Error::NotFound(9))));
        assert!(matches!(store.delete(9), Err(Error::NotFound(9))));
    }

    #[test]
    fn test_unreachable_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("inventory.db");

        let err = SqliteStore::open(&path).err().unwrap();
        assert!(matches!(err, Error::StorageUnavailable { .. }));
    }

    #[test]
    fn test_not_a_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");
        std::fs::write(&path, "this is not a database\n".repeat(64)).unwrap();

        let result = SqliteStore::open(&path).and_then(|store| store.ensure_schema());
        assert!(matches!(result, Err(Error::StorageUnavailable { .. })));
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");

        let store = SqliteStore::open(&path).unwrap();
        store.ensure_schema().unwrap();
        store.insert(&Item::new(1, "X", 5, 2.5)).unwrap();
        store.close().unwrap();

        let store = SqliteStore::open(&path).unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.load_all().unwrap(), vec![Item::new(1, "X", 5, 2.5)]);
    }
}
