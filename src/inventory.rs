//! Inventory Index - in-memory item map kept write-through consistent with storage
//!
//! Reads never touch the store. Every mutation updates the map first and then
//! the store, inside the same call, so once a call returns `Ok` both hold the
//! same content.

use std::collections::HashMap;
use std::path::Path;
use crate::item::{FieldUpdate, Item};
use crate::storage::SqliteStore;
use crate::Result;

/// In-memory index over all items, backed by a `SqliteStore`.
///
/// Mutations take `&mut self`, so one instance never sees interleaved
/// writes. To share an inventory between threads, put the whole instance
/// behind a single `Mutex`.
///
/// Duplicate or missing ids are reported as `Ok(false)` / `None`. An `Err`
/// from a mutating call means the store rejected a write the index believed
/// valid; memory and store may now disagree and the caller should stop.
pub struct Inventory {
    /// All items indexed by id
    items: HashMap<i64, Item>,
    /// Exclusively owned backing store
    store: SqliteStore,
}

impl Inventory {
    /// Open (or create) the store at `path` and load every item into memory
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_store(SqliteStore::open(path)?)
    }

    /// Build an inventory over an already opened store
    pub fn from_store(store: SqliteStore) -> Result<Self> {
        store.ensure_schema()?;

        let items: HashMap<i64, Item> = store
            .load_all()?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        tracing::info!("Loaded {} items from {}", items.len(), store.path());
        Ok(Self { items, store })
    }

    /// Add an item. Returns `false` if the id is already taken.
    pub fn add(&mut self, item: Item) -> Result<bool> {
        if self.items.contains_key(&item.id) {
            return Ok(false);
        }

        let id = item.id;
        let stored = self.items.entry(id).or_insert(item);
        if let Err(e) = self.store.insert(stored) {
            tracing::error!("Write-through insert of item {} failed: {}", id, e);
            return Err(e);
        }
        Ok(true)
    }

    /// Remove an item. Returns `false` if no item has this id.
    pub fn remove_by_id(&mut self, id: i64) -> Result<bool> {
        if self.items.remove(&id).is_none() {
            return Ok(false);
        }

        if let Err(e) = self.store.delete(id) {
            tracing::error!("Write-through delete of item {} failed: {}", id, e);
            return Err(e);
        }
        Ok(true)
    }

    /// Set the quantity of an item. Returns `false` if no item has this id.
    pub fn update_quantity(&mut self, id: i64, quantity: i64) -> Result<bool> {
        self.update_field(id, FieldUpdate::Quantity(quantity))
    }

    /// Set the price of an item. Returns `false` if no item has this id.
    pub fn update_price(&mut self, id: i64, price: f64) -> Result<bool> {
        self.update_field(id, FieldUpdate::Price(price))
    }

    fn update_field(&mut self, id: i64, update: FieldUpdate) -> Result<bool> {
        let Some(item) = self.items.get_mut(&id) else {
            return Ok(false);
        };
        item.apply(update);

        if let Err(e) = self.store.update(id, update) {
            tracing::error!("Write-through update of {} on item {} failed: {}", update.column(), id, e);
            return Err(e);
        }
        Ok(true)
    }

    /// Case-insensitive substring search over item names.
    ///
    /// An empty `text` matches every item.
    pub fn search_by_name(&self, text: &str) -> Vec<&Item> {
        let needle = text.to_lowercase();
        self.items
            .values()
            .filter(|item| item.name_contains(&needle))
            .collect()
    }

    /// Get an item by id
    pub fn get_by_id(&self, id: i64) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Get all items
    pub fn list_all(&self) -> Vec<&Item> {
        self.items.values().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get statistics about the stock held
    pub fn stats(&self) -> InventoryStats {
        InventoryStats {
            items: self.items.len(),
            total_units: self.items.values().map(|i| i.quantity).sum(),
            total_value: self.items.values().map(Item::stock_value).sum(),
        }
    }

    /// Location of the backing store
    pub fn location(&self) -> &str {
        self.store.path()
    }

    /// Release the backing store. Writes are already durable, nothing is flushed.
    pub fn close(self) -> Result<()> {
        tracing::info!("Closing inventory at {}", self.store.path());
        self.store.close()
    }
}

/// Statistics about the stock held in an inventory
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct InventoryStats {
    pub items: usize,
    pub total_units: i64,
    pub total_value: f64,
}

impl std::fmt::Display for InventoryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Inventory Statistics:")?;
        writeln!(f, "  Items: {}", self.items)?;
        writeln!(f, "  Units: {}", self.total_units)?;
        writeln!(f, "  Stock value: {:.2}", self.total_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn memory_inventory() -> Inventory {
        Inventory::from_store(SqliteStore::open_in_memory().unwrap()).unwrap()
    }

    fn sorted(items: Vec<&Item>) -> Vec<Item> {
        let mut items: Vec<Item> = items.into_iter().cloned().collect();
        items.sort_by_key(|i| i.id);
        items
    }

    fn stored(inv: &Inventory) -> Vec<Item> {
        let mut items = inv.store.load_all().unwrap();
        items.sort_by_key(|i| i.id);
        items
    }

    #[test]
    fn test_distinct_adds_are_listed() {
        let mut inv = memory_inventory();
        let expected = vec![
            Item::new(1, "Pen", 10, 1.5),
            Item::new(5, "Stapler", 2, 12.0),
            Item::new(9, "Tape", 30, 0.99),
        ];

        for item in expected.iter().rev() {
            assert!(inv.add(item.clone()).unwrap());
        }

        assert_eq!(sorted(inv.list_all()), expected);
        assert_eq!(stored(&inv), expected);
        assert_eq!(inv.len(), 3);
    }

    #[test]
    fn test_duplicate_add_is_soft_failure() {
        let mut inv = memory_inventory();
        assert!(inv.add(Item::new(1, "Pen", 10, 1.5)).unwrap());

        assert!(!inv.add(Item::new(1, "Impostor", 99, 9.9)).unwrap());

        assert_eq!(inv.get_by_id(1), Some(&Item::new(1, "Pen", 10, 1.5)));
        assert_eq!(stored(&inv), vec![Item::new(1, "Pen", 10, 1.5)]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut inv = memory_inventory();
        inv.add(Item::new(1, "Pen", 10, 1.5)).unwrap();
        inv.add(Item::new(2, "Pencil", 20, 0.5)).unwrap();

        assert!(inv.remove_by_id(1).unwrap());
        assert!(inv.get_by_id(1).is_none());
        assert_eq!(stored(&inv), vec![Item::new(2, "Pencil", 20, 0.5)]);

        assert!(!inv.remove_by_id(1).unwrap());
        assert!(!inv.remove_by_id(42).unwrap());
        assert_eq!(inv.len(), 1);
        assert_eq!(stored(&inv), vec![Item::new(2, "Pencil", 20, 0.5)]);
    }

    #[test]
    fn test_update_quantity_touches_only_quantity() {
        let mut inv = memory_inventory();
        inv.add(Item::new(1, "Pen", 10, 1.5)).unwrap();

        assert!(inv.update_quantity(1, 3).unwrap());

        assert_eq!(inv.get_by_id(1), Some(&Item::new(1, "Pen", 3, 1.5)));
        assert_eq!(stored(&inv), vec![Item::new(1, "Pen", 3, 1.5)]);
    }

    #[test]
    fn test_update_price_touches_only_price() {
        let mut inv = memory_inventory();
        inv.add(Item::new(1, "Pen", 10, 1.5)).unwrap();

        assert!(inv.update_price(1, 2.25).unwrap());

        assert_eq!(inv.get_by_id(1), Some(&Item::new(1, "Pen", 10, 2.25)));
        assert_eq!(stored(&inv), vec![Item::new(1, "Pen", 10, 2.25)]);
    }

    #[test]
    fn test_updates_on_missing_id() {
        let mut inv = memory_inventory();
        inv.add(Item::new(1, "Pen", 10, 1.5)).unwrap();

        assert!(!inv.update_quantity(2, 5).unwrap());
        assert!(!inv.update_price(2, 5.0).unwrap());
        assert_eq!(stored(&inv), vec![Item::new(1, "Pen", 10, 1.5)]);
    }

    #[test]
    fn test_quantity_is_not_validated() {
        let mut inv = memory_inventory();
        inv.add(Item::new(1, "Pen", 10, 1.5)).unwrap();

        assert!(inv.update_quantity(1, -4).unwrap());
        assert_eq!(inv.get_by_id(1).unwrap().quantity, -4);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut inv = memory_inventory();
        inv.add(Item::new(1, "Apple", 3, 0.4)).unwrap();
        inv.add(Item::new(2, "Banana", 6, 0.2)).unwrap();

        let found = inv.search_by_name("a");
        assert_eq!(found.len(), 2);

        let found = inv.search_by_name("NAN");
        assert_eq!(sorted(found), vec![Item::new(2, "Banana", 6, 0.2)]);

        assert!(inv.search_by_name("cherry").is_empty());
    }

    #[test]
    fn test_search_matches_inner_substring() {
        let mut inv = memory_inventory();
        inv.add(Item::new(1, "APPLE", 3, 0.4)).unwrap();
        inv.add(Item::new(2, "Banana", 6, 0.2)).unwrap();
        inv.add(Item::new(3, "Kiwi", 1, 0.3)).unwrap();

        let found = sorted(inv.search_by_name("an"));
        assert_eq!(found, vec![Item::new(2, "Banana", 6, 0.2)]);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let mut inv = memory_inventory();
        inv.add(Item::new(1, "Apple", 3, 0.4)).unwrap();
        inv.add(Item::new(2, "Banana", 6, 0.2)).unwrap();

        assert_eq!(inv.search_by_name("").len(), 2);
    }

    #[test]
    fn test_reopen_restores_items() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.db");

        let mut inv = Inventory::open(&path).unwrap();
        assert!(inv.is_empty());
        assert!(inv.add(Item::new(1, "X", 5, 2.5)).unwrap());
        inv.close().unwrap();

        let inv = Inventory::open(&path).unwrap();
        assert_eq!(inv.get_by_id(1), Some(&Item::new(1, "X", 5, 2.5)));
        inv.close().unwrap();
    }

    #[test]
    fn test_drop_releases_store_and_keeps_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.db");

        {
            let mut inv = Inventory::open(&path).unwrap();
            inv.add(Item::new(1, "Pen", 10, 1.5)).unwrap();
            inv.update_price(1, 1.75).unwrap();
        }

        let inv = Inventory::open(&path).unwrap();
        assert_eq!(inv.list_all(), vec![&Item::new(1, "Pen", 10, 1.75)]);
    }

    #[test]
    fn test_pen_and_pencil_scenario() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.db");
        let mut inv = Inventory::open(&path).unwrap();

        inv.add(Item::new(1, "Pen", 10, 1.5)).unwrap();
        inv.add(Item::new(2, "Pencil", 20, 0.5)).unwrap();

        let found = sorted(inv.search_by_name("pen"));
        assert_eq!(found, vec![Item::new(1, "Pen", 10, 1.5), Item::new(2, "Pencil", 20, 0.5)]);

        assert!(inv.remove_by_id(1).unwrap());
        assert_eq!(inv.list_all(), vec![&Item::new(2, "Pencil", 20, 0.5)]);
        inv.close().unwrap();

        let inv = Inventory::open(&path).unwrap();
        assert_eq!(inv.list_all(), vec![&Item::new(2, "Pencil", 20, 0.5)]);
    }

    #[test]
    fn test_write_through_failure_is_reported() {
        let mut inv = memory_inventory();
        inv.add(Item::new(1, "Pen", 10, 1.5)).unwrap();

        // Simulate a diverged store: the row vanished behind the index's back
        inv.store.delete(1).unwrap();

        let err = inv.update_quantity(1, 2).unwrap_err();
        assert!(matches!(err, crate::Error::NotFound(1)));
    }

    #[test]
    fn test_stats() {
        let mut inv = memory_inventory();
        inv.add(Item::new(1, "Pen", 10, 1.5)).unwrap();
        inv.add(Item::new(2, "Pencil", 20, 0.5)).unwrap();

        let stats = inv.stats();
        assert_eq!(stats.items, 2);
        assert_eq!(stats.total_units, 30);
        assert!((stats.total_value - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_inventory_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Inventory>();
    }
}
