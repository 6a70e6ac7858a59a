//! In-memory [`IngredientStore`] implementation.
//!
//! A single `std::sync::RwLock` guards both the record table and the
//! identifier counter. Reads share the lock; every mutation holds the write
//! lock across validation, the uniqueness scan and the change itself, so two
//! concurrent creates of the same name can never both succeed.
//!
//! Lock hold time is bounded by an O(n) scan of the table; nothing inside
//! the critical section does I/O.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::error::{Result, StoreError};
use crate::models::{Ingredient, Nutrition};
use crate::name;

use super::IngredientStore;

struct Table {
    /// Keyed by id, so iteration is already in identifier order.
    rows: BTreeMap<u64, Ingredient>,
    /// Next identifier to hand out. Never decremented.
    next_id: u64,
}

impl Table {
    fn id_for_name(&self, normalized: &str) -> Option<u64> {
        self.rows
            .values()
            .find(|row| row.name == normalized)
            .map(|row| row.id)
    }

    /// Rename an existing row. Shared by both update flavours.
    fn rename_locked(&mut self, id: u64, new_name: &str) -> Result<Ingredient> {
        let new_name = name::validate(new_name)?;

        if matches!(self.id_for_name(&new_name), Some(other) if other != id) {
            return Err(StoreError::NameConflict);
        }

        let row = self.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.name = new_name;
        row.touch(Utc::now());
        Ok(row.clone())
    }
}

/// Process-lifetime ingredient store.
pub struct InMemoryStore {
    table: RwLock<Table>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>> {
        self.table
            .read()
            .map_err(|_| StoreError::Internal("ingredient table lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>> {
        self.table
            .write()
            .map_err(|_| StoreError::Internal("ingredient table lock poisoned".to_string()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientStore for InMemoryStore {
    fn create(&self, name: &str) -> Result<Ingredient> {
        let mut table = self.write()?;

        let name = name::validate(name)?;
        if table.id_for_name(&name).is_some() {
            return Err(StoreError::NameConflict);
        }

        let id = table.next_id;
        table.next_id += 1;

        let ingredient = Ingredient::new(id, name, Utc::now());
        table.rows.insert(id, ingredient.clone());
        Ok(ingredient)
    }

    fn get(&self, id: u64) -> Result<Ingredient> {
        let table = self.read()?;
        table.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn list(&self) -> Result<Vec<Ingredient>> {
        let table = self.read()?;
        Ok(table.rows.values().cloned().collect())
    }

    fn search(&self, query: &str) -> Result<Vec<Ingredient>> {
        let query = name::normalize_query(query);
        if query.is_empty() {
            return self.list();
        }

        let table = self.read()?;
        let mut results: Vec<Ingredient> = table
            .rows
            .values()
            .filter(|row| row.name.contains(&query))
            .cloned()
            .collect();
        drop(table);

        results.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(results)
    }

    fn update_by_id(&self, id: u64, new_name: &str) -> Result<Ingredient> {
        let mut table = self.write()?;
        if !table.rows.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        table.rename_locked(id, new_name)
    }

    fn update_by_name(&self, name: &str, new_name: &str) -> Result<Ingredient> {
        let mut table = self.write()?;
        let id = table
            .id_for_name(&name::normalize(name))
            .ok_or(StoreError::NotFound)?;
        table.rename_locked(id, new_name)
    }

    fn delete_by_id(&self, id: u64) -> Result<Ingredient> {
        let mut table = self.write()?;
        table.rows.remove(&id).ok_or(StoreError::NotFound)
    }

    fn delete_by_name(&self, name: &str) -> Result<Ingredient> {
        let mut table = self.write()?;
        let id = table
            .id_for_name(&name::normalize(name))
            .ok_or(StoreError::NotFound)?;
        table.rows.remove(&id).ok_or(StoreError::NotFound)
    }

    fn set_nutrition(&self, id: u64, nutrition: Option<Nutrition>) -> Result<Ingredient> {
        let mut table = self.write()?;
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.nutrition = nutrition;
        row.touch(Utc::now());
        Ok(row.clone())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.read()?.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn names(items: &[Ingredient]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = InMemoryStore::new();
        assert_eq!(store.len().unwrap(), 0);
        assert!(store.is_empty().unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_normalizes_and_assigns_ids() {
        let store = InMemoryStore::new();
        let tomato = store.create("tomato").unwrap();
        assert_eq!(tomato.id, 1);
        assert_eq!(tomato.name, "tomato");
        assert_eq!(tomato.created_at, tomato.updated_at);

        let oil = store.create("  Olive    OIL ").unwrap();
        assert_eq!(oil.id, 2);
        assert_eq!(oil.name, "olive oil");
    }

    #[test]
    fn test_create_conflict_ignores_case_and_whitespace() {
        let store = InMemoryStore::new();
        store.create("tomato").unwrap();
        for dup in ["tomato", "  TOMATO  ", "ToMaTo", "\ttomato\n"] {
            assert_eq!(store.create(dup), Err(StoreError::NameConflict), "{:?}", dup);
        }
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_create_conflict_latin1() {
        let store = InMemoryStore::new();
        store.create("Pimentón").unwrap();
        assert_eq!(store.create("PIMENTÓN"), Err(StoreError::NameConflict));
    }

    #[test]
    fn test_create_validation_persists_nothing() {
        let store = InMemoryStore::new();
        assert_eq!(store.create("XD"), Err(StoreError::NameTooShort));
        assert_eq!(store.create("   "), Err(StoreError::NameEmpty));
        assert_eq!(store.create("salt & pepper"), Err(StoreError::NameInvalidChars));
        assert_eq!(store.create(&"x".repeat(49)), Err(StoreError::NameTooLong));
        assert!(store.is_empty().unwrap());

        // Failed creates do not consume identifiers.
        assert_eq!(store.create("salt").unwrap().id, 1);
    }

    #[test]
    fn test_get() {
        let store = InMemoryStore::new();
        let created = store.create("pepper").unwrap();
        assert_eq!(store.get(created.id).unwrap(), created);
        assert_eq!(store.get(999), Err(StoreError::NotFound));
    }

    #[test]
    fn test_list_sorted_by_id() {
        let store = InMemoryStore::new();
        for n in ["carrot", "apple", "banana"] {
            store.create(n).unwrap();
        }
        let all = store.list().unwrap();
        assert_eq!(names(&all), vec!["carrot", "apple", "banana"]);
        assert_eq!(all.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_sorted_by_name() {
        let store = InMemoryStore::new();
        for n in ["tomato", "cherry tomato", "tomato paste", "onion", "garlic"] {
            store.create(n).unwrap();
        }
        let hits = store.search("tomato").unwrap();
        assert_eq!(names(&hits), vec!["cherry tomato", "tomato", "tomato paste"]);

        assert_eq!(store.search("TOMATO").unwrap().len(), 3);
        assert_eq!(store.search("  tomato  ").unwrap().len(), 3);
        assert_eq!(store.search("mat").unwrap().len(), 3);
        assert!(store.search("nonexistent").unwrap().is_empty());
    }

    #[test]
    fn test_search_empty_query_is_list() {
        let store = InMemoryStore::new();
        for n in ["tomato", "cherry tomato", "basil"] {
            store.create(n).unwrap();
        }
        assert_eq!(store.search("").unwrap(), store.list().unwrap());
        assert_eq!(store.search("   ").unwrap(), store.list().unwrap());
        assert_eq!(store.search("").unwrap()[0].name, "tomato");
    }

    #[test]
    fn test_search_does_not_filter_query_chars() {
        let store = InMemoryStore::new();
        store.create("o'brien mix").unwrap();
        assert_eq!(store.search("'b").unwrap().len(), 1);
        assert!(store.search("%").unwrap().is_empty());
    }

    #[test]
    fn test_delete_never_reuses_ids() {
        let store = InMemoryStore::new();
        let salt = store.create("salt").unwrap();
        assert_eq!(salt.id, 1);
        assert_eq!(store.delete_by_id(1).unwrap().name, "salt");
        assert_eq!(store.get(1), Err(StoreError::NotFound));
        assert_eq!(store.create("pepper").unwrap().id, 2);
        // The freed name can be taken again, under a fresh id.
        assert_eq!(store.create("salt").unwrap().id, 3);
    }

    #[test]
    fn test_delete_missing() {
        let store = InMemoryStore::new();
        assert_eq!(store.delete_by_id(999), Err(StoreError::NotFound));
        assert_eq!(store.delete_by_name("ghost"), Err(StoreError::NotFound));
    }

    #[test]
    fn test_delete_by_name_is_case_insensitive() {
        let store = InMemoryStore::new();
        store.create("garlic").unwrap();
        let removed = store.delete_by_name("  GARLIC ").unwrap();
        assert_eq!(removed.name, "garlic");
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_update_by_id() {
        let store = InMemoryStore::new();
        let created = store.create("original").unwrap();
        thread::sleep(Duration::from_millis(2));

        let updated = store.update_by_id(created.id, "  Updated ").unwrap();
        assert_eq!(updated.name, "updated");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > updated.created_at);
        assert_eq!(store.get(created.id).unwrap(), updated);
    }

    #[test]
    fn test_update_conflict_leaves_record_unchanged() {
        let store = InMemoryStore::new();
        let basil = store.create("basil").unwrap();
        assert_eq!(basil.id, 1);
        assert_eq!(store.create("oregano").unwrap().id, 2);

        assert_eq!(store.update_by_id(1, "oregano"), Err(StoreError::NameConflict));
        assert_eq!(store.update_by_id(1, " OREGANO "), Err(StoreError::NameConflict));
        assert_eq!(store.get(1).unwrap(), basil);
    }

    #[test]
    fn test_update_to_own_name_refreshes_timestamp() {
        let store = InMemoryStore::new();
        let created = store.create("thyme").unwrap();
        thread::sleep(Duration::from_millis(2));

        let updated = store.update_by_id(created.id, "THYME").unwrap();
        assert_eq!(updated.name, "thyme");
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn test_back_to_back_updates_strictly_advance_timestamp() {
        let store = InMemoryStore::new();
        let created = store.create("cumin").unwrap();
        let mut last = created.updated_at;
        for _ in 0..5 {
            let updated = store.update_by_id(created.id, "cumin").unwrap();
            assert!(updated.updated_at > last);
            last = updated.updated_at;
        }
    }

    #[test]
    fn test_update_missing_and_invalid() {
        let store = InMemoryStore::new();
        assert_eq!(store.update_by_id(999, "anything"), Err(StoreError::NotFound));

        let created = store.create("rosemary").unwrap();
        assert_eq!(store.update_by_id(created.id, "ab"), Err(StoreError::NameTooShort));
        assert_eq!(store.update_by_id(created.id, ""), Err(StoreError::NameEmpty));
        assert_eq!(store.update_by_id(created.id, "a+b"), Err(StoreError::NameInvalidChars));
        assert_eq!(store.get(created.id).unwrap().name, "rosemary");
    }

    #[test]
    fn test_update_by_name() {
        let store = InMemoryStore::new();
        let created = store.create("sal").unwrap();
        store.create("pimienta").unwrap();

        let updated = store.update_by_name("  SAL ", "sal marina").unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "sal marina");

        assert_eq!(store.update_by_name("sal", "sal gorda"), Err(StoreError::NotFound));
        assert_eq!(
            store.update_by_name("sal marina", "Pimienta"),
            Err(StoreError::NameConflict)
        );
        assert!(store.update_by_name("pimienta", "pimienta").is_ok());
    }

    #[test]
    fn test_set_nutrition_is_opaque() {
        let store = InMemoryStore::new();
        let created = store.create("avena").unwrap();
        let facts = Nutrition {
            energy_kcal: Some(389.0),
            fat_g: Some(6.9),
            protein_g: Some(16.9),
            carbohydrate_g: Some(66.3),
            updated_at: None,
        };

        let updated = store.set_nutrition(created.id, Some(facts.clone())).unwrap();
        assert_eq!(updated.nutrition.as_ref(), Some(&facts));
        assert_eq!(updated.name, "avena");
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(store.get(created.id).unwrap().nutrition, Some(facts));

        assert_eq!(store.set_nutrition(42, None), Err(StoreError::NotFound));
    }

    #[test]
    fn test_ids_strictly_increasing() {
        let store = InMemoryStore::new();
        let mut last = 0;
        for i in 0..20 {
            let ing = store.create(&format!("item {}", i)).unwrap();
            assert!(ing.id > last);
            last = ing.id;
            if i % 3 == 0 {
                store.delete_by_id(ing.id).unwrap();
            }
        }
    }

    #[test]
    fn test_stored_names_are_normalized() {
        let store = InMemoryStore::new();
        for raw in ["  Ajo   EN polvo", "Atún en LATA", "Crème-Brûlée"] {
            store.create(raw).unwrap();
        }
        for ing in store.list().unwrap() {
            assert_eq!(name::normalize(&ing.name), ing.name);
            assert!(ing.updated_at >= ing.created_at);
        }
    }

    #[test]
    fn test_concurrent_creates_same_name() {
        const N: usize = 32;
        let store = Arc::new(InMemoryStore::new());

        let results: Vec<Result<Ingredient>> = thread::scope(|s| {
            let handles: Vec<_> = (0..N)
                .map(|i| {
                    let store = Arc::clone(&store);
                    s.spawn(move || {
                        let raw = if i % 2 == 0 { "Cumin" } else { "  cumin " };
                        store.create(raw)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let ok = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(StoreError::NameConflict)))
            .count();
        assert_eq!(ok, 1);
        assert_eq!(conflicts, N - 1);

        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "cumin");
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let store = Arc::new(InMemoryStore::new());

        thread::scope(|s| {
            for w in 0..4 {
                let store = Arc::clone(&store);
                s.spawn(move || {
                    for i in 0..50 {
                        let _ = store.create(&format!("writer {} item {}", w, i));
                    }
                });
            }
            for _ in 0..4 {
                let store = Arc::clone(&store);
                s.spawn(move || {
                    for _ in 0..50 {
                        let all = store.list().unwrap();
                        let mut seen: Vec<&str> = all.iter().map(|i| i.name.as_str()).collect();
                        seen.sort_unstable();
                        seen.dedup();
                        assert_eq!(seen.len(), all.len());
                        let _ = store.search("item").unwrap();
                    }
                });
            }
        });

        let all = store.list().unwrap();
        assert_eq!(all.len(), 200);
        let ids: Vec<u64> = all.iter().map(|i| i.id).collect();
        assert_eq!(ids, (1..=200).collect::<Vec<_>>());
    }

    #[test]
    fn test_concurrent_renames_keep_names_unique() {
        let store = Arc::new(InMemoryStore::new());
        let a = store.create("alpha").unwrap();
        let b = store.create("beta").unwrap();

        thread::scope(|s| {
            for id in [a.id, b.id] {
                let store = Arc::clone(&store);
                s.spawn(move || {
                    for _ in 0..100 {
                        let _ = store.update_by_id(id, "gamma");
                    }
                });
            }
        });

        let all = store.list().unwrap();
        assert_eq!(all.len(), 2);
        assert_ne!(all[0].name, all[1].name);
        assert_eq!(all.iter().filter(|i| i.name == "gamma").count(), 1);
    }
}
