//! Demo data: a fixed list of Spanish pantry staples.
//!
//! Seeding goes through the normal [`IngredientStore::create`] path, so
//! names are normalized and validated like any other input. Entries that
//! already exist (or fail validation) are skipped.

use recipe_manager_core::{Ingredient, IngredientStore, Result, StoreError};

/// Pantry staples used for demos and tests.
pub const PANTRY_STAPLES: &[&str] = &[
    "sal",
    "pimienta negra",
    "ajo en polvo",
    "cebolla en polvo",
    "pimentón",
    "comino",
    "orégano",
    "albahaca seca",
    "tomillo",
    "romero",
    "aceite de oliva",
    "aceite vegetal",
    "vinagre blanco",
    "vinagre de manzana",
    "vinagre balsámico",
    "leche",
    "mantequilla",
    "queso parmesano",
    "huevos",
    "yogur natural",
    "pollo",
    "ternera",
    "pescado blanco",
    "atún en lata",
    "judías",
    "cebolla",
    "ajo fresco",
    "tomate",
    "zanahoria",
    "apio",
    "pimiento",
    "patata",
    "limón",
    "arroz",
    "pasta",
    "pan",
    "harina",
    "avena",
    "azúcar",
    "miel",
    "salsa de soja",
    "caldo de pollo",
    "tomate triturado",
    "mostaza",
    "mahonesa",
    "perejil",
    "cilantro",
    "albahaca fresca",
    "levadura",
    "bicarbonato sódico",
];

/// Outcome of a seeding run.
#[derive(Debug, Default)]
pub struct SeedReport {
    /// Records that were created, in insertion order.
    pub created: Vec<Ingredient>,
    /// Entries the store rejected, with the reason.
    pub skipped: Vec<(&'static str, StoreError)>,
}

/// Insert every staple, returning the records that were actually created.
///
/// Only an internal store failure aborts seeding.
pub fn seed_store(store: &dyn IngredientStore) -> Result<Vec<Ingredient>> {
    Ok(seed_names(store, PANTRY_STAPLES)?.created)
}

/// Insert `names` in order, recording what was created and what was skipped.
pub fn seed_names(store: &dyn IngredientStore, names: &[&'static str]) -> Result<SeedReport> {
    let mut report = SeedReport {
        created: Vec::with_capacity(names.len()),
        skipped: Vec::new(),
    };
    for &name in names {
        match store.create(name) {
            Ok(ingredient) => report.created.push(ingredient),
            Err(StoreError::Internal(msg)) => return Err(StoreError::Internal(msg)),
            Err(e) => report.skipped.push((name, e)),
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_manager_core::InMemoryStore;

    #[test]
    fn test_seed_creates_all_staples() {
        let store = InMemoryStore::new();
        let created = seed_store(&store).unwrap();
        assert_eq!(created.len(), PANTRY_STAPLES.len());
        assert_eq!(store.len().unwrap(), PANTRY_STAPLES.len());
        assert_eq!(created[0].id, 1);
        assert_eq!(created[0].name, "sal");
    }

    #[test]
    fn test_seed_twice_skips_duplicates() {
        let store = InMemoryStore::new();
        seed_store(&store).unwrap();
        let second = seed_store(&store).unwrap();
        assert!(second.is_empty());
        assert_eq!(store.len().unwrap(), PANTRY_STAPLES.len());
    }

    #[test]
    fn test_seed_keeps_existing_records() {
        let store = InMemoryStore::new();
        store.create("Tomate").unwrap();
        let created = seed_store(&store).unwrap();
        assert_eq!(created.len(), PANTRY_STAPLES.len() - 1);
        assert_eq!(store.get(1).unwrap().name, "tomate");
    }

    #[test]
    fn test_seed_names_reports_skips() {
        let store = InMemoryStore::new();
        let report = seed_names(&store, &["Canela", "canela ", "x", "clavo"]).unwrap();
        let names: Vec<&str> = report.created.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["canela", "clavo"]);
        assert_eq!(
            report.skipped,
            vec![
                ("canela ", StoreError::NameConflict),
                ("x", StoreError::NameTooShort),
            ]
        );
    }
}
