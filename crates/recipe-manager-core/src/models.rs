//! Ingredient data model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A catalog ingredient.
///
/// `name` is always stored in normalized form (see [`crate::name`]).
/// Only the store constructs and mutates these; adapters receive copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Filled in by an external nutrition lookup; opaque to the store.
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
}

impl Ingredient {
    pub(crate) fn new(id: u64, name: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at: now,
            updated_at: now,
            nutrition: None,
        }
    }

    /// Refresh `updated_at`. The new value is strictly later than the old
    /// one even when the clock is coarse or skewed.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::nanoseconds(1)
        };
    }
}

/// Nutrition facts per 100g.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    pub energy_kcal: Option<f64>,
    pub fat_g: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbohydrate_g: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}
