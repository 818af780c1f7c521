//! Ingredient Registry
//!
//! Assigns sequential ingredient IDs and keeps the registered records.

use crate::{Ingredient, IngredientId, Principal};
use std::collections::HashMap;
use tracing::info;

/// Keyed store of ingredient provenance records
#[derive(Debug, Default)]
pub struct IngredientRegistry {
    /// Last ingredient ID handed out (0 before the first registration)
    last_id: IngredientId,
    ingredients: HashMap<IngredientId, Ingredient>,
}

impl IngredientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new ingredient
    ///
    /// Always succeeds. The caller is recorded as `registered_by`.
    ///
    /// # Returns
    /// The newly allocated ingredient ID
    pub fn register(
        &mut self,
        name: String,
        supplier: String,
        origin: String,
        harvest_date: u64,
        ingredient_type: String,
        caller: &Principal,
    ) -> IngredientId {
        let id = self.last_id + 1;
        self.last_id = id;

        info!("Ingredient #{} ({}) registered by {}", id, name, caller);
        self.ingredients.insert(
            id,
            Ingredient {
                name,
                supplier,
                origin,
                harvest_date,
                ingredient_type,
                registered_by: caller.clone(),
            },
        );
        id
    }

    pub fn get(&self, id: IngredientId) -> Option<&Ingredient> {
        self.ingredients.get(&id)
    }

    pub fn last_id(&self) -> IngredientId {
        self.last_id
    }
}
