//! Ingredient Registry Module
//! 
//! Leaf store of ingredient provenance records. Any principal may register
//! an ingredient; records are immutable once stored.

mod registry;
pub use registry::IngredientRegistry;
