//! Dispatch Module
//! 
//! This module is the single call surface of the ledger:
//! - Value: typed arguments and results (JSON-serializable)
//! - Router: resolves contract/method names and runs the operation
//! 
//! Dispatch failures (unknown contract or method, bad arguments) are kept
//! apart from domain failures, which come back as `err` values.

mod router;
mod value;

pub use router::{
    dispatch, query, Call, Method, CERTIFICATION, INGREDIENT_REGISTRY, PRODUCTION_BATCH,
    QUALITY_TESTING,
};
pub use value::Value;
