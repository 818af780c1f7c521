//! State Management Module
//! 
//! This module holds the authoritative ledger state:
//! - Ledger: the four registries plus the current block height
//! - SharedLedger: lock-guarded handle used by the server and the block clock

mod ledger;
mod shared;

pub use ledger::Ledger;
pub use shared::SharedLedger;
