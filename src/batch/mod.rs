//! Production Batch Module
//! 
//! This module tracks production batches:
//! - BatchLedger: creates batches, records their steps and status changes
//! - Only a batch's brewer may mutate it

mod ledger;

pub use ledger::{BatchLedger, INITIAL_STATUS};
