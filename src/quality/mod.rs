//! Quality Testing Module
//! 
//! Append-only log of quality test outcomes. Tests reference batches by ID
//! without checking that the batch exists.

mod log;
pub use log::QualityTestLog;
