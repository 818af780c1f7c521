//! Chain Module
//! 
//! Supplies the ledger's notion of time. Block production and consensus are
//! out of scope; the clock just advances the height on a timer.

mod clock;
pub use clock::BlockClock;
