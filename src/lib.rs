//! Supply-chain traceability ledger for brewing and food production.
//! Ingredients are registered, grouped into production batches, quality tested,
//! and certified by permissioned third parties. The core is an in-memory state
//! machine; the API server and block clock are thin runtime layers around it.

pub mod types; // Principals, identifiers and record types shared by all registries.
pub mod error; // Domain and dispatch error types.
pub mod ingredients; // Ingredient provenance registry.
pub mod batch; // Production batches and their step history.
pub mod quality; // Quality test log.
pub mod certification; // Certifier management and certification issuance.
pub mod state; // Ledger container and its shared, lock-guarded handle.
pub mod dispatch; // Contract/method call surface with typed values.
pub mod chain; // Block height clock.
pub mod api; // JSON-RPC transport.
pub mod config; // Defines and loads service configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::Config;
pub use error::{DispatchError, LedgerError};
pub use state::{Ledger, SharedLedger};
