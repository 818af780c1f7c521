//! API Module
//! 
//! This module handles the JSON-RPC API in front of the ledger.
//! It provides the HTTP endpoint external callers use to invoke operations.

mod server;
pub use server::{process, JsonRpcError, JsonRpcRequest, JsonRpcResponse, Server};
