use crate::{
    dispatch::{self, Call, Method, Value},
    error::{ClockError, DispatchError},
    state::Ledger,
    BlockHeight,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Ledger handle shared between the API server and the block clock
///
/// The lock is the single serialization point for the whole ledger: mutating
/// calls hold the write lock for their full duration, reads share the read lock.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Run one call atomically
    pub async fn dispatch(&self, call: &Call) -> Result<Value, DispatchError> {
        let method = Method::resolve(&call.contract, &call.method)?;
        if method.is_read_only() {
            let ledger = self.inner.read().await;
            dispatch::query(&ledger, call)
        } else {
            let mut ledger = self.inner.write().await;
            dispatch::dispatch(&mut ledger, call)
        }
    }

    pub async fn block_height(&self) -> BlockHeight {
        self.inner.read().await.block_height()
    }

    pub async fn advance_blocks(&self, blocks: u64) -> Result<BlockHeight, ClockError> {
        self.inner.write().await.advance_blocks(blocks)
    }
}
