//! Block Clock Module
//!
//! Stands in for the external chain: advances the ledger's block height on a
//! fixed interval. The registries only ever read the height.

use crate::{config::ChainConfig, state::SharedLedger};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Background task advancing the block height
pub struct BlockClock {
    ledger: SharedLedger,
    config: ChainConfig,
}

impl BlockClock {
    /// Creates a new block clock
    ///
    /// # Arguments
    /// * `ledger` - Shared ledger whose height is advanced
    /// * `config` - Chain settings (tick interval)
    pub fn new(ledger: SharedLedger, config: ChainConfig) -> Self {
        Self { ledger, config }
    }

    /// Run the clock loop
    ///
    /// Returns immediately when `block_interval_ms` is 0 (manual advancement
    /// only). Otherwise runs until the height overflows.
    pub async fn start(self) -> anyhow::Result<()> {
        if self.config.block_interval_ms == 0 {
            info!("Block clock disabled; height only moves via ledger_advanceBlocks");
            return Ok(());
        }

        info!(
            "Block clock starting: one block every {}ms",
            self.config.block_interval_ms
        );
        let mut ticker = interval(Duration::from_millis(self.config.block_interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match self.ledger.advance_blocks(1).await {
                Ok(height) => debug!("Block #{}", height),
                Err(e) => {
                    warn!("Block clock stopped: {}", e);
                    return Err(e.into());
                }
            }
        }
    }
}
