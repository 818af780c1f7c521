//! Batch Ledger Module
//!
//! This module owns production batches and their step history.
//! Batch IDs and step IDs come from two independent sequences; step IDs are
//! global across all batches, not per batch.

use crate::{
    error::{LedgerError, LedgerResult},
    Batch, BatchId, BatchStep, BlockHeight, IngredientId, Principal, StepId, StepKey,
};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

/// Status assigned to every freshly created batch
pub const INITIAL_STATUS: &str = "started";

/// Production batch ledger
///
/// Only the brewer who created a batch may append steps to it or change its
/// status. There is no delegation and no owner override.
#[derive(Debug, Default)]
pub struct BatchLedger {
    /// Last batch ID handed out
    last_batch_id: BatchId,
    /// Last step ID handed out (shared by all batches)
    last_step_id: StepId,
    batches: HashMap<BatchId, Batch>,
    /// Ordered by (batch, step) so a batch's history can be range-scanned
    steps: BTreeMap<StepKey, BatchStep>,
}

impl BatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new batch owned by `caller`
    ///
    /// # Arguments
    /// * `name` - Human readable batch name
    /// * `ingredients` - Ingredient IDs, stored as given
    /// * `caller` - Becomes the batch's brewer
    /// * `height` - Current block height, recorded as `created_at`
    ///
    /// # Returns
    /// The new batch ID
    pub fn create_batch(
        &mut self,
        name: String,
        ingredients: Vec<IngredientId>,
        caller: &Principal,
        height: BlockHeight,
    ) -> BatchId {
        let batch_id = self.last_batch_id + 1;
        self.last_batch_id = batch_id;

        info!("Batch #{} ({}) created by {} at height {}", batch_id, name, caller, height);
        self.batches.insert(
            batch_id,
            Batch {
                name,
                brewer: caller.clone(),
                created_at: height,
                ingredients,
                status: INITIAL_STATUS.to_string(),
            },
        );
        batch_id
    }

    /// Append a step to a batch's history
    ///
    /// The step counter only advances when the step is actually recorded.
    ///
    /// # Returns
    /// * `Ok(StepId)` - the globally sequential step ID
    /// * `Err(NotFound)` - unknown batch
    /// * `Err(Unauthorized)` - caller is not the brewer
    pub fn add_step(
        &mut self,
        batch_id: BatchId,
        step_name: String,
        notes: String,
        caller: &Principal,
        height: BlockHeight,
    ) -> LedgerResult<StepId> {
        self.authorize_brewer(batch_id, caller)?;

        let step_id = self.last_step_id + 1;
        self.last_step_id = step_id;

        info!("Step #{} ({}) recorded on batch #{}", step_id, step_name, batch_id);
        self.steps.insert(
            StepKey { batch_id, step_id },
            BatchStep {
                step_name,
                timestamp: height,
                notes,
                recorded_by: caller.clone(),
            },
        );
        Ok(step_id)
    }

    /// Overwrite a batch's status label
    ///
    /// No history of previous statuses is kept.
    pub fn update_status(
        &mut self,
        batch_id: BatchId,
        new_status: String,
        caller: &Principal,
    ) -> LedgerResult<()> {
        self.authorize_brewer(batch_id, caller)?;

        if let Some(batch) = self.batches.get_mut(&batch_id) {
            info!("Batch #{} status: {} -> {}", batch_id, batch.status, new_status);
            batch.status = new_status;
        }
        Ok(())
    }

    pub fn get_batch(&self, batch_id: BatchId) -> Option<&Batch> {
        self.batches.get(&batch_id)
    }

    pub fn get_step(&self, batch_id: BatchId, step_id: StepId) -> Option<&BatchStep> {
        self.steps.get(&StepKey { batch_id, step_id })
    }

    /// Steps of one batch in recording order
    pub fn steps_for(&self, batch_id: BatchId) -> impl Iterator<Item = (StepId, &BatchStep)> + '_ {
        let start = StepKey { batch_id, step_id: 0 };
        let end = StepKey { batch_id, step_id: StepId::MAX };
        self.steps
            .range(start..=end)
            .map(|(key, step)| (key.step_id, step))
    }

    pub fn last_batch_id(&self) -> BatchId {
        self.last_batch_id
    }

    pub fn last_step_id(&self) -> StepId {
        self.last_step_id
    }

    fn authorize_brewer(&self, batch_id: BatchId, caller: &Principal) -> LedgerResult<()> {
        let batch = self.batches.get(&batch_id).ok_or_else(|| {
            warn!("Batch #{} not found", batch_id);
            LedgerError::NotFound
        })?;

        if &batch.brewer != caller {
            warn!(
                "{} is not the brewer of batch #{} (brewer: {})",
                caller, batch_id, batch.brewer
            );
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }
}
