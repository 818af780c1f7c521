//! Ledger Container Module
//!
//! One `Ledger` holds the four registries and the current block height for a
//! single deployment. Registries never advance the clock themselves; every
//! operation that needs the height receives it from here.

use crate::{
    batch::BatchLedger,
    certification::CertificationAuthority,
    error::{ClockError, LedgerResult},
    ingredients::IngredientRegistry,
    quality::QualityTestLog,
    BatchId, BlockHeight, IngredientId, Principal, StepId, TestId,
};
use tracing::debug;

/// Authoritative in-memory state of one traceability deployment
#[derive(Debug)]
pub struct Ledger {
    block_height: BlockHeight,
    ingredients: IngredientRegistry,
    batches: BatchLedger,
    quality: QualityTestLog,
    certification: CertificationAuthority,
}

impl Ledger {
    /// Creates an empty ledger
    ///
    /// # Arguments
    /// * `owner` - Owner of the certification authority
    /// * `start_height` - Initial block height
    pub fn new(owner: Principal, start_height: BlockHeight) -> Self {
        Self {
            block_height: start_height,
            ingredients: IngredientRegistry::new(),
            batches: BatchLedger::new(),
            quality: QualityTestLog::new(),
            certification: CertificationAuthority::new(owner),
        }
    }

    // ----- clock (environment side) -----

    pub fn block_height(&self) -> BlockHeight {
        self.block_height
    }

    /// Advance the clock by `blocks`, returning the new height
    pub fn advance_blocks(&mut self, blocks: u64) -> Result<BlockHeight, ClockError> {
        self.block_height = self
            .block_height
            .checked_add(blocks)
            .ok_or(ClockError::Overflow)?;
        debug!("Block height advanced to {}", self.block_height);
        Ok(self.block_height)
    }

    /// Move the clock to an absolute height; the clock never goes backwards
    pub fn set_block_height(&mut self, height: BlockHeight) -> Result<(), ClockError> {
        if height < self.block_height {
            return Err(ClockError::Regression {
                current: self.block_height,
                requested: height,
            });
        }
        self.block_height = height;
        Ok(())
    }

    // ----- read access -----

    pub fn ingredients(&self) -> &IngredientRegistry {
        &self.ingredients
    }

    pub fn batches(&self) -> &BatchLedger {
        &self.batches
    }

    pub fn quality(&self) -> &QualityTestLog {
        &self.quality
    }

    pub fn certification(&self) -> &CertificationAuthority {
        &self.certification
    }

    /// Certification validity at the current block height
    pub fn is_certified(&self, batch_id: BatchId, cert_type: &str) -> bool {
        self.certification
            .is_certified(batch_id, cert_type, self.block_height)
    }

    // ----- mutations -----

    pub fn register_ingredient(
        &mut self,
        name: String,
        supplier: String,
        origin: String,
        harvest_date: u64,
        ingredient_type: String,
        caller: &Principal,
    ) -> IngredientId {
        self.ingredients
            .register(name, supplier, origin, harvest_date, ingredient_type, caller)
    }

    pub fn create_batch(
        &mut self,
        name: String,
        ingredients: Vec<IngredientId>,
        caller: &Principal,
    ) -> BatchId {
        self.batches
            .create_batch(name, ingredients, caller, self.block_height)
    }

    pub fn add_batch_step(
        &mut self,
        batch_id: BatchId,
        step_name: String,
        notes: String,
        caller: &Principal,
    ) -> LedgerResult<StepId> {
        self.batches
            .add_step(batch_id, step_name, notes, caller, self.block_height)
    }

    pub fn update_batch_status(
        &mut self,
        batch_id: BatchId,
        new_status: String,
        caller: &Principal,
    ) -> LedgerResult<()> {
        self.batches.update_status(batch_id, new_status, caller)
    }

    pub fn record_test(
        &mut self,
        batch_id: BatchId,
        test_type: String,
        results: String,
        passed: bool,
        caller: &Principal,
    ) -> TestId {
        self.quality
            .record_test(batch_id, test_type, results, passed, caller, self.block_height)
    }

    pub fn register_certifier(
        &mut self,
        new_certifier: Principal,
        name: String,
        certification_types: Vec<String>,
        caller: &Principal,
    ) -> LedgerResult<()> {
        self.certification
            .register_certifier(new_certifier, name, certification_types, caller)
    }

    pub fn set_certifier_active(
        &mut self,
        certifier: &Principal,
        active: bool,
        caller: &Principal,
    ) -> LedgerResult<()> {
        self.certification
            .set_certifier_active(certifier, active, caller)
    }

    pub fn issue_certification(
        &mut self,
        batch_id: BatchId,
        cert_type: String,
        expiration: BlockHeight,
        details: String,
        caller: &Principal,
    ) -> LedgerResult<()> {
        self.certification.issue_certification(
            batch_id,
            cert_type,
            expiration,
            details,
            caller,
            self.block_height,
        )
    }
}
