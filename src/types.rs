use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger clock value supplied by the environment
pub type BlockHeight = u64;

pub type IngredientId = u64;
pub type BatchId = u64;
pub type StepId = u64;
pub type TestId = u64;

/// Opaque caller identity, compared by equality only
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Provenance record for a raw ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub supplier: String,
    pub origin: String,
    /// Caller-defined encoding, usually YYYYMMDD
    pub harvest_date: u64,
    pub ingredient_type: String,
    pub registered_by: Principal,
}

/// Production run owned by a single brewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub name: String,
    pub brewer: Principal,
    pub created_at: BlockHeight,
    /// Stored verbatim, never checked against the ingredient registry
    pub ingredients: Vec<IngredientId>,
    pub status: String,
}

/// One entry of a batch's append-only step history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStep {
    pub step_name: String,
    pub timestamp: BlockHeight,
    pub notes: String,
    pub recorded_by: Principal,
}

/// Composite key for batch steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepKey {
    pub batch_id: BatchId,
    pub step_id: StepId,
}

/// Outcome of a quality test against a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityTest {
    pub batch_id: BatchId,
    pub test_type: String,
    pub timestamp: BlockHeight,
    pub tester: Principal,
    pub results: String,
    pub passed: bool,
}

/// Third party allowed to issue certifications of specific types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certifier {
    pub name: String,
    pub certification_types: Vec<String>,
    pub active: bool,
}

impl Certifier {
    /// Exact-match membership test against the allowed type list
    pub fn allows(&self, cert_type: &str) -> bool {
        self.certification_types.iter().any(|t| t == cert_type)
    }
}

/// Attestation for one (batch, certification type) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub certifier: Principal,
    pub timestamp: BlockHeight,
    pub expiration: BlockHeight,
    pub details: String,
}

impl Certification {
    /// Valid strictly before the expiration height
    pub fn is_valid_at(&self, height: BlockHeight) -> bool {
        self.expiration > height
    }
}

/// Composite key for certifications
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CertificationKey {
    pub batch_id: BatchId,
    pub cert_type: String,
}

impl CertificationKey {
    pub fn new(batch_id: BatchId, cert_type: impl Into<String>) -> Self {
        Self {
            batch_id,
            cert_type: cert_type.into(),
        }
    }
}
