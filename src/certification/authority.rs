//! Certification Authority Module
//!
//! Permissioned issuance of certifications against (batch, type) pairs.
//!
//! # Access Rules
//! - Only the owner fixed at construction may register or (de)activate
//!   certifiers.
//! - The caller of `issue_certification` is the acting certifier. It must be
//!   registered, active, and allowed to issue the requested type (exact match).
//! - Issuing again for the same pair overwrites the previous certification,
//!   whoever issued it and whatever its expiration was.
//!
//! # Expiry
//! Validity is never stored. `is_certified` compares the stored expiration
//! with the block height passed in at query time.

use crate::{
    error::{LedgerError, LedgerResult},
    BatchId, BlockHeight, Certification, CertificationKey, Certifier, Principal,
};
use std::collections::HashMap;
use tracing::{info, warn};

/// Certifier set and certification set governed by a single owner
#[derive(Debug)]
pub struct CertificationAuthority {
    owner: Principal,
    certifiers: HashMap<Principal, Certifier>,
    certifications: HashMap<CertificationKey, Certification>,
}

impl CertificationAuthority {
    /// Creates an authority with no certifiers
    ///
    /// # Arguments
    /// * `owner` - The only principal allowed to manage certifiers
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            certifiers: HashMap::new(),
            certifications: HashMap::new(),
        }
    }

    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    /// Register or replace a certifier
    ///
    /// Re-registering overwrites the name and allowed types and reactivates the
    /// certifier. Types are not merged with the previous list.
    pub fn register_certifier(
        &mut self,
        new_certifier: Principal,
        name: String,
        certification_types: Vec<String>,
        caller: &Principal,
    ) -> LedgerResult<()> {
        self.require_owner(caller)?;

        info!(
            "Certifier {} ({}) registered for types {:?}",
            new_certifier, name, certification_types
        );
        self.certifiers.insert(
            new_certifier,
            Certifier {
                name,
                certification_types,
                active: true,
            },
        );
        Ok(())
    }

    /// Toggle a certifier's active flag
    ///
    /// # Returns
    /// * `Err(Unauthorized)` - caller is not the owner
    /// * `Err(UnknownCertifier)` - no record for `certifier`
    pub fn set_certifier_active(
        &mut self,
        certifier: &Principal,
        active: bool,
        caller: &Principal,
    ) -> LedgerResult<()> {
        self.require_owner(caller)?;

        let record = self
            .certifiers
            .get_mut(certifier)
            .ok_or(LedgerError::UnknownCertifier)?;
        record.active = active;
        info!("Certifier {} active={}", certifier, active);
        Ok(())
    }

    /// Issue (or reissue) a certification on behalf of `caller`
    ///
    /// # Arguments
    /// * `batch_id` - Certified batch (not checked against the batch ledger)
    /// * `cert_type` - Must appear verbatim in the caller's allowed types
    /// * `expiration` - First block height at which the certification is no longer valid
    /// * `details` - Free-form attestation text
    /// * `caller` - Acting certifier
    /// * `height` - Current block height, recorded as the timestamp
    pub fn issue_certification(
        &mut self,
        batch_id: BatchId,
        cert_type: String,
        expiration: BlockHeight,
        details: String,
        caller: &Principal,
        height: BlockHeight,
    ) -> LedgerResult<()> {
        let certifier = self.certifiers.get(caller).ok_or_else(|| {
            warn!("{} is not a registered certifier", caller);
            LedgerError::UnknownCertifier
        })?;

        if !certifier.active {
            warn!("Certifier {} is inactive", caller);
            return Err(LedgerError::InactiveCertifier);
        }

        if !certifier.allows(&cert_type) {
            warn!("Certifier {} may not issue '{}'", caller, cert_type);
            return Err(LedgerError::TypeNotAllowed);
        }

        let key = CertificationKey::new(batch_id, cert_type);
        let certification = Certification {
            certifier: caller.clone(),
            timestamp: height,
            expiration,
            details,
        };

        if let Some(previous) = self.certifications.insert(key.clone(), certification) {
            info!(
                "Certification '{}' on batch #{} replaced (previous issuer {}, expiration {})",
                key.cert_type, key.batch_id, previous.certifier, previous.expiration
            );
        } else {
            info!(
                "Certification '{}' issued on batch #{} by {} until height {}",
                key.cert_type, key.batch_id, caller, expiration
            );
        }
        Ok(())
    }

    /// Whether a certification exists for the pair and has not expired at `height`
    pub fn is_certified(&self, batch_id: BatchId, cert_type: &str, height: BlockHeight) -> bool {
        self.certifications
            .get(&CertificationKey::new(batch_id, cert_type))
            .is_some_and(|c| c.is_valid_at(height))
    }

    pub fn get_certifier(&self, certifier: &Principal) -> Option<&Certifier> {
        self.certifiers.get(certifier)
    }

    fn require_owner(&self, caller: &Principal) -> LedgerResult<()> {
        if caller != &self.owner {
            warn!("{} is not the certification owner", caller);
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn certification(&self, batch_id: BatchId, cert_type: &str) -> Option<&Certification> {
        self.certifications.get(&CertificationKey::new(batch_id, cert_type))
    }
}
