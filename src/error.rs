//! Error Module
//!
//! Two tiers of failure:
//! - `LedgerError`: domain precondition violations on mutating operations.
//!   Surfaced to callers as an `err` value carrying a stable ordinal.
//! - `DispatchError`: the call never reached a registry (unknown contract or
//!   method, malformed arguments, missing sender).

use thiserror::Error;

/// Domain errors returned by registry mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("referenced record not found")]
    NotFound,
    #[error("caller is not authorized for this operation")]
    Unauthorized,
    #[error("caller is not a registered certifier")]
    UnknownCertifier,
    #[error("certifier is inactive")]
    InactiveCertifier,
    #[error("certifier may not issue this certification type")]
    TypeNotAllowed,
}

impl LedgerError {
    /// Stable ordinal exposed to callers, distinct per category
    pub fn code(&self) -> u64 {
        match self {
            LedgerError::NotFound => 1,
            LedgerError::Unauthorized => 2,
            LedgerError::UnknownCertifier => 3,
            LedgerError::InactiveCertifier => 4,
            LedgerError::TypeNotAllowed => 5,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(LedgerError::NotFound),
            2 => Some(LedgerError::Unauthorized),
            3 => Some(LedgerError::UnknownCertifier),
            4 => Some(LedgerError::InactiveCertifier),
            5 => Some(LedgerError::TypeNotAllowed),
            _ => None,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failures of the dispatch layer itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Contract not found: {0}")]
    UnknownContract(String),
    #[error("Method not found: {contract}.{method}")]
    UnknownMethod { contract: String, method: String },
    #[error("{method} expects {expected} arguments, got {got}")]
    Arity {
        method: String,
        expected: usize,
        got: usize,
    },
    #[error("{method} argument {index} must be {expected}")]
    ArgumentType {
        method: String,
        index: usize,
        expected: &'static str,
    },
    #[error("{0} requires a sender")]
    MissingSender(String),
    #[error("{0} mutates state and cannot run as a read")]
    NotReadOnly(String),
}

/// Rejected attempts to move the ledger clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("block height cannot move backwards: current {current}, requested {requested}")]
    Regression { current: u64, requested: u64 },
    #[error("block height overflow")]
    Overflow,
}
