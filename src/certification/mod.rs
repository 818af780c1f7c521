//! Certification Module
//! 
//! This module implements third-party certification of batches:
//! - A fixed owner registers certifiers and the certification types each may issue
//! - Certifiers issue certifications keyed by (batch, type), with an expiration height
//! - Validity is evaluated against the block height at query time

mod authority;


pub use authority::CertificationAuthority;
