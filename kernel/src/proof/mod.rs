//! Proof module: canonical JSON bytes and domain-separated digests.
//!
//! Reports produced by the harness are committed to through this module only,
//! so two runs agree on a digest exactly when they agree on every reported byte.

pub mod canon;
pub mod hash;
pub mod hash_domain;
