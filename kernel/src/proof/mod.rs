//! Proof module: canonical JSON, domain-separated hashing.
//!
//! Leaf module. It imports nothing else from the kernel.

pub mod canon;
pub mod hash;
pub mod hash_domain;
