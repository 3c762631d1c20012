//! Authentication and authorization modules.
//!
//! # Purpose
//! Groups token issuance/verification and the bearer-credential guard that
//! protects admin operations.
pub mod guard;
pub mod token;
