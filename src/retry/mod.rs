//! Retry module
//! - policy.rs: bounded, sequential retries with exponential backoff

pub mod policy;

pub use policy::*;
