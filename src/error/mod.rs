//! Error Handling Module
//!
//! - Core error type (`LlmError`) and its categories
//! - User-facing summaries for rendering failures
//! - Conversions from transport and parser errors
//!
//! # Example
//!
//! ```rust,ignore
//! use genwire::error::{LlmError, ErrorCategory};
//!
//! let error = LlmError::api_error(503, "unavailable");
//! assert_eq!(error.category(), ErrorCategory::Server);
//! assert!(error.is_retryable());
//! ```

mod conversions;
pub mod helpers;
pub mod types;

pub use helpers::*;
pub use types::*;
