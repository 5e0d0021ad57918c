//! Utility modules
//!
//! Small helpers shared by the transport and the client.

pub mod mime;
pub mod url;

pub use mime::parse_sample_rate;
pub use url::*;
