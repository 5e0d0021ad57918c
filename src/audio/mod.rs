//! Audio payload handling.
//!
//! Speech replies carry raw mono PCM as base64 inline data. [`encode`] turns that into
//! a self-describing WAV [`AudioContainer`].

mod wav;

pub use wav::{AudioContainer, BITS_PER_SAMPLE, CHANNELS, WAV_HEADER_LEN, encode};

use thiserror::Error;

/// Failure to build a WAV container from an inline payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Audio payload is not valid base64: {0}")]
    InvalidBase64(String),
    /// 16-bit PCM needs an even byte count.
    #[error("Audio payload has odd length {0}; 16-bit PCM needs an even byte count")]
    OddLength(usize),
    #[error("Unsupported sample rate: {0}")]
    InvalidSampleRate(u32),
    #[error("Audio payload of {0} bytes does not fit a WAV container")]
    PayloadTooLarge(usize),
}
