//! PCM to WAV container encoding.
//!
//! Layout (all integers little-endian):
//!
//! | offset | size | field                         |
//! |--------|------|-------------------------------|
//! | 0      | 4    | `RIFF`                        |
//! | 4      | 4    | 36 + data size                |
//! | 8      | 4    | `WAVE`                        |
//! | 12     | 4    | `fmt `                        |
//! | 16     | 4    | 16 (fmt chunk size)           |
//! | 20     | 2    | 1 (integer PCM)               |
//! | 22     | 2    | channels                      |
//! | 24     | 4    | sample rate                   |
//! | 28     | 4    | byte rate                     |
//! | 32     | 2    | block align                   |
//! | 34     | 2    | bits per sample               |
//! | 36     | 4    | `data`                        |
//! | 40     | 4    | data size                     |
//! | 44     | ..   | samples                       |

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::time::Duration;

use super::CodecError;

/// Size of the canonical WAV header
pub const WAV_HEADER_LEN: usize = 44;
/// Containers produced here are always mono
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: usize = (BITS_PER_SAMPLE / 8) as usize;
const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;
const PCM_FORMAT: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;

/// A playable mono 16-bit WAV asset held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioContainer {
    bytes: Vec<u8>,
    sample_rate: u32,
}

impl AudioContainer {
    /// Wrap already-decoded samples.
    pub fn from_samples(samples: &[i16], sample_rate: u32) -> Result<Self, CodecError> {
        if sample_rate == 0 {
            return Err(CodecError::InvalidSampleRate(sample_rate));
        }
        let byte_rate = sample_rate
            .checked_mul(u32::from(BLOCK_ALIGN))
            .ok_or(CodecError::InvalidSampleRate(sample_rate))?;

        let payload_len = samples.len() * BYTES_PER_SAMPLE;
        let data_size = u32::try_from(payload_len)
            .ok()
            .filter(|size| size.checked_add(36).is_some())
            .ok_or(CodecError::PayloadTooLarge(payload_len))?;

        let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + payload_len);

        // RIFF header
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_size).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");

        // fmt chunk
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        bytes.extend_from_slice(&PCM_FORMAT.to_le_bytes());
        bytes.extend_from_slice(&CHANNELS.to_le_bytes());
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&byte_rate.to_le_bytes());
        bytes.extend_from_slice(&BLOCK_ALIGN.to_le_bytes());
        bytes.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

        // data chunk
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_size.to_le_bytes());
        for sample in samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }

        Ok(Self { bytes, sample_rate })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total container length, header included
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the container holds no samples
    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn sample_count(&self) -> usize {
        (self.bytes.len() - WAV_HEADER_LEN) / BYTES_PER_SAMPLE
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.sample_count() as f64 / f64::from(self.sample_rate))
    }

    /// Decode the data chunk back into samples.
    pub fn samples(&self) -> Vec<i16> {
        decode_samples(&self.bytes[WAV_HEADER_LEN..])
    }

    pub const fn mime_type(&self) -> &'static str {
        "audio/wav"
    }
}

impl AsRef<[u8]> for AudioContainer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Decode a base64 buffer of signed 16-bit little-endian PCM and wrap it as WAV.
///
/// Odd byte counts are rejected rather than truncated.
pub fn encode(base64_pcm: &str, sample_rate: u32) -> Result<AudioContainer, CodecError> {
    let raw = STANDARD
        .decode(base64_pcm.trim())
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))?;

    if raw.len() % BYTES_PER_SAMPLE != 0 {
        tracing::warn!(len = raw.len(), "rejecting odd-length PCM payload");
        return Err(CodecError::OddLength(raw.len()));
    }

    let samples = decode_samples(&raw);
    tracing::debug!(samples = samples.len(), sample_rate, "encoding WAV container");
    AudioContainer::from_samples(&samples, sample_rate)
}

fn decode_samples(raw: &[u8]) -> Vec<i16> {
    raw.chunks_exact(BYTES_PER_SAMPLE)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcm_base64(samples: &[i16]) -> String {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        STANDARD.encode(bytes)
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn encodes_reference_samples() {
        let container = encode(&pcm_base64(&[0, 1000, -1000, 32767]), 24000).unwrap();
        let wav = container.as_bytes();

        assert_eq!(wav.len(), 52);
        assert_eq!(u32_at(wav, 24), 24000);
        assert_eq!(i16::from_le_bytes([wav[44], wav[45]]), 0);
        assert_eq!(i16::from_le_bytes([wav[50], wav[51]]), 32767);
    }

    #[test]
    fn header_fields() {
        let container = encode(&pcm_base64(&[1, 2, 3]), 16000).unwrap();
        let wav = container.as_bytes();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(wav, 4), 36 + 6);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(wav, 16), 16);
        assert_eq!(u16_at(wav, 20), 1);
        assert_eq!(u16_at(wav, 22), 1);
        assert_eq!(u32_at(wav, 24), 16000);
        assert_eq!(u32_at(wav, 28), 32000);
        assert_eq!(u16_at(wav, 32), 2);
        assert_eq!(u16_at(wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(wav, 40), 6);
    }

    #[test]
    fn samples_round_trip() {
        let samples = [i16::MIN, -1, 0, 1, 12345, i16::MAX];
        let container = encode(&pcm_base64(&samples), 44100).unwrap();
        assert_eq!(container.samples(), samples);
        assert_eq!(container.sample_rate(), 44100);
        assert_eq!(container.sample_count(), samples.len());
    }

    #[test]
    fn empty_payload_is_header_only() {
        let container = encode("", 24000).unwrap();
        assert_eq!(container.len(), WAV_HEADER_LEN);
        assert!(container.is_empty());
        assert_eq!(container.duration(), Duration::ZERO);
    }

    #[test]
    fn duration_follows_rate() {
        let container = AudioContainer::from_samples(&vec![0i16; 12000], 24000).unwrap();
        assert_eq!(container.duration(), Duration::from_millis(500));
    }

    #[test]
    fn rejects_odd_length_payload() {
        let odd = STANDARD.encode([0u8, 1, 2]);
        assert_eq!(encode(&odd, 24000), Err(CodecError::OddLength(3)));
    }

    #[test]
    fn rejects_bad_base64_and_rates() {
        assert!(matches!(
            encode("not base64!!", 24000),
            Err(CodecError::InvalidBase64(_))
        ));
        assert_eq!(
            encode(&pcm_base64(&[1]), 0),
            Err(CodecError::InvalidSampleRate(0))
        );
        assert_eq!(
            encode(&pcm_base64(&[1]), u32::MAX),
            Err(CodecError::InvalidSampleRate(u32::MAX))
        );
    }
}
