//! Types for speech synthesis

use serde::{Deserialize, Serialize};

/// Audio encodings a provider can be configured to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WAV format (uncompressed)
    Wav,
    /// MP3 format
    Mp3,
    /// Opus codec in an OGG container
    Opus,
    /// FLAC format (lossless)
    Flac,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/opus",
            Self::Flac => "audio/flac",
        }
    }

    /// Get the file extension for this audio format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Flac => "flac",
        }
    }
}

/// Synthesized audio with metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Vec<u8>,
    format: AudioFormat,
    duration_ms: Option<u64>,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self {
            data,
            format,
            duration_ms: None,
        }
    }

    /// Attach a known duration
    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the duration in milliseconds (if known)
    #[must_use]
    pub const fn duration_ms(&self) -> Option<u64> {
        self.duration_ms
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Duration of a canonical PCM WAV file, read from its header
///
/// Returns `None` for anything that is not a plain RIFF/WAVE file with a
/// `fmt ` chunk followed by a `data` chunk.
#[must_use]
pub fn wav_duration_ms(bytes: &[u8]) -> Option<u64> {
    if bytes.len() < 44 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return None;
    }

    let byte_rate = u32::from_le_bytes(bytes[28..32].try_into().ok()?);
    if byte_rate == 0 {
        return None;
    }

    let mut offset = 12;
    while offset + 8 <= bytes.len() {
        let id = &bytes[offset..offset + 4];
        let size = u32::from_le_bytes(bytes[offset + 4..offset + 8].try_into().ok()?);
        if id == b"data" {
            return Some(u64::from(size) * 1000 / u64::from(byte_rate));
        }
        offset += 8 + usize::try_from(size).ok()?;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_header(byte_rate: u32, data_len: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&22050u32.to_le_bytes());
        bytes.extend_from_slice(&byte_rate.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes
    }

    #[test]
    fn audio_format_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AudioFormat::Wav).unwrap(), "\"wav\"");
        assert_eq!(serde_json::to_string(&AudioFormat::Opus).unwrap(), "\"opus\"");
    }

    #[test]
    fn audio_format_metadata() {
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
        assert_eq!(AudioFormat::Flac.extension(), "flac");
    }

    #[test]
    fn audio_data_accessors() {
        let audio = AudioData::new(vec![1, 2, 3], AudioFormat::Wav).with_duration(120);
        assert_eq!(audio.size_bytes(), 3);
        assert_eq!(audio.duration_ms(), Some(120));
        assert_eq!(audio.format(), AudioFormat::Wav);
        assert!(!audio.is_empty());
        assert_eq!(audio.into_data(), vec![1, 2, 3]);
    }

    #[test]
    fn wav_duration_from_header() {
        let header = wav_header(44100, 88200);
        assert_eq!(wav_duration_ms(&header), Some(2000));
    }

    #[test]
    fn wav_duration_rejects_other_data() {
        assert_eq!(wav_duration_ms(b"not a wav file at all, clearly not one"), None);
        assert_eq!(wav_duration_ms(&[0u8; 64]), None);
    }
}
