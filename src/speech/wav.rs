//! Minimal WAV encoding for captured audio.
//!
//! Only what the transcription backends need: 16-bit little-endian PCM, mono.

const HEADER_LEN: usize = 44;

/// Encode mono 16-bit samples as a complete RIFF/WAVE file.
pub fn encode_pcm16_mono(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_size = (samples.len() * 2) as u32;
    let mut wav = Vec::with_capacity(HEADER_LEN + samples.len() * 2);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }

    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn header_describes_payload() {
        let wav = encode_pcm16_mono(&[0, 1, -1, i16::MAX], 16_000);
        assert_eq!(wav.len(), HEADER_LEN + 8);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 36 + 8);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u32_at(&wav, 24), 16_000);
        assert_eq!(u32_at(&wav, 28), 32_000);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 8);
    }

    #[test]
    fn samples_are_little_endian() {
        let wav = encode_pcm16_mono(&[0x0102], 8_000);
        assert_eq!(&wav[HEADER_LEN..], &[0x02, 0x01]);
    }

    #[test]
    fn empty_recording_is_header_only() {
        let wav = encode_pcm16_mono(&[], 16_000);
        assert_eq!(wav.len(), HEADER_LEN);
        assert_eq!(u32_at(&wav, 40), 0);
    }
}
