//! Physical record layout: zero-padded payload words plus a checksum word.
//!
//! The checksum domain covers the region's offset, its type tag, and every
//! padded payload word. A record written for one offset/tag pair therefore
//! never validates under another, which is the whole staleness-detection
//! mechanism after a firmware change. The layout is private to a firmware
//! image and not stable across offset or tag changes.

use heapless::Vec;

use crate::prefs::{
    error::PrefsError,
    types::{WORD_BYTES, Word},
};

/// Largest payload a single record may carry, in words.
pub const MAX_RECORD_WORDS: usize = 64;

/// Staging buffer for one full record: payload plus the checksum word.
pub(crate) type RecordBuf = Vec<Word, { MAX_RECORD_WORDS + 1 }>;

/// Payload words needed to carry `len` bytes.
pub(crate) const fn words_for_bytes(len: usize) -> usize {
    len.div_ceil(WORD_BYTES)
}

/// Packs `bytes` into exactly `words` little-endian words, zero-padding the
/// tail.
pub(crate) fn pack_payload(bytes: &[u8], words: usize, buf: &mut RecordBuf) -> Result<(), PrefsError> {
    if words > MAX_RECORD_WORDS || words_for_bytes(bytes.len()) > words {
        return Err(PrefsError::TooLarge);
    }

    buf.clear();
    for index in 0..words {
        let mut raw = [0u8; WORD_BYTES];
        let start = index * WORD_BYTES;
        if start < bytes.len() {
            let end = (start + WORD_BYTES).min(bytes.len());
            raw[..end - start].copy_from_slice(&bytes[start..end]);
        }
        // Capacity checked above
        let _ = buf.push(Word::from_le_bytes(raw));
    }
    Ok(())
}

/// Copies stored payload bytes back out, trimmed to `out.len()`.
///
/// Caller guarantees `words` covers `out`.
pub(crate) fn unpack_payload(words: &[Word], out: &mut [u8]) {
    for (index, byte) in out.iter_mut().enumerate() {
        let word = words[index / WORD_BYTES];
        *byte = word.to_le_bytes()[index % WORD_BYTES];
    }
}

/// Record checksum: CRC-32 over the little-endian bytes of the region
/// offset, the type tag, and every padded payload word.
pub(crate) fn record_checksum(offset: usize, type_tag: u32, words: &[Word]) -> u32 {
    let mut crc = crc32_update(0xFFFF_FFFF, &(offset as u32).to_le_bytes());
    crc = crc32_update(crc, &type_tag.to_le_bytes());
    for word in words {
        crc = crc32_update(crc, &word.to_le_bytes());
    }
    !crc
}

// CRC-32/IEEE, bitwise. Small enough that a lookup table isn't worth the
// flash it would occupy.
fn crc32_update(mut crc: u32, bytes: &[u8]) -> u32 {
    for &byte in bytes {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_for_bytes_rounds_up() {
        assert_eq!(words_for_bytes(0), 0);
        assert_eq!(words_for_bytes(1), 1);
        assert_eq!(words_for_bytes(4), 1);
        assert_eq!(words_for_bytes(5), 2);
        assert_eq!(words_for_bytes(8), 2);
    }

    #[test]
    fn pack_zero_pads_the_tail() {
        let mut buf = RecordBuf::new();
        pack_payload(&[0x11, 0x22, 0x33, 0x44, 0x55], 3, &mut buf).unwrap();

        assert_eq!(buf.as_slice(), &[0x4433_2211, 0x0000_0055, 0x0000_0000]);
    }

    #[test]
    fn pack_rejects_oversized_payloads() {
        let mut buf = RecordBuf::new();

        // More bytes than the requested word count can hold
        assert_eq!(
            pack_payload(&[0u8; 9], 2, &mut buf),
            Err(PrefsError::TooLarge)
        );

        // More words than the record buffer can hold
        assert_eq!(
            pack_payload(&[0u8; 4], MAX_RECORD_WORDS + 1, &mut buf),
            Err(PrefsError::TooLarge)
        );
    }

    #[test]
    fn unpack_trims_to_requested_length() {
        let words = [0x4433_2211u32, 0x0000_0055];
        let mut out = [0u8; 5];
        unpack_payload(&words, &mut out);
        assert_eq!(out, [0x11, 0x22, 0x33, 0x44, 0x55]);
    }

    #[test]
    fn checksum_depends_on_offset_and_tag() {
        let words = [0x0000_0007u32, 0x0000_0000];

        let baseline = record_checksum(0, 0x1001, &words);
        assert_ne!(baseline, record_checksum(1, 0x1001, &words));
        assert_ne!(baseline, record_checksum(0, 0x1002, &words));
        assert_ne!(baseline, record_checksum(0, 0x1001, &[0x0000_0007]));
    }

    #[test]
    fn checksum_catches_every_single_bit_flip() {
        let words = [0xA5A5_5A5Au32, 0x0F0F_F0F0];
        let baseline = record_checksum(8, 0xBEEF, &words);

        for word_index in 0..words.len() {
            for bit in 0..32 {
                let mut flipped = words;
                flipped[word_index] ^= 1 << bit;
                assert_ne!(
                    baseline,
                    record_checksum(8, 0xBEEF, &flipped),
                    "missed flip of word {} bit {}",
                    word_index,
                    bit
                );
            }
        }
    }

    #[test]
    fn checksum_is_stable_for_identical_input() {
        let words = [1u32, 2, 3];
        assert_eq!(
            record_checksum(4, 0x2002, &words),
            record_checksum(4, 0x2002, &words)
        );
    }
}
