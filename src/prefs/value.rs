//! Fixed-width byte encodings for storable values.

use crate::prefs::types::WORD_BYTES;

/// A value with a fixed-width, explicit byte encoding.
///
/// Encodings are little-endian byte sequences rather than in-memory layout,
/// so a record's checksum domain is identical across architectures with
/// different struct padding. Both `encode_to` and `decode_from` operate on
/// exactly [`ENCODED_LEN`](Self::ENCODED_LEN) bytes.
pub trait PrefValue: Clone + PartialEq {
    /// Encoded width in bytes.
    const ENCODED_LEN: usize;

    /// Writes the encoding into `out` (`ENCODED_LEN` bytes).
    fn encode_to(&self, out: &mut [u8]);

    /// Reconstructs a value from `bytes` (`ENCODED_LEN` bytes).
    fn decode_from(bytes: &[u8]) -> Self;

    /// Payload words needed to store one encoded value.
    fn encoded_words() -> usize {
        Self::ENCODED_LEN.div_ceil(WORD_BYTES)
    }
}

impl PrefValue for bool {
    const ENCODED_LEN: usize = 1;

    fn encode_to(&self, out: &mut [u8]) {
        out[0] = *self as u8;
    }

    fn decode_from(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

macro_rules! impl_pref_value_num {
    ($($ty:ty),* $(,)?) => {
        $(
            paste::paste! {
                #[doc = "Little-endian fixed-width encoding of `" $ty "`."]
                impl PrefValue for $ty {
                    const ENCODED_LEN: usize = core::mem::size_of::<$ty>();

                    fn encode_to(&self, out: &mut [u8]) {
                        out[..Self::ENCODED_LEN].copy_from_slice(&self.to_le_bytes());
                    }

                    fn decode_from(bytes: &[u8]) -> Self {
                        <$ty>::from_le_bytes(bytes[..Self::ENCODED_LEN].try_into().unwrap())
                    }
                }
            }
        )*
    };
}

impl_pref_value_num!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl<const N: usize> PrefValue for [u8; N] {
    const ENCODED_LEN: usize = N;

    fn encode_to(&self, out: &mut [u8]) {
        out[..N].copy_from_slice(self);
    }

    fn decode_from(bytes: &[u8]) -> Self {
        bytes[..N].try_into().unwrap()
    }
}

impl<A: PrefValue, B: PrefValue> PrefValue for (A, B) {
    const ENCODED_LEN: usize = A::ENCODED_LEN + B::ENCODED_LEN;

    fn encode_to(&self, out: &mut [u8]) {
        let (a, b) = out.split_at_mut(A::ENCODED_LEN);
        self.0.encode_to(a);
        self.1.encode_to(&mut b[..B::ENCODED_LEN]);
    }

    fn decode_from(bytes: &[u8]) -> Self {
        let (a, b) = bytes.split_at(A::ENCODED_LEN);
        (A::decode_from(a), B::decode_from(&b[..B::ENCODED_LEN]))
    }
}

impl<A: PrefValue, B: PrefValue, C: PrefValue> PrefValue for (A, B, C) {
    const ENCODED_LEN: usize = A::ENCODED_LEN + B::ENCODED_LEN + C::ENCODED_LEN;

    fn encode_to(&self, out: &mut [u8]) {
        let (a, rest) = out.split_at_mut(A::ENCODED_LEN);
        let (b, c) = rest.split_at_mut(B::ENCODED_LEN);
        self.0.encode_to(a);
        self.1.encode_to(b);
        self.2.encode_to(&mut c[..C::ENCODED_LEN]);
    }

    fn decode_from(bytes: &[u8]) -> Self {
        let (a, rest) = bytes.split_at(A::ENCODED_LEN);
        let (b, c) = rest.split_at(B::ENCODED_LEN);
        (
            A::decode_from(a),
            B::decode_from(b),
            C::decode_from(&c[..C::ENCODED_LEN]),
        )
    }
}
