//! Keys stored in a color table.

use crate::error::{Error, Result};

/// Bit depths a [`ColorKey`] (and a table's key-space hint) may use.
pub const SUPPORTED_BITS_PER_PIXEL: [u8; 8] = [3, 6, 9, 12, 15, 18, 21, 24];

/// A key with a stable integer digest.
///
/// The digest picks the first probe position and, for histogram keys, is
/// also the key's index in a dense feature vector. It must be deterministic
/// and consistent with `Eq`: equal keys have equal digests.
pub trait Digest: Eq {
    fn digest(&self) -> u64;
}

macro_rules! impl_digest_for_unsigned {
    ($($t:ty),*) => {
        $(
            impl Digest for $t {
                #[inline]
                fn digest(&self) -> u64 {
                    u64::from(*self)
                }
            }
        )*
    };
}

impl_digest_for_unsigned!(u8, u16, u32, u64);

pub(crate) fn is_supported_bits_per_pixel(bits_per_pixel: u8) -> bool {
    SUPPORTED_BITS_PER_PIXEL.contains(&bits_per_pixel)
}

/// An RGB color quantized to `bits_per_pixel` bits.
///
/// Each channel keeps its top `bits_per_pixel / 3` bits; red occupies the
/// highest bits of the packed value, blue the lowest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorKey {
    value: u32,
    bits_per_pixel: u8,
}

impl ColorKey {
    /// Quantizes an 8-bit-per-channel color.
    pub fn from_rgb(r: u8, g: u8, b: u8, bits_per_pixel: u8) -> Result<Self> {
        if !is_supported_bits_per_pixel(bits_per_pixel) {
            return Err(Error::InvalidColorKey {
                value: u32::from_be_bytes([0, r, g, b]),
                bits_per_pixel,
            });
        }
        let bits = u32::from(bits_per_pixel / 3);
        let shift = 8 - bits;
        let value = (u32::from(r) >> shift) << (2 * bits)
            | (u32::from(g) >> shift) << bits
            | (u32::from(b) >> shift);
        Ok(Self {
            value,
            bits_per_pixel,
        })
    }

    /// Wraps an already packed value; it must fit in `bits_per_pixel` bits.
    pub fn from_value(value: u32, bits_per_pixel: u8) -> Result<Self> {
        if !is_supported_bits_per_pixel(bits_per_pixel) || value >> bits_per_pixel != 0 {
            return Err(Error::InvalidColorKey {
                value,
                bits_per_pixel,
            });
        }
        Ok(Self {
            value,
            bits_per_pixel,
        })
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn bits_per_pixel(&self) -> u8 {
        self.bits_per_pixel
    }

    /// Number of distinct keys at this bit depth.
    pub fn key_space_size(&self) -> usize {
        1usize << self.bits_per_pixel
    }

    /// Quantized `(r, g, b)` channels, each in `0..2^(bits_per_pixel / 3)`.
    pub fn channels(&self) -> (u32, u32, u32) {
        let bits = u32::from(self.bits_per_pixel / 3);
        let mask = (1u32 << bits) - 1;
        (
            (self.value >> (2 * bits)) & mask,
            (self.value >> bits) & mask,
            self.value & mask,
        )
    }
}

impl Digest for ColorKey {
    #[inline]
    fn digest(&self) -> u64 {
        u64::from(self.value)
    }
}

impl std::fmt::Display for ColorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (r, g, b) = self.channels();
        write!(f, "{}@{}bpp(r={r}, g={g}, b={b})", self.value, self.bits_per_pixel)
    }
}
