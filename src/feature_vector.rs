//! Dense color histograms built from a table, compared by cosine similarity.
//!
//! A table scatters entries wherever probing put them. A feature vector has
//! one count per possible key, at the index equal to the key's digest, so two
//! images counted at the same bit depth can be compared position by position.

use crate::color_table::ColorTable;
use crate::error::{ConfigError, Error, Result};
use crate::key::{is_supported_bits_per_pixel, Digest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    counts: Vec<u64>,
    bits_per_pixel: u8,
}

impl FeatureVector {
    /// All-zero vector with `2^bits_per_pixel` counts.
    pub fn new(bits_per_pixel: u8) -> Result<Self> {
        if !is_supported_bits_per_pixel(bits_per_pixel) {
            return Err(ConfigError::UnsupportedBitsPerPixel(bits_per_pixel).into());
        }
        Ok(Self {
            counts: vec![0; 1usize << bits_per_pixel],
            bits_per_pixel,
        })
    }

    /// Flattens `table` at the table's own bit depth.
    pub fn from_table<K: Digest>(table: &ColorTable<K>) -> Result<Self> {
        let mut vector = Self::new(table.bits_per_pixel())?;
        vector.count_table(table)?;
        Ok(vector)
    }

    /// Copies every counter of `table` to the index of its key's digest.
    ///
    /// Walks the table positionally over `[0, capacity)`. Fails with
    /// `DigestOutOfRange` for a key that does not fit this vector; counts
    /// copied before it stay.
    pub fn count_table<K: Digest>(&mut self, table: &ColorTable<K>) -> Result<()> {
        let len = self.counts.len();
        for index in 0..table.capacity() {
            let (Some(key), Some(counter)) = (table.key_at(index)?, table.value_at(index)?) else {
                continue;
            };
            let digest = key.digest();
            let count = usize::try_from(digest)
                .ok()
                .and_then(|i| self.counts.get_mut(i))
                .ok_or(Error::DigestOutOfRange { digest, len })?;
            *count = counter;
        }
        Ok(())
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn bits_per_pixel(&self) -> u8 {
        self.bits_per_pixel
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `dot(a, b) / (|a| * |b|)`, 1.0 for vectors pointing the same way.
    ///
    /// Returns 0.0 if either vector is all zeros.
    pub fn cosine_similarity(&self, other: &Self) -> Result<f64> {
        if self.counts.len() != other.counts.len() {
            return Err(Error::DimensionMismatch {
                left: self.counts.len(),
                right: other.counts.len(),
            });
        }
        let (mut dot, mut left, mut right) = (0.0f64, 0.0f64, 0.0f64);
        for (&a, &b) in self.counts.iter().zip(&other.counts) {
            let (a, b) = (a as f64, b as f64);
            dot += a * b;
            left += a * a;
            right += b * b;
        }
        let magnitude = left.sqrt() * right.sqrt();
        if magnitude == 0.0 {
            return Ok(0.0);
        }
        Ok(dot / magnitude)
    }
}
