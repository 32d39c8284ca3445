//! Probe sequences for open addressing.
//!
//! Both strategies start at `digest mod capacity`. Linear probing steps one
//! slot at a time and wraps. Quadratic probing targets
//! `(k * k + digest) mod capacity` for attempt `k`, always measured from the
//! base position instead of offsetting the previous index; collision counts
//! reported by the table depend on this exact formula.

use crate::error::ConfigError;

/// Collision resolution strategy of a table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProbeStrategy {
    Linear,
    Quadratic,
}

impl ProbeStrategy {
    /// Exclusive upper bound for the growth threshold.
    ///
    /// Quadratic probing is only guaranteed to find a vacancy in a prime
    /// table while less than half of it is occupied.
    pub fn max_growth_threshold(self) -> f64 {
        match self {
            Self::Linear => 1.0,
            Self::Quadratic => 0.5,
        }
    }

    /// Slot index targeted by the 0-based `attempt` for a key with `digest`.
    ///
    /// `capacity` must be positive.
    pub fn index(self, digest: u64, attempt: usize, capacity: usize) -> usize {
        debug_assert!(capacity > 0);
        let capacity = capacity as u128;
        let base = u128::from(digest) % capacity;
        let attempt = attempt as u128 % capacity;
        let index = match self {
            Self::Linear => (base + attempt) % capacity,
            Self::Quadratic => (attempt * attempt + base) % capacity,
        };
        index as usize
    }
}

impl std::fmt::Display for ProbeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear probing",
            Self::Quadratic => "quadratic probing",
        })
    }
}

impl std::str::FromStr for ProbeStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "linear" | "linear probing" => Ok(Self::Linear),
            "quadratic" | "quadratic probing" => Ok(Self::Quadratic),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Bounded sequence of candidate indices for one key.
///
/// Yields at most `capacity` indices: linear probing has visited every slot
/// by then, and `k * k mod capacity` repeats with period `capacity`.
#[derive(Debug, Clone)]
pub(crate) struct Probe {
    strategy: ProbeStrategy,
    digest: u64,
    capacity: usize,
    attempt: usize,
}

impl Probe {
    pub(crate) fn new(strategy: ProbeStrategy, digest: u64, capacity: usize) -> Self {
        Self {
            strategy,
            digest,
            capacity,
            attempt: 0,
        }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.attempt >= self.capacity {
            return None;
        }
        let index = self.strategy.index(self.digest, self.attempt, self.capacity);
        self.attempt += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.capacity.saturating_sub(self.attempt);
        (left, Some(left))
    }
}
