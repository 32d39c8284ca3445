//! Error types shared by the table, its configuration and the color helpers.

use crate::probe::ProbeStrategy;

/// Rejected table configuration; the table is never created.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Strategy name is neither linear nor quadratic probing
    UnknownStrategy(String),

    /// Growth threshold outside the open interval allowed for the strategy
    ThresholdOutOfRange {
        strategy: ProbeStrategy,
        threshold: f64,
    },

    /// A table needs at least one slot
    ZeroCapacity,

    /// Key-space hint is not one of 3, 6, .., 24 bits per pixel
    UnsupportedBitsPerPixel(u8),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStrategy(name) => write!(
                f,
                "unknown probe strategy {name:?}, expected linear or quadratic probing"
            ),
            Self::ThresholdOutOfRange {
                strategy,
                threshold,
            } => write!(
                f,
                "growth threshold {threshold} is invalid for {strategy}, must lie in (0, {})",
                strategy.max_growth_threshold()
            ),
            Self::ZeroCapacity => f.write_str("table capacity must be positive"),
            Self::UnsupportedBitsPerPixel(bpp) => write!(
                f,
                "{bpp} bits per pixel is unsupported, expected a multiple of 3 in 3..=24"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Represents errors that can occur while building or querying a color table
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid construction parameters
    Config(ConfigError),

    /// `get` on a key that has no entry
    KeyNotFound,

    /// Positional access outside `[0, capacity)`
    IndexOutOfRange { index: usize, capacity: usize },

    /// Growth from `capacity` would not fit in `usize`
    CapacityOverflow { capacity: usize },

    /// No reachable vacant slot, even after growing to `capacity`
    ProbeExhausted { capacity: usize },

    /// Color channel, bit depth or packed value out of range
    InvalidColorKey { value: u32, bits_per_pixel: u8 },

    /// Feature vectors of different lengths (left, right)
    DimensionMismatch { left: usize, right: usize },

    /// Key digest does not index into a feature vector of `len` counts
    DigestOutOfRange { digest: u64, len: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid table configuration: {e}"),
            _ => write!(f, "ColorHashError: {self:?}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Color table result
pub type Result<T> = std::result::Result<T, Error>;
