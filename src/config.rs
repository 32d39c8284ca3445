//! Construction parameters of a color table.

use crate::error::ConfigError;
use crate::key::is_supported_bits_per_pixel;
use crate::probe::ProbeStrategy;

/// Table configuration.
///
/// Checked by [`TableConfig::validate`] before any slot is allocated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableConfig {
    /// Initial number of slots
    pub capacity: usize,

    /// Collision resolution
    pub strategy: ProbeStrategy,

    /// Grow when the anticipated load factor reaches this value
    pub growth_threshold: f64,

    /// Key-space hint, the bit depth of the counted colors
    pub bits_per_pixel: u8,
}

impl TableConfig {
    /// Linear probing, growth threshold 0.5, 24 bits per pixel.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            strategy: ProbeStrategy::Linear,
            growth_threshold: 0.5,
            bits_per_pixel: 24,
        }
    }

    /// Sets the collision resolution strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: ProbeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the growth threshold.
    ///
    /// Must lie in (0, 1) for linear and in (0, 0.5) for quadratic probing.
    #[must_use]
    pub fn growth_threshold(mut self, threshold: f64) -> Self {
        self.growth_threshold = threshold;
        self
    }

    /// Sets the bit depth of the keys the table will count.
    #[must_use]
    pub fn bits_per_pixel(mut self, bits_per_pixel: u8) -> Self {
        self.bits_per_pixel = bits_per_pixel;
        self
    }

    /// Same configuration with a different capacity.
    #[must_use]
    pub(crate) fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !is_supported_bits_per_pixel(self.bits_per_pixel) {
            return Err(ConfigError::UnsupportedBitsPerPixel(self.bits_per_pixel));
        }
        let max = self.strategy.max_growth_threshold();
        // Written so that NaN fails too.
        if !(self.growth_threshold > 0.0 && self.growth_threshold < max) {
            return Err(ConfigError::ThresholdOutOfRange {
                strategy: self.strategy,
                threshold: self.growth_threshold,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn defaults_are_valid() {
        let config = TableConfig::new(11);
        assert_eq!(config.strategy, ProbeStrategy::Linear);
        assert_eq!(config.validate(), Ok(()));
    }

    /// Thresholds are open intervals per strategy.
    #[test]
    fn threshold_bounds_depend_on_strategy() {
        let linear = TableConfig::new(3).strategy(ProbeStrategy::Linear);
        assert!(linear.growth_threshold(0.9).validate().is_ok());
        assert!(linear.growth_threshold(0.99).validate().is_ok());
        assert!(linear.growth_threshold(1.0).validate().is_err());
        assert!(linear.growth_threshold(0.0).validate().is_err());
        assert!(linear.growth_threshold(-0.1).validate().is_err());

        let quad = TableConfig::new(13).strategy(ProbeStrategy::Quadratic);
        assert!(quad.growth_threshold(0.49).validate().is_ok());
        assert_eq!(
            quad.growth_threshold(0.5).validate(),
            Err(ConfigError::ThresholdOutOfRange {
                strategy: ProbeStrategy::Quadratic,
                threshold: 0.5
            })
        );
        assert!(quad.growth_threshold(0.9).validate().is_err());
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let config = TableConfig::new(5).growth_threshold(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange { .. })
        ));
    }

    #[test]
    fn zero_capacity_and_odd_bit_depths_are_rejected() {
        assert_eq!(
            TableConfig::new(0).validate(),
            Err(ConfigError::ZeroCapacity)
        );
        assert_eq!(
            TableConfig::new(5).bits_per_pixel(8).validate(),
            Err(ConfigError::UnsupportedBitsPerPixel(8))
        );
        assert!(TableConfig::new(5).bits_per_pixel(6).validate().is_ok());
    }
}
