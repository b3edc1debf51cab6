#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selector value that picks [`Mode::Optimal`]
pub const OPTIMAL_SELECTOR: i32 = 256;
/// Selector value that picks [`Mode::Uniform`]
pub const UNIFORM_SELECTOR: i32 = -1;

/// Upper bound for the bits derived from the quality, keeps `1 << bits` in range
pub const MAX_BITS_PER_CHANNEL: u32 = 16;

/// How quantization levels are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Per-channel levels solved from the image histogram
    Optimal,
    /// Evenly spaced levels shared by all channels
    Uniform,
    /// Exponentially spaced levels shared by all channels, with the bias
    /// controlling the curve steepness
    Logarithmic(i32),
}

impl Mode {
    /// Resolves a raw integer selector
    pub fn from_selector(selector: i32) -> Self {
        match selector {
            OPTIMAL_SELECTOR => Self::Optimal,
            UNIFORM_SELECTOR => Self::Uniform,
            bias => Self::Logarithmic(bias),
        }
    }

    /// The raw integer selector for this mode. A logarithmic bias equal to
    /// one of the reserved selectors maps back to that selector's mode.
    pub fn selector(&self) -> i32 {
        match *self {
            Self::Optimal => OPTIMAL_SELECTOR,
            Self::Uniform => UNIFORM_SELECTOR,
            Self::Logarithmic(bias) => bias,
        }
    }
}

impl From<i32> for Mode {
    fn from(selector: i32) -> Self {
        Self::from_selector(selector)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Options {
    pub quality: i32,
    pub mode: Mode,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            quality: 12,
            mode: Mode::Uniform,
        }
    }
}

impl Options {
    pub fn new(quality: i32, mode: Mode) -> Self {
        Self { quality, mode }
    }

    /// Builds options from a raw quality and mode selector
    pub fn from_selector(quality: i32, selector: i32) -> Self {
        Self::new(quality, Mode::from_selector(selector))
    }

    pub fn set_quality(&mut self, quality: i32) {
        self.quality = quality;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Bits per channel derived from the quality, `None` when quantization
    /// should be skipped
    pub fn bits_per_channel(&self) -> Option<u32> {
        if self.quality <= 0 {
            return None;
        }

        match self.quality / 3 {
            bits if bits <= 0 => None,
            bits => Some((bits as u32).min(MAX_BITS_PER_CHANNEL)),
        }
    }

    /// Number of levels per channel, `None` when the image passes through
    /// unchanged
    pub fn level_count(&self) -> Option<usize> {
        self.bits_per_channel().map(|bits| 1usize << bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_dispatch() {
        assert_eq!(Mode::from_selector(256), Mode::Optimal);
        assert_eq!(Mode::from_selector(-1), Mode::Uniform);
        assert_eq!(Mode::from_selector(0), Mode::Logarithmic(0));
        assert_eq!(Mode::from_selector(-2), Mode::Logarithmic(-2));
        assert_eq!(Mode::from(128), Mode::Logarithmic(128));

        for selector in [-5, -1, 0, 64, 256, 300] {
            assert_eq!(Mode::from_selector(selector).selector(), selector);
        }
    }

    #[test]
    fn level_count_from_quality() {
        let levels = |q| Options::from_selector(q, -1).level_count();

        assert_eq!(levels(-3), None);
        assert_eq!(levels(0), None);
        assert_eq!(levels(1), None);
        assert_eq!(levels(2), None);
        assert_eq!(levels(3), Some(2));
        assert_eq!(levels(5), Some(2));
        assert_eq!(levels(6), Some(4));
        assert_eq!(levels(24), Some(256));
        assert_eq!(levels(27), Some(512));
    }

    #[test]
    fn level_count_is_bounded() {
        let opts = Options::new(i32::MAX, Mode::Uniform);
        assert_eq!(opts.bits_per_channel(), Some(MAX_BITS_PER_CHANNEL));
        assert_eq!(opts.level_count(), Some(1 << MAX_BITS_PER_CHANNEL));
    }

    #[test]
    fn setters() {
        let mut opts = Options::default();
        opts.set_quality(9);
        opts.set_mode(Mode::Optimal);

        assert_eq!(opts, Options::from_selector(9, OPTIMAL_SELECTOR));
        assert_eq!(opts.level_count(), Some(8));
    }
}
