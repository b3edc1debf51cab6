//! Per-channel intensity quantization of RGB images.
//!
//! Each of the red, green and blue channels is mapped onto `2^(quality / 3)`
//! levels. The levels are evenly spaced ([`Mode::Uniform`]), exponentially
//! spaced ([`Mode::Logarithmic`]) or solved from the image histogram with 1D
//! Lloyd clustering ([`Mode::Optimal`]).
//!
//! ```
//! use chanquant::{Image, UNIFORM_SELECTOR};
//! use rgb::RGB8;
//!
//! let image = Image::new(vec![RGB8::new(200, 50, 10)], 1, 1).unwrap();
//! let out = chanquant::quantize(&image, 3, UNIFORM_SELECTOR);
//!
//! assert_eq!(out.pixels(), &[RGB8::new(192, 64, 64)]);
//! ```

mod centers;
mod cluster;
mod error;
mod histogram;
mod image;
mod options;
mod quantize;
mod scale;

pub use centers::Centers;
pub use cluster::{Cluster, CONVERGENCE_EPSILON, MAX_ROUNDS};
pub use error::Error;
pub use histogram::{Channel, ChannelHistogram, Histograms};
pub use image::Image;
pub use options::{MAX_BITS_PER_CHANNEL, Mode, OPTIMAL_SELECTOR, Options, UNIFORM_SELECTOR};
pub use quantize::{QuantizeResult, quantize, quantize_with};
pub use scale::scale;
