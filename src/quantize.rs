use std::borrow::Cow;

use log::debug;
use rgb::RGB8;

use crate::centers::Centers;
use crate::cluster::Cluster;
use crate::histogram::{Channel, Histograms};
use crate::image::Image;
use crate::options::{Mode, Options};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How each channel value finds its level
#[derive(Debug, Clone)]
enum Levels {
    /// One set shared by every channel, looked up by bucket index
    Shared(Centers),
    /// One solved set per channel, looked up by distance
    PerChannel([Centers; 3]),
}

/// Result of quantization
#[derive(Debug, Clone)]
pub struct QuantizeResult {
    mode: Mode,
    levels: Levels,
}

impl QuantizeResult {
    /// Builds the levels for the provided [`Image`] and [`Options`].
    ///
    /// Returns `None` when the options describe a pass-through (quality too
    /// low to yield a level).
    pub fn quantize(image: &Image, opts: &Options) -> Option<Self> {
        let Some(count) = opts.level_count() else {
            debug!("quality {} yields no levels, passing image through", opts.quality);
            return None;
        };

        debug!(
            "quantizing {}x{} image to {} levels per channel ({:?})",
            image.width(),
            image.height(),
            count,
            opts.mode
        );

        let levels = match opts.mode {
            Mode::Optimal => {
                let hist = Histograms::from_image(image);
                Levels::PerChannel(solve_channels(&hist, count))
            }
            Mode::Uniform => Levels::Shared(Centers::uniform(count)),
            Mode::Logarithmic(bias) => Levels::Shared(Centers::logarithmic(count, bias)),
        };

        Some(Self {
            mode: opts.mode,
            levels,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of levels per channel
    pub fn level_count(&self) -> usize {
        match &self.levels {
            Levels::Shared(centers) => centers.len(),
            Levels::PerChannel(centers) => centers[0].len(),
        }
    }

    /// Returns the levels used for the given channel
    pub fn centers(&self, channel: Channel) -> &Centers {
        match &self.levels {
            Levels::Shared(centers) => centers,
            Levels::PerChannel(centers) => &centers[channel.index()],
        }
    }

    /// Maps a single pixel onto the levels
    #[inline]
    pub fn map_pixel(&self, pix: RGB8) -> RGB8 {
        match &self.levels {
            Levels::Shared(c) => RGB8::new(c.project(pix.r), c.project(pix.g), c.project(pix.b)),
            Levels::PerChannel([r, g, b]) => {
                RGB8::new(r.nearest(pix.r), g.nearest(pix.g), b.nearest(pix.b))
            }
        }
    }

    /// Remaps the provided [`Image`] into a new image of the same size
    pub fn remap_image(&self, image: &Image) -> Image {
        #[cfg(feature = "parallel")]
        let pixels: Vec<RGB8> = image.pixels().par_iter().map(|&pix| self.map_pixel(pix)).collect();

        #[cfg(not(feature = "parallel"))]
        let pixels: Vec<RGB8> = image.pixels().iter().map(|&pix| self.map_pixel(pix)).collect();

        Image::from_parts(pixels, image.width(), image.height())
    }
}

#[cfg(not(feature = "parallel"))]
fn solve_channels(hist: &Histograms, count: usize) -> [Centers; 3] {
    Channel::ALL.map(|ch| Cluster::solve(hist.channel(ch), count))
}

#[cfg(feature = "parallel")]
fn solve_channels(hist: &Histograms, count: usize) -> [Centers; 3] {
    let (r, (g, b)) = rayon::join(
        || Cluster::solve(hist.channel(Channel::Red), count),
        || {
            rayon::join(
                || Cluster::solve(hist.channel(Channel::Green), count),
                || Cluster::solve(hist.channel(Channel::Blue), count),
            )
        },
    );

    [r, g, b]
}

/// Quantizes `image` with the provided [`Options`]. The input is returned
/// borrowed when the options describe a pass-through.
pub fn quantize_with<'a>(image: &'a Image, opts: &Options) -> Cow<'a, Image> {
    match QuantizeResult::quantize(image, opts) {
        Some(result) => Cow::Owned(result.remap_image(image)),
        None => Cow::Borrowed(image),
    }
}

/// Quantizes `image` from a raw quality and mode selector.
///
/// `selector` picks the level generation: [`OPTIMAL_SELECTOR`] for
/// histogram-solved levels, [`UNIFORM_SELECTOR`] for even levels, anything
/// else for logarithmic levels using the value as bias.
///
/// [`OPTIMAL_SELECTOR`]: crate::OPTIMAL_SELECTOR
/// [`UNIFORM_SELECTOR`]: crate::UNIFORM_SELECTOR
pub fn quantize(image: &Image, quality: i32, selector: i32) -> Cow<'_, Image> {
    quantize_with(image, &Options::from_selector(quality, selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{OPTIMAL_SELECTOR, UNIFORM_SELECTOR};

    fn gradient(width: usize, height: usize) -> Image {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(RGB8::new(
                    (x * 255 / width.max(1)) as u8,
                    (y * 255 / height.max(1)) as u8,
                    ((x + y) * 7 % 256) as u8,
                ));
            }
        }
        Image::new(pixels, width, height).unwrap()
    }

    #[test]
    fn pass_through_borrows_input() {
        let img = gradient(4, 4);

        for quality in [-10, 0, 1, 2] {
            for selector in [OPTIMAL_SELECTOR, UNIFORM_SELECTOR, 64] {
                let out = quantize(&img, quality, selector);
                assert!(matches!(out, Cow::Borrowed(_)));
                assert_eq!(*out, img);
            }
        }
    }

    #[test]
    fn single_pixel_uniform() {
        let img = Image::new(vec![RGB8::new(200, 50, 10)], 1, 1).unwrap();
        let out = quantize(&img, 3, UNIFORM_SELECTOR);

        assert_eq!(out.pixels(), &[RGB8::new(192, 64, 64)]);
    }

    #[test]
    fn shared_levels_for_static_modes() {
        let img = gradient(8, 8);

        for mode in [Mode::Uniform, Mode::Logarithmic(64)] {
            let result = QuantizeResult::quantize(&img, &Options::new(6, mode)).unwrap();

            assert_eq!(result.level_count(), 4);
            assert_eq!(result.centers(Channel::Red), result.centers(Channel::Blue));
            assert_eq!(result.mode(), mode);
        }
    }

    #[test]
    fn optimal_levels_per_channel() {
        let pixels = vec![
            RGB8::new(10, 100, 0),
            RGB8::new(20, 100, 0),
            RGB8::new(240, 100, 255),
            RGB8::new(250, 100, 255),
        ];
        let img = Image::new(pixels, 2, 2).unwrap();
        let result = QuantizeResult::quantize(&img, &Options::new(3, Mode::Optimal)).unwrap();

        assert_eq!(result.centers(Channel::Red).as_slice(), &[15, 245]);
        assert_eq!(result.centers(Channel::Blue).as_slice(), &[0, 255]);
        assert_eq!(result.centers(Channel::Green).len(), 2);

        let out = result.remap_image(&img);
        assert_eq!(out.pixel(0, 0), RGB8::new(15, 100, 0));
        assert_eq!(out.pixel(1, 1), RGB8::new(245, 100, 255));
    }

    #[test]
    fn optimal_uses_nearest_lookup() {
        let img = gradient(16, 16);
        let result = QuantizeResult::quantize(&img, &Options::new(6, Mode::Optimal)).unwrap();
        let out = result.remap_image(&img);

        for (src, dst) in img.pixels().iter().zip(out.pixels()) {
            assert_eq!(dst.r, result.centers(Channel::Red).nearest(src.r));
            assert_eq!(dst.g, result.centers(Channel::Green).nearest(src.g));
            assert_eq!(dst.b, result.centers(Channel::Blue).nearest(src.b));
        }
    }

    #[test]
    fn output_keeps_dimensions() {
        let img = gradient(7, 3);

        for selector in [OPTIMAL_SELECTOR, UNIFORM_SELECTOR, 0, 32, 500] {
            let out = quantize(&img, 9, selector);

            assert_eq!(out.width(), 7);
            assert_eq!(out.height(), 3);
            assert!(matches!(out, Cow::Owned(_)));
        }
    }

    #[test]
    fn empty_image() {
        let img = Image::new(vec![], 0, 0).unwrap();

        for selector in [OPTIMAL_SELECTOR, UNIFORM_SELECTOR, 64] {
            let out = quantize(&img, 12, selector);
            assert!(out.pixels().is_empty());
        }
    }
}
