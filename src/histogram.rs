use crate::image::Image;

/// Number of distinct 8-bit intensities
pub const INTENSITIES: usize = 256;

/// Color channel of an RGB pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// Intensity counts of a single channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHistogram(pub [u64; INTENSITIES]);

impl Default for ChannelHistogram {
    fn default() -> Self {
        Self([0; INTENSITIES])
    }
}

impl ChannelHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: u8) {
        self.0[value as usize] += 1;
    }

    pub fn count(&self, value: u8) -> u64 {
        self.0[value as usize]
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

/// Per-channel histograms of an image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histograms([ChannelHistogram; 3]);

impl Histograms {
    pub fn from_image(image: &Image) -> Self {
        let mut hist = Self::default();

        for pix in image.pixels() {
            hist.0[0].add(pix.r);
            hist.0[1].add(pix.g);
            hist.0[2].add(pix.b);
        }

        hist
    }

    pub fn channel(&self, channel: Channel) -> &ChannelHistogram {
        &self.0[channel.index()]
    }
}
