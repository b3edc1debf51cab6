use crate::histogram::INTENSITIES;

/// Ordered set of quantization levels for one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Centers(Vec<u8>);

impl Centers {
    /// Evenly spaced levels: the midpoints of `count` equal-width bins over
    /// `0..=255`, shifted down by half a unit.
    pub fn uniform(count: usize) -> Self {
        let width = INTENSITIES as f64 / count as f64;

        let centers = (0..count)
            .map(|i| clamp_level(((i as f64 + 0.5) * width - 0.5).round()))
            .collect();

        Self(centers)
    }

    /// Exponentially spaced levels. The curve base is `1 + bias / 64`; a base
    /// of 1 or less falls back to [`Centers::uniform`].
    ///
    /// The first level is pinned to 0 and the last one to 255.
    pub fn logarithmic(count: usize, bias: i32) -> Self {
        let lambda = 1.0 + bias as f64 / 64.0;
        if lambda <= 1.0 {
            return Self::uniform(count);
        }

        let mut denom = lambda.powf(count as f64) - 1.0;
        if denom == 0.0 {
            denom = 1.0;
        }

        let mut centers: Vec<u8> = (0..count)
            .map(|i| {
                let val = (lambda.powf(i as f64) - 1.0) / denom;
                clamp_level((val * 255.0).round())
            })
            .collect();

        if let Some(first) = centers.first_mut() {
            *first = 0;
        }
        if let Some(last) = centers.last_mut() {
            *last = 255;
        }

        for i in 1..centers.len() {
            if centers[i] < centers[i - 1] {
                centers[i] = centers[i - 1];
            }
        }

        Self(centers)
    }

    /// Builds centers from unrounded levels: rounds, clamps, sorts and makes
    /// every level strictly greater than the previous one (capped at 255).
    pub(crate) fn from_levels(levels: &[f64]) -> Self {
        let mut centers: Vec<u8> = levels.iter().map(|l| clamp_level(l.round())).collect();
        centers.sort_unstable();

        for i in 1..centers.len() {
            if centers[i] <= centers[i - 1] {
                centers[i] = centers[i - 1].saturating_add(1);
            }
        }

        Self(centers)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Bucket lookup: scales `value` into the level array and returns the
    /// level at that index, regardless of the level values.
    #[inline]
    pub fn project(&self, value: u8) -> u8 {
        let count = self.0.len();
        let ind = (value as usize * count / INTENSITIES).min(count - 1);

        self.0[ind]
    }

    /// Closest level by absolute distance. The lowest index wins ties.
    #[inline]
    pub fn nearest(&self, value: u8) -> u8 {
        let mut best = self.0[0];
        let mut best_dist = best.abs_diff(value);

        for &c in self.0[1..].iter() {
            let dist = c.abs_diff(value);

            if dist < best_dist {
                best_dist = dist;
                best = c;
            }
        }

        best
    }
}

impl AsRef<[u8]> for Centers {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Centers> for Vec<u8> {
    fn from(centers: Centers) -> Self {
        centers.0
    }
}

fn clamp_level(val: f64) -> u8 {
    val.clamp(0.0, 255.0) as u8
}
