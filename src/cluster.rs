use log::{debug, trace};

use crate::centers::Centers;
use crate::histogram::{ChannelHistogram, INTENSITIES};

/// Round budget of the Lloyd iteration
pub const MAX_ROUNDS: usize = 100;

/// A center moving less than this is considered settled
pub const CONVERGENCE_EPSILON: f64 = 1e-3;

/// 1D Lloyd clustering of the intensities of a single channel
pub struct Cluster {
    centers: Vec<f64>,
    labels: [usize; INTENSITIES],
}

impl Cluster {
    /// Creates `count` centers evenly spread over `0..=255`
    pub fn new(count: usize) -> Self {
        let centers = (0..count)
            .map(|k| 255.0 * (k as f64 + 0.5) / count as f64)
            .collect();

        Self {
            centers,
            labels: [0; INTENSITIES],
        }
    }

    /// Solves `count` centers for the provided histogram
    pub fn solve(hist: &ChannelHistogram, count: usize) -> Centers {
        let mut cluster = Self::new(count);
        match cluster.run(hist) {
            Some(rounds) => trace!("{} centers converged after {} rounds", count, rounds),
            None => debug!("{} centers did not converge in {} rounds", count, MAX_ROUNDS),
        }

        cluster.into_centers()
    }

    /// Iterates until the centers settle or the round budget is spent.
    /// Returns the number of rounds it took to settle, `None` if they never did.
    pub fn run(&mut self, hist: &ChannelHistogram) -> Option<usize> {
        for round in 1..=MAX_ROUNDS {
            let changed = self.assign();
            let moved = self.update(hist);

            if !changed && !moved {
                return Some(round);
            }
        }

        None
    }

    /// Labels every intensity with its nearest center. Returns `true` if any
    /// label changed.
    fn assign(&mut self) -> bool {
        let mut changed = false;

        for (v, label) in self.labels.iter_mut().enumerate() {
            let mut best = 0;
            let mut best_dist = f64::MAX;

            for (k, c) in self.centers.iter().enumerate() {
                let dist = (v as f64 - c).abs();

                if dist < best_dist {
                    best_dist = dist;
                    best = k;
                }
            }

            if *label != best {
                *label = best;
                changed = true;
            }
        }

        changed
    }

    /// Moves every center to the weighted mean of its intensities. Empty
    /// centers stay put. Returns `true` if any center moved noticeably.
    fn update(&mut self, hist: &ChannelHistogram) -> bool {
        let mut sum = vec![0f64; self.centers.len()];
        let mut weight = vec![0u64; self.centers.len()];

        for (v, &k) in self.labels.iter().enumerate() {
            let count = hist.0[v];

            sum[k] += count as f64 * v as f64;
            weight[k] += count;
        }

        let mut moved = false;

        for (k, c) in self.centers.iter_mut().enumerate() {
            if weight[k] == 0 {
                continue;
            }

            let mean = sum[k] / weight[k] as f64;
            if (mean - *c).abs() > CONVERGENCE_EPSILON {
                moved = true;
            }

            *c = mean;
        }

        moved
    }

    pub fn levels(&self) -> &[f64] {
        &self.centers
    }

    pub fn into_centers(self) -> Centers {
        Centers::from_levels(&self.centers)
    }
}
