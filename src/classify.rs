//! Lane vs. background classification of a single scan-line.
//!
//! A scan-line crosses a lane when its brightest samples rise well above both
//! of its ends, while the ends themselves stay close to the darkest samples.
//! The darkest/brightest tails come from the sorted sequence; the end margins
//! come from the sequence in scan order, so the test is not order-invariant.

use crate::types::Region;
use log::debug;
use serde::Deserialize;

/// Thresholds for [`classify_with`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// Tail size is `len / tail_divisor` samples (5 % for the default 20).
    pub tail_divisor: usize,
    /// Samples averaged at each end of the scan-line.
    pub margin_size: usize,
    /// Minimum rise of the bright tail over the ends.
    pub rise_threshold: f64,
    /// Maximum height of either end above the dark tail.
    pub margin_tolerance: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            tail_divisor: 20,
            margin_size: 5,
            rise_threshold: 0.08 * 255.0,
            margin_tolerance: 25.0,
        }
    }
}

/// Averages the decision is based on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierStats {
    pub low_avg: f64,
    pub high_avg: f64,
    pub top_avg: f64,
    pub bottom_avg: f64,
}

impl ClassifierStats {
    /// Compute the averages, or `None` when the sequence is too short to judge.
    pub fn from_sequence(samples: &[i32], params: &ClassifierParams) -> Option<Self> {
        let len = samples.len();
        let tail = len / params.tail_divisor.max(1);
        let margin = params.margin_size;
        if tail == 0 || margin == 0 || len < margin * 2 {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        Some(Self {
            low_avg: mean(&sorted[..tail]),
            high_avg: mean(&sorted[len - tail..]),
            top_avg: mean(&samples[..margin]),
            bottom_avg: mean(&samples[len - margin..]),
        })
    }

    pub fn region(&self, params: &ClassifierParams) -> Region {
        let threshold = params.rise_threshold;
        let ends_avg = (self.top_avg + self.bottom_avg) / 2.0;
        let is_lane = self.high_avg - ends_avg > threshold
            && self.high_avg - self.bottom_avg > threshold
            && self.top_avg - self.low_avg <= params.margin_tolerance
            && self.bottom_avg - self.low_avg <= params.margin_tolerance;
        if is_lane {
            Region::Lane
        } else {
            Region::Background
        }
    }
}

fn mean(values: &[i32]) -> f64 {
    let sum: i64 = values.iter().map(|&v| v as i64).sum();
    sum as f64 / values.len() as f64
}

/// Classify with the default thresholds.
pub fn classify(samples: &[i32]) -> Region {
    classify_with(samples, &ClassifierParams::default())
}

/// Classify a luminosity sequence; degenerate sequences count as background.
pub fn classify_with(samples: &[i32], params: &ClassifierParams) -> Region {
    match ClassifierStats::from_sequence(samples, params) {
        Some(stats) => {
            let region = stats.region(params);
            debug!(
                "classify len={} low={:.1} high={:.1} top={:.1} bottom={:.1} -> {:?}",
                samples.len(),
                stats.low_avg,
                stats.high_avg,
                stats.top_avg,
                stats.bottom_avg,
                region
            );
            region
        }
        None => {
            debug!("classify len={} -> degenerate", samples.len());
            Region::Background
        }
    }
}
