//! Scan-line sampling: luminosity along a segment, followed by a moving average.
//!
//! A scan-line starts at the larger row index and walks one row at a time
//! toward the smaller one. The column for each row is interpolated linearly
//! between the endpoints and floored, so consecutive samples are exactly one
//! row apart regardless of the line's lean.
//!
//! Pixel lookups are bounds-checked: a row/column outside the image stops the
//! scan with [`PixelOutOfBounds`]. Callers that derive endpoints from a
//! reference axis clamp them into the image first (see `lanes`).

use crate::error::PixelOutOfBounds;
use crate::image::ImageView;
use crate::types::{LuminositySequence, Point};
use serde::Deserialize;

/// How edge windows of the moving average are normalised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeNormalization {
    /// Divide every window by the nominal window size. Windows clipped at the
    /// sequence ends are biased toward zero.
    Nominal,
    /// Divide by the number of samples actually inside the clipped window.
    #[default]
    Actual,
}

/// Moving-average parameters applied to every scan-line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    pub window: usize,
    pub edge: EdgeNormalization,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            window: 3,
            edge: EdgeNormalization::Actual,
        }
    }
}

/// Perceptual luminosity `0.21 R + 0.72 G + 0.07 B`, truncated; alpha is ignored.
#[inline]
pub fn luminosity(rgba: [u8; 4]) -> i32 {
    let [r, g, b, _] = rgba;
    (21 * r as i32 + 72 * g as i32 + 7 * b as i32) / 100
}

/// Column crossed by the segment `start → end` at row `y`, floored.
#[inline]
fn interpolate_x(y: i64, start: Point, end: Point, start_row: i64, end_row: i64) -> i64 {
    let t = (start_row as f64 - y as f64) / (start_row as f64 - end_row as f64);
    (start.x as f64 + (end.x as f64 - start.x as f64) * t).floor() as i64
}

/// Raw (unsmoothed) luminosity for every row in `(end.y, start.y]`.
///
/// Returns an empty sequence when `start` is not below `end` in the image.
/// The row range is checked against the image before anything is read, so
/// endpoints far outside the raster fail fast with the first row that would
/// have been looked up outside it.
pub fn raw_line<I: ImageView + ?Sized>(
    image: &I,
    start: Point,
    end: Point,
) -> Result<LuminositySequence, PixelOutOfBounds> {
    let start_row = start.y.floor() as i64;
    let end_row = end.y.floor() as i64;
    if start_row <= end_row {
        return Ok(Vec::new());
    }
    let height = image.height() as i64;
    let outside_row = if start_row < 0 || start_row >= height {
        Some(start_row)
    } else if end_row < -1 {
        Some(-1)
    } else {
        None
    };
    if let Some(y) = outside_row {
        let x = interpolate_x(y, start, end, start_row, end_row);
        return Err(PixelOutOfBounds { x, y });
    }

    // Both rows are now within `[-1, height)`.
    let mut out = Vec::with_capacity((start_row - end_row) as usize);
    for y in ((end_row + 1)..=start_row).rev() {
        let x = interpolate_x(y, start, end, start_row, end_row);
        if !image.contains(x, y) {
            return Err(PixelOutOfBounds { x, y });
        }
        out.push(image.luminosity(x as usize, y as usize));
    }
    Ok(out)
}

/// Smoothed luminosity sequence between `start` and `end`.
///
/// The result has `floor(start.y) - floor(end.y)` samples when that is
/// positive, and is empty otherwise.
pub fn sample_line<I: ImageView + ?Sized>(
    image: &I,
    start: Point,
    end: Point,
    params: &SmoothingParams,
) -> Result<LuminositySequence, PixelOutOfBounds> {
    let raw = raw_line(image, start, end)?;
    Ok(smooth(&raw, params))
}

/// Centered moving average with windows clipped to the sequence.
///
/// The window for sample `i` is `[i - w/2, i + w/2 + w%2)`, clipped to
/// `[0, len)`. Integer division truncates toward zero.
pub fn smooth(samples: &[i32], params: &SmoothingParams) -> LuminositySequence {
    let window = params.window;
    if window <= 1 || samples.is_empty() {
        return samples.to_vec();
    }
    let half = window / 2;
    let tail = half + window % 2;
    let len = samples.len();

    // prefix[i] = sum of samples[..i]
    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(0i64);
    for &s in samples {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + s as i64);
    }

    (0..len)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + tail).min(len);
            let sum = prefix[hi] - prefix[lo];
            let divisor = match params.edge {
                EdgeNormalization::Nominal => window,
                EdgeNormalization::Actual => hi - lo,
            };
            (sum / divisor as i64) as i32
        })
        .collect()
}
