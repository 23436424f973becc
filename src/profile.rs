//! Width-averaged luminosity profile of one lane.
//!
//! For every column offset between the lane's left and right edge a scan-line
//! is sampled from the top edge (ul→ur) to the bottom edge (ll→lr). The
//! scan-lines are summed row by row and divided by the column count.
//!
//! The profile length is fixed by the first column's scan-line, which is
//! sampled (and bounds-checked) before anything else is sized from the
//! boundary. Longer scan-lines are truncated; shorter ones leave their missing
//! tail rows unsummed for that column (the divisor stays the column count).

use crate::error::GelError;
use crate::image::ImageView;
use crate::sampling::{sample_line, SmoothingParams};
use crate::types::{LaneBoundary, LaneProfile, LuminositySequence, Point};
use log::trace;

/// Row of the edge `start → end` at column `x`, floored. A vertical edge
/// yields the start row.
fn interpolate_y(x: f32, start: Point, end: Point) -> f32 {
    let dx = end.x - start.x;
    if dx == 0.0 {
        return start.y.floor();
    }
    (start.y + (end.y - start.y) * (x - start.x) / dx).floor()
}

/// Scan-line endpoints for column `x` of `lane`.
pub fn column_endpoints(lane: &LaneBoundary, x: i64) -> (Point, Point) {
    let xf = x as f32;
    let end_x = lane.ll.x + (xf - lane.ul.x);
    let start = Point::new(xf, interpolate_y(xf, lane.ul, lane.ur));
    let end = Point::new(end_x, interpolate_y(end_x, lane.ll, lane.lr));
    (start, end)
}

/// Column offsets that contribute to the profile: `ul.x .. ur.x`, or the
/// single column `ul.x` for a lane that was only one scan-line wide.
pub fn lane_columns(lane: &LaneBoundary) -> std::ops::Range<i64> {
    let first = lane.ul.x.floor() as i64;
    let last = lane.ur.x.floor() as i64;
    if last > first {
        first..last
    } else {
        first..first + 1
    }
}

fn column_sequence<I: ImageView + ?Sized>(
    image: &I,
    lane: &LaneBoundary,
    x: i64,
    smoothing: &SmoothingParams,
) -> Result<LuminositySequence, GelError> {
    let (start, end) = column_endpoints(lane, x);
    sample_line(image, start, end, smoothing).map_err(|e| e.at_offset(x))
}

/// Aggregate a lane with the default smoothing, which renormalises clipped
/// edge windows so a uniform lane yields a flat profile.
pub fn aggregate<I: ImageView + ?Sized>(
    image: &I,
    lane: &LaneBoundary,
) -> Result<LaneProfile, GelError> {
    aggregate_with(image, lane, &SmoothingParams::default())
}

/// Average the lane's scan-lines into a single intensity profile.
///
/// Fails with [`GelError::OutOfBounds`] naming the column whose scan-line
/// left the image.
pub fn aggregate_with<I: ImageView + ?Sized>(
    image: &I,
    lane: &LaneBoundary,
    smoothing: &SmoothingParams,
) -> Result<LaneProfile, GelError> {
    let first = lane.ul.x.floor() as i64;
    if first < 0 || first >= image.width() as i64 {
        return Err(GelError::OutOfBounds {
            offset: first,
            x: first,
            y: lane.ul.y.floor() as i64,
        });
    }
    let columns = lane_columns(lane);
    let count = columns.end - columns.start;

    let head = column_sequence(image, lane, columns.start, smoothing)?;
    let mut sums: Vec<i64> = head.iter().map(|&v| v as i64).collect();
    let rest = sum_columns(image, lane, columns.start + 1..columns.end, sums.len(), smoothing)?;
    accumulate_sums(&mut sums, &rest);

    let values: Vec<f32> = sums
        .into_iter()
        .map(|s| (s as f64 / count as f64) as f32)
        .collect();
    trace!(
        "aggregate: ul=({}, {}) columns={} rows={}",
        lane.ul.x,
        lane.ul.y,
        count,
        values.len()
    );
    Ok(LaneProfile {
        values,
        columns: count as usize,
    })
}

fn accumulate(sums: &mut [i64], samples: &[i32]) {
    for (acc, &v) in sums.iter_mut().zip(samples) {
        *acc += v as i64;
    }
}

#[cfg(not(feature = "parallel"))]
fn sum_columns<I: ImageView + ?Sized>(
    image: &I,
    lane: &LaneBoundary,
    columns: std::ops::Range<i64>,
    len: usize,
    smoothing: &SmoothingParams,
) -> Result<Vec<i64>, GelError> {
    let mut sums = vec![0i64; len];
    for x in columns {
        let samples = column_sequence(image, lane, x, smoothing)?;
        accumulate(&mut sums, &samples);
    }
    Ok(sums)
}

#[cfg(feature = "parallel")]
fn sum_columns<I: ImageView + ?Sized>(
    image: &I,
    lane: &LaneBoundary,
    columns: std::ops::Range<i64>,
    len: usize,
    smoothing: &SmoothingParams,
) -> Result<Vec<i64>, GelError> {
    use rayon::prelude::*;

    columns
        .into_par_iter()
        .try_fold(
            || vec![0i64; len],
            |mut sums, x| {
                let samples = column_sequence(image, lane, x, smoothing)?;
                accumulate(&mut sums, &samples);
                Ok::<_, GelError>(sums)
            },
        )
        .try_reduce(
            || vec![0i64; len],
            |mut a, b| {
                accumulate_sums(&mut a, &b);
                Ok(a)
            },
        )
}

fn accumulate_sums(acc: &mut [i64], other: &[i64]) {
    for (a, &b) in acc.iter_mut().zip(other) {
        *a += b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageRgba8;
    use crate::sampling::EdgeNormalization;

    fn uniform(w: usize, h: usize, v: u8) -> Vec<u8> {
        [v, v, v, 255].repeat(w * h)
    }

    fn rect(x0: f32, x1: f32, top: f32, bottom: f32) -> LaneBoundary {
        LaneBoundary {
            ul: Point::new(x0, top),
            ur: Point::new(x1, top),
            ll: Point::new(x0, bottom),
            lr: Point::new(x1, bottom),
        }
    }

    #[test]
    fn uniform_lane_profile_is_flat() {
        let data = uniform(30, 50, 150);
        let img = ImageRgba8 {
            w: 30,
            h: 50,
            stride: 120,
            data: &data,
        };
        let profile = aggregate(&img, &rect(10.0, 20.0, 40.0, 5.0)).expect("inside image");
        assert_eq!(profile.len(), 35);
        assert_eq!(profile.columns, 10);
        assert!(profile.values.iter().all(|&v| v == 150.0), "{:?}", profile.values);
    }

    #[test]
    fn nominal_smoothing_biases_profile_ends() {
        let data = uniform(30, 50, 150);
        let img = ImageRgba8 {
            w: 30,
            h: 50,
            stride: 120,
            data: &data,
        };
        let smoothing = SmoothingParams {
            window: 3,
            edge: EdgeNormalization::Nominal,
        };
        let profile =
            aggregate_with(&img, &rect(10.0, 20.0, 40.0, 5.0), &smoothing).expect("inside image");
        assert_eq!(profile.values[0], 100.0);
        assert_eq!(profile.values[34], 100.0);
        assert!(profile.values[1..34].iter().all(|&v| v == 150.0));
    }

    #[test]
    fn single_column_lane_uses_its_column() {
        let data = uniform(8, 20, 90);
        let img = ImageRgba8 {
            w: 8,
            h: 20,
            stride: 32,
            data: &data,
        };
        let profile = aggregate(&img, &rect(3.0, 3.0, 15.0, 2.0)).expect("inside image");
        assert_eq!(profile.columns, 1);
        assert_eq!(profile.len(), 13);
        assert_eq!(profile.values[5], 90.0);
    }

    #[test]
    fn profile_length_follows_first_column() {
        let data = uniform(20, 40, 60);
        let img = ImageRgba8 {
            w: 20,
            h: 40,
            stride: 80,
            data: &data,
        };
        // Top edge rises to the right: later columns are shorter.
        let lane = LaneBoundary {
            ul: Point::new(2.0, 30.0),
            ur: Point::new(12.0, 20.0),
            ll: Point::new(2.0, 5.0),
            lr: Point::new(12.0, 5.0),
        };
        let profile = aggregate(&img, &lane).expect("inside image");
        assert_eq!(profile.len(), 25);
        // The last rows only collect the early, long columns.
        assert!(profile.values[24] < profile.values[5]);
    }

    #[test]
    fn out_of_image_column_is_reported_with_offset() {
        let data = uniform(10, 10, 60);
        let img = ImageRgba8 {
            w: 10,
            h: 10,
            stride: 40,
            data: &data,
        };
        let lane = rect(7.0, 12.0, 8.0, 1.0);
        match aggregate(&img, &lane) {
            Err(GelError::OutOfBounds { offset, x, .. }) => {
                assert!(offset >= 10, "offset={offset}");
                assert_eq!(x, offset);
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn boundary_far_outside_image_is_out_of_bounds() {
        let data = uniform(30, 50, 150);
        let img = ImageRgba8 {
            w: 30,
            h: 50,
            stride: 120,
            data: &data,
        };
        let below = rect(10.0, 20.0, 1e12, 5.0);
        assert!(matches!(
            aggregate(&img, &below),
            Err(GelError::OutOfBounds { offset: 10, .. })
        ));

        let above = rect(10.0, 20.0, 40.0, -1e20);
        assert!(matches!(
            aggregate(&img, &above),
            Err(GelError::OutOfBounds { offset: 10, y: -1, .. })
        ));

        let right = rect(1e12, 2e12, 40.0, 5.0);
        assert!(matches!(
            aggregate(&img, &right),
            Err(GelError::OutOfBounds { .. })
        ));
    }
}
