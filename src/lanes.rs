//! Lane discovery by sweeping scan-lines parallel to the reference axis.
//!
//! Overview
//! - For each column offset `x` in `0..width`, a scan-line parallel to the
//!   reference axis is placed with its top end at column `x`, shifted
//!   vertically by `x * perpendicular_slope` so the sweep follows the
//!   perpendicular of a slightly tilted axis.
//! - Endpoints are clamped into the image before sampling, so sampling never
//!   leaves the raster during a sweep.
//! - Every scan-line is classified as lane or background. A two-state machine
//!   (`Outside` / `InsideLane`) turns runs of lane scan-lines into
//!   [`LaneBoundary`] quadrilaterals, in left-to-right order.
//!
//! A lane still open when the sweep reaches the right image edge is closed or
//! dropped according to [`OpenLanePolicy`].

use crate::classify::{classify_with, ClassifierParams};
use crate::error::GelError;
use crate::image::ImageView;
use crate::sampling::{sample_line, SmoothingParams};
use crate::types::{LaneBoundary, Point, ReferenceAxis, Region};
use log::{debug, warn};
use serde::Deserialize;

/// What to do with a lane that touches the right image edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenLanePolicy {
    /// Close it at the last column.
    #[default]
    Close,
    /// Discard it.
    Drop,
}

/// Parameters for [`discover_lanes_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiscoveryParams {
    pub smoothing: SmoothingParams,
    pub classifier: ClassifierParams,
    pub open_lane: OpenLanePolicy,
}

/// One scan-line of the sweep, with endpoints already clamped into the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanLine {
    pub offset: usize,
    pub start: Point,
    pub end: Point,
}

impl ScanLine {
    /// Scan-line at sweep offset `x` for `axis` inside a `width`×`height` image.
    pub fn at_offset(axis: &ReferenceAxis, x: usize, width: usize, height: usize) -> Self {
        let perp = axis.perpendicular_slope();
        let xf = x as f32;
        let start = Point::new(xf, (axis.top.y + xf * perp).floor());
        let end = Point::new(xf + axis.dx(), (axis.bottom.y + xf * perp).floor());
        Self {
            offset: x,
            start: clamp_to_image(start, width, height),
            end: clamp_to_image(end, width, height),
        }
    }
}

fn clamp_to_image(p: Point, width: usize, height: usize) -> Point {
    let max_x = width.saturating_sub(1) as f32;
    let max_y = height.saturating_sub(1) as f32;
    Point::new(p.x.clamp(0.0, max_x), p.y.clamp(0.0, max_y))
}

/// Sweep state between scan-lines.
#[derive(Clone, Copy, Debug, PartialEq)]
enum SweepState {
    Outside,
    InsideLane { ul: Point, ll: Point },
}

/// Turns a left-to-right stream of classified scan-lines into lane boundaries.
#[derive(Debug)]
struct LaneSweep {
    state: SweepState,
    previous: Option<ScanLine>,
    lanes: Vec<LaneBoundary>,
}

impl LaneSweep {
    fn new() -> Self {
        Self {
            state: SweepState::Outside,
            previous: None,
            lanes: Vec::new(),
        }
    }

    fn step(&mut self, line: ScanLine, region: Region) {
        match (self.state, region) {
            (SweepState::Outside, Region::Lane) => {
                self.state = SweepState::InsideLane {
                    ul: line.start,
                    ll: line.end,
                };
            }
            (SweepState::InsideLane { ul, ll }, Region::Background) => {
                // The lane ended on the previous scan-line.
                if let Some(last) = self.previous {
                    self.close(ul, ll, last);
                }
                self.state = SweepState::Outside;
            }
            _ => {}
        }
        self.previous = Some(line);
    }

    fn close(&mut self, ul: Point, ll: Point, last: ScanLine) {
        self.lanes.push(LaneBoundary {
            ul,
            ur: last.start,
            ll,
            lr: last.end,
        });
    }

    fn finish(mut self, policy: OpenLanePolicy) -> Vec<LaneBoundary> {
        if let (SweepState::InsideLane { ul, ll }, Some(last)) = (self.state, self.previous) {
            match policy {
                OpenLanePolicy::Close => {
                    debug!("lane open at image edge, closing at offset {}", last.offset);
                    self.close(ul, ll, last);
                }
                OpenLanePolicy::Drop => {
                    debug!("lane open at image edge, dropped (started at x={})", ul.x);
                }
            }
        }
        self.lanes
    }
}

/// Discover lanes with default parameters.
///
/// `top` and `bottom` may be given in either order; they are normalised so
/// the scan starts at the larger row index.
pub fn discover_lanes<I: ImageView + ?Sized>(
    image: &I,
    top: Point,
    bottom: Point,
) -> Result<Vec<LaneBoundary>, GelError> {
    let axis = ReferenceAxis::from_points(top, bottom);
    discover_lanes_with(image, &axis, &DiscoveryParams::default())
}

/// Discover lanes across the full image width, left to right.
pub fn discover_lanes_with<I: ImageView + ?Sized>(
    image: &I,
    axis: &ReferenceAxis,
    params: &DiscoveryParams,
) -> Result<Vec<LaneBoundary>, GelError> {
    let (width, height) = (image.width(), image.height());
    axis.validate(width, height)?;

    let classified = classify_offsets(image, axis, params);

    let mut sweep = LaneSweep::new();
    for (line, region) in classified {
        sweep.step(line, region);
    }
    let lanes = sweep.finish(params.open_lane);
    debug!(
        "discover_lanes: width={} perp={:.4} lanes={}",
        width,
        axis.perpendicular_slope(),
        lanes.len()
    );
    Ok(lanes)
}

fn classify_line<I: ImageView + ?Sized>(
    image: &I,
    line: ScanLine,
    params: &DiscoveryParams,
) -> Region {
    match sample_line(image, line.start, line.end, &params.smoothing) {
        Ok(samples) => classify_with(&samples, &params.classifier),
        Err(err) => {
            warn!(
                "{}; counting offset as background",
                err.at_offset(line.offset as i64)
            );
            Region::Background
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn classify_offsets<I: ImageView + ?Sized>(
    image: &I,
    axis: &ReferenceAxis,
    params: &DiscoveryParams,
) -> Vec<(ScanLine, Region)> {
    let (width, height) = (image.width(), image.height());
    (0..width)
        .map(|x| {
            let line = ScanLine::at_offset(axis, x, width, height);
            (line, classify_line(image, line, params))
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn classify_offsets<I: ImageView + ?Sized>(
    image: &I,
    axis: &ReferenceAxis,
    params: &DiscoveryParams,
) -> Vec<(ScanLine, Region)> {
    use rayon::prelude::*;

    let (width, height) = (image.width(), image.height());
    (0..width)
        .into_par_iter()
        .map(|x| {
            let line = ScanLine::at_offset(axis, x, width, height);
            (line, classify_line(image, line, params))
        })
        .collect()
}
