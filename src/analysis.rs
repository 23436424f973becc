//! End-to-end gel analysis: reference axis → lane boundaries → profiles.
//!
//! Pipeline
//! - Normalise the two user points into a [`ReferenceAxis`] and validate it
//!   against the image. An invalid axis aborts the run.
//! - Sweep the image for lanes ([`crate::lanes`]).
//! - Aggregate each lane into a profile ([`crate::profile`]). Lanes are
//!   independent: a lane whose scan-lines leave the image is reported with its
//!   error and the remaining lanes are still aggregated.
//!
//! Results are returned as values; lane order is discovery order and doubles
//! as the colour key.

use crate::chart::ProfileChart;
use crate::error::GelError;
use crate::image::ImageView;
use crate::lanes::{discover_lanes_with, DiscoveryParams};
use crate::palette::Palette;
use crate::profile::aggregate_with;
use crate::types::{LaneBoundary, LaneProfile, Point, ReferenceAxis};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Knobs for a full analysis run.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    #[serde(flatten)]
    pub discovery: DiscoveryParams,
    pub palette: Palette,
}

/// Wall-clock time of one pipeline stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Record a stage that started at `since`.
    fn record(&mut self, label: &str, since: Instant) {
        let elapsed_ms = since.elapsed().as_secs_f64() * 1000.0;
        self.stages.push(StageTiming {
            label: label.to_string(),
            elapsed_ms,
        });
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

/// One discovered lane and, when aggregation succeeded, its profile.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneReport {
    pub index: usize,
    pub color: String,
    pub boundary: LaneBoundary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<LaneProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub image_width: usize,
    pub image_height: usize,
    pub axis: ReferenceAxis,
    pub lanes: Vec<LaneReport>,
    pub timing: TimingBreakdown,
}

impl AnalysisReport {
    pub fn boundaries(&self) -> Vec<LaneBoundary> {
        self.lanes.iter().map(|l| l.boundary).collect()
    }

    /// Successfully aggregated profiles keyed by lane index.
    pub fn profiles(&self) -> impl Iterator<Item = (usize, &LaneProfile)> + '_ {
        self.lanes
            .iter()
            .filter_map(|l| l.profile.as_ref().map(|p| (l.index, p)))
    }

    pub fn failed_lanes(&self) -> impl Iterator<Item = &LaneReport> + '_ {
        self.lanes.iter().filter(|l| l.error.is_some())
    }

    pub fn chart(&self, palette: &Palette) -> ProfileChart {
        ProfileChart::from_profiles(self.profiles(), palette)
    }
}

/// Runs discovery and aggregation with a fixed parameter set.
#[derive(Clone, Debug, Default)]
pub struct GelAnalyzer {
    params: AnalysisParams,
}

impl GelAnalyzer {
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Analyse the image for a reference line drawn between `a` and `b`
    /// (either order).
    pub fn analyze<I: ImageView + ?Sized>(
        &self,
        image: &I,
        a: Point,
        b: Point,
    ) -> Result<AnalysisReport, GelError> {
        self.analyze_axis(image, ReferenceAxis::from_points(a, b))
    }

    pub fn analyze_axis<I: ImageView + ?Sized>(
        &self,
        image: &I,
        axis: ReferenceAxis,
    ) -> Result<AnalysisReport, GelError> {
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let discover_start = Instant::now();
        let boundaries = discover_lanes_with(image, &axis, &self.params.discovery)?;
        timing.record("discover", discover_start);
        info!("discovered {} lane(s)", boundaries.len());

        let aggregate_start = Instant::now();
        let lanes = self.aggregate_lanes(image, &boundaries);
        timing.record("aggregate", aggregate_start);

        timing.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "GelAnalyzer::analyze lanes={} failed={} total_ms={:.3}",
            lanes.len(),
            lanes.iter().filter(|l| l.error.is_some()).count(),
            timing.total_ms
        );

        Ok(AnalysisReport {
            image_width: image.width(),
            image_height: image.height(),
            axis,
            lanes,
            timing,
        })
    }

    /// Aggregate every boundary, isolating failures to their own lane.
    pub fn aggregate_lanes<I: ImageView + ?Sized>(
        &self,
        image: &I,
        boundaries: &[LaneBoundary],
    ) -> Vec<LaneReport> {
        let smoothing = &self.params.discovery.smoothing;
        boundaries
            .iter()
            .enumerate()
            .map(|(index, boundary)| {
                let (profile, error) = match aggregate_with(image, boundary, smoothing) {
                    Ok(profile) => (Some(profile), None),
                    Err(err) => {
                        warn!("lane {index}: {err}; skipping its profile");
                        (None, Some(err.to_string()))
                    }
                };
                LaneReport {
                    index,
                    color: self.params.palette.hex_for(index),
                    boundary: *boundary,
                    profile,
                    error,
                }
            })
            .collect()
    }
}
