use crate::error::GelError;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Image-space coordinate; `x` grows to the right, `y` grows downwards.
pub type Point = Point2<f32>;

/// Luminosity samples along one scan-line, ordered from the axis top.
pub type LuminositySequence = Vec<i32>;

/// Outcome of classifying a scan-line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    /// Bright band that rises well above its own darker ends.
    Lane,
    /// Gap between lanes, flat regions and anything too short to judge.
    Background,
}

/// User-drawn line along one lane, normalised so `top.y >= bottom.y`.
///
/// "Top" is the loading-well end: scans start at its (larger) row index and
/// walk toward `bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceAxis {
    pub top: Point,
    pub bottom: Point,
}

impl ReferenceAxis {
    /// Build an axis from two points in either order.
    pub fn from_points(a: Point, b: Point) -> Self {
        if a.y < b.y {
            Self { top: b, bottom: a }
        } else {
            Self { top: a, bottom: b }
        }
    }

    #[inline]
    pub fn dx(&self) -> f32 {
        self.bottom.x - self.top.x
    }

    #[inline]
    pub fn dy(&self) -> f32 {
        self.bottom.y - self.top.y
    }

    /// Vertical displacement per column when stepping perpendicular to the axis.
    ///
    /// Equals `-1 / slope` but stays finite for a perfectly vertical axis.
    #[inline]
    pub fn perpendicular_slope(&self) -> f32 {
        -self.dx() / self.dy()
    }

    /// Reject axes the sweep cannot work with.
    pub fn validate(&self, width: usize, height: usize) -> Result<(), GelError> {
        let coords = [self.top.x, self.top.y, self.bottom.x, self.bottom.y];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(GelError::invalid_axis("non-finite coordinate"));
        }
        if self.top.y.floor() == self.bottom.y.floor() {
            return Err(GelError::invalid_axis(format!(
                "axis spans no rows (top=({}, {}), bottom=({}, {}))",
                self.top.x, self.top.y, self.bottom.x, self.bottom.y
            )));
        }
        for (name, p) in [("top", self.top), ("bottom", self.bottom)] {
            if p.x < 0.0 || p.y < 0.0 || p.x >= width as f32 || p.y >= height as f32 {
                return Err(GelError::invalid_axis(format!(
                    "{name} point ({}, {}) outside {width}x{height} image",
                    p.x, p.y
                )));
            }
        }
        if self.dx().abs() > self.dy().abs() {
            return Err(GelError::invalid_axis(format!(
                "axis is more horizontal than 45 degrees (dx={}, dy={})",
                self.dx(),
                self.dy()
            )));
        }
        Ok(())
    }
}

/// Quadrilateral around one detected lane.
///
/// `ul`/`ll` are the top and bottom ends of the first lane scan-line, `ur`/`lr`
/// those of the last one. Left and right edges are parallel to the reference
/// axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneBoundary {
    pub ul: Point,
    pub ur: Point,
    pub ll: Point,
    pub lr: Point,
}

impl LaneBoundary {
    /// Corners in drawing order: ul → ur → lr → ll.
    pub fn polygon(&self) -> [Point; 4] {
        [self.ul, self.ur, self.lr, self.ll]
    }

    /// Number of sweep offsets between the left and right edge (`ur.x - ul.x`).
    pub fn column_span(&self) -> i64 {
        self.ur.x.floor() as i64 - self.ul.x.floor() as i64
    }

    /// Rows covered by the first column, which fixes the profile length.
    pub fn row_span(&self) -> usize {
        (self.ul.y.floor() - self.ll.y.floor()).abs() as usize
    }
}

/// Width-averaged luminosity of one lane, index 0 nearest the axis top.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneProfile {
    pub values: Vec<f32>,
    /// Number of scan-line columns that were averaged.
    pub columns: usize,
}

impl LaneProfile {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_puts_larger_row_on_top() {
        let axis = ReferenceAxis::from_points(Point::new(10.0, 5.0), Point::new(12.0, 40.0));
        assert_eq!(axis.top, Point::new(12.0, 40.0));
        assert_eq!(axis.bottom, Point::new(10.0, 5.0));
        assert!(axis.top.y >= axis.bottom.y);
    }

    #[test]
    fn vertical_axis_has_flat_perpendicular() {
        let axis = ReferenceAxis::from_points(Point::new(25.0, 47.0), Point::new(25.0, 2.0));
        assert_eq!(axis.perpendicular_slope(), 0.0);
    }

    #[test]
    fn validate_rejects_degenerate_axes() {
        let flat = ReferenceAxis::from_points(Point::new(5.0, 20.0), Point::new(30.0, 20.0));
        assert!(matches!(
            flat.validate(100, 50),
            Err(GelError::InvalidReferenceAxis { .. })
        ));

        let outside = ReferenceAxis::from_points(Point::new(5.0, 60.0), Point::new(5.0, 2.0));
        assert!(outside.validate(100, 50).is_err());

        let shallow = ReferenceAxis::from_points(Point::new(0.0, 30.0), Point::new(40.0, 10.0));
        assert!(shallow.validate(100, 50).is_err());

        let ok = ReferenceAxis::from_points(Point::new(25.0, 47.0), Point::new(27.0, 2.0));
        assert!(ok.validate(100, 50).is_ok());
    }

    #[test]
    fn boundary_spans() {
        let b = LaneBoundary {
            ul: Point::new(20.0, 47.0),
            ur: Point::new(29.0, 47.0),
            ll: Point::new(20.0, 2.0),
            lr: Point::new(29.0, 2.0),
        };
        assert_eq!(b.column_span(), 9);
        assert_eq!(b.row_span(), 45);
        assert_eq!(b.polygon()[2], b.lr);
    }
}
