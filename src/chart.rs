//! Chart-ready table of lane profiles.
//!
//! One row per pixel along the lane axis (`px`), one column per lane, cut to
//! the shortest profile so every row is complete. Colours follow the lane
//! index so the chart matches the overlay.
use crate::palette::Palette;
use crate::types::LaneProfile;
use serde::Serialize;

pub const CHART_TITLE: &str = "Luminosity by lane";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChart {
    pub title: String,
    /// `px`, then `Lane <index>` per series.
    pub header: Vec<String>,
    /// `[px, lane values...]`
    pub rows: Vec<Vec<f32>>,
    pub colors: Vec<String>,
}

impl ProfileChart {
    /// Tabulate `(lane_index, profile)` pairs in the given order.
    pub fn from_profiles<'a>(
        profiles: impl IntoIterator<Item = (usize, &'a LaneProfile)>,
        palette: &Palette,
    ) -> Self {
        let series: Vec<(usize, &LaneProfile)> = profiles.into_iter().collect();
        let rows_len = series.iter().map(|(_, p)| p.len()).min().unwrap_or(0);

        let mut header = Vec::with_capacity(series.len() + 1);
        header.push("px".to_string());
        let mut colors = Vec::with_capacity(series.len());
        for (index, _) in &series {
            header.push(format!("Lane {index}"));
            colors.push(palette.hex_for(*index));
        }

        let rows = (0..rows_len)
            .map(|i| {
                let mut row = Vec::with_capacity(series.len() + 1);
                row.push(i as f32);
                row.extend(series.iter().map(|(_, p)| p.values[i]));
                row
            })
            .collect();

        Self {
            title: CHART_TITLE.to_string(),
            header,
            rows,
            colors,
        }
    }

    pub fn series_count(&self) -> usize {
        self.header.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(values: &[f32]) -> LaneProfile {
        LaneProfile {
            values: values.to_vec(),
            columns: 1,
        }
    }

    #[test]
    fn rows_truncate_to_shortest_profile() {
        let a = profile(&[1.0, 2.0, 3.0, 4.0]);
        let b = profile(&[10.0, 20.0]);
        let chart = ProfileChart::from_profiles([(0, &a), (2, &b)], &Palette::default());
        assert_eq!(chart.header, vec!["px", "Lane 0", "Lane 2"]);
        assert_eq!(chart.rows, vec![vec![0.0, 1.0, 10.0], vec![1.0, 2.0, 20.0]]);
        assert_eq!(chart.colors, vec!["#FF0000", "#0000FF"]);
        assert_eq!(chart.series_count(), 2);
        assert_eq!(chart.title, CHART_TITLE);
    }

    #[test]
    fn no_profiles_gives_empty_table() {
        let chart = ProfileChart::from_profiles(std::iter::empty(), &Palette::default());
        assert_eq!(chart.header, vec!["px"]);
        assert!(chart.rows.is_empty());
    }
}
