use crate::analysis::AnalysisParams;
use crate::error::GelError;
use crate::types::Point;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Two image-space points of the user-drawn reference line, in any order.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ReferenceLine {
    pub start: [f32; 2],
    pub end: [f32; 2],
}

impl ReferenceLine {
    pub fn points(&self) -> (Point, Point) {
        (
            Point::new(self.start[0], self.start[1]),
            Point::new(self.end[0], self.end[1]),
        )
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub report_json: Option<PathBuf>,
    pub chart_json: Option<PathBuf>,
    pub overlay_png: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    pub input: PathBuf,
    pub reference: ReferenceLine,
    #[serde(default)]
    pub params: AnalysisParams,
    #[serde(default)]
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<RunConfig, GelError> {
    let contents = fs::read_to_string(path).map_err(|source| GelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents).map_err(|source| GelError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(json: &str) -> Result<RunConfig, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::OpenLanePolicy;
    use crate::sampling::EdgeNormalization;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(
            r#"{ "input": "gel.png", "reference": { "start": [10, 40], "end": [11, 3] } }"#,
        )
        .expect("valid config");
        assert_eq!(cfg.input, PathBuf::from("gel.png"));
        assert_eq!(cfg.params, AnalysisParams::default());
        assert!(cfg.output.report_json.is_none());
        let (a, b) = cfg.reference.points();
        assert_eq!(a, Point::new(10.0, 40.0));
        assert_eq!(b, Point::new(11.0, 3.0));
    }

    #[test]
    fn params_and_outputs_are_read() {
        let cfg = parse_config(
            r##"{
                "input": "gel.png",
                "reference": { "start": [10, 40], "end": [11, 3] },
                "params": {
                    "smoothing": { "window": 5, "edge": "nominal" },
                    "classifier": { "margin_size": 6 },
                    "open_lane": "drop",
                    "palette": ["#112233"]
                },
                "output": { "report_json": "out/report.json", "overlay_png": "out/o.png" }
            }"##,
        )
        .expect("valid config");
        let d = &cfg.params.discovery;
        assert_eq!(d.smoothing.window, 5);
        assert_eq!(d.smoothing.edge, EdgeNormalization::Nominal);
        assert_eq!(d.open_lane, OpenLanePolicy::Drop);
        assert_eq!(d.classifier.margin_size, 6);
        assert_eq!(d.classifier.tail_divisor, 20);
        assert_eq!(cfg.params.palette.color_for(3), [0x11, 0x22, 0x33]);
        assert_eq!(
            cfg.output.report_json.as_deref(),
            Some(Path::new("out/report.json"))
        );
        assert!(cfg.output.chart_json.is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/gel_lanes.json")).unwrap_err();
        assert!(matches!(err, GelError::Io { .. }));
    }
}
