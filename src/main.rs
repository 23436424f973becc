use gel_lanes::config::{load_config, RunConfig};
use gel_lanes::image::io::{load_rgba_image, save_rgba_png, write_json_file};
use gel_lanes::overlay::render_overlay;
use gel_lanes::{AnalysisReport, GelAnalyzer, GelError};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GelError> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let gel = load_rgba_image(&config.input)?;
    let image = gel.as_view();
    let (a, b) = config.reference.points();

    let analyzer = GelAnalyzer::new(config.params.clone());
    let report = analyzer.analyze(&image, a, b)?;

    print_text_summary(&config, &report);
    write_outputs(&config, &report, &gel)?;
    Ok(())
}

fn usage() -> GelError {
    GelError::Config("Usage: gel_lanes <config.json>".to_string())
}

fn print_text_summary(config: &RunConfig, report: &AnalysisReport) {
    println!("Gel analysis: {}", config.input.display());
    println!(
        "  image: {}x{}  axis: ({:.1}, {:.1}) -> ({:.1}, {:.1})",
        report.image_width,
        report.image_height,
        report.axis.top.x,
        report.axis.top.y,
        report.axis.bottom.x,
        report.axis.bottom.y
    );
    println!("  lanes: {}", report.lanes.len());
    for lane in &report.lanes {
        let b = &lane.boundary;
        match (&lane.profile, &lane.error) {
            (Some(profile), _) => println!(
                "    Lane {} {} x=[{:.0}, {:.0}] rows={} columns={}",
                lane.index,
                lane.color,
                b.ul.x,
                b.ur.x,
                profile.len(),
                profile.columns
            ),
            (None, Some(err)) => println!(
                "    Lane {} {} x=[{:.0}, {:.0}] failed: {err}",
                lane.index, lane.color, b.ul.x, b.ur.x
            ),
            (None, None) => {}
        }
    }
    let stage = |label: &str| {
        report
            .timing
            .stage_ms(label)
            .map(|ms| format!("{ms:.3}"))
            .unwrap_or_else(|| "-".to_string())
    };
    println!(
        "  timings (ms): discover={} aggregate={} total={:.3}",
        stage("discover"),
        stage("aggregate"),
        report.timing.total_ms
    );
}

fn write_outputs(
    config: &RunConfig,
    report: &AnalysisReport,
    gel: &gel_lanes::image::io::RgbaImageBuf,
) -> Result<(), GelError> {
    let out = &config.output;
    if let Some(path) = &out.report_json {
        write_json_file(path, report)?;
        println!("Report written to {}", path.display());
    }
    if let Some(path) = &out.chart_json {
        let chart = report.chart(&config.params.palette);
        write_json_file(path, &chart)?;
        println!(
            "Chart table ({} series, {} rows) written to {}",
            chart.series_count(),
            chart.rows.len(),
            path.display()
        );
    }
    if let Some(path) = &out.overlay_png {
        let overlay = render_overlay(&gel.as_view(), &report.boundaries(), &config.params.palette);
        save_rgba_png(&overlay, path)?;
        println!("Lane overlay written to {}", path.display());
    }
    Ok(())
}
