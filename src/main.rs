//! Flatbush Weather - Monthly Weather Summaries & Interactive Chart Viewer
//!
//! Reads the average and extreme monthly weather CSV files, prints a summary
//! for each of the four charts and shows the charts in a window.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::{anyhow, Context, Result};
use charts::{ChartData, StaticChartRenderer};
use clap::Parser;
use config::{Args, Settings};
use data::DataProcessor;
use eframe::egui;
use gui::WeatherApp;
use stats::WeatherReport;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the report
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let settings = Settings::from_args(Args::parse())?;
    info!(alignment = ?settings.alignment, "startup");

    let averages = data::load_averages(&settings.averages)
        .with_context(|| format!("loading averages from {}", settings.averages.display()))?;
    let extremes = data::load_extremes(&settings.extremes)
        .with_context(|| format!("loading extremes from {}", settings.extremes.display()))?;
    DataProcessor::check_alignment(&averages, &extremes, settings.alignment)
        .context("matching extremes to averages")?;

    let ranges = DataProcessor::temperature_ranges(&extremes)
        .context("computing record temperature ranges")?;
    let report = WeatherReport::build(&averages, &extremes, &ranges)?;

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    let charts = ChartData::build_all(&averages, &extremes, &ranges);

    if let Some(export) = &settings.export {
        info!("exporting charts to {}", export.dir.display());
        let files = StaticChartRenderer::render_to_dir(
            &charts,
            &export.dir,
            export.format,
            export.width,
            export.height,
        )
        .with_context(|| format!("exporting charts to {}", export.dir.display()))?;
        info!("{} charts written", files.len());

        if settings.open_export {
            if let Err(e) = open::that(&export.dir) {
                error!("cannot open {}: {}", export.dir.display(), e);
            }
        }
    }

    if !settings.gui {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Flatbush Weather"),
        ..Default::default()
    };

    eframe::run_native(
        "Flatbush Weather",
        options,
        Box::new(move |cc| Ok(Box::new(WeatherApp::new(cc, settings, charts, report)))),
    )
    .map_err(|e| anyhow!("chart window failed: {}", e))
}
