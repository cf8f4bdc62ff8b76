//! Static Chart Renderer
//! Draws the weather charts with plotters and writes them as PNG or SVG files.
//!
//! Layout of every chart:
//! 1. Title centered on top
//! 2. Plot area with month labels on the x axis
//! 3. Series legend in the upper right corner (line and bar charts)

use crate::charts::chart_data::{pie_shares, slice_color, ChartData, ChartKind, BAR_WIDTH};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Pixel buffer does not match {0}x{1}")]
    BufferSize(u32, u32),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Output format for static charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Png
    }
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }
}

fn rgb(color: (u8, u8, u8)) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Destination file for a chart inside an export directory.
    pub fn output_path(dir: &Path, chart: &ChartData, format: ExportFormat) -> PathBuf {
        dir.join(format!("{}.{}", chart.id.slug(), format.extension()))
    }

    /// Render every chart into `dir`, one file per chart, in parallel.
    pub fn render_to_dir(
        charts: &[ChartData],
        dir: &Path,
        format: ExportFormat,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(dir)?;

        charts
            .par_iter()
            .map(|chart| -> Result<PathBuf, RenderError> {
                let path = Self::output_path(dir, chart, format);
                match format {
                    ExportFormat::Png => {
                        fs::write(&path, Self::render_png_bytes(chart, width, height)?)?
                    }
                    ExportFormat::Svg => {
                        fs::write(&path, Self::render_svg_string(chart, width, height)?)?
                    }
                }
                info!("wrote {}", path.display());
                Ok(path)
            })
            .collect()
    }

    /// Render one chart to in-memory PNG bytes.
    pub fn render_png_bytes(chart: &ChartData, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(&root, chart)?;
            root.present().map_err(draw_err)?;
        }

        let img = image::RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::BufferSize(width, height))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        debug!("{} rendered to {} PNG bytes", chart.id.slug(), bytes.len());
        Ok(bytes)
    }

    /// Render one chart to an SVG document.
    pub fn render_svg_string(chart: &ChartData, width: u32, height: u32) -> Result<String, RenderError> {
        let mut out = String::new();
        {
            let root = SVGBackend::with_string(&mut out, (width, height)).into_drawing_area();
            Self::draw(&root, chart)?;
            root.present().map_err(draw_err)?;
        }
        Ok(out)
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &ChartData,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;
        match chart.kind {
            ChartKind::Line => Self::draw_line(root, chart),
            ChartKind::Bar => Self::draw_bars(root, chart),
            ChartKind::Pie => Self::draw_pie(root, chart),
        }
    }

    fn x_range(chart: &ChartData) -> std::ops::Range<f64> {
        -0.5..(chart.months.len().max(1) as f64 - 0.5)
    }

    fn y_range(chart: &ChartData) -> std::ops::Range<f64> {
        let (low, high) = chart.value_range();
        if chart.y_ticks.is_some() {
            // Keep the fixed ticks as the visible extent unless data leaves it
            return low..high;
        }
        let pad = (high - low) * 0.1;
        (low - pad)..(high + pad)
    }

    fn draw_line<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &ChartData,
    ) -> Result<(), RenderError> {
        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 28).into_font())
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(Self::x_range(chart), Self::y_range(chart))
            .map_err(draw_err)?;

        let month_label = |x: &f64| chart.month_at(*x).unwrap_or_default().to_string();
        ctx.configure_mesh()
            .x_labels(chart.months.len() + 1)
            .x_label_formatter(&month_label)
            .y_labels(chart.y_ticks.as_ref().map(|t| t.len()).unwrap_or(10))
            .x_desc(&chart.x_label)
            .y_desc(&chart.y_label)
            .draw()
            .map_err(draw_err)?;

        for series in &chart.series {
            let color = rgb(series.color);
            ctx.draw_series(LineSeries::new(series.points(), color.stroke_width(2)))
                .map_err(draw_err)?
                .label(series.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            ctx.draw_series(series.points().map(|p| Circle::new(p, 4, color.filled())))
                .map_err(draw_err)?;
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
        Ok(())
    }

    fn draw_bars<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &ChartData,
    ) -> Result<(), RenderError> {
        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 28).into_font())
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(Self::x_range(chart), Self::y_range(chart))
            .map_err(draw_err)?;

        let month_label = |x: &f64| chart.month_at(*x).unwrap_or_default().to_string();
        ctx.configure_mesh()
            .x_labels(chart.months.len() + 1)
            .x_label_formatter(&month_label)
            .x_desc(&chart.x_label)
            .y_desc(&chart.y_label)
            .draw()
            .map_err(draw_err)?;

        let half = BAR_WIDTH / 2.0;
        for series in &chart.series {
            let color = rgb(series.color);
            ctx.draw_series(
                series
                    .points()
                    .map(|(x, y)| Rectangle::new([(x - half, 0.0), (x + half, y)], color.filled())),
            )
            .map_err(draw_err)?
            .label(series.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
        Ok(())
    }

    fn draw_pie<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &ChartData,
    ) -> Result<(), RenderError> {
        let area = root
            .titled(&chart.title, (FONT, 28).into_font())
            .map_err(draw_err)?;
        let (w, h) = area.dim_in_pixel();

        let values = chart
            .series
            .first()
            .map(|s| s.values.as_slice())
            .unwrap_or_default();
        let Some(shares) = pie_shares(values) else {
            area.draw(&Text::new(
                "No snowfall recorded",
                (w as i32 / 2 - 90, h as i32 / 2),
                (FONT, 20).into_font(),
            ))
            .map_err(draw_err)?;
            return Ok(());
        };

        // Zero slices are left out so their labels do not pile up
        let mut sizes = Vec::new();
        let mut colors = Vec::new();
        let mut labels = Vec::new();
        for (i, share) in shares.iter().enumerate() {
            if *share > 0.0 {
                sizes.push(*share);
                colors.push(rgb(slice_color(i)));
                labels.push(chart.months.get(i).cloned().unwrap_or_default());
            }
        }

        let center = (w as i32 / 2, h as i32 / 2);
        let radius = (w.min(h) as f64) * 0.35;
        let mut pie = Pie::new(
            &center,
            &radius,
            sizes.as_slice(),
            colors.as_slice(),
            labels.as_slice(),
        );
        pie.label_style((FONT, 18).into_font());
        pie.percentages((FONT, 14).into_font().color(&BLACK));
        area.draw(&pie).map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AverageWeather, DataProcessor, ExtremeRecord, ExtremeWeather, MonthlyRecord};
    use tempfile::tempdir;

    fn charts() -> Vec<ChartData> {
        charts_with_snow([4.0, 3.0, 2.0])
    }

    fn charts_with_snow(snowfall: [f64; 3]) -> Vec<ChartData> {
        let months = ["Jan", "Feb", "Mar"];
        let averages: AverageWeather = months
            .iter()
            .map(|m| MonthlyRecord {
                month: m.to_string(),
                high_temp: 45,
                low_temp: 28,
                rainfall: 3.2,
            })
            .collect();
        let extremes: ExtremeWeather = months
            .iter()
            .enumerate()
            .map(|(i, m)| ExtremeRecord {
                month: m.to_string(),
                extreme_high: 70 + i as i64,
                extreme_low: -3 + i as i64,
                snowfall: snowfall[i],
            })
            .collect();
        let ranges = DataProcessor::temperature_ranges(&extremes).unwrap();
        ChartData::build_all(&averages, &extremes, &ranges)
    }

    #[test]
    fn output_paths_follow_chart_ids() {
        let dir = Path::new("out");
        let charts = charts();
        assert_eq!(
            StaticChartRenderer::output_path(dir, &charts[0], ExportFormat::Png),
            dir.join("temperatures.png")
        );
        assert_eq!(
            StaticChartRenderer::output_path(dir, &charts[2], ExportFormat::Svg),
            dir.join("snowfall.svg")
        );
    }

    #[test]
    fn export_format_parses_from_config() {
        let format: ExportFormat = serde_json::from_str("\"svg\"").unwrap();
        assert_eq!(format, ExportFormat::Svg);
        assert_eq!(ExportFormat::default().extension(), "png");
    }

    /// Text layout goes through the system font stack.
    #[test]
    #[ignore = "requires a system sans-serif font"]
    fn renders_one_file_per_chart() {
        let tmp = tempdir().unwrap();
        let written =
            StaticChartRenderer::render_to_dir(&charts(), tmp.path(), ExportFormat::Png, 640, 480)
                .unwrap();

        assert_eq!(written.len(), 4);
        for path in &written {
            let bytes = std::fs::read(path).unwrap();
            assert_eq!(&bytes[1..4], b"PNG");
        }
    }

    #[test]
    #[ignore = "requires a system sans-serif font"]
    fn snowless_pie_draws_a_note_instead_of_slices() {
        let charts = charts_with_snow([0.0, 0.0, 0.0]);
        let svg = StaticChartRenderer::render_svg_string(&charts[2], 640, 480).unwrap();

        assert!(svg.contains("No snowfall recorded"));
        assert!(!svg.contains("Jan"));
    }
}
