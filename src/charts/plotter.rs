//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::chart_data::{pie_shares, slice_color, ChartData, ChartKind, BAR_WIDTH};
use crate::stats::GraphSummary;
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, PlotUi, Points};

/// Angular step used to tessellate pie slices
const PIE_STEP: f32 = std::f32::consts::PI / 90.0;

pub fn color32(rgb: (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Draws weather charts into an egui `Ui`.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Dispatch on chart kind.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &ChartData, height: f32) {
        match chart.kind {
            ChartKind::Line => Self::draw_line_chart(ui, chart, height),
            ChartKind::Bar => Self::draw_bar_chart(ui, chart, height),
            ChartKind::Pie => Self::draw_pie_chart(ui, chart, height),
        }
    }

    /// Plot with one x grid line per month, labelled with the month name.
    fn show_month_axis(
        ui: &mut egui::Ui,
        chart: &ChartData,
        id: &str,
        height: f32,
        build: impl FnOnce(&mut PlotUi),
    ) {
        let labels = chart.months.clone();
        let month_count = chart.months.len();
        let mut plot = Plot::new(format!("{}_{}", id, chart.id.slug()))
            .height(height)
            .legend(Legend::default())
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .allow_scroll(false)
            .x_grid_spacer(move |_input| {
                (0..month_count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            });

        if let Some(ticks) = chart.y_ticks.clone() {
            let (low, high) = chart.value_range();
            plot = plot
                .include_y(low)
                .include_y(high)
                .y_grid_spacer(move |_input| {
                    ticks
                        .iter()
                        .map(|&t| GridMark {
                            value: t,
                            step_size: 10.0,
                        })
                        .collect()
                });
        }
        plot.show(ui, build);
    }

    /// Line chart with a marker on every month.
    pub fn draw_line_chart(ui: &mut egui::Ui, chart: &ChartData, height: f32) {
        Self::show_month_axis(ui, chart, "line", height, |plot_ui| {
            for series in &chart.series {
                let color = color32(series.color);
                let points: Vec<[f64; 2]> = series.points().map(|(x, y)| [x, y]).collect();

                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color)
                        .width(2.0)
                        .name(&series.name),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(color)
                        .name(&series.name),
                );
            }
        });
    }

    /// Grouped bars, each series shifted by its offset.
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart: &ChartData, height: f32) {
        Self::show_month_axis(ui, chart, "bar", height, |plot_ui| {
            for series in &chart.series {
                let bars: Vec<Bar> = series
                    .points()
                    .map(|(x, y)| Bar::new(x, y).width(BAR_WIDTH))
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(color32(series.color))
                        .name(&series.name),
                );
            }
        });
    }

    /// Pie chart painted directly, starting at three o'clock and running counter-clockwise.
    pub fn draw_pie_chart(ui: &mut egui::Ui, chart: &ChartData, height: f32) {
        let width = ui.available_width();
        let (response, painter) = ui.allocate_painter(egui::vec2(width, height), Sense::hover());
        let rect = response.rect;
        let text_color = ui.visuals().text_color();

        let values = chart
            .series
            .first()
            .map(|s| s.values.as_slice())
            .unwrap_or_default();
        let Some(shares) = pie_shares(values) else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No snowfall recorded",
                FontId::proportional(16.0),
                text_color,
            );
            return;
        };

        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.38;
        let mut start = 0.0_f32;

        for (i, share) in shares.iter().enumerate() {
            if *share <= 0.0 {
                continue;
            }
            let sweep = (*share as f32 / 100.0) * std::f32::consts::TAU;
            let fill = color32(slice_color(i));

            let steps = ((sweep / PIE_STEP).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![center, polar(center, radius, a0), polar(center, radius, a1)],
                    fill,
                    Stroke::NONE,
                ));
            }

            let mid = start + sweep / 2.0;
            let month = chart.months.get(i).map(String::as_str).unwrap_or_default();
            painter.text(
                polar(center, radius * 1.12, mid),
                Align2::CENTER_CENTER,
                month,
                FontId::proportional(13.0),
                text_color,
            );
            painter.text(
                polar(center, radius * 0.6, mid),
                Align2::CENTER_CENTER,
                format!("{:.2}%", share),
                FontId::proportional(11.0),
                Color32::BLACK,
            );

            start += sweep;
        }
    }

    /// Draw the console summary of one chart as a small table
    pub fn draw_summary(ui: &mut egui::Ui, summary: &GraphSummary) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!("GRAPH {}", summary.number))
                        .strong()
                        .size(13.0),
                );
                egui::Grid::new(ui.make_persistent_id(format!("summary_{}", summary.number)))
                    .striped(true)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Highest").strong().size(11.0));
                        ui.label(
                            RichText::new(format!(
                                "{} ({})",
                                summary.highest.month, summary.highest.value
                            ))
                            .size(11.0),
                        );
                        ui.end_row();

                        ui.label(RichText::new("Lowest").strong().size(11.0));
                        ui.label(
                            RichText::new(format!(
                                "{} ({})",
                                summary.lowest.month, summary.lowest.value
                            ))
                            .size(11.0),
                        );
                        ui.end_row();
                    });
                ui.add_space(4.0);
                ui.label(RichText::new(summary.footer.to_string()).size(11.0));
            });
    }
}

/// Point on a circle; screen y grows downwards so the angle is negated.
fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    Pos2::new(
        center.x + radius * angle.cos(),
        center.y - radius * angle.sin(),
    )
}
