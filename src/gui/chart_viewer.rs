//! Chart Viewer Widget
//! Central panel showing one chart at full size or all four in a grid.

use crate::charts::{ChartData, ChartId, ChartPlotter};
use crate::gui::ViewMode;
use egui::{Color32, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const CARD_HEIGHT: f32 = 420.0;
const CHART_WIDTH: f32 = 620.0; // Minimum width of a grid card

/// Displays the weather charts.
pub struct ChartViewer {
    pub charts: Vec<ChartData>,
}

impl ChartViewer {
    pub fn new(charts: Vec<ChartData>) -> Self {
        Self { charts }
    }

    fn chart(&self, id: ChartId) -> Option<&ChartData> {
        self.charts.iter().find(|c| c.id == id)
    }

    pub fn show(&self, ui: &mut egui::Ui, mode: ViewMode, selected: ChartId) {
        if self.charts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        match mode {
            ViewMode::Single => {
                if let Some(chart) = self.chart(selected) {
                    let height = (ui.available_height() - 60.0).max(200.0);
                    Self::draw_chart_card(ui, chart, height);
                }
            }
            ViewMode::All => self.show_grid(ui),
        }
    }

    /// Cards wrap into as many columns as fit the available width
    fn show_grid(&self, ui: &mut egui::Ui) {
        let avail_width = ui.available_width();
        let card_total_width = CHART_WIDTH + CHART_SPACING;
        let num_columns = ((avail_width / card_total_width).floor() as usize).max(1);
        let card_width = (avail_width / num_columns as f32) - CHART_SPACING;

        let total_items = self.charts.len();
        let total_rows = total_items.div_ceil(num_columns);
        let row_height = CARD_HEIGHT + CHART_SPACING;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, row_height, total_rows, |ui, row_range| {
                for row in row_range {
                    ui.horizontal(|ui| {
                        for col in 0..num_columns {
                            let idx = row * num_columns + col;
                            if let Some(chart) = self.charts.get(idx) {
                                ui.vertical(|ui| {
                                    ui.set_width(card_width);
                                    Self::draw_chart_card(ui, chart, CARD_HEIGHT - 70.0);
                                });
                                ui.add_space(CHART_SPACING);
                            }
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_chart_card(ui: &mut egui::Ui, chart: &ChartData, plot_height: f32) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.5, Color32::from_rgb(160, 160, 170)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&chart.title).size(18.0).strong());
                    ui.horizontal_wrapped(|ui| {
                        for (name, mean) in chart.series_means() {
                            ui.label(
                                RichText::new(format!("{} mean: {:.2}", name, mean))
                                    .size(11.0)
                                    .color(Color32::GRAY),
                            );
                        }
                    });
                    ui.add_space(8.0);
                    ChartPlotter::draw_chart(ui, chart, plot_height);
                });
            });
    }
}
