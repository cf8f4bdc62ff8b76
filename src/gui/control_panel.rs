//! Control Panel Widget
//! Left side panel with chart selection, summaries and export controls.

use crate::charts::{ChartId, ChartPlotter};
use crate::stats::WeatherReport;
use egui::{Color32, RichText};
use std::path::{Path, PathBuf};

/// What the viewer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Single,
    All,
}

/// Left side control panel with chart selection and export controls.
pub struct ControlPanel {
    pub selected: ChartId,
    pub view_mode: ViewMode,
    pub averages_path: PathBuf,
    pub extremes_path: PathBuf,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(averages_path: PathBuf, extremes_path: PathBuf) -> Self {
        Self {
            selected: ChartId::Temperatures,
            view_mode: ViewMode::Single,
            averages_path,
            extremes_path,
            progress: 0.0,
            status: "Ready".to_string(),
            export_enabled: true,
        }
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, report: &WeatherReport) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌦 Flatbush Weather")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(Self::file_name(&self.averages_path)).size(12.0));
                ui.label(RichText::new(Self::file_name(&self.extremes_path)).size(12.0));
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Section =====
        ui.label(RichText::new("📊 Charts").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.radio_value(&mut self.view_mode, ViewMode::Single, "One chart");
            ui.radio_value(&mut self.view_mode, ViewMode::All, "All charts");
        });
        ui.add_space(5.0);

        ui.add_enabled_ui(self.view_mode == ViewMode::Single, |ui| {
            for id in ChartId::ALL {
                if ui
                    .selectable_label(self.selected == id, id.label())
                    .clicked()
                {
                    self.selected = id;
                    action = ControlPanelAction::SelectChart(id);
                }
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Summary Section =====
        ui.label(RichText::new("🧮 Summary").size(14.0).strong());
        ui.add_space(5.0);

        let visible: Vec<usize> = match self.view_mode {
            ViewMode::Single => ChartId::ALL
                .iter()
                .position(|id| *id == self.selected)
                .into_iter()
                .collect(),
            ViewMode::All => (0..report.graphs.len()).collect(),
        };
        for idx in visible {
            if let Some(summary) = report.graphs.get(idx) {
                ChartPlotter::draw_summary(ui, summary);
                ui.add_space(5.0);
            }
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export Charts").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });
        });

        ui.add_space(15.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectChart(ChartId),
    ExportCharts,
}
