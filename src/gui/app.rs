//! Weather Viewer Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartData, StaticChartRenderer};
use crate::config::Settings;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::WeatherReport;
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info};

/// Export result from background thread
enum ExportResult {
    Complete { dir: PathBuf, files: Vec<PathBuf> },
    Error(String),
}

/// Main application window.
pub struct WeatherApp {
    settings: Settings,
    report: WeatherReport,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async export
    export_rx: Option<Receiver<ExportResult>>,
    is_exporting: bool,
}

impl WeatherApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        settings: Settings,
        charts: Vec<ChartData>,
        report: WeatherReport,
    ) -> Self {
        Self {
            control_panel: ControlPanel::new(settings.averages.clone(), settings.extremes.clone()),
            chart_viewer: ChartViewer::new(charts),
            settings,
            report,
            export_rx: None,
            is_exporting: false,
        }
    }

    /// Ask for a directory and render static charts there in the background
    fn handle_export(&mut self) {
        if self.is_exporting {
            return;
        }

        let Some(dir) = rfd::FileDialog::new()
            .set_title("Export charts to folder")
            .pick_folder()
        else {
            return; // User cancelled
        };

        let charts = self.chart_viewer.charts.clone();
        let format = self.settings.format;
        let (width, height) = (self.settings.width, self.settings.height);

        let (tx, rx) = channel();
        self.export_rx = Some(rx);
        self.is_exporting = true;
        self.control_panel.export_enabled = false;
        self.control_panel.set_progress(10.0, "Rendering charts...");
        info!("exporting {} charts to {}", charts.len(), dir.display());

        thread::spawn(move || {
            let result =
                match StaticChartRenderer::render_to_dir(&charts, &dir, format, width, height) {
                    Ok(files) => ExportResult::Complete { dir, files },
                    Err(e) => ExportResult::Error(e.to_string()),
                };
            let _ = tx.send(result);
        });
    }

    /// Check for export results
    fn check_export_results(&mut self) {
        // Take the receiver temporarily to avoid borrow issues
        let Some(rx) = self.export_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(ExportResult::Complete { dir, files }) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Exported {} charts to {}", files.len(), dir.display()),
                );
                if self.settings.open_export {
                    if let Err(e) = open::that(&dir) {
                        error!("cannot open {}: {}", dir.display(), e);
                    }
                }
                self.finish_export();
            }
            Ok(ExportResult::Error(e)) => {
                error!("export failed: {}", e);
                self.control_panel.set_progress(0.0, &format!("Error: {}", e));
                self.finish_export();
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                // Put receiver back if still needed
                self.export_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel
                    .set_progress(0.0, "Error: export thread stopped");
                self.finish_export();
            }
        }
    }

    fn finish_export(&mut self) {
        self.is_exporting = false;
        self.control_panel.export_enabled = true;
    }
}

impl eframe::App for WeatherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_export_results();

        // Request repaint while exporting
        if self.is_exporting {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, &self.report) {
                        ControlPanelAction::ExportCharts => self.handle_export(),
                        ControlPanelAction::SelectChart(_) | ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(
                ui,
                self.control_panel.view_mode,
                self.control_panel.selected,
            );
        });
    }
}
