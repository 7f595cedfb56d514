//! Fleet Dashboard Application
//! Main window: one-shot CSV load in a background thread, per-frame metrics
//! pipeline over the raw snapshot, theme toggle and report export.

use crate::data::{DataLoader, FuelRecord, RawRecord};
use crate::gui::dashboard::{DashboardAction, DashboardData, DashboardView};
use crate::report::ReportGenerator;
use crate::stats::{MetricsCalculator, SummaryMetrics};
use egui::Visuals;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use tracing::warn;

/// Compiled-in data source, resolved relative to the working directory.
pub const FLEET_CSV_PATH: &str = "assets/Cleaned_FleetFuel.csv";

/// Load completion from the background thread, delivered exactly once.
enum LoadResult {
    Complete(Vec<RawRecord>),
}

/// Main application window.
pub struct DashboardApp {
    /// Raw CSV rows; empty both before the load completes and after a
    /// failed load.
    raw: Vec<RawRecord>,
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
    dark_mode: bool,
    status: String,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // One-shot load, kicked off at construction. No retry, no
        // cancellation; failure already degraded to an empty list.
        let (tx, rx) = channel();
        thread::spawn(move || {
            let records = DataLoader::load_or_empty(FLEET_CSV_PATH);
            let _ = tx.send(LoadResult::Complete(records));
        });

        Self {
            raw: Vec::new(),
            load_rx: Some(rx),
            is_loading: true,
            dark_mode: false,
            status: "Loading fleet data...".to_string(),
        }
    }

    /// Drain the load channel without blocking the frame.
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            match rx.try_recv() {
                Ok(LoadResult::Complete(records)) => {
                    self.status = format!("Loaded {} fuel records", records.len());
                    self.raw = records;
                    self.is_loading = false;
                }
                Err(TryRecvError::Empty) => {
                    self.load_rx = Some(rx);
                }
                Err(TryRecvError::Disconnected) => {
                    self.is_loading = false;
                    self.status = "Load worker exited".to_string();
                }
            }
        }
    }

    fn handle_export(
        &mut self,
        fleet: &[FuelRecord],
        top10: &[FuelRecord],
        top5_for_cost: &[FuelRecord],
        summary: &SummaryMetrics,
    ) {
        let Some(dir) = rfd::FileDialog::new()
            .set_title("Choose a folder for the report")
            .pick_folder()
        else {
            return;
        };

        match ReportGenerator::export(&dir, fleet, top10, top5_for_cost, summary) {
            Ok(()) => {
                self.status = format!("Report exported to {}", dir.display());
                if let Err(e) = open::that(&dir) {
                    warn!(error = %e, "could not open report folder");
                }
            }
            Err(e) => {
                warn!(error = %e, "report export failed");
                self.status = format!("Export failed: {e:#}");
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        if self.is_loading {
            ctx.request_repaint();
        }

        ctx.set_visuals(if self.dark_mode {
            Visuals::dark()
        } else {
            Visuals::light()
        });

        // The pipeline is pure and the data is small: recompute everything
        // from the raw snapshot every frame instead of caching derived
        // state.
        let fleet: Vec<FuelRecord> = self.raw.iter().map(FuelRecord::from_raw).collect();
        let top10 = MetricsCalculator::compute_top10(&fleet);
        let top5_for_cost = MetricsCalculator::compute_top5_for_cost(&top10);
        let summary = MetricsCalculator::compute_summary(&fleet);

        let mut action = DashboardAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    action = DashboardView::show(
                        ui,
                        &DashboardData {
                            fleet: &fleet,
                            top10: &top10,
                            top5_for_cost: &top5_for_cost,
                            summary,
                            dark_mode: self.dark_mode,
                            is_loading: self.is_loading,
                            status: &self.status,
                        },
                    );
                });
        });

        match action {
            DashboardAction::ToggleTheme => self.dark_mode = !self.dark_mode,
            DashboardAction::ExportReport => {
                self.handle_export(&fleet, &top10, &top5_for_cost, &summary)
            }
            DashboardAction::None => {}
        }
    }
}
