//! FleetDash - Fleet Fuel Efficiency & Cost Dashboard
//!
//! Loads a CSV of fleet fuel records once at startup, derives summary
//! metrics and ranked subsets, and renders three charts plus summary cards.

mod charts;
mod data;
mod gui;
mod report;
mod stats;

use eframe::egui;
use gui::DashboardApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Fleet Fuel Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Fleet Fuel Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
