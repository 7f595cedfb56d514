//! GUI module - application shell and dashboard view

mod app;
mod dashboard;

pub use app::DashboardApp;
