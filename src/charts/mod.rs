//! Charts module - interactive charts and static rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
