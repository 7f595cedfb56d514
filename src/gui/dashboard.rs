//! Dashboard View
//! Summary cards, the three-chart grid, the insights card and the footer.

use crate::charts::ChartPlotter;
use crate::data::FuelRecord;
use crate::stats::{MetricsCalculator, SummaryMetrics};
use chrono::{Datelike, Local};
use egui::RichText;

const CARD_SPACING: f32 = 12.0;
const CHART_HEIGHT: f32 = 300.0;
// Two chart columns need at least this much width; below it they stack.
const TWO_COLUMN_MIN_WIDTH: f32 = 900.0;

/// What the user asked the app to do this frame.
pub enum DashboardAction {
    None,
    ToggleTheme,
    ExportReport,
}

/// Everything the view needs for one frame, derived from the raw snapshot.
pub struct DashboardData<'a> {
    pub fleet: &'a [FuelRecord],
    pub top10: &'a [FuelRecord],
    pub top5_for_cost: &'a [FuelRecord],
    pub summary: SummaryMetrics,
    pub dark_mode: bool,
    pub is_loading: bool,
    pub status: &'a str,
}

/// Draws the dashboard. Stateless; all state lives in the app.
pub struct DashboardView;

impl DashboardView {
    pub fn show(ui: &mut egui::Ui, data: &DashboardData<'_>) -> DashboardAction {
        let mut action = DashboardAction::None;

        ui.horizontal(|ui| {
            let mut dark = data.dark_mode;
            let label = if data.dark_mode { "🌙 Dark Mode" } else { "☀ Light Mode" };
            if ui.checkbox(&mut dark, label).changed() {
                action = DashboardAction::ToggleTheme;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!data.is_loading, egui::Button::new("📤 Export report"))
                    .clicked()
                {
                    action = DashboardAction::ExportReport;
                }
                ui.label(RichText::new(data.status).size(11.0).weak());
            });
        });

        ui.vertical_centered(|ui| {
            ui.add_space(4.0);
            ui.label(
                RichText::new("🚛 Fleet Fuel Efficiency & Cost Dashboard")
                    .size(24.0)
                    .strong(),
            );
            ui.label(
                RichText::new("Visual insights for reducing fuel consumption and operational cost")
                    .size(13.0)
                    .weak(),
            );
        });
        ui.add_space(CARD_SPACING);

        Self::draw_summary_cards(ui, &data.summary);
        ui.add_space(CARD_SPACING);
        Self::draw_charts(ui, data);
        ui.add_space(CARD_SPACING);
        Self::draw_insights(ui);
        ui.add_space(CARD_SPACING);
        Self::draw_footer(ui);

        action
    }

    fn draw_summary_cards(ui: &mut egui::Ui, summary: &SummaryMetrics) {
        let cards = [
            (
                "Total Fuel Used",
                format!("{} Litres", MetricsCalculator::format_two_dp(summary.total_litres)),
            ),
            (
                "Average Efficiency",
                format!("{} MPG", MetricsCalculator::format_two_dp(summary.average_mpg)),
            ),
            (
                "Total Fuel Cost",
                format!("£{}", MetricsCalculator::format_two_dp(summary.total_cost)),
            ),
        ];

        let card_width = (ui.available_width() - 2.0 * CARD_SPACING) / 3.0;
        ui.horizontal(|ui| {
            for (i, (title, value)) in cards.iter().enumerate() {
                Self::metric_card(ui, card_width, title, value);
                if i + 1 < cards.len() {
                    ui.add_space(CARD_SPACING);
                }
            }
        });
    }

    fn metric_card(ui: &mut egui::Ui, width: f32, title: &str, value: &str) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(14.0)
            .show(ui, |ui| {
                ui.set_width(width - 28.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(title).size(13.0).weak());
                    ui.add_space(4.0);
                    ui.label(RichText::new(value).size(20.0).strong());
                });
            });
    }

    fn draw_charts(ui: &mut egui::Ui, data: &DashboardData<'_>) {
        let two_columns = ui.available_width() >= TWO_COLUMN_MIN_WIDTH;
        let column_width = if two_columns {
            (ui.available_width() - CARD_SPACING) / 2.0
        } else {
            ui.available_width()
        };

        if two_columns {
            ui.horizontal(|ui| {
                Self::chart_card(ui, column_width, "Top 10 Vehicles by Fuel Usage", |ui| {
                    ChartPlotter::draw_usage_bar_chart(ui, data.top10, CHART_HEIGHT);
                });
                ui.add_space(CARD_SPACING);
                Self::chart_card(ui, column_width, "Distance vs Fuel Usage", |ui| {
                    ChartPlotter::draw_distance_line_chart(ui, data.fleet, CHART_HEIGHT);
                });
            });
            ui.add_space(CARD_SPACING);
            Self::chart_card(ui, column_width, "Fuel Cost Distribution (Top 5 Vehicles)", |ui| {
                ChartPlotter::draw_cost_pie_chart(ui, data.top5_for_cost, CHART_HEIGHT);
            });
        } else {
            Self::chart_card(ui, column_width, "Top 10 Vehicles by Fuel Usage", |ui| {
                ChartPlotter::draw_usage_bar_chart(ui, data.top10, CHART_HEIGHT);
            });
            ui.add_space(CARD_SPACING);
            Self::chart_card(ui, column_width, "Distance vs Fuel Usage", |ui| {
                ChartPlotter::draw_distance_line_chart(ui, data.fleet, CHART_HEIGHT);
            });
            ui.add_space(CARD_SPACING);
            Self::chart_card(ui, column_width, "Fuel Cost Distribution (Top 5 Vehicles)", |ui| {
                ChartPlotter::draw_cost_pie_chart(ui, data.top5_for_cost, CHART_HEIGHT);
            });
        }
    }

    fn chart_card(ui: &mut egui::Ui, width: f32, title: &str, body: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(width - 24.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(15.0).strong());
                    ui.add_space(6.0);
                    body(ui);
                });
            });
    }

    fn draw_insights(ui: &mut egui::Ui) {
        const RECOMMENDATIONS: [&str; 5] = [
            "1. Optimize routes for high-fuel routes.",
            "2. Replace or maintain vehicles older than 8 years.",
            "3. Conduct driver training for efficient driving.",
            "4. Monitor load balancing across vehicles.",
            "5. Switch to hybrid or low-consumption models.",
        ];

        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(14.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width() - 28.0);
                ui.label(RichText::new("💡 Key Recommendations").size(16.0).strong());
                ui.add_space(6.0);
                for recommendation in RECOMMENDATIONS {
                    ui.label(RichText::new(recommendation).size(13.0));
                }
            });
    }

    fn draw_footer(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(format!(
                    "© {} Fuel Efficiency Dashboard",
                    Local::now().year()
                ))
                .size(11.0)
                .weak(),
            );
        });
    }
}
