//! Chart Plotter Module
//! Builds the dashboard's interactive charts with egui_plot, plus a
//! painter-tessellated pie for the cost distribution.

use crate::data::FuelRecord;
use egui::{Align2, Color32, FontId, Mesh, Pos2, Sense, Shape, Vec2};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

/// Slice colors for the cost pie, matching the dashboard palette.
pub const PALETTE: [Color32; 5] = [
    Color32::from_rgb(79, 70, 229),  // Indigo
    Color32::from_rgb(6, 182, 212),  // Cyan
    Color32::from_rgb(245, 158, 11), // Amber
    Color32::from_rgb(147, 51, 234), // Purple
    Color32::from_rgb(16, 185, 129), // Emerald
];

pub const BAR_COLOR: Color32 = Color32::from_rgb(79, 70, 229);
pub const LINE_COLOR: Color32 = Color32::from_rgb(234, 208, 37);

/// Creates the three dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Bar chart of litres per vehicle for the usage ranking, one bar per
    /// record, labelled by registration.
    pub fn draw_usage_bar_chart(ui: &mut egui::Ui, top10: &[FuelRecord], height: f32) {
        let bars: Vec<Bar> = top10
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Bar::new(i as f64, plot_value(r.litres))
                    .width(0.6)
                    .fill(BAR_COLOR)
            })
            .collect();
        let labels: Vec<String> = top10.iter().map(|r| r.registration.clone()).collect();

        Plot::new("usage_bar")
            .height(height)
            .allow_scroll(false)
            .y_axis_label("Litres")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 && (idx as usize) < labels.len()
                {
                    labels[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Line of litres against distance over the whole fleet. Records with
    /// an unparsable distance or litres have no position and are skipped.
    pub fn draw_distance_line_chart(ui: &mut egui::Ui, fleet: &[FuelRecord], height: f32) {
        let points: PlotPoints = fleet
            .iter()
            .filter(|r| r.distance.is_finite() && r.litres.is_finite())
            .map(|r| [r.distance, r.litres])
            .collect();

        Plot::new("distance_line")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Distance")
            .y_axis_label("Litres")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).color(LINE_COLOR).width(2.0));
            });
    }

    /// Pie of cost shares for the usage-ranked cost slice. Non-positive and
    /// unparsable costs get no slice; with no usable cost at all a
    /// placeholder label is drawn instead.
    pub fn draw_cost_pie_chart(ui: &mut egui::Ui, top5: &[FuelRecord], height: f32) {
        let desired = Vec2::new(ui.available_width(), height);
        let (rect, _) = ui.allocate_exact_size(desired, Sense::hover());
        let painter = ui.painter_at(rect);

        let costs: Vec<f64> = top5
            .iter()
            .map(|r| if r.cost.is_finite() && r.cost > 0.0 { r.cost } else { 0.0 })
            .collect();
        let total: f64 = costs.iter().sum();
        if total <= 0.0 {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No cost data",
                FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        let center = rect.center();
        let radius = (rect.height().min(rect.width()) * 0.5 - 28.0).max(10.0);
        let mut angle = -std::f32::consts::FRAC_PI_2;

        for (i, (record, &cost)) in top5.iter().zip(&costs).enumerate() {
            if cost <= 0.0 {
                continue;
            }
            let sweep = (cost / total) as f32 * std::f32::consts::TAU;
            painter.add(pie_slice(center, radius, angle, sweep, PALETTE[i % PALETTE.len()]));

            let mid = angle + sweep / 2.0;
            let label_pos = center + Vec2::new(mid.cos(), mid.sin()) * (radius + 18.0);
            painter.text(
                label_pos,
                Align2::CENTER_CENTER,
                &record.registration,
                FontId::proportional(12.0),
                ui.visuals().text_color(),
            );
            angle += sweep;
        }
    }
}

fn plot_value(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Triangle fan approximating one pie slice.
fn pie_slice(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Shape {
    let steps = ((sweep / 0.05).ceil() as usize).max(2);
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for step in 0..=steps {
        let a = start + sweep * step as f32 / steps as f32;
        mesh.colored_vertex(center + Vec2::new(a.cos(), a.sin()) * radius, color);
    }
    for i in 0..steps as u32 {
        mesh.add_triangle(0, i + 1, i + 2);
    }
    Shape::mesh(mesh)
}
