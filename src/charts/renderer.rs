//! Static Chart Renderer
//! Renders the three dashboard charts to PNG files with plotters, for the
//! report export.

use crate::data::FuelRecord;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart rendering failed: {0}")]
    Draw(String),
}

const BAR_FILL: RGBColor = RGBColor(79, 70, 229);
const LINE_STROKE: RGBColor = RGBColor(234, 208, 37);
const PIE_PALETTE: [RGBColor; 5] = [
    RGBColor(79, 70, 229),
    RGBColor(6, 182, 212),
    RGBColor(245, 158, 11),
    RGBColor(147, 51, 234),
    RGBColor(16, 185, 129),
];

/// Renders the dashboard charts as static images.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Bar chart of the usage ranking: litres per registration.
    pub fn render_usage_bar(
        top10: &[FuelRecord],
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        if top10.is_empty() {
            return Self::render_placeholder(&root, width, height);
        }

        let max_litres = top10
            .iter()
            .map(|r| finite_or_zero(r.litres))
            .fold(0.0f64, f64::max)
            .max(1.0);
        let labels: Vec<String> = top10.iter().map(|r| r.registration.clone()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption("Top 10 Vehicles by Fuel Usage", ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .build_cartesian_2d(-0.5f64..top10.len() as f64 - 0.5, 0f64..max_litres * 1.1)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(top10.len())
            .x_label_formatter(&|x| {
                let idx = x.round();
                if idx >= 0.0 && (x - idx).abs() < 1e-6 && (idx as usize) < labels.len() {
                    labels[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .y_desc("Litres")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(top10.iter().enumerate().map(|(i, r)| {
                let litres = finite_or_zero(r.litres);
                Rectangle::new(
                    [(i as f64 - 0.3, 0.0), (i as f64 + 0.3, litres)],
                    BAR_FILL.filled(),
                )
            }))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)
    }

    /// Line of litres against distance over the whole fleet.
    pub fn render_distance_line(
        fleet: &[FuelRecord],
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let points: Vec<(f64, f64)> = fleet
            .iter()
            .filter(|r| r.distance.is_finite() && r.litres.is_finite())
            .map(|r| (r.distance, r.litres))
            .collect();
        if points.is_empty() {
            return Self::render_placeholder(&root, width, height);
        }

        let (x_max, y_max) = points
            .iter()
            .fold((1.0f64, 1.0f64), |(xm, ym), &(x, y)| (xm.max(x), ym.max(y)));

        let mut chart = ChartBuilder::on(&root)
            .caption("Distance vs Fuel Usage", ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .build_cartesian_2d(0f64..x_max * 1.05, 0f64..y_max * 1.1)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Distance")
            .y_desc("Litres")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(LineSeries::new(points.clone(), LINE_STROKE.stroke_width(2)))
            .map_err(draw_err)?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, LINE_STROKE.filled())),
            )
            .map_err(draw_err)?;

        root.present().map_err(draw_err)
    }

    /// Pie of cost shares for the usage-ranked cost slice.
    pub fn render_cost_pie(
        top5: &[FuelRecord],
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let root = root
            .titled("Fuel Cost Distribution (Top 5 Vehicles)", ("sans-serif", 24))
            .map_err(draw_err)?;

        let costs: Vec<f64> = top5
            .iter()
            .map(|r| if r.cost.is_finite() && r.cost > 0.0 { r.cost } else { 0.0 })
            .collect();
        let total: f64 = costs.iter().sum();
        if total <= 0.0 {
            return Self::render_placeholder(&root, width, height);
        }

        let center = ((width / 2) as f64, (height / 2) as f64);
        let radius = (width.min(height) as f64 / 2.0 - 90.0).max(10.0);
        let mut angle = -std::f64::consts::FRAC_PI_2;

        for (i, (record, &cost)) in top5.iter().zip(&costs).enumerate() {
            if cost <= 0.0 {
                continue;
            }
            let sweep = cost / total * std::f64::consts::TAU;
            let color = PIE_PALETTE[i % PIE_PALETTE.len()];

            // Triangle-fan polygon for the slice.
            let steps = ((sweep / 0.02).ceil() as usize).max(2);
            let mut vertices: Vec<(i32, i32)> = vec![(center.0 as i32, center.1 as i32)];
            for step in 0..=steps {
                let a = angle + sweep * step as f64 / steps as f64;
                vertices.push((
                    (center.0 + a.cos() * radius) as i32,
                    (center.1 + a.sin() * radius) as i32,
                ));
            }
            root.draw(&Polygon::new(vertices, color.filled()))
                .map_err(draw_err)?;

            let mid = angle + sweep / 2.0;
            let label_radius = radius + 30.0;
            root.draw(&Text::new(
                format!("{} ({:.2})", record.registration, cost),
                (
                    (center.0 + mid.cos() * label_radius) as i32 - 30,
                    (center.1 + mid.sin() * label_radius) as i32,
                ),
                ("sans-serif", 16),
            ))
            .map_err(draw_err)?;

            angle += sweep;
        }

        root.present().map_err(draw_err)
    }

    fn render_placeholder<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        root.draw(&Text::new(
            "No data",
            (width as i32 / 2 - 30, height as i32 / 2),
            ("sans-serif", 20),
        ))
        .map_err(draw_err)?;
        root.present().map_err(draw_err)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}
