//! Report Export Module
//! Writes the three dashboard charts as PNGs plus a metrics JSON snapshot
//! into a chosen directory.

use crate::charts::StaticChartRenderer;
use crate::data::FuelRecord;
use crate::stats::SummaryMetrics;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::info;

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 700;

/// The JSON shape handed to anything downstream of the dashboard.
#[derive(Serialize)]
struct ReportSummary<'a> {
    fleet_size: usize,
    summary: &'a SummaryMetrics,
    top10: &'a [FuelRecord],
    top5_for_cost: &'a [FuelRecord],
}

/// Renders chart PNGs and the metrics snapshot for a report directory.
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn export(
        dir: &Path,
        fleet: &[FuelRecord],
        top10: &[FuelRecord],
        top5_for_cost: &[FuelRecord],
        summary: &SummaryMetrics,
    ) -> Result<()> {
        StaticChartRenderer::render_usage_bar(
            top10,
            &dir.join("top10_fuel_usage.png"),
            CHART_WIDTH,
            CHART_HEIGHT,
        )
        .context("rendering fuel usage chart")?;

        StaticChartRenderer::render_distance_line(
            fleet,
            &dir.join("distance_vs_fuel.png"),
            CHART_WIDTH,
            CHART_HEIGHT,
        )
        .context("rendering distance chart")?;

        StaticChartRenderer::render_cost_pie(
            top5_for_cost,
            &dir.join("cost_distribution.png"),
            CHART_WIDTH,
            CHART_HEIGHT,
        )
        .context("rendering cost distribution chart")?;

        Self::write_summary_json(dir, fleet, top10, top5_for_cost, summary)?;

        info!(dir = %dir.display(), "report exported");
        Ok(())
    }

    fn write_summary_json(
        dir: &Path,
        fleet: &[FuelRecord],
        top10: &[FuelRecord],
        top5_for_cost: &[FuelRecord],
        summary: &SummaryMetrics,
    ) -> Result<()> {
        let report = ReportSummary {
            fleet_size: fleet.len(),
            summary,
            top10,
            top5_for_cost,
        };
        let file = File::create(dir.join("summary.json")).context("creating summary.json")?;
        serde_json::to_writer_pretty(file, &report).context("writing summary.json")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MetricsCalculator;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn record(registration: &str, litres: f64, cost: f64) -> FuelRecord {
        FuelRecord {
            registration: registration.to_string(),
            distance: 250.0,
            litres,
            mpg: 18.0,
            cost,
            extra: HashMap::new(),
        }
    }

    #[test]
    fn summary_json_carries_the_presentation_contract() {
        let fleet: Vec<FuelRecord> = (0..6)
            .map(|i| record(&format!("V{i}"), 100.0 - i as f64 * 10.0, 40.0 + i as f64))
            .collect();
        let top10 = MetricsCalculator::compute_top10(&fleet);
        let top5 = MetricsCalculator::compute_top5_for_cost(&top10);
        let summary = MetricsCalculator::compute_summary(&fleet);

        let dir = tempdir().unwrap();
        ReportGenerator::write_summary_json(dir.path(), &fleet, &top10, &top5, &summary).unwrap();

        let json: serde_json::Value =
            serde_json::from_reader(File::open(dir.path().join("summary.json")).unwrap()).unwrap();
        assert_eq!(json["fleet_size"], 6);
        assert_eq!(json["top10"].as_array().unwrap().len(), 6);
        assert_eq!(json["top5_for_cost"].as_array().unwrap().len(), 5);
        assert_eq!(json["top10"][0]["Registration"], "V0");
        assert!(json["summary"]["total_litres"].as_f64().is_some());
    }

    #[test]
    fn empty_fleet_summary_serializes_nan_average_as_null() {
        let summary = MetricsCalculator::compute_summary(&[]);
        let dir = tempdir().unwrap();
        ReportGenerator::write_summary_json(dir.path(), &[], &[], &[], &summary).unwrap();

        let json: serde_json::Value =
            serde_json::from_reader(File::open(dir.path().join("summary.json")).unwrap()).unwrap();
        assert_eq!(json["fleet_size"], 0);
        assert!(json["summary"]["average_mpg"].is_null());
        assert_eq!(json["summary"]["total_litres"], 0.0);
    }
}
