//! Metrics Calculator Module
//! The aggregation pipeline behind the summary cards and ranked charts.

use crate::data::FuelRecord;
use serde::Serialize;
use std::cmp::Ordering;

/// How many vehicles the fuel usage bar chart shows.
pub const TOP_USAGE_COUNT: usize = 10;

/// How many of those the cost distribution pie shows.
pub const COST_SLICE_COUNT: usize = 5;

/// The three scalars behind the summary cards. Stored at full precision;
/// format at the presentation boundary only.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SummaryMetrics {
    pub total_litres: f64,
    pub total_cost: f64,
    pub average_mpg: f64,
}

/// Pure aggregation over an immutable fleet snapshot. Recomputed from the
/// raw rows whenever they change; nothing here is cached.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Sum litres and cost, and average MPG over the whole fleet.
    ///
    /// An unparsable value contributes zero to its sum but the record is
    /// not dropped: the MPG average divides by the full record count, so a
    /// bad MPG cell pulls the average down rather than shrinking the
    /// denominator. With an empty fleet the average is NaN.
    pub fn compute_summary(fleet: &[FuelRecord]) -> SummaryMetrics {
        let total_litres = fleet.iter().map(|r| nan_as_zero(r.litres)).sum::<f64>();
        let total_cost = fleet.iter().map(|r| nan_as_zero(r.cost)).sum::<f64>();
        let average_mpg =
            fleet.iter().map(|r| nan_as_zero(r.mpg)).sum::<f64>() / fleet.len() as f64;

        SummaryMetrics {
            total_litres,
            total_cost,
            average_mpg,
        }
    }

    /// The fleet sorted descending by litres, truncated to ten. The sort is
    /// stable, so vehicles with equal litres keep their CSV order. Fleets
    /// with fewer than ten records just yield a shorter list.
    pub fn compute_top10(fleet: &[FuelRecord]) -> Vec<FuelRecord> {
        let mut ranked = fleet.to_vec();
        ranked.sort_by(|a, b| b.litres.partial_cmp(&a.litres).unwrap_or(Ordering::Equal));
        ranked.truncate(TOP_USAGE_COUNT);
        ranked
    }

    /// The first five of the usage ranking. Deliberately NOT re-sorted by
    /// cost: the pie shows the cost of the biggest fuel users, not the five
    /// biggest costs.
    pub fn compute_top5_for_cost(top10: &[FuelRecord]) -> Vec<FuelRecord> {
        top10[..top10.len().min(COST_SLICE_COUNT)].to_vec()
    }

    /// Two-decimal display formatting. NaN renders as "NaN".
    pub fn format_two_dp(value: f64) -> String {
        format!("{:.2}", value)
    }
}

fn nan_as_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(registration: &str, litres: f64, mpg: f64, cost: f64) -> FuelRecord {
        FuelRecord {
            registration: registration.to_string(),
            distance: 100.0,
            litres,
            mpg,
            cost,
            extra: HashMap::new(),
        }
    }

    #[test]
    fn top10_is_descending_and_capped() {
        let fleet: Vec<FuelRecord> = (0..15)
            .map(|i| record(&format!("V{i:02}"), i as f64 * 10.0, 20.0, 50.0))
            .collect();

        let top10 = MetricsCalculator::compute_top10(&fleet);
        assert_eq!(top10.len(), 10);
        assert_eq!(top10[0].registration, "V14");
        for pair in top10.windows(2) {
            assert!(pair[0].litres >= pair[1].litres);
        }
    }

    #[test]
    fn top10_on_short_fleet_keeps_all_records() {
        let fleet = vec![
            record("A", 30.0, 20.0, 50.0),
            record("B", 60.0, 20.0, 50.0),
        ];

        let top10 = MetricsCalculator::compute_top10(&fleet);
        assert_eq!(top10.len(), 2);
        assert_eq!(top10[0].registration, "B");
    }

    #[test]
    fn equal_litres_keep_csv_order() {
        let fleet = vec![
            record("FIRST", 80.0, 20.0, 50.0),
            record("SECOND", 80.0, 20.0, 50.0),
            record("THIRD", 90.0, 20.0, 50.0),
            record("FOURTH", 80.0, 20.0, 50.0),
        ];

        let top10 = MetricsCalculator::compute_top10(&fleet);
        let order: Vec<&str> = top10.iter().map(|r| r.registration.as_str()).collect();
        assert_eq!(order, ["THIRD", "FIRST", "SECOND", "FOURTH"]);
    }

    #[test]
    fn unparsable_litres_contribute_zero_to_the_total() {
        let fleet = vec![
            record("A", 50.0, 20.0, 10.0),
            record("B", f64::NAN, 20.0, 10.0),
            record("C", 25.5, 20.0, 10.0),
        ];

        let summary = MetricsCalculator::compute_summary(&fleet);
        assert!((summary.total_litres - 75.5).abs() < 1e-9);
        assert!((summary.total_cost - 30.0).abs() < 1e-9);
    }

    #[test]
    fn average_mpg_divides_by_the_full_count() {
        // [30, bad, 40] averages to 70/3, not 35: the bad record stays in
        // the denominator.
        let fleet = vec![
            record("A", 10.0, 30.0, 10.0),
            record("B", 10.0, f64::NAN, 10.0),
            record("C", 10.0, 40.0, 10.0),
        ];

        let summary = MetricsCalculator::compute_summary(&fleet);
        assert!((summary.average_mpg - 70.0 / 3.0).abs() < 1e-9);
        assert_eq!(MetricsCalculator::format_two_dp(summary.average_mpg), "23.33");
    }

    #[test]
    fn empty_fleet_has_zero_totals_and_nan_average() {
        let summary = MetricsCalculator::compute_summary(&[]);
        assert_eq!(summary.total_litres, 0.0);
        assert_eq!(summary.total_cost, 0.0);
        assert!(summary.average_mpg.is_nan());
        assert_eq!(MetricsCalculator::format_two_dp(summary.average_mpg), "NaN");
    }

    #[test]
    fn cost_slice_follows_the_usage_ranking() {
        // The sixth-by-litres vehicle has the highest cost; it still must
        // not appear in the cost slice.
        let fleet = vec![
            record("L100", 100.0, 20.0, 10.0),
            record("L90", 90.0, 20.0, 10.0),
            record("L80", 80.0, 20.0, 10.0),
            record("L70", 70.0, 20.0, 10.0),
            record("L60", 60.0, 20.0, 10.0),
            record("EXPENSIVE", 50.0, 20.0, 999.0),
        ];

        let top10 = MetricsCalculator::compute_top10(&fleet);
        let top5 = MetricsCalculator::compute_top5_for_cost(&top10);
        assert_eq!(top5.len(), 5);
        assert!(top5.iter().all(|r| r.registration != "EXPENSIVE"));
        assert_eq!(top5[0].registration, "L100");
        assert_eq!(top5[4].registration, "L60");
    }

    #[test]
    fn cost_slice_of_a_short_ranking_is_the_whole_ranking() {
        let fleet = vec![record("A", 10.0, 20.0, 5.0), record("B", 20.0, 20.0, 5.0)];
        let top10 = MetricsCalculator::compute_top10(&fleet);
        let top5 = MetricsCalculator::compute_top5_for_cost(&top10);
        assert_eq!(top5.len(), 2);
    }

    #[test]
    fn formatting_round_trips_within_half_a_cent() {
        for value in [0.0, 1234.56789, 23.333333, 0.004, 99999.995] {
            let formatted = MetricsCalculator::format_two_dp(value);
            let parsed: f64 = formatted.parse().unwrap();
            assert!(
                (parsed - value).abs() <= 0.005,
                "{value} formatted as {formatted}"
            );
        }
    }
}
