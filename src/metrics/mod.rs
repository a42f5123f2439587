//! Phase-organized metrics for the catalog pipeline
//!
//! Each pipeline phase defines its metrics in a dedicated submodule. Metrics go
//! through the `metrics` facade, so they are recorded only when the embedding
//! application installs a recorder.

pub mod catalog;
pub mod workbook;

pub use catalog::CatalogMetrics;
pub use workbook::WorkbookMetrics;

use std::collections::HashMap;
use tracing::{debug, warn};

/// Trait for phase-specific metrics collections
pub trait PhaseMetrics {
    /// Pre-register every metric of the phase
    fn register_metrics();

    fn phase_name() -> &'static str;

    /// Documentation for all metrics in this phase
    fn metrics_documentation() -> Vec<MetricDoc>;
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Builds metric names following the convention `pn_{phase}_{name}[_total]`
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("pn_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("pn_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;

/// Register the metrics of every phase, warning on name conflicts.
///
/// Returns the number of distinct metric names.
pub fn register_all_metrics() -> usize {
    let mut all_metrics = HashMap::new();

    register_phase_metrics::<WorkbookMetrics>(&mut all_metrics);
    register_phase_metrics::<CatalogMetrics>(&mut all_metrics);

    debug!("Registered {} metrics across all phases", all_metrics.len());
    all_metrics.len()
}

fn register_phase_metrics<T: PhaseMetrics>(all_metrics: &mut HashMap<&'static str, MetricDoc>) {
    T::register_metrics();
    let phase_name = T::phase_name();

    for doc in T::metrics_documentation() {
        if all_metrics.contains_key(doc.name) {
            warn!(
                "Metric name conflict detected: '{}' redefined by phase '{}'",
                doc.name, phase_name
            );
        } else {
            all_metrics.insert(doc.name, doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_metric_naming() {
        assert_eq!(phase_metric!(counter, "catalog", "runs"), "pn_catalog_runs_total");
        assert_eq!(
            phase_metric!(histogram, "catalog", "entries"),
            "pn_catalog_entries"
        );
    }

    #[test]
    fn test_register_all_metrics_has_no_conflicts() {
        let expected = WorkbookMetrics::metrics_documentation().len()
            + CatalogMetrics::metrics_documentation().len();
        assert_eq!(register_all_metrics(), expected);
    }
}
