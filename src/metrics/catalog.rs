//! Catalog Phase Metrics
//!
//! Expansion, indexing and assembly of catalog entries.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct CatalogMetrics;

impl CatalogMetrics {
    pub fn record_run_success(entries: usize, attribute_sheets: usize, duration_secs: f64) {
        ::metrics::counter!(phase_metric!(counter, "catalog", "runs")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "catalog", "entries_written"))
            .increment(entries as u64);
        ::metrics::histogram!(phase_metric!(histogram, "catalog", "entries_per_run"))
            .record(entries as f64);
        ::metrics::histogram!(phase_metric!(histogram, "catalog", "attribute_sheets"))
            .record(attribute_sheets as f64);
        ::metrics::histogram!(phase_metric!(histogram, "catalog", "duration_seconds"))
            .record(duration_secs);
    }

    pub fn record_run_error(error_kind: &'static str) {
        ::metrics::counter!(phase_metric!(counter, "catalog", "errors"), "kind" => error_kind)
            .increment(1);
    }
}

impl PhaseMetrics for CatalogMetrics {
    fn register_metrics() {
        use metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "catalog", "runs"));
        let _ = counter!(phase_metric!(counter, "catalog", "entries_written"));
        let _ = counter!(phase_metric!(counter, "catalog", "errors"));
        let _ = histogram!(phase_metric!(histogram, "catalog", "entries_per_run"));
        let _ = histogram!(phase_metric!(histogram, "catalog", "attribute_sheets"));
        let _ = histogram!(phase_metric!(histogram, "catalog", "duration_seconds"));
    }

    fn phase_name() -> &'static str {
        "catalog"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "catalog", "runs"),
                metric_type: MetricType::Counter,
                help: "Total number of successful conversions",
            },
            MetricDoc {
                name: phase_metric!(counter, "catalog", "entries_written"),
                metric_type: MetricType::Counter,
                help: "Total number of catalog entries written",
            },
            MetricDoc {
                name: phase_metric!(counter, "catalog", "errors"),
                metric_type: MetricType::Counter,
                help: "Failed conversions, labelled by error kind",
            },
            MetricDoc {
                name: phase_metric!(histogram, "catalog", "entries_per_run"),
                metric_type: MetricType::Histogram,
                help: "Catalog entries produced per conversion",
            },
            MetricDoc {
                name: phase_metric!(histogram, "catalog", "attribute_sheets"),
                metric_type: MetricType::Histogram,
                help: "Attribute sheets indexed per conversion",
            },
            MetricDoc {
                name: phase_metric!(histogram, "catalog", "duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "End-to-end conversion time in seconds",
            },
        ]
    }
}
