//! Workbook Phase Metrics
//!
//! Loading of spreadsheet files and the sheets read from them.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct WorkbookMetrics;

impl WorkbookMetrics {
    pub fn record_loaded(sheets: usize, rows: usize, duration_secs: f64) {
        ::metrics::counter!(phase_metric!(counter, "workbook", "loads")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "workbook", "sheets_read"))
            .increment(sheets as u64);
        ::metrics::histogram!(phase_metric!(histogram, "workbook", "rows")).record(rows as f64);
        ::metrics::histogram!(phase_metric!(histogram, "workbook", "load_duration_seconds"))
            .record(duration_secs);
    }

    pub fn record_missing_sheet() {
        ::metrics::counter!(phase_metric!(counter, "workbook", "missing_sheets")).increment(1);
    }
}

impl PhaseMetrics for WorkbookMetrics {
    fn register_metrics() {
        use metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "workbook", "loads"));
        let _ = counter!(phase_metric!(counter, "workbook", "sheets_read"));
        let _ = counter!(phase_metric!(counter, "workbook", "missing_sheets"));
        let _ = histogram!(phase_metric!(histogram, "workbook", "rows"));
        let _ = histogram!(phase_metric!(histogram, "workbook", "load_duration_seconds"));
    }

    fn phase_name() -> &'static str {
        "workbook"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "workbook", "loads"),
                metric_type: MetricType::Counter,
                help: "Total number of workbooks loaded",
            },
            MetricDoc {
                name: phase_metric!(counter, "workbook", "sheets_read"),
                metric_type: MetricType::Counter,
                help: "Total number of sheets read from workbooks",
            },
            MetricDoc {
                name: phase_metric!(counter, "workbook", "missing_sheets"),
                metric_type: MetricType::Counter,
                help: "Workbooks rejected for lacking a required sheet",
            },
            MetricDoc {
                name: phase_metric!(histogram, "workbook", "rows"),
                metric_type: MetricType::Histogram,
                help: "Rows read per workbook across all sheets",
            },
            MetricDoc {
                name: phase_metric!(histogram, "workbook", "load_duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Time spent reading a workbook in seconds",
            },
        ]
    }
}
