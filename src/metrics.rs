/// Prometheus metrics for demo runs
///
/// Counters and histograms are registered once in a process-wide registry
/// and exposed as text on `GET /metrics`.
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use prometheus_client::encoding::{EncodeLabelSet, text::encode};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Global metrics registry instance
pub static METRICS: Lazy<Arc<MetricsCollector>> = Lazy::new(|| Arc::new(MetricsCollector::new()));

/// Labels for demo run counters
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RunLabels {
    /// Demo identifier (e.g. "basicRecordTest")
    pub demo: String,
    /// "passed" or "failed"
    pub outcome: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct DemoLabels {
    pub demo: String,
}

/// Labels for validator error counters
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ErrorLabels {
    /// Category from `ErrorCode::category`
    pub category: String,
}

/// Central metrics collector with Prometheus registry
pub struct MetricsCollector {
    registry: RwLock<Registry>,

    /// Demo runs by demo and outcome
    pub demo_runs_total: Family<RunLabels, Counter>,

    /// Demo run duration in seconds by demo
    pub demo_run_duration_seconds: Family<DemoLabels, Histogram>,

    /// Validator errors raised inside demo procedures, by category
    pub validation_errors_total: Family<ErrorLabels, Counter>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let demo_runs_total = Family::<RunLabels, Counter>::default();
        // counters get the `_total` suffix from the encoder
        registry.register(
            "demo_runs",
            "Total number of demo runs",
            demo_runs_total.clone(),
        );

        let demo_run_duration_seconds =
            Family::<DemoLabels, Histogram>::new_with_constructor(|| {
                // Buckets: 10us up to roughly 0.4s
                Histogram::new(exponential_buckets(0.00001, 3.0, 10))
            });
        registry.register(
            "demo_run_duration_seconds",
            "Demo run latency histogram in seconds",
            demo_run_duration_seconds.clone(),
        );

        let validation_errors_total = Family::<ErrorLabels, Counter>::default();
        registry.register(
            "validation_errors",
            "Total number of validator errors by category",
            validation_errors_total.clone(),
        );

        Self {
            registry: RwLock::new(registry),
            demo_runs_total,
            demo_run_duration_seconds,
            validation_errors_total,
        }
    }

    /// Encode metrics in Prometheus text format
    pub fn encode(&self) -> Result<String, fmt::Error> {
        let mut buffer = String::new();
        let registry = self.registry.read();
        encode(&mut buffer, &registry)?;
        Ok(buffer)
    }

    pub fn record_demo_run(&self, demo: &str, outcome: &str, duration: Duration) {
        self.demo_runs_total
            .get_or_create(&RunLabels {
                demo: demo.to_string(),
                outcome: outcome.to_string(),
            })
            .inc();

        self.demo_run_duration_seconds
            .get_or_create(&DemoLabels {
                demo: demo.to_string(),
            })
            .observe(duration.as_secs_f64());
    }

    pub fn record_validation_error(&self, category: &str) {
        self.validation_errors_total
            .get_or_create(&ErrorLabels {
                category: category.to_string(),
            })
            .inc();
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families_are_registered() {
        let collector = MetricsCollector::new();
        collector.record_demo_run("basicRecordTest", "passed", Duration::from_millis(1));
        collector.record_validation_error("definition_error");

        let output = collector.encode().unwrap();
        assert!(output.contains("demo_runs_total"));
        assert!(output.contains("demo_run_duration_seconds"));
        assert!(output.contains("validation_errors_total"));
    }

    #[test]
    fn test_record_demo_run_labels() {
        let collector = MetricsCollector::new();
        collector.record_demo_run("nestedRecordsTest", "failed", Duration::from_micros(40));
        collector.record_demo_run("nestedRecordsTest", "failed", Duration::from_micros(60));

        let output = collector.encode().unwrap();
        assert!(output.contains(r#"demo="nestedRecordsTest""#));
        assert!(output.contains(r#"outcome="failed""#));
        assert!(output.contains("demo_run_duration_seconds_count{demo=\"nestedRecordsTest\"} 2"));
    }

    #[test]
    fn test_validation_error_counter() {
        let collector = MetricsCollector::new();
        collector.record_validation_error("usage_error");
        collector.record_validation_error("usage_error");

        let output = collector.encode().unwrap();
        assert!(output.contains(r#"validation_errors_total{category="usage_error"} 2"#));
    }

    #[test]
    fn test_concurrent_metrics() {
        use std::thread;

        let collector = Arc::new(MetricsCollector::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let collector = collector.clone();
            handles.push(thread::spawn(move || {
                let demo = format!("demo_{}", i % 3);
                collector.record_demo_run(&demo, "passed", Duration::from_micros(i));
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let output = collector.encode().unwrap();
        assert!(output.contains("demo_0"));
        assert!(output.contains("demo_1"));
        assert!(output.contains("demo_2"));
    }
}
