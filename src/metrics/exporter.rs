use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::BoundedMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so it can be scraped by
/// Prometheus or forwarded to an OpenTelemetry collector.
///
/// # Example
///
/// ```
/// use memokit::metrics::exporter::PrometheusTextExporter;
/// use memokit::metrics::snapshot::BoundedMetricsSnapshot;
/// use memokit::metrics::traits::MetricsExporter;
///
/// let exporter = PrometheusTextExporter::new("memo", Vec::new());
/// exporter.export(&BoundedMetricsSnapshot { get_hits: 3, ..Default::default() });
///
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("memo_get_hits_total 3"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, name: &str, value: u64) {
        self.write_metric("counter", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        self.write_metric("gauge", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<BoundedMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &BoundedMetricsSnapshot) {
        self.write_counter(&self.metric_name("get_calls_total"), snapshot.get_calls);
        self.write_counter(&self.metric_name("get_hits_total"), snapshot.get_hits);
        self.write_counter(&self.metric_name("get_misses_total"), snapshot.get_misses);
        self.write_counter(&self.metric_name("admissions_total"), snapshot.admissions);
        self.write_counter(
            &self.metric_name("replacements_total"),
            snapshot.replacements,
        );
        self.write_counter(&self.metric_name("decays_total"), snapshot.decays);
        self.write_counter(
            &self.metric_name("saturated_hits_total"),
            snapshot.saturated_hits,
        );
        self.write_counter(
            &self.metric_name("producer_errors_total"),
            snapshot.producer_errors,
        );
        self.write_counter(&self.metric_name("lost_races_total"), snapshot.lost_races);
        self.write_counter(&self.metric_name("peek_calls_total"), snapshot.peek_calls);
        self.write_counter(&self.metric_name("peek_found_total"), snapshot.peek_found);
        self.write_counter(&self.metric_name("clears_total"), snapshot.clears);
        self.write_counter(&self.metric_name("resizes_total"), snapshot.resizes);
        self.write_gauge(&self.metric_name("cache_len"), snapshot.cache_len as u64);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("bsc", Vec::new());
        let snapshot = BoundedMetricsSnapshot {
            get_calls: 5,
            get_hits: 2,
            get_misses: 3,
            decays: 2,
            cache_len: 1,
            capacity: 4,
            ..Default::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE bsc_get_calls_total counter\nbsc_get_calls_total 5\n"));
        assert!(text.contains("bsc_decays_total 2"));
        assert!(text.contains("# TYPE bsc_capacity gauge\nbsc_capacity 4\n"));
        assert!(text.contains("bsc_cache_len 1"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&BoundedMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\nget_hits_total 0\n"));
    }
}
