//! Record counters.
//!
//! # Metrics
//! - `levelog_records_total` (counter): records written, by level
//! - `levelog_records_suppressed_total` (counter): records below a logger threshold, by level
//! - `levelog_fallbacks_total` (counter): lookups of unregistered logger names
//! - `levelog_write_errors_total` (counter): sink write failures
//!
//! # Design Decisions
//! - Goes through the `metrics` facade only; installing an exporter is up to the host process
//! - Without an installed recorder every call is a no-op
//! - Labels only carry level names; logger names stay in tracing events

use crate::level::Level;

/// Label for a level: its display name, or the raw value when it has none.
fn level_label(level: Level) -> String {
    let name = level.name();
    if name.is_empty() {
        level.as_i8().to_string()
    } else {
        name
    }
}

pub fn record_emitted(level: Level) {
    metrics::counter!("levelog_records_total", "level" => level_label(level)).increment(1);
}

pub fn record_suppressed(level: Level) {
    metrics::counter!("levelog_records_suppressed_total", "level" => level_label(level))
        .increment(1);
}

pub fn record_fallback() {
    metrics::counter!("levelog_fallbacks_total").increment(1);
}

pub fn record_write_error() {
    metrics::counter!("levelog_write_errors_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};

    use crate::logger::NopLogger;
    use crate::registry::Registry;

    /// Remembers every counter key registered while installed.
    #[derive(Default)]
    struct KeyCapture {
        counters: Mutex<Vec<Key>>,
    }

    impl Recorder for KeyCapture {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.counters.lock().unwrap().push(key.clone());
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    #[test]
    fn test_fallback_counter_carries_no_logger_name() {
        let capture = KeyCapture::default();
        metrics::with_local_recorder(&capture, || {
            let registry = Registry::with_default(Arc::new(NopLogger));
            registry.resolve("tenant-8812");
            registry.resolve("tenant-8813");
        });

        let counters = capture.counters.lock().unwrap();
        let fallbacks: Vec<&Key> = counters
            .iter()
            .filter(|key| key.name() == "levelog_fallbacks_total")
            .collect();
        assert_eq!(fallbacks.len(), 2);
        assert!(fallbacks.iter().all(|key| key.labels().count() == 0));
    }

    #[test]
    fn test_record_counter_labelled_by_level_name() {
        let capture = KeyCapture::default();
        metrics::with_local_recorder(&capture, || record_emitted(Level::ERROR));

        let counters = capture.counters.lock().unwrap();
        let labels: Vec<(String, String)> = counters[0]
            .labels()
            .map(|label| (label.key().to_string(), label.value().to_string()))
            .collect();
        assert_eq!(counters[0].name(), "levelog_records_total");
        assert_eq!(labels, vec![("level".to_string(), "error".to_string())]);
    }

    #[test]
    fn test_level_label_falls_back_to_raw_value() {
        assert_eq!(level_label(Level::ERROR), "error");
        assert_eq!(level_label(Level::new(-100)), "-100");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_emitted(Level::INFO);
        record_suppressed(Level::DEBUG);
        record_fallback();
        record_write_error();
    }
}
