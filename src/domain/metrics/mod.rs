//! Metrics module - business events reported to the metrics service.

mod event;

pub use event::{LoginMethod, MetricEvent};
