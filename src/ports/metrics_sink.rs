//! Business metrics port.

use async_trait::async_trait;

use crate::domain::metrics::MetricEvent;

/// Fire-and-forget metrics emission.
///
/// Implementations swallow and log their own failures; `emit` never fails
/// the calling operation.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn emit(&self, event: MetricEvent);
}
