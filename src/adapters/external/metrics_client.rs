//! Metrics service client. Never fails the caller; problems are logged.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::metrics::MetricEvent;
use crate::ports::MetricsSink;

#[derive(Debug, Serialize, PartialEq)]
struct MetricRequest {
    metric_type: &'static str,
    sub_type: String,
}

impl From<&MetricEvent> for MetricRequest {
    fn from(event: &MetricEvent) -> Self {
        Self {
            metric_type: event.metric_type(),
            sub_type: event.sub_type(),
        }
    }
}

pub struct HttpMetricsSink {
    metrics_url: String,
    http_client: reqwest::Client,
}

impl HttpMetricsSink {
    pub fn new(base_url: &str, api_version: &str) -> Self {
        Self {
            metrics_url: format!("{}/{}/metrics", base_url.trim_end_matches('/'), api_version),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MetricsSink for HttpMetricsSink {
    async fn emit(&self, event: MetricEvent) {
        let request = MetricRequest::from(&event);

        match self
            .http_client
            .post(&self.metrics_url)
            .json(&request)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(metric_type = request.metric_type, "Metric emitted");
            }
            Ok(response) => {
                tracing::warn!(
                    metric_type = request.metric_type,
                    status = response.status().as_u16(),
                    "Metrics service rejected metric"
                );
            }
            Err(e) => {
                tracing::warn!(metric_type = request.metric_type, error = %e, "Unable to send metric");
            }
        }
    }
}
