//! Measurement of external blob calls
//!
//! Every list/copy/put an operation issues against the blob service records
//! which call ran, how long it took, and how many bytes it touched. Sinks
//! may export asynchronously; operations flush before returning to their
//! caller so nothing is lost when the request ends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use studio_store::StoreError;

/// External service a measurement refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalService {
    /// The blob storage service
    Blob,
}

/// Blob operations that are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobOperation {
    /// Listing a folder
    List,
    /// Server-side copy
    Copy,
    /// Raw write
    Put,
}

impl BlobOperation {
    /// Stable name used in exported events
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Copy => "copy",
            Self::Put => "put",
        }
    }
}

/// One measured external call
#[derive(Debug, Clone)]
pub struct Measurement {
    /// Name of the enclosing operation (e.g. `copy-files`)
    pub operation: &'static str,
    /// Service that was called
    pub service: ExternalService,
    /// Which blob call ran
    pub blob_operation: BlobOperation,
    /// When the enclosing operation started
    pub started_at: DateTime<Utc>,
    /// Wall time of this call
    pub elapsed: Duration,
    /// Bytes touched by this call
    pub size: u64,
}

/// Measurement sink
///
/// `record` sits on the hot path of every blob call and must be cheap;
/// anything expensive belongs in `flush`.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Record one measurement
    fn record(&self, measurement: Measurement);

    /// Flush buffered measurements to the exporter
    async fn flush(&self);
}

#[async_trait]
impl<T: TelemetrySink + ?Sized> TelemetrySink for Arc<T> {
    fn record(&self, measurement: Measurement) {
        (**self).record(measurement);
    }

    async fn flush(&self) {
        (**self).flush().await;
    }
}

/// Sink that emits measurements as structured tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl TelemetrySink for TracingSink {
    fn record(&self, measurement: Measurement) {
        tracing::info!(
            operation = measurement.operation,
            service = "blob",
            blob_operation = measurement.blob_operation.as_str(),
            started_at = %measurement.started_at,
            elapsed_ms = measurement.elapsed.as_millis() as u64,
            size = measurement.size,
            "external call measured"
        );
    }

    async fn flush(&self) {}
}

/// Run one blob call and record its byte count and latency.
///
/// The call reports its own size metric alongside its value: a list call
/// sums the listed blob sizes, a copy reports the copied blob's size.
pub async fn measure<S, T, F, Fut>(
    sink: &S,
    operation: &'static str,
    blob_operation: BlobOperation,
    started_at: DateTime<Utc>,
    call: F,
) -> Result<T, StoreError>
where
    S: TelemetrySink,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(T, u64), StoreError>>,
{
    let clock = Instant::now();
    let (value, size) = call().await?;
    sink.record(Measurement {
        operation,
        service: ExternalService::Blob,
        blob_operation,
        started_at,
        elapsed: clock.elapsed(),
        size,
    });
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        measurements: Mutex<Vec<Measurement>>,
    }

    #[async_trait]
    impl TelemetrySink for RecordingSink {
        fn record(&self, measurement: Measurement) {
            self.measurements.lock().push(measurement);
        }

        async fn flush(&self) {}
    }

    #[tokio::test]
    async fn successful_call_is_recorded() {
        let sink = RecordingSink::default();
        let value = measure(&sink, "copy-files", BlobOperation::List, Utc::now(), || async {
            Ok(("listed", 42))
        })
        .await
        .unwrap();

        assert_eq!(value, "listed");
        let measurements = sink.measurements.lock();
        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements[0].size, 42);
        assert_eq!(measurements[0].blob_operation, BlobOperation::List);
    }

    #[tokio::test]
    async fn failed_call_records_nothing() {
        let sink = RecordingSink::default();
        let result: Result<(), _> =
            measure(&sink, "copy-files", BlobOperation::Copy, Utc::now(), || async {
                Err(StoreError::Backend("down".into()))
            })
            .await;

        assert!(result.is_err());
        assert!(sink.measurements.lock().is_empty());
    }
}
