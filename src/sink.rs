//! # Sink
//!
//! Sink contract consumed by the flush worker, plus local adapters
//!
//! The sink owns serialization and its own network timeouts; the logger
//! hands it whole batches and never holds producer state across the call.
//! A Kinesis `PutRecords` adapter lives in the host application, which is
//! where credentials and region wiring belong.

use crate::{error::Error, event::MetricEvent};
use std::io::Write;
use tracing::info;

/// Durable stream output trait
///
/// Implementations must be safe to drive from the background flush worker.
#[trait_variant::make(Sink: Send)]
pub trait LocalSink {
    /// Deliver one batch of events to the stream
    ///
    /// # Errors
    /// Returns a delivery error; the caller decides whether to retry
    async fn put_records(
        &mut self,
        stream_name: &str,
        events: &[MetricEvent],
    ) -> Result<(), Error>;
}

/// Sink that writes one JSON object per event per line
///
/// Matches the framing expected by CloudWatch-Logs style collectors and is
/// handy for local runs against stdout or a file.
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> Sink for JsonLinesSink<W> {
    async fn put_records(
        &mut self,
        stream_name: &str,
        events: &[MetricEvent],
    ) -> Result<(), Error> {
        for event in events {
            serde_json::to_writer(&mut self.writer, event)
                .map_err(|e| Error::sink_delivery(stream_name, e.to_string()))?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Sink that logs batch summaries via tracing, for wiring checks
pub struct LogSink;

impl Sink for LogSink {
    async fn put_records(
        &mut self,
        stream_name: &str,
        events: &[MetricEvent],
    ) -> Result<(), Error> {
        info!(
            stream = %stream_name,
            events = events.len(),
            "batch received"
        );
        Ok(())
    }
}
