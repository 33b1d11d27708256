//! # Logger
//!
//! Batching dispatch core: accepts events from any number of producer
//! tasks/threads and flushes them to a [Sink] on a size trigger, a time
//! trigger or close, whichever comes first.
//!
//! Submissions flow through a bounded channel into a single flush worker
//! that owns the in-flight batch and the sink. The channel totally orders
//! submissions and the worker is the only flusher, so every accepted event
//! lands in exactly one batch and batches are delivered in order. Producers
//! never wait on sink IO.

use std::sync::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Duration, Instant};
use tracing::{debug, error, warn};

use crate::builder::Builder;
use crate::error::Error;
use crate::event::MetricEvent;
use crate::sink::Sink;

/// Configuration via Builder
#[derive(Debug, Clone)]
pub struct Config {
    pub stream_name: String,
    /// Opaque locality token, carried for the sink adapter
    pub region: String,
    /// Events per batch; 1 means immediate delivery with no timer
    pub buffer_size: usize,
    pub flush_interval: Duration,
    /// Bound of the submission channel
    pub queue_capacity: usize,
    /// Delivery attempts per batch before it is dropped
    pub max_delivery_attempts: u32,
}

enum Cmd {
    Record(MetricEvent),
    Flush,
    Close,
}

/// Metric event logger with batched delivery to a stream sink
///
/// Use [Builder](crate::Builder) or the [immediate](Self::immediate) /
/// [batched](Self::batched) entry points to construct; both must be called
/// within a tokio runtime.
///
/// # Example
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use metrics_kinesis_batched::{
///     EventType, JsonLinesSink, MetricBuilder, MetricEventBuilder, MetricEventLogger,
/// };
///
/// let logger = MetricEventLogger::batched(
///     "Metrics",
///     "us-east-1",
///     25,
///     60,
///     JsonLinesSink::new(std::io::stdout()),
/// )
/// .unwrap();
///
/// let event = MetricEventBuilder::new()
///     .event_type(EventType::Application)
///     .workload("AuthApp")
///     .metric(MetricBuilder::new().name("ExecutionTime").unit("msec").value(1000.0).build())
///     .build();
///
/// logger.log(event);
/// logger.close().await;
/// # }
/// ```
pub struct MetricEventLogger {
    tx: mpsc::Sender<Cmd>,
    worker: Mutex<Option<JoinHandle<()>>>,
    stream_name: String,
}

impl MetricEventLogger {
    /// Spawns the flush worker; callers go through [Builder::init]
    pub(crate) fn start<S: Sink + 'static>(config: Config, sink: S) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let stream_name = config.stream_name.clone();
        let worker = tokio::spawn(flush_worker(rx, sink, config));
        Self {
            tx,
            worker: Mutex::new(Some(worker)),
            stream_name,
        }
    }

    /// Logger that delivers every event right away as a single-event batch
    pub fn immediate<S: Sink + 'static>(
        stream_name: impl Into<String>,
        region: impl Into<String>,
        sink: S,
    ) -> Result<Self, Error> {
        Builder::new()
            .stream_name(stream_name)
            .region(region)
            .init(sink)
    }

    /// Logger that accumulates up to `buffer_size` events, flushing when the
    /// buffer fills or `flush_interval_secs` elapses
    pub fn batched<S: Sink + 'static>(
        stream_name: impl Into<String>,
        region: impl Into<String>,
        buffer_size: usize,
        flush_interval_secs: u64,
        sink: S,
    ) -> Result<Self, Error> {
        Builder::new()
            .stream_name(stream_name)
            .region(region)
            .buffer_size(buffer_size)
            .flush_interval_secs(flush_interval_secs)
            .init(sink)
    }

    /// Submit one event for delivery
    ///
    /// Never blocks on sink IO and never surfaces an error: an absent event
    /// (`None`, e.g. straight from a failed `MetricEventBuilder::build`) is
    /// discarded with a debug diagnostic, a full queue drops the event with
    /// a warning, and a closed logger discards it silently.
    pub fn log(&self, event: impl Into<Option<MetricEvent>>) {
        let Some(event) = event.into() else {
            debug!("no metric event to log");
            return;
        };
        match self.tx.try_send(Cmd::Record(event)) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(stream = %self.stream_name, "metric queue full, event dropped");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!(stream = %self.stream_name, "logger closed, event discarded");
            }
        }
    }

    /// Request an out-of-band flush of whatever is buffered
    pub fn flush(&self) {
        if self.tx.try_send(Cmd::Flush).is_err() {
            debug!(stream = %self.stream_name, "flush skipped, queue full or logger closed");
        }
    }

    /// Flush the residual batch and stop the worker
    ///
    /// Idempotent; events logged after close are discarded.
    pub async fn close(&self) {
        let handle = self.worker.lock().unwrap().take();
        let Some(handle) = handle else {
            debug!(stream = %self.stream_name, "logger already closed");
            return;
        };
        // Queued records drain ahead of the close command
        let _ = self.tx.send(Cmd::Close).await;
        if let Err(e) = handle.await {
            error!(stream = %self.stream_name, error = ?e, "flush worker panicked");
        }
    }
}

async fn flush_worker<S: Sink>(mut rx: mpsc::Receiver<Cmd>, mut sink: S, config: Config) {
    let mut batch: Vec<MetricEvent> = Vec::with_capacity(config.buffer_size);
    let batching = config.buffer_size > 1;
    let mut deadline = Instant::now() + config.flush_interval;

    debug!(
        stream = %config.stream_name,
        region = %config.region,
        buffer_size = config.buffer_size,
        "flush worker started"
    );

    loop {
        let cmd = if batching {
            match timeout_at(deadline, rx.recv()).await {
                Ok(cmd) => cmd,
                Err(_) => {
                    // Time trigger
                    deliver(&mut sink, &config, &mut batch).await;
                    deadline = Instant::now() + config.flush_interval;
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        match cmd {
            Some(Cmd::Record(event)) => {
                batch.push(event);
                if batch.len() >= config.buffer_size {
                    deliver(&mut sink, &config, &mut batch).await;
                    deadline = Instant::now() + config.flush_interval;
                }
            }
            Some(Cmd::Flush) => {
                deliver(&mut sink, &config, &mut batch).await;
                deadline = Instant::now() + config.flush_interval;
            }
            Some(Cmd::Close) | None => {
                deliver(&mut sink, &config, &mut batch).await;
                break;
            }
        }
    }

    debug!(stream = %config.stream_name, "flush worker stopped");
}

/// Hand the buffered batch to the sink, dropping it after the configured
/// attempts; an empty batch is a no-op
async fn deliver<S: Sink>(sink: &mut S, config: &Config, batch: &mut Vec<MetricEvent>) {
    if batch.is_empty() {
        return;
    }
    // drain keeps the batch allocation for the next cycle
    let events: Vec<MetricEvent> = batch.drain(..).collect();

    let mut attempt = 1;
    loop {
        match sink.put_records(&config.stream_name, &events).await {
            Ok(()) => {
                debug!(
                    stream = %config.stream_name,
                    events = events.len(),
                    "batch delivered"
                );
                return;
            }
            Err(e) if attempt < config.max_delivery_attempts => {
                warn!(
                    stream = %config.stream_name,
                    error = %e,
                    attempt,
                    "batch delivery failed, retrying"
                );
                attempt += 1;
            }
            Err(e) => {
                error!(
                    stream = %config.stream_name,
                    error = %e,
                    events = events.len(),
                    "batch dropped after delivery failure"
                );
                return;
            }
        }
    }
}
