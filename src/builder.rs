//! # Builder
//!
//! Configuration and construction of [MetricEventLogger]

use crate::error::Error;
use crate::logger::{Config, MetricEventLogger};
use crate::sink::Sink;
use tokio::time::Duration;

const DEFAULT_BUFFER_SIZE: usize = 1;
const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 60;
const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Builder for [MetricEventLogger]
///
/// Misconfiguration (zero buffer size, interval or queue capacity, missing
/// stream name or region) fails [init](Self::init) rather than silently
/// degrading.
///
/// # Example
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use metrics_kinesis_batched::{Builder, JsonLinesSink};
///
/// let logger = Builder::new()
///     .stream_name("Metrics")
///     .region("us-east-1")
///     .buffer_size(25)
///     .flush_interval_secs(60)
///     .init(JsonLinesSink::new(std::io::stdout()))
///     .unwrap();
/// # logger.close().await;
/// # }
/// ```
pub struct Builder {
    stream_name: Option<String>,
    region: Option<String>,
    buffer_size: usize,
    flush_interval_secs: u64,
    queue_capacity: usize,
    max_delivery_attempts: u32,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            stream_name: None,
            region: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
            flush_interval_secs: DEFAULT_FLUSH_INTERVAL_SECS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_delivery_attempts: 1,
        }
    }

    /// Sets the target stream name
    /// * Must be set or init() will return a config validation error
    pub fn stream_name(self, stream_name: impl Into<String>) -> Self {
        Self {
            stream_name: Some(stream_name.into()),
            ..self
        }
    }

    /// Sets the region token handed to the sink adapter
    /// * Must be set or init() will return a config validation error
    pub fn region(self, region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..self
        }
    }

    /// Events per batch; 1 (the default) delivers each event right away
    /// with no flush timer
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Seconds between time-triggered flushes in batch mode, default 60
    pub fn flush_interval_secs(mut self, secs: u64) -> Self {
        self.flush_interval_secs = secs;
        self
    }

    /// Bound of the submission queue, default 1024
    /// * Events submitted while the queue is full are dropped with a warning
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Delivery attempts per batch before it is dropped, default 1
    pub fn max_delivery_attempts(mut self, attempts: u32) -> Self {
        self.max_delivery_attempts = attempts;
        self
    }

    /// Private helper for consuming the builder into logger configuration
    fn build(self) -> Result<Config, Error> {
        let stream_name = self
            .stream_name
            .ok_or_else(|| Error::config_validation("stream_name", "missing"))?;
        if stream_name.is_empty() {
            return Err(Error::config_validation("stream_name", "must not be empty"));
        }
        let region = self
            .region
            .ok_or_else(|| Error::config_validation("region", "missing"))?;
        if region.is_empty() {
            return Err(Error::config_validation("region", "must not be empty"));
        }
        if self.buffer_size == 0 {
            return Err(Error::config_validation("buffer_size", "must be at least 1"));
        }
        if self.flush_interval_secs == 0 {
            return Err(Error::config_validation(
                "flush_interval_secs",
                "must be at least 1",
            ));
        }
        if self.queue_capacity == 0 {
            return Err(Error::config_validation(
                "queue_capacity",
                "must be at least 1",
            ));
        }
        if self.max_delivery_attempts == 0 {
            return Err(Error::config_validation(
                "max_delivery_attempts",
                "must be at least 1",
            ));
        }
        Ok(Config {
            stream_name,
            region,
            buffer_size: self.buffer_size,
            flush_interval: Duration::from_secs(self.flush_interval_secs),
            queue_capacity: self.queue_capacity,
            max_delivery_attempts: self.max_delivery_attempts,
        })
    }

    /// Validate the configuration and spawn the flush worker
    ///
    /// Must be called within a tokio runtime.
    pub fn init<S: Sink + 'static>(self, sink: S) -> Result<MetricEventLogger, Error> {
        let config = self.build()?;
        Ok(MetricEventLogger::start(config, sink))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_immediate_mode() {
        let config = Builder::new()
            .stream_name("Metrics")
            .region("us-east-1")
            .build()
            .unwrap();
        assert_eq!(config.buffer_size, 1);
        assert_eq!(config.flush_interval, Duration::from_secs(60));
        assert_eq!(config.queue_capacity, 1024);
        assert_eq!(config.max_delivery_attempts, 1);
    }

    #[test]
    fn missing_stream_name_is_rejected() {
        let err = Builder::new().region("us-east-1").build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error at 'stream_name': missing"
        );
    }

    #[test]
    fn missing_region_is_rejected() {
        assert!(Builder::new().stream_name("Metrics").build().is_err());
    }

    #[test]
    fn empty_region_is_rejected() {
        let err = Builder::new()
            .stream_name("Metrics")
            .region("")
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error at 'region': must not be empty"
        );
    }

    #[test]
    fn zero_buffer_size_is_rejected() {
        let err = Builder::new()
            .stream_name("Metrics")
            .region("us-east-1")
            .buffer_size(0)
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error at 'buffer_size': must be at least 1"
        );
    }

    #[test]
    fn zero_flush_interval_is_rejected() {
        assert!(Builder::new()
            .stream_name("Metrics")
            .region("us-east-1")
            .buffer_size(5)
            .flush_interval_secs(0)
            .build()
            .is_err());
    }

    #[test]
    fn zero_queue_capacity_is_rejected() {
        assert!(Builder::new()
            .stream_name("Metrics")
            .region("us-east-1")
            .queue_capacity(0)
            .build()
            .is_err());
    }

    #[test]
    fn batch_mode_config() {
        let config = Builder::new()
            .stream_name("Metrics")
            .region("us-east-1")
            .buffer_size(25)
            .flush_interval_secs(2)
            .max_delivery_attempts(3)
            .build()
            .unwrap();
        assert_eq!(config.buffer_size, 25);
        assert_eq!(config.flush_interval, Duration::from_secs(2));
        assert_eq!(config.max_delivery_attempts, 3);
    }
}
