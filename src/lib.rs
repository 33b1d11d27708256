//! Batched delivery of tenant-aware metric events to Kinesis-style stream
//! sinks
//!
//! Producers build immutable [MetricEvent]s and hand them to a
//! [MetricEventLogger], which accumulates them into bounded batches and
//! flushes to a [Sink] when the buffer fills or a flush interval elapses,
//! whichever comes first. Submission never blocks on sink IO and never
//! surfaces errors to the caller; delivery is best effort.
//!
//! # Example
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use metrics_kinesis_batched::{
//!     EventType, JsonLinesSink, MetricBuilder, MetricEventBuilder, MetricEventLogger,
//!     TenantBuilder,
//! };
//!
//! let logger = MetricEventLogger::batched(
//!     "Metrics",
//!     "us-east-1",
//!     25,
//!     60,
//!     JsonLinesSink::new(std::io::stdout()),
//! )
//! .unwrap();
//!
//! let event = MetricEventBuilder::new()
//!     .event_type(EventType::Application)
//!     .workload("AuthApp")
//!     .context("Login")
//!     .metric(
//!         MetricBuilder::new()
//!             .name("ExecutionTime")
//!             .unit("msec")
//!             .value(1000.0)
//!             .build(),
//!     )
//!     .tenant(TenantBuilder::new().id("123").name("ABC").tier("Free").build())
//!     .add_metadata("user", "111")
//!     .build();
//!
//! logger.log(event);
//! logger.close().await;
//! # }
//! ```

pub use {
    builder::Builder,
    error::Error,
    event::{
        EventType, Metric, MetricBuilder, MetricEvent, MetricEventBuilder, Tenant, TenantBuilder,
    },
    logger::MetricEventLogger,
    sink::{JsonLinesSink, LogSink, Sink},
};

mod builder;
mod error;
mod event;
mod logger;
mod sink;
