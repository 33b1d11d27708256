//! # Event
//!
//! Metric event value objects and their builders
//!
//! Events are immutable once built; [MetricEventBuilder::build] refuses to
//! construct an event that is missing its required fields (type, workload,
//! metric) and returns `None` instead.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Origin of a metric event
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Application,
    System,
}

/// A single metric observation: name, unit and numeric value
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Metric {
    name: String,
    unit: String,
    value: f64,
}

impl Metric {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Builder for [Metric]
#[derive(Debug, Default)]
pub struct MetricBuilder {
    name: String,
    unit: String,
    value: f64,
}

impl MetricBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn build(self) -> Metric {
        Metric {
            name: self.name,
            unit: self.unit,
            value: self.value,
        }
    }
}

/// Tenant the event is attributed to
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    id: String,
    name: String,
    tier: String,
}

impl Tenant {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tier(&self) -> &str {
        &self.tier
    }
}

/// Builder for [Tenant]
#[derive(Debug, Default)]
pub struct TenantBuilder {
    id: String,
    name: String,
    tier: String,
}

impl TenantBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = tier.into();
        self
    }

    pub fn build(self) -> Tenant {
        Tenant {
            id: self.id,
            name: self.name,
            tier: self.tier,
        }
    }
}

/// One structured metric observation ready for transmission
///
/// Serializes to a single JSON object; optional fields are omitted when
/// absent and metadata keys are emitted in sorted order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetricEvent {
    #[serde(rename = "type")]
    event_type: EventType,
    workload: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant: Option<Tenant>,
    metric: Metric,
    #[serde(rename = "metaData", skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl MetricEvent {
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn workload(&self) -> &str {
        &self.workload
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn tenant(&self) -> Option<&Tenant> {
        self.tenant.as_ref()
    }

    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

/// Builder for [MetricEvent]
///
/// # Example
/// ```
/// use metrics_kinesis_batched::{EventType, MetricBuilder, MetricEventBuilder};
///
/// let event = MetricEventBuilder::new()
///     .event_type(EventType::Application)
///     .workload("AuthApp")
///     .context("Login")
///     .metric(
///         MetricBuilder::new()
///             .name("ExecutionTime")
///             .unit("msec")
///             .value(1000.0)
///             .build(),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(event.workload(), "AuthApp");
/// ```
#[derive(Debug, Default)]
pub struct MetricEventBuilder {
    event_type: Option<EventType>,
    workload: Option<String>,
    context: Option<String>,
    tenant: Option<Tenant>,
    metric: Option<Metric>,
    metadata: BTreeMap<String, String>,
}

impl MetricEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn workload(mut self, workload: impl Into<String>) -> Self {
        self.workload = Some(workload.into());
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn tenant(mut self, tenant: Tenant) -> Self {
        self.tenant = Some(tenant);
        self
    }

    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Replaces the metadata map
    pub fn metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Adds a single metadata entry, keeping any existing entries
    pub fn add_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Consumes the builder, returning `None` if type, workload or metric
    /// are missing
    pub fn build(self) -> Option<MetricEvent> {
        match (self.event_type, self.workload, self.metric) {
            (Some(event_type), Some(workload), Some(metric)) => Some(MetricEvent {
                event_type,
                workload,
                context: self.context,
                tenant: self.tenant,
                metric,
                metadata: self.metadata,
            }),
            _ => {
                debug!("metric event is missing required fields");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric() -> Metric {
        MetricBuilder::new()
            .name("ExecutionTime")
            .unit("msec")
            .value(1000.0)
            .build()
    }

    #[test]
    fn builds_valid_event() {
        let event = MetricEventBuilder::new()
            .event_type(EventType::Application)
            .workload("AuthApp")
            .context("Login")
            .metric(metric())
            .build()
            .unwrap();

        assert_eq!(event.event_type(), EventType::Application);
        assert_eq!(event.workload(), "AuthApp");
        assert_eq!(event.context(), Some("Login"));
        assert_eq!(event.metric().name(), "ExecutionTime");
        assert!(event.tenant().is_none());
    }

    #[test]
    fn missing_workload_yields_none() {
        let event = MetricEventBuilder::new()
            .event_type(EventType::Application)
            .metric(metric())
            .build();
        assert!(event.is_none());
    }

    #[test]
    fn missing_metric_yields_none() {
        let event = MetricEventBuilder::new()
            .event_type(EventType::System)
            .workload("AuthApp")
            .build();
        assert!(event.is_none());
    }

    #[test]
    fn missing_type_yields_none() {
        let event = MetricEventBuilder::new()
            .workload("AuthApp")
            .metric(metric())
            .build();
        assert!(event.is_none());
    }

    #[test]
    fn metadata_accumulates() {
        let event = MetricEventBuilder::new()
            .event_type(EventType::Application)
            .workload("AuthApp")
            .metric(metric())
            .add_metadata("user", "111")
            .add_metadata("resource", "s3")
            .build()
            .unwrap();
        assert_eq!(event.metadata().len(), 2);
        assert_eq!(event.metadata()["user"], "111");
    }

    #[test]
    fn event_serializes() {
        let event = MetricEventBuilder::new()
            .event_type(EventType::Application)
            .workload("AuthApp")
            .context("Login")
            .tenant(
                TenantBuilder::new()
                    .id("123")
                    .name("ABC")
                    .tier("Free")
                    .build(),
            )
            .metric(metric())
            .add_metadata("user", "111")
            .add_metadata("resource", "s3")
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"Application","workload":"AuthApp","context":"Login","tenant":{"id":"123","name":"ABC","tier":"Free"},"metric":{"name":"ExecutionTime","unit":"msec","value":1000.0},"metaData":{"resource":"s3","user":"111"}}"#
        );
    }

    #[test]
    fn minimal_event_serializes_without_optional_fields() {
        let event = MetricEventBuilder::new()
            .event_type(EventType::System)
            .workload("AuthApp")
            .metric(metric())
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"System","workload":"AuthApp","metric":{"name":"ExecutionTime","unit":"msec","value":1000.0}}"#
        );
    }
}
