use serde::{Deserialize, Serialize};
use std::fmt;
use super::attributes::default_vhost;
use super::{Arguments, EntityKind, ExchangeId, QueueId, RoutingKey};

/// Namespace a binding destination lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    Queue,
    Exchange,
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationType::Queue => f.write_str("queue"),
            DestinationType::Exchange => f.write_str("exchange"),
        }
    }
}

impl From<DestinationType> for EntityKind {
    fn from(value: DestinationType) -> Self {
        match value {
            DestinationType::Queue => EntityKind::Queue,
            DestinationType::Exchange => EntityKind::Exchange,
        }
    }
}

/// Binding source as given by a caller: a name still to be looked up, or a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    Name(String),
    Exchange(ExchangeId),
}

impl From<&str> for SourceRef {
    fn from(name: &str) -> Self {
        SourceRef::Name(name.to_string())
    }
}

impl From<String> for SourceRef {
    fn from(name: String) -> Self {
        SourceRef::Name(name)
    }
}

impl From<ExchangeId> for SourceRef {
    fn from(id: ExchangeId) -> Self {
        SourceRef::Exchange(id)
    }
}

/// Binding destination as given by a caller. A bare name needs a type hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationRef {
    Name(String),
    Queue(QueueId),
    Exchange(ExchangeId),
}

impl DestinationRef {
    /// Destination type implied by a handle; names carry none.
    pub fn implied_type(&self) -> Option<DestinationType> {
        match self {
            DestinationRef::Name(_) => None,
            DestinationRef::Queue(_) => Some(DestinationType::Queue),
            DestinationRef::Exchange(_) => Some(DestinationType::Exchange),
        }
    }
}

impl fmt::Display for DestinationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationRef::Name(name) => f.write_str(name),
            DestinationRef::Queue(id) => write!(f, "queue #{}", id.index()),
            DestinationRef::Exchange(id) => write!(f, "exchange #{}", id.index()),
        }
    }
}

impl From<&str> for DestinationRef {
    fn from(name: &str) -> Self {
        DestinationRef::Name(name.to_string())
    }
}

impl From<String> for DestinationRef {
    fn from(name: String) -> Self {
        DestinationRef::Name(name)
    }
}

impl From<QueueId> for DestinationRef {
    fn from(id: QueueId) -> Self {
        DestinationRef::Queue(id)
    }
}

impl From<ExchangeId> for DestinationRef {
    fn from(id: ExchangeId) -> Self {
        DestinationRef::Exchange(id)
    }
}

/// Resolved destination of a registered binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingTarget {
    Queue(QueueId),
    Exchange(ExchangeId),
}

impl BindingTarget {
    pub fn destination_type(&self) -> DestinationType {
        match self {
            BindingTarget::Queue(_) => DestinationType::Queue,
            BindingTarget::Exchange(_) => DestinationType::Exchange,
        }
    }
}

/// Optional binding parameters. A bare [`DestinationType`] converts into a hint-only value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingOptions {
    pub destination_type: Option<DestinationType>,
    pub routing_key: Option<RoutingKey>,
    pub arguments: Option<Arguments>,
    pub vhost: Option<String>,
}

impl BindingOptions {
    pub fn with_destination_type(mut self, destination_type: DestinationType) -> Self {
        self.destination_type = Some(destination_type);
        self
    }

    pub fn with_routing_key(mut self, routing_key: impl Into<RoutingKey>) -> Self {
        self.routing_key = Some(routing_key.into());
        self
    }

    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = Some(arguments);
        self
    }

    pub fn with_vhost(mut self, vhost: impl Into<String>) -> Self {
        self.vhost = Some(vhost.into());
        self
    }
}

impl From<DestinationType> for BindingOptions {
    fn from(destination_type: DestinationType) -> Self {
        BindingOptions::default().with_destination_type(destination_type)
    }
}

/// Flat form of a binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingDefinition {
    #[serde(default = "default_vhost")]
    pub vhost: String,
    pub source: String,
    pub destination: String,
    pub destination_type: DestinationType,
    #[serde(default)]
    pub routing_key: RoutingKey,
    #[serde(default)]
    pub arguments: Arguments,
}

/// Directed edge from an exchange to a queue or exchange.
///
/// Only [`Cluster::add_binding`](super::Cluster::add_binding) creates these, so both
/// endpoints always refer to entities of the owning cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub vhost: String,
    pub source: String,
    pub destination: String,
    pub destination_type: DestinationType,
    pub routing_key: RoutingKey,
    pub arguments: Arguments,
    source_id: ExchangeId,
    target: BindingTarget,
}

impl Binding {
    pub(crate) fn new(
        vhost: String,
        source: (String, ExchangeId),
        destination: (String, BindingTarget),
        routing_key: RoutingKey,
        arguments: Arguments,
    ) -> Self {
        Self {
            vhost,
            source: source.0,
            destination: destination.0,
            destination_type: destination.1.destination_type(),
            routing_key,
            arguments,
            source_id: source.1,
            target: destination.1,
        }
    }

    pub fn source_id(&self) -> ExchangeId {
        self.source_id
    }

    pub fn target(&self) -> BindingTarget {
        self.target
    }

    /// Whether this binding already connects `source` to `destination` of that type.
    pub fn same_edge(&self, source: &str, destination: &str, destination_type: DestinationType) -> bool {
        self.source == source
            && self.destination == destination
            && self.destination_type == destination_type
    }

    pub fn to_definition(&self) -> BindingDefinition {
        BindingDefinition {
            vhost: self.vhost.clone(),
            source: self.source.clone(),
            destination: self.destination.clone(),
            destination_type: self.destination_type,
            routing_key: self.routing_key.clone(),
            arguments: self.arguments.clone(),
        }
    }
}
