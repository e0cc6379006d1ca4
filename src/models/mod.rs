// Handles into a cluster's insertion-ordered collections. Nothing is ever
// removed, so a handle stays valid for the lifetime of its cluster. Each
// handle carries the stamp of the cluster that issued it and resolves
// nowhere else.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueueId {
    pub(crate) cluster: u64,
    pub(crate) index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExchangeId {
    pub(crate) cluster: u64,
    pub(crate) index: usize,
}

impl QueueId {
    pub(crate) fn new(cluster: u64, index: usize) -> Self {
        Self { cluster, index }
    }

    pub fn index(self) -> usize {
        self.index
    }
}

impl ExchangeId {
    pub(crate) fn new(cluster: u64, index: usize) -> Self {
        Self { cluster, index }
    }

    pub fn index(self) -> usize {
        self.index
    }
}

// Module declarations
mod arguments;
mod attributes;
mod queue;
mod exchange;
mod binding;
mod cluster;

// Re-exports
pub use arguments::{ArgumentValue, Arguments, RoutingKey};
pub use attributes::{EntityAttributes, EntityKind, DEFAULT_VHOST};
pub use queue::{Queue, QueueDefinition, QueueOptions, QueueSpec};
pub use exchange::{Exchange, ExchangeDefinition, ExchangeOptions, ExchangeSpec, ExchangeType};
pub use binding::{
    Binding, BindingDefinition, BindingOptions, BindingTarget, DestinationRef, DestinationType,
    SourceRef,
};
pub use cluster::{Cluster, EntityRef};
