// Message-broker topology model
// Queues, exchanges and bindings, with import/export of broker definitions

pub mod models;
pub mod config;
pub mod definitions;

pub use models::{
    ArgumentValue, Arguments, Binding, BindingDefinition, BindingOptions, Cluster,
    DestinationType, Exchange, ExchangeDefinition, ExchangeOptions, ExchangeType, Queue,
    QueueDefinition, QueueOptions, RoutingKey,
};
pub use config::ClusterConfig;
pub use definitions::Definitions;

use models::EntityKind;

#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("There is already {} {kind} with the name {name}", .kind.article())]
    DuplicateName { kind: EntityKind, name: String },

    #[error("Unknown destination type for binding to {destination}")]
    UnresolvedDestinationType { destination: String },

    #[error("Destination type hint {hinted} does not match the {actual} given")]
    DestinationTypeMismatch {
        hinted: DestinationType,
        actual: DestinationType,
    },

    #[error("Unknown source for binding: {exchange}")]
    UnknownSource { exchange: String },

    #[error("Unknown destination for binding: {destination_type} {destination}")]
    UnknownDestination {
        destination_type: DestinationType,
        destination: String,
    },

    #[error("Binding from {from} to {destination_type} {to} already exists")]
    DuplicateBinding {
        from: String,
        to: String,
        destination_type: DestinationType,
    },

    #[error("Binding from {from} to {to} in vhost {vhost} crosses vhosts")]
    CrossVhostBinding { from: String, to: String, vhost: String },

    #[error("Cannot add binding without cluster reference: exchange {exchange} is not registered")]
    NoClusterReference { exchange: String },

    #[error("Invalid definitions: {0}")]
    Serialization(#[from] serde_json::Error),
}
