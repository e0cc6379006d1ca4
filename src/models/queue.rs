use serde::{Deserialize, Serialize};
use super::attributes::{default_durable, default_vhost};
use super::{Arguments, EntityAttributes, QueueId};

/// Flat, broker-API-shaped form of a queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueDefinition {
    pub name: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    #[serde(default = "default_durable")]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default)]
    pub arguments: Arguments,
}

impl QueueDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Queue::new(name).to_definition()
    }
}

/// What [`Cluster::add_queue`](super::Cluster::add_queue) accepts: a bare name or a full definition.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueSpec {
    Name(String),
    Definition(QueueDefinition),
}

impl From<&str> for QueueSpec {
    fn from(name: &str) -> Self {
        QueueSpec::Name(name.to_string())
    }
}

impl From<String> for QueueSpec {
    fn from(name: String) -> Self {
        QueueSpec::Name(name)
    }
}

impl From<QueueDefinition> for QueueSpec {
    fn from(def: QueueDefinition) -> Self {
        QueueSpec::Definition(def)
    }
}

/// Partial queue attributes. A field that is `Some` overrides the default, even when falsy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueOptions {
    pub vhost: Option<String>,
    pub durable: Option<bool>,
    pub auto_delete: Option<bool>,
    pub arguments: Option<Arguments>,
}

impl QueueOptions {
    pub fn with_vhost(mut self, vhost: impl Into<String>) -> Self {
        self.vhost = Some(vhost.into());
        self
    }

    pub fn with_durable(mut self, durable: bool) -> Self {
        self.durable = Some(durable);
        self
    }

    pub fn with_auto_delete(mut self, auto_delete: bool) -> Self {
        self.auto_delete = Some(auto_delete);
        self
    }

    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = Some(arguments);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Queue {
    pub attributes: EntityAttributes,
    id: Option<QueueId>,
}

impl Queue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            attributes: EntityAttributes::new(name),
            id: None,
        }
    }

    pub fn with_options(name: impl Into<String>, opts: QueueOptions) -> Self {
        let mut queue = Self::new(name);
        queue
            .attributes
            .apply(opts.vhost, opts.durable, opts.auto_delete, opts.arguments);
        queue
    }

    pub fn from_definition(def: QueueDefinition) -> Self {
        Self::with_options(
            def.name,
            QueueOptions {
                vhost: Some(def.vhost),
                durable: Some(def.durable),
                auto_delete: Some(def.auto_delete),
                arguments: Some(def.arguments),
            },
        )
    }

    pub fn to_definition(&self) -> QueueDefinition {
        QueueDefinition {
            name: self.attributes.name.clone(),
            vhost: self.attributes.vhost.clone(),
            durable: self.attributes.durable,
            auto_delete: self.attributes.auto_delete,
            arguments: self.attributes.arguments.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    pub fn vhost(&self) -> &str {
        &self.attributes.vhost
    }

    /// Handle assigned when the queue was registered with a cluster.
    pub fn id(&self) -> Option<QueueId> {
        self.id
    }

    pub(crate) fn register(&mut self, id: QueueId) {
        self.id = Some(id);
    }
}
