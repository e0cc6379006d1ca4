use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use super::attributes::{default_durable, default_vhost};
use super::{Arguments, Binding, BindingOptions, Cluster, DestinationRef, EntityAttributes, ExchangeId};
use crate::TopologyError;

/// Routing strategy of an exchange. Unknown plugin types are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExchangeType {
    Direct,
    Topic,
    Fanout,
    Headers,
    ConsistentHash,
    Custom(String),
}

impl ExchangeType {
    pub fn as_str(&self) -> &str {
        match self {
            ExchangeType::Direct => "direct",
            ExchangeType::Topic => "topic",
            ExchangeType::Fanout => "fanout",
            ExchangeType::Headers => "headers",
            ExchangeType::ConsistentHash => "x-consistent-hash",
            ExchangeType::Custom(kind) => kind,
        }
    }
}

impl fmt::Display for ExchangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "direct" => ExchangeType::Direct,
            "topic" => ExchangeType::Topic,
            "fanout" => ExchangeType::Fanout,
            "headers" => ExchangeType::Headers,
            "x-consistent-hash" => ExchangeType::ConsistentHash,
            other => ExchangeType::Custom(other.to_string()),
        })
    }
}

impl From<String> for ExchangeType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<ExchangeType> for String {
    fn from(value: ExchangeType) -> Self {
        match value {
            ExchangeType::Custom(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

/// Flat form of an exchange: the queue definition fields plus `type` and `internal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeDefinition {
    pub name: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    #[serde(default = "default_durable")]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default)]
    pub arguments: Arguments,
    #[serde(rename = "type")]
    pub kind: ExchangeType,
    #[serde(default)]
    pub internal: bool,
}

impl ExchangeDefinition {
    pub fn new(name: impl Into<String>, kind: ExchangeType) -> Self {
        Exchange::new(name, kind).to_definition()
    }
}

/// What [`Cluster::add_exchange`] accepts: a name with its type, or a full definition.
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeSpec {
    Named(String, ExchangeType),
    Definition(ExchangeDefinition),
}

impl From<(&str, ExchangeType)> for ExchangeSpec {
    fn from((name, kind): (&str, ExchangeType)) -> Self {
        ExchangeSpec::Named(name.to_string(), kind)
    }
}

impl From<(String, ExchangeType)> for ExchangeSpec {
    fn from((name, kind): (String, ExchangeType)) -> Self {
        ExchangeSpec::Named(name, kind)
    }
}

impl From<ExchangeDefinition> for ExchangeSpec {
    fn from(def: ExchangeDefinition) -> Self {
        ExchangeSpec::Definition(def)
    }
}

/// Partial exchange attributes; `Some` always overrides the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeOptions {
    pub vhost: Option<String>,
    pub durable: Option<bool>,
    pub auto_delete: Option<bool>,
    pub arguments: Option<Arguments>,
    pub internal: Option<bool>,
}

impl ExchangeOptions {
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

    pub fn with_internal(mut self, internal: bool) -> Self {
        self.internal = Some(internal);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub attributes: EntityAttributes,
    pub kind: ExchangeType,
    pub internal: bool,
    id: Option<ExchangeId>,
}

impl Exchange {
    pub fn new(name: impl Into<String>, kind: ExchangeType) -> Self {
        Self {
            attributes: EntityAttributes::new(name),
            kind,
            internal: false,
            id: None,
        }
    }

    pub fn with_options(name: impl Into<String>, kind: ExchangeType, opts: ExchangeOptions) -> Self {
        let mut exchange = Self::new(name, kind);
        exchange
            .attributes
            .apply(opts.vhost, opts.durable, opts.auto_delete, opts.arguments);
        if let Some(internal) = opts.internal {
            exchange.internal = internal;
        }
        exchange
    }

    pub fn from_definition(def: ExchangeDefinition) -> Self {
        Self::with_options(
            def.name,
            def.kind,
            ExchangeOptions {
                vhost: Some(def.vhost),
                durable: Some(def.durable),
                auto_delete: Some(def.auto_delete),
                arguments: Some(def.arguments),
                internal: Some(def.internal),
            },
        )
    }

    pub fn to_definition(&self) -> ExchangeDefinition {
        ExchangeDefinition {
            name: self.attributes.name.clone(),
            vhost: self.attributes.vhost.clone(),
            durable: self.attributes.durable,
            auto_delete: self.attributes.auto_delete,
            arguments: self.attributes.arguments.clone(),
            kind: self.kind.clone(),
            internal: self.internal,
        }
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    pub fn vhost(&self) -> &str {
        &self.attributes.vhost
    }

    /// Handle assigned when the exchange was registered with a cluster.
    pub fn id(&self) -> Option<ExchangeId> {
        self.id
    }

    pub(crate) fn register(&mut self, id: ExchangeId) {
        self.id = Some(id);
    }

    /// Bind this exchange to a queue or another exchange of `cluster`.
    ///
    /// Fails with [`TopologyError::NoClusterReference`] unless this exchange was
    /// registered with that same cluster.
    pub fn bind_to<'c>(
        &self,
        cluster: &'c mut Cluster,
        destination: impl Into<DestinationRef>,
        options: impl Into<BindingOptions>,
    ) -> Result<&'c Binding, TopologyError> {
        let id = self
            .id
            .filter(|id| cluster.exchange(*id).map(|e| e.name()) == Some(self.name()))
            .ok_or_else(|| TopologyError::NoClusterReference {
                exchange: self.name().to_string(),
            })?;

        cluster.add_binding(id, destination, options)
    }
}
