use serde::{Deserialize, Serialize};
use std::io::Read;
use crate::models::{BindingDefinition, ExchangeDefinition, QueueDefinition};
use crate::TopologyError;

/// Flat definition set, the shape broker management APIs import and export.
///
/// Only queues, exchanges and bindings are modelled; other sections of a full
/// export (users, vhosts, policies, ...) are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definitions {
    #[serde(default)]
    pub queues: Vec<QueueDefinition>,
    #[serde(default)]
    pub exchanges: Vec<ExchangeDefinition>,
    #[serde(default)]
    pub bindings: Vec<BindingDefinition>,
}

impl Definitions {
    pub fn from_json_str(json: &str) -> Result<Self, TopologyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TopologyError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, TopologyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, TopologyError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty() && self.exchanges.is_empty() && self.bindings.is_empty()
    }
}
