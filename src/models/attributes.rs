use super::Arguments;
use std::fmt;

pub const DEFAULT_VHOST: &str = "/";

pub(crate) fn default_vhost() -> String {
    DEFAULT_VHOST.to_string()
}

pub(crate) fn default_durable() -> bool {
    true
}

/// Attributes shared by queues and exchanges.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityAttributes {
    pub name: String,
    pub vhost: String,
    pub durable: bool,
    pub auto_delete: bool,
    pub arguments: Arguments,
}

impl EntityAttributes {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vhost: DEFAULT_VHOST.to_string(),
            durable: true,
            auto_delete: false,
            arguments: Arguments::new(),
        }
    }

    /// Overwrite only the fields that are present.
    pub(crate) fn apply(
        &mut self,
        vhost: Option<String>,
        durable: Option<bool>,
        auto_delete: Option<bool>,
        arguments: Option<Arguments>,
    ) {
        if let Some(vhost) = vhost {
            self.vhost = vhost;
        }
        if let Some(durable) = durable {
            self.durable = durable;
        }
        if let Some(auto_delete) = auto_delete {
            self.auto_delete = auto_delete;
        }
        if let Some(arguments) = arguments {
            self.arguments = arguments;
        }
    }
}

/// Which namespace an entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Queue,
    Exchange,
}

impl EntityKind {
    pub(crate) fn article(&self) -> &'static str {
        match self {
            EntityKind::Queue => "a",
            EntityKind::Exchange => "an",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Queue => f.write_str("queue"),
            EntityKind::Exchange => f.write_str("exchange"),
        }
    }
}
