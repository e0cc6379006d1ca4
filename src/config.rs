use crate::models::DEFAULT_VHOST;

/// Settings that control how a cluster registers entities and bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Vhost for queues and exchanges added by bare name, and for bindings
    /// whose options carry no vhost
    pub default_vhost: String,

    /// Reject bindings whose source, destination and binding vhosts differ
    pub enforce_vhost_isolation: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            default_vhost: DEFAULT_VHOST.to_string(),
            enforce_vhost_isolation: false,
        }
    }
}

impl ClusterConfig {
    /// Create a config whose shorthand entities land in `vhost`
    pub fn for_vhost(vhost: impl Into<String>) -> Self {
        Self {
            default_vhost: vhost.into(),
            ..Default::default()
        }
    }

    /// Create a config that refuses cross-vhost bindings, as a broker would
    pub fn strict() -> Self {
        Self {
            enforce_vhost_isolation: true,
            ..Default::default()
        }
    }

    /// Turn cross-vhost binding checks on or off
    pub fn with_vhost_isolation(mut self, enforce: bool) -> Self {
        self.enforce_vhost_isolation = enforce;
        self
    }

    /// Check whether a binding in `binding_vhost` may connect the two endpoints
    pub fn allows_binding(&self, binding_vhost: &str, source_vhost: &str, destination_vhost: &str) -> bool {
        !self.enforce_vhost_isolation
            || (binding_vhost == source_vhost && source_vhost == destination_vhost)
    }
}
