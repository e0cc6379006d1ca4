use indexmap::IndexMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};
use super::{
    Binding, BindingOptions, BindingTarget, DestinationRef, DestinationType,
    EntityKind, Exchange, ExchangeId, ExchangeOptions, ExchangeSpec, ExchangeType, Queue, QueueId,
    QueueOptions, QueueSpec, SourceRef,
};
use crate::config::ClusterConfig;
use crate::definitions::Definitions;
use crate::TopologyError;

/// Borrowed view of a registered queue or exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRef<'a> {
    Queue(&'a Queue),
    Exchange(&'a Exchange),
}

impl<'a> EntityRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            EntityRef::Queue(q) => q.name(),
            EntityRef::Exchange(e) => e.name(),
        }
    }

    pub fn vhost(&self) -> &'a str {
        match self {
            EntityRef::Queue(q) => q.vhost(),
            EntityRef::Exchange(e) => e.vhost(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Queue(_) => EntityKind::Queue,
            EntityRef::Exchange(_) => EntityKind::Exchange,
        }
    }
}

static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

/// The topology of a broker: queues, exchanges and the bindings between them.
///
/// Queues and exchanges are separate namespaces keyed by name, iterated in
/// registration order. Bindings are kept in creation order. Nothing is ever
/// removed, so the handles returned by the `add_*` methods stay valid. A
/// handle only resolves in the cluster that issued it (or a clone of it).
#[derive(Debug, Clone)]
pub struct Cluster {
    queues: IndexMap<String, Queue>,
    exchanges: IndexMap<String, Exchange>,
    bindings: Vec<Binding>,
    config: ClusterConfig,
    stamp: u64,
}

impl Default for Cluster {
    fn default() -> Self {
        Self::with_config(ClusterConfig::default())
    }
}

impl Cluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClusterConfig) -> Self {
        Self {
            queues: IndexMap::new(),
            exchanges: IndexMap::new(),
            bindings: Vec::new(),
            config,
            stamp: NEXT_STAMP.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Register a queue given by bare name (all defaults) or by full definition
    pub fn add_queue(&mut self, spec: impl Into<QueueSpec>) -> Result<QueueId, TopologyError> {
        let queue = match spec.into() {
            QueueSpec::Name(name) => Queue::with_options(
                name,
                QueueOptions::default().with_vhost(self.config.default_vhost.clone()),
            ),
            QueueSpec::Definition(def) => Queue::from_definition(def),
        };
        self.register_queue(queue)
    }

    /// Register a queue, overriding only the options that are present
    pub fn add_queue_with(
        &mut self,
        name: impl Into<String>,
        mut opts: QueueOptions,
    ) -> Result<QueueId, TopologyError> {
        if opts.vhost.is_none() {
            opts.vhost = Some(self.config.default_vhost.clone());
        }
        self.register_queue(Queue::with_options(name, opts))
    }

    /// Register an exchange given by name and type, or by full definition
    pub fn add_exchange(&mut self, spec: impl Into<ExchangeSpec>) -> Result<ExchangeId, TopologyError> {
        match spec.into() {
            ExchangeSpec::Named(name, kind) => {
                self.add_exchange_with(name, kind, ExchangeOptions::default())
            }
            ExchangeSpec::Definition(def) => self.register_exchange(Exchange::from_definition(def)),
        }
    }

    pub fn add_exchange_with(
        &mut self,
        name: impl Into<String>,
        kind: ExchangeType,
        mut opts: ExchangeOptions,
    ) -> Result<ExchangeId, TopologyError> {
        if opts.vhost.is_none() {
            opts.vhost = Some(self.config.default_vhost.clone());
        }
        self.register_exchange(Exchange::with_options(name, kind, opts))
    }

    fn register_queue(&mut self, mut queue: Queue) -> Result<QueueId, TopologyError> {
        if self.queues.contains_key(queue.name()) {
            warn!(queue = %queue.name(), "rejected duplicate queue");
            return Err(TopologyError::DuplicateName {
                kind: EntityKind::Queue,
                name: queue.name().to_string(),
            });
        }

        let id = QueueId::new(self.stamp, self.queues.len());
        queue.register(id);
        debug!(queue = %queue.name(), vhost = %queue.vhost(), "registered queue");
        self.queues.insert(queue.name().to_string(), queue);
        Ok(id)
    }

    fn register_exchange(&mut self, mut exchange: Exchange) -> Result<ExchangeId, TopologyError> {
        if self.exchanges.contains_key(exchange.name()) {
            warn!(exchange = %exchange.name(), "rejected duplicate exchange");
            return Err(TopologyError::DuplicateName {
                kind: EntityKind::Exchange,
                name: exchange.name().to_string(),
            });
        }

        let id = ExchangeId::new(self.stamp, self.exchanges.len());
        exchange.register(id);
        debug!(
            exchange = %exchange.name(),
            kind = %exchange.kind,
            vhost = %exchange.vhost(),
            "registered exchange"
        );
        self.exchanges.insert(exchange.name().to_string(), exchange);
        Ok(id)
    }

    /// Bind `source` to `destination`.
    ///
    /// The destination type comes from the options' hint, or else from the
    /// destination handle; a bare destination name without a hint is an error.
    /// Both endpoints must already be registered, and no binding may connect
    /// the same source to the same destination of the same type twice. The
    /// cluster is untouched when any check fails.
    pub fn add_binding(
        &mut self,
        source: impl Into<SourceRef>,
        destination: impl Into<DestinationRef>,
        options: impl Into<BindingOptions>,
    ) -> Result<&Binding, TopologyError> {
        let source = source.into();
        let destination = destination.into();
        let options = options.into();

        let destination_type = match (options.destination_type, destination.implied_type()) {
            (Some(hinted), Some(actual)) if hinted != actual => {
                return Err(TopologyError::DestinationTypeMismatch { hinted, actual });
            }
            (Some(hinted), _) => hinted,
            (None, Some(actual)) => actual,
            (None, None) => {
                return Err(TopologyError::UnresolvedDestinationType {
                    destination: destination.to_string(),
                });
            }
        };

        let source_id = self.resolve_source(&source)?;
        let target = self.resolve_destination(&destination, destination_type)?;

        let source_exchange = &self.exchanges[source_id.index];
        let destination_entity = self.entity(target);
        let source_name = source_exchange.name().to_string();
        let destination_name = destination_entity.name().to_string();

        let vhost = options
            .vhost
            .unwrap_or_else(|| self.config.default_vhost.clone());
        if !self
            .config
            .allows_binding(&vhost, source_exchange.vhost(), destination_entity.vhost())
        {
            warn!(source = %source_name, destination = %destination_name, "rejected cross-vhost binding");
            return Err(TopologyError::CrossVhostBinding {
                from: source_name,
                to: destination_name,
                vhost,
            });
        }

        if self
            .bindings
            .iter()
            .any(|b| b.same_edge(&source_name, &destination_name, destination_type))
        {
            warn!(source = %source_name, destination = %destination_name, "rejected duplicate binding");
            return Err(TopologyError::DuplicateBinding {
                from: source_name,
                to: destination_name,
                destination_type,
            });
        }

        let binding = Binding::new(
            vhost,
            (source_name, source_id),
            (destination_name, target),
            options.routing_key.unwrap_or_default(),
            options.arguments.unwrap_or_default(),
        );
        debug!(
            source = %binding.source,
            destination = %binding.destination,
            destination_type = %binding.destination_type,
            routing_key = %binding.routing_key,
            "registered binding"
        );

        let index = self.bindings.len();
        self.bindings.push(binding);
        Ok(&self.bindings[index])
    }

    fn resolve_source(&self, source: &SourceRef) -> Result<ExchangeId, TopologyError> {
        let resolved = match source {
            SourceRef::Name(name) => self.exchange_id(name),
            SourceRef::Exchange(id) => self.exchange(*id).map(|_| *id),
        };

        resolved.ok_or_else(|| TopologyError::UnknownSource {
            exchange: match source {
                SourceRef::Name(name) => name.clone(),
                SourceRef::Exchange(id) => format!("exchange #{}", id.index()),
            },
        })
    }

    fn resolve_destination(
        &self,
        destination: &DestinationRef,
        destination_type: DestinationType,
    ) -> Result<BindingTarget, TopologyError> {
        let resolved = match (destination, destination_type) {
            (DestinationRef::Name(name), DestinationType::Queue) => {
                self.queue_id(name).map(BindingTarget::Queue)
            }
            (DestinationRef::Name(name), DestinationType::Exchange) => {
                self.exchange_id(name).map(BindingTarget::Exchange)
            }
            (DestinationRef::Queue(id), _) => self.queue(*id).map(|_| BindingTarget::Queue(*id)),
            (DestinationRef::Exchange(id), _) => {
                self.exchange(*id).map(|_| BindingTarget::Exchange(*id))
            }
        };

        resolved.ok_or_else(|| TopologyError::UnknownDestination {
            destination_type,
            destination: destination.to_string(),
        })
    }

    // Targets only come from resolve_destination, so they always index a live entity.
    fn entity(&self, target: BindingTarget) -> EntityRef<'_> {
        match target {
            BindingTarget::Queue(id) => EntityRef::Queue(&self.queues[id.index]),
            BindingTarget::Exchange(id) => EntityRef::Exchange(&self.exchanges[id.index]),
        }
    }

    pub fn queue(&self, id: QueueId) -> Option<&Queue> {
        if id.cluster != self.stamp {
            return None;
        }
        self.queues.get_index(id.index).map(|(_, q)| q)
    }

    pub fn exchange(&self, id: ExchangeId) -> Option<&Exchange> {
        if id.cluster != self.stamp {
            return None;
        }
        self.exchanges.get_index(id.index).map(|(_, e)| e)
    }

    pub fn queue_named(&self, name: &str) -> Option<&Queue> {
        self.queues.get(name)
    }

    pub fn exchange_named(&self, name: &str) -> Option<&Exchange> {
        self.exchanges.get(name)
    }

    pub fn queue_id(&self, name: &str) -> Option<QueueId> {
        self.queues.get_index_of(name).map(|index| QueueId::new(self.stamp, index))
    }

    pub fn exchange_id(&self, name: &str) -> Option<ExchangeId> {
        self.exchanges.get_index_of(name).map(|index| ExchangeId::new(self.stamp, index))
    }

    pub fn queues(&self) -> impl Iterator<Item = &Queue> {
        self.queues.values()
    }

    pub fn exchanges(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.values()
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanges.len()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty() && self.exchanges.is_empty() && self.bindings.is_empty()
    }

    /// Exchange a binding of this cluster starts from
    pub fn source_of(&self, binding: &Binding) -> Option<&Exchange> {
        self.exchange(binding.source_id())
    }

    /// Queue or exchange a binding of this cluster delivers to
    pub fn destination_of(&self, binding: &Binding) -> Option<EntityRef<'_>> {
        match binding.target() {
            BindingTarget::Queue(id) => self.queue(id).map(EntityRef::Queue),
            BindingTarget::Exchange(id) => self.exchange(id).map(EntityRef::Exchange),
        }
    }

    /// Bindings whose source is the named exchange, in creation order
    pub fn bindings_from<'a>(&'a self, exchange: &'a str) -> impl Iterator<Item = &'a Binding> + 'a {
        self.bindings.iter().filter(move |b| b.source == exchange)
    }

    /// Bindings delivering to the named queue or exchange, in creation order
    pub fn bindings_to<'a>(
        &'a self,
        destination_type: DestinationType,
        destination: &'a str,
    ) -> impl Iterator<Item = &'a Binding> + 'a {
        self.bindings
            .iter()
            .filter(move |b| b.destination_type == destination_type && b.destination == destination)
    }

    /// Export the whole topology in flat definition form
    pub fn generate_config(&self) -> Definitions {
        let definitions = Definitions {
            queues: self.queues.values().map(Queue::to_definition).collect(),
            exchanges: self.exchanges.values().map(Exchange::to_definition).collect(),
            bindings: self.bindings.iter().map(Binding::to_definition).collect(),
        };
        info!(
            queues = definitions.queues.len(),
            exchanges = definitions.exchanges.len(),
            bindings = definitions.bindings.len(),
            "generated definitions"
        );
        definitions
    }

    /// Rebuild a cluster from flat definitions
    pub fn from_definitions(definitions: &Definitions) -> Result<Self, TopologyError> {
        Self::from_definitions_with_config(definitions, ClusterConfig::default())
    }

    /// Rebuild a cluster from flat definitions.
    ///
    /// Queues are registered first, then exchanges, then bindings, each in input
    /// order. A binding may only refer to entities present in the definitions;
    /// the first failure aborts the load.
    pub fn from_definitions_with_config(
        definitions: &Definitions,
        config: ClusterConfig,
    ) -> Result<Self, TopologyError> {
        let mut cluster = Self::with_config(config);

        for queue in &definitions.queues {
            cluster.add_queue(queue.clone())?;
        }

        for exchange in &definitions.exchanges {
            cluster.add_exchange(exchange.clone())?;
        }

        for binding in &definitions.bindings {
            cluster.add_binding(
                binding.source.as_str(),
                binding.destination.as_str(),
                BindingOptions {
                    destination_type: Some(binding.destination_type),
                    routing_key: Some(binding.routing_key.clone()),
                    arguments: Some(binding.arguments.clone()),
                    vhost: Some(binding.vhost.clone()),
                },
            )?;
        }

        info!(
            queues = cluster.queue_count(),
            exchanges = cluster.exchange_count(),
            bindings = cluster.binding_count(),
            "loaded cluster from definitions"
        );
        Ok(cluster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArgumentValue, Arguments, QueueDefinition, RoutingKey};
    use serde_json::json;

    fn sample_cluster() -> Cluster {
        let mut cluster = Cluster::new();
        let q1 = cluster.add_queue("test.queue").unwrap();
        cluster.add_exchange(("test.topic.exchange", ExchangeType::Topic)).unwrap();
        let direct = cluster.add_exchange(("test.direct.exchange", ExchangeType::Direct)).unwrap();
        let fanout = cluster.add_exchange(("test.fanout.exchange", ExchangeType::Fanout)).unwrap();
        cluster
            .add_exchange(("test.consistent-hash.exchange", ExchangeType::ConsistentHash))
            .unwrap();

        cluster.add_binding(direct, fanout, BindingOptions::default()).unwrap();
        cluster
            .add_binding(direct, q1, BindingOptions::default().with_routing_key("10"))
            .unwrap();
        cluster
    }

    #[test]
    fn test_add_queue() {
        let mut cluster = Cluster::new();
        let id = cluster.add_queue("my-queue").unwrap();

        let queue = cluster.queue_named("my-queue").unwrap();
        assert_eq!(queue.id(), Some(id));
        assert_eq!(cluster.queue(id), Some(queue));
        assert_eq!(cluster.queue_count(), 1);
    }

    #[test]
    fn test_distinct_queue_names() {
        let mut cluster = Cluster::new();
        let a = cluster.add_queue("a").unwrap();
        let b = cluster.add_queue("b").unwrap();

        assert_ne!(a, b);
        assert_eq!(cluster.queue_count(), 2);
    }

    #[test]
    fn test_duplicate_queue_rejected() {
        let mut cluster = Cluster::new();
        cluster.add_queue("my-queue").unwrap();

        let err = cluster.add_queue(QueueDefinition::new("my-queue")).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::DuplicateName { kind: EntityKind::Queue, ref name } if name == "my-queue"
        ));
        assert_eq!(cluster.queue_count(), 1);
    }

    #[test]
    fn test_duplicate_exchange_rejected() {
        let mut cluster = Cluster::new();
        cluster.add_exchange(("my-exchange", ExchangeType::Topic)).unwrap();

        let err = cluster
            .add_exchange(("my-exchange", ExchangeType::Topic))
            .unwrap_err();
        assert!(matches!(
            err,
            TopologyError::DuplicateName { kind: EntityKind::Exchange, .. }
        ));
        assert_eq!(
            err.to_string(),
            "There is already an exchange with the name my-exchange"
        );
    }

    #[test]
    fn test_namespaces_are_independent() {
        let mut cluster = Cluster::new();
        cluster.add_queue("x").unwrap();
        cluster.add_exchange(("x", ExchangeType::Topic)).unwrap();

        assert!(cluster.queue_named("x").is_some());
        assert!(cluster.exchange_named("x").is_some());
    }

    #[test]
    fn test_add_queue_with_keeps_explicit_falsy_options() {
        let mut cluster = Cluster::with_config(ClusterConfig::for_vhost("staging"));
        let id = cluster
            .add_queue_with("transient", QueueOptions::default().with_durable(false))
            .unwrap();

        let queue = cluster.queue(id).unwrap();
        assert!(!queue.attributes.durable);
        assert_eq!(queue.vhost(), "staging");
    }

    #[test]
    fn test_bare_names_take_configured_vhost() {
        let mut cluster = Cluster::with_config(ClusterConfig::for_vhost("staging"));
        let q = cluster.add_queue("q").unwrap();
        let ex = cluster.add_exchange(("ex", ExchangeType::Direct)).unwrap();
        let def = QueueDefinition::new("explicit");
        let explicit = cluster.add_queue(def).unwrap();

        assert_eq!(cluster.queue(q).unwrap().vhost(), "staging");
        assert_eq!(cluster.exchange(ex).unwrap().vhost(), "staging");
        assert_eq!(cluster.queue(explicit).unwrap().vhost(), "/");
        assert_eq!(cluster.add_binding(ex, q, BindingOptions::default()).unwrap().vhost, "staging");
    }

    #[test]
    fn test_add_binding_with_handles() {
        let mut cluster = Cluster::new();
        let ex = cluster.add_exchange(("my-exchange", ExchangeType::Topic)).unwrap();
        let q = cluster.add_queue("my-queue").unwrap();

        let binding = cluster.add_binding(ex, q, BindingOptions::default()).unwrap();
        assert_eq!(binding.destination_type, DestinationType::Queue);
        assert_eq!(binding.source, "my-exchange");
        assert_eq!(binding.destination, "my-queue");
        assert_eq!(binding.routing_key, RoutingKey::default());
        assert!(binding.arguments.is_empty());
        assert_eq!(cluster.binding_count(), 1);
    }

    #[test]
    fn test_duplicate_binding_rejected() {
        let mut cluster = Cluster::new();
        let ex = cluster.add_exchange(("my-exchange", ExchangeType::Topic)).unwrap();
        let q = cluster.add_queue("my-queue").unwrap();

        cluster.add_binding(ex, q, BindingOptions::default()).unwrap();
        let err = cluster
            .add_binding(ex, q, BindingOptions::default().with_routing_key("other.key"))
            .unwrap_err();

        assert!(matches!(err, TopologyError::DuplicateBinding { .. }));
        assert_eq!(cluster.binding_count(), 1);
    }

    #[test]
    fn test_same_names_different_destination_type_allowed() {
        let mut cluster = Cluster::new();
        cluster.add_exchange(("ex", ExchangeType::Direct)).unwrap();
        cluster.add_exchange(("shared", ExchangeType::Fanout)).unwrap();
        cluster.add_queue("shared").unwrap();

        cluster.add_binding("ex", "shared", DestinationType::Queue).unwrap();
        cluster.add_binding("ex", "shared", DestinationType::Exchange).unwrap();

        assert_eq!(cluster.binding_count(), 2);
    }

    #[test]
    fn test_unknown_source_rejected() {
        let mut cluster = Cluster::new();
        let q = cluster.add_queue("q").unwrap();

        let err = cluster.add_binding("missing", q, BindingOptions::default()).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownSource { ref exchange } if exchange == "missing"));
        assert_eq!(cluster.binding_count(), 0);
    }

    #[test]
    fn test_stale_source_handle_rejected() {
        let mut cluster = Cluster::new();
        let q = cluster.add_queue("q").unwrap();

        let stale = ExchangeId::new(cluster.stamp, 4);

        let err = cluster.add_binding(stale, q, BindingOptions::default()).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownSource { .. }));
    }

    #[test]
    fn test_handles_from_another_cluster_rejected() {
        let mut first = Cluster::new();
        first.add_exchange(("a-first", ExchangeType::Direct)).unwrap();
        let foreign_exchange = first.add_exchange(("a-second", ExchangeType::Direct)).unwrap();
        first.add_queue("a-q0").unwrap();
        let foreign_queue = first.add_queue("a-q1").unwrap();

        let mut second = Cluster::new();
        let ex = second.add_exchange(("b0", ExchangeType::Direct)).unwrap();
        second.add_exchange(("b1", ExchangeType::Direct)).unwrap();
        second.add_queue("b-q0").unwrap();
        let q = second.add_queue("b-q1").unwrap();

        assert!(second.exchange(foreign_exchange).is_none());
        assert!(second.queue(foreign_queue).is_none());

        let err = second
            .add_binding(foreign_exchange, q, BindingOptions::default())
            .unwrap_err();
        assert!(matches!(err, TopologyError::UnknownSource { .. }));

        let err = second
            .add_binding(ex, foreign_queue, BindingOptions::default())
            .unwrap_err();
        assert!(matches!(err, TopologyError::UnknownDestination { .. }));

        let err = second
            .add_binding(ex, foreign_exchange, BindingOptions::default())
            .unwrap_err();
        assert!(matches!(err, TopologyError::UnknownDestination { .. }));
        assert_eq!(second.binding_count(), 0);
    }

    #[test]
    fn test_clone_resolves_original_handles() {
        let mut cluster = Cluster::new();
        let q = cluster.add_queue("q").unwrap();
        let copy = cluster.clone();

        assert_eq!(copy.queue(q).map(Queue::name), Some("q"));
    }

    #[test]
    fn test_unknown_destination_rejected() {
        let mut cluster = Cluster::new();
        cluster.add_exchange(("ex", ExchangeType::Direct)).unwrap();
        cluster.add_queue("only-a-queue").unwrap();

        let err = cluster
            .add_binding("ex", "only-a-queue", DestinationType::Exchange)
            .unwrap_err();
        assert!(matches!(
            err,
            TopologyError::UnknownDestination { destination_type: DestinationType::Exchange, .. }
        ));
    }

    #[test]
    fn test_unresolved_destination_type() {
        let mut cluster = Cluster::new();
        cluster.add_exchange(("ex", ExchangeType::Direct)).unwrap();
        cluster.add_queue("q").unwrap();

        let err = cluster.add_binding("ex", "q", BindingOptions::default()).unwrap_err();
        assert!(matches!(err, TopologyError::UnresolvedDestinationType { .. }));
    }

    #[test]
    fn test_destination_type_mismatch() {
        let mut cluster = Cluster::new();
        let ex = cluster.add_exchange(("ex", ExchangeType::Direct)).unwrap();
        let q = cluster.add_queue("q").unwrap();

        let err = cluster.add_binding(ex, q, DestinationType::Exchange).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::DestinationTypeMismatch {
                hinted: DestinationType::Exchange,
                actual: DestinationType::Queue
            }
        ));
    }

    #[test]
    fn test_binding_options_carried() {
        let mut cluster = Cluster::new();
        let ex = cluster.add_exchange(("ex", ExchangeType::Headers)).unwrap();
        let q = cluster.add_queue("q").unwrap();
        let mut arguments = Arguments::new();
        arguments.insert("x-match".into(), ArgumentValue::from("all"));

        let binding = cluster
            .add_binding(
                ex,
                q,
                BindingOptions::default()
                    .with_routing_key(RoutingKey::Number(10))
                    .with_arguments(arguments.clone()),
            )
            .unwrap();

        assert_eq!(binding.routing_key, RoutingKey::Number(10));
        assert_eq!(binding.arguments, arguments);
    }

    #[test]
    fn test_strict_config_rejects_cross_vhost_binding() {
        let mut cluster = Cluster::with_config(ClusterConfig::strict());
        let ex = cluster.add_exchange(("ex", ExchangeType::Direct)).unwrap();
        let q = cluster
            .add_queue_with("q", QueueOptions::default().with_vhost("other"))
            .unwrap();

        let err = cluster.add_binding(ex, q, BindingOptions::default()).unwrap_err();
        assert!(matches!(err, TopologyError::CrossVhostBinding { .. }));
        assert_eq!(cluster.binding_count(), 0);

        let local = cluster.add_queue("local").unwrap();
        assert!(cluster.add_binding(ex, local, BindingOptions::default()).is_ok());
    }

    #[test]
    fn test_binding_back_references() {
        let cluster = sample_cluster();
        let binding = &cluster.bindings()[0];

        assert_eq!(cluster.source_of(binding).unwrap().name(), "test.direct.exchange");
        let destination = cluster.destination_of(binding).unwrap();
        assert_eq!(destination.kind(), EntityKind::Exchange);
        assert_eq!(destination.name(), "test.fanout.exchange");
        assert_eq!(cluster.bindings()[1].destination, "test.queue");
    }

    #[test]
    fn test_edge_queries() {
        let cluster = sample_cluster();

        assert_eq!(cluster.bindings_from("test.direct.exchange").count(), 2);
        assert_eq!(cluster.bindings_from("test.topic.exchange").count(), 0);
        let into_queue: Vec<_> = cluster
            .bindings_to(DestinationType::Queue, "test.queue")
            .collect();
        assert_eq!(into_queue.len(), 1);
        assert_eq!(into_queue[0].routing_key.to_string(), "10");
    }

    #[test]
    fn test_generate_config_matches_broker_format() {
        let mut cluster = Cluster::new();
        let ex = cluster.add_exchange(("myexchange", ExchangeType::Topic)).unwrap();
        let q = cluster.add_queue("myqueue").unwrap();
        cluster.add_binding(ex, q, BindingOptions::default()).unwrap();

        let value = serde_json::to_value(cluster.generate_config()).unwrap();
        assert_eq!(
            value,
            json!({
                "bindings": [{
                    "arguments": {},
                    "destination": "myqueue",
                    "destination_type": "queue",
                    "routing_key": "",
                    "source": "myexchange",
                    "vhost": "/"
                }],
                "exchanges": [{
                    "arguments": {},
                    "auto_delete": false,
                    "durable": true,
                    "internal": false,
                    "name": "myexchange",
                    "type": "topic",
                    "vhost": "/"
                }],
                "queues": [{
                    "arguments": {},
                    "auto_delete": false,
                    "durable": true,
                    "name": "myqueue",
                    "vhost": "/"
                }]
            })
        );
    }

    #[test]
    fn test_generate_config_keeps_registration_order() {
        let definitions = sample_cluster().generate_config();
        let names: Vec<_> = definitions.exchanges.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "test.topic.exchange",
                "test.direct.exchange",
                "test.fanout.exchange",
                "test.consistent-hash.exchange"
            ]
        );
        assert_eq!(definitions.bindings[0].destination, "test.fanout.exchange");
        assert_eq!(definitions.bindings[1].destination, "test.queue");
    }

    #[test]
    fn test_definitions_round_trip() {
        let mut cluster = sample_cluster();
        let mut arguments = Arguments::new();
        arguments.insert("x-max-length".into(), ArgumentValue::Integer(1000));
        cluster
            .add_queue(QueueDefinition {
                name: "bounded".into(),
                vhost: "/".into(),
                durable: false,
                auto_delete: true,
                arguments,
            })
            .unwrap();

        let original = cluster.generate_config();
        let reloaded = Cluster::from_definitions(&original).unwrap();

        assert_eq!(reloaded.generate_config(), original);
    }

    #[test]
    fn test_load_rejects_dangling_binding() {
        let mut definitions = sample_cluster().generate_config();
        definitions.bindings[0].source = "never.declared".into();

        let err = Cluster::from_definitions(&definitions).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownSource { ref exchange } if exchange == "never.declared"));
    }

    #[test]
    fn test_load_rejects_duplicate_names() {
        let mut definitions = Definitions::default();
        definitions.queues.push(QueueDefinition::new("q"));
        definitions.queues.push(QueueDefinition::new("q"));

        let err = Cluster::from_definitions(&definitions).unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateName { .. }));
    }

    #[test]
    fn test_empty_cluster() {
        let cluster = Cluster::new();
        assert!(cluster.is_empty());

        let definitions = cluster.generate_config();
        assert!(definitions.queues.is_empty());
        assert!(definitions.exchanges.is_empty());
        assert!(definitions.bindings.is_empty());
    }
}
