//! The injector: owns a graph, computes resolution orders and instantiates.

use std::sync::Arc;
use std::time::Instant;

use crate::class::AnyArc;
use crate::descriptors::VertexDescriptor;
use crate::error::{DiError, DiResult};
use crate::graph::{Graph, Vertex};
use crate::internal::{HashMap, Lock};
use crate::lifetime::Lifetime;
use crate::metadata::MetadataSupplier;
use crate::observer::Observers;
use crate::options::InjectorOptions;
use crate::registration::Provider;
use crate::token::{Token, TokenId};
use crate::traits::ResolveCore;
use crate::validation::{self, ValidationReport};

mod order;

pub(crate) use order::find_cycles;

/// Resolves tokens against one graph of vertices.
///
/// Cheap to clone: clones share the same graph, order cache and
/// instances. All resolution on one injector is serialized by an internal
/// lock, so concurrent callers never construct the same singleton twice.
///
/// # Examples
///
/// ```
/// use ferrous_injector::{ExplicitProvider, Injector, InjectableRegistry, Resolve, Token};
/// use std::sync::Arc;
///
/// let port = Token::new("port");
/// let injector = Injector::new(
///     [ExplicitProvider::value(port.clone(), 8080u16)],
///     Arc::new(InjectableRegistry::new()),
/// );
///
/// assert_eq!(*injector.resolve::<u16>(&port).unwrap(), 8080);
/// assert_eq!(injector.resolution_order(&port), Some(vec![port]));
/// ```
#[derive(Clone)]
pub struct Injector {
    inner: Arc<InjectorInner>,
}

struct InjectorInner {
    state: Lock<InjectorState>,
    supplier: Arc<dyn MetadataSupplier>,
    observers: Observers,
    options: InjectorOptions,
}

struct InjectorState {
    graph: Graph,
    orders: HashMap<TokenId, Arc<[Token]>>,
}

impl Injector {
    /// Creates an injector over `providers`, reading constructor metadata
    /// from `supplier`.
    pub fn new<P: Into<Provider>>(
        providers: impl IntoIterator<Item = P>,
        supplier: Arc<dyn MetadataSupplier>,
    ) -> Self {
        Self::with_options(providers, supplier, InjectorOptions::default())
    }

    /// Like [`new`](Self::new) with explicit options.
    pub fn with_options<P: Into<Provider>>(
        providers: impl IntoIterator<Item = P>,
        supplier: Arc<dyn MetadataSupplier>,
        options: InjectorOptions,
    ) -> Self {
        Self::from_parts(Graph::from_providers(providers), supplier, Observers::new(), options)
    }

    pub(crate) fn from_parts(
        graph: Graph,
        supplier: Arc<dyn MetadataSupplier>,
        observers: Observers,
        options: InjectorOptions,
    ) -> Self {
        Self {
            inner: Arc::new(InjectorInner {
                state: Lock::new(InjectorState {
                    graph,
                    orders: HashMap::default(),
                }),
                supplier,
                observers,
                options,
            }),
        }
    }

    /// Creates an injector seeded with `providers` that inherits every
    /// vertex of this one whose token it does not bind itself.
    ///
    /// Inherited vertices are copied with whatever instance they hold at
    /// this moment. Supplier, observers and options are shared.
    pub(crate) fn spawn_child<P: Into<Provider>>(&self, providers: impl IntoIterator<Item = P>) -> Self {
        let child = Self::from_parts(
            Graph::from_providers(providers),
            self.inner.supplier.clone(),
            self.inner.observers.clone(),
            self.inner.options.clone(),
        );
        let inherited = child.add_vertices(self.vertices());
        tracing::debug!(inherited, "child injector created");
        child
    }

    /// Adds every vertex whose token id is not yet present.
    ///
    /// Returns how many were added. Cached resolution orders are kept as
    /// they are.
    pub fn add_vertices(&self, vertices: impl IntoIterator<Item = Vertex>) -> usize {
        self.inner.state.lock().graph.extend(vertices)
    }

    /// Snapshot of the current vertices in insertion order.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.inner.state.lock().graph.vertices().to_vec()
    }

    /// Whether a vertex is bound for `token`.
    pub fn contains(&self, token: &Token) -> bool {
        self.inner.state.lock().graph.contains(token.id())
    }

    /// The cached resolution order for `token`, if it was resolved before.
    pub fn resolution_order(&self, token: &Token) -> Option<Vec<Token>> {
        self.inner
            .state
            .lock()
            .orders
            .get(token.id())
            .map(|order| order.to_vec())
    }

    /// The metadata supplier.
    pub fn supplier(&self) -> &Arc<dyn MetadataSupplier> {
        &self.inner.supplier
    }

    /// The options this injector was created with.
    pub fn options(&self) -> &InjectorOptions {
        &self.inner.options
    }

    /// Checks every vertex without instantiating anything.
    pub fn validate(&self) -> ValidationReport {
        let mut state = self.inner.state.lock();
        validation::validate_graph(&mut state.graph, self.inner.supplier.as_ref())
    }

    /// Describes every vertex, discovering edges where metadata allows.
    pub fn descriptors(&self) -> Vec<VertexDescriptor> {
        let mut state = self.inner.state.lock();
        let ids: Vec<TokenId> = state.graph.vertices().iter().map(|v| v.token().id().clone()).collect();
        ids.iter()
            .filter_map(|id| {
                let dependencies = state
                    .graph
                    .edges_of(id, self.inner.supplier.as_ref())
                    .ok()
                    .flatten()
                    .map(|edges| edges.to_vec());
                state
                    .graph
                    .get(id)
                    .map(|vertex| VertexDescriptor::describe(vertex, dependencies))
            })
            .collect()
    }

    fn resolve_locked(&self, token: &Token) -> DiResult<(AnyArc, Option<Arc<[Token]>>)> {
        let mut state = self.inner.state.lock();
        let supplier = self.inner.supplier.as_ref();

        let cached = state.orders.get(token.id()).cloned();
        let (order, computed) = match cached {
            Some(order) => (order, false),
            None => {
                let order: Arc<[Token]> =
                    order::resolution_order(&mut state.graph, supplier, self.inner.options.max_depth, token)?
                        .into();
                tracing::debug!(token = %token, len = order.len(), "resolution order computed");
                state.orders.insert(token.id().clone(), order.clone());
                (order, true)
            }
        };

        let instance = state.instantiate(&order, supplier)?;
        Ok((instance, computed.then_some(order)))
    }
}

impl InjectorState {
    /// Walks `order`, reusing or constructing each vertex. Instances are
    /// local to this walk unless the vertex is a singleton.
    fn instantiate(&mut self, order: &[Token], supplier: &dyn MetadataSupplier) -> DiResult<AnyArc> {
        let mut resolved: HashMap<TokenId, (AnyArc, Lifetime)> = HashMap::default();
        let mut last = None;
        for token in order {
            let (instance, lifetime) = self.instantiate_vertex(token, &resolved, supplier)?;
            resolved.insert(token.id().clone(), (instance.clone(), lifetime));
            last = Some(instance);
        }
        last.ok_or_else(|| DiError::ResolutionOrder("resolution order is empty".to_string()))
    }

    fn instantiate_vertex(
        &mut self,
        token: &Token,
        resolved: &HashMap<TokenId, (AnyArc, Lifetime)>,
        supplier: &dyn MetadataSupplier,
    ) -> DiResult<(AnyArc, Lifetime)> {
        let vertex = self.graph.get(token.id()).ok_or_else(|| {
            DiError::ResolutionOrder(format!("{} is ordered but has no vertex", token))
        })?;
        let lifetime = vertex.lifetime();

        if let Some(value) = vertex.provider().value().cloned() {
            if !vertex.is_instantiated() {
                if let Some(vertex) = self.graph.get_mut(token.id()) {
                    vertex.store(value.clone());
                }
            }
            return Ok((value, lifetime));
        }
        if lifetime == Lifetime::Singleton {
            if let Some(instance) = vertex.instance() {
                return Ok((instance.clone(), lifetime));
            }
        }

        let class = vertex.class_type().cloned().ok_or_else(|| {
            DiError::ResolutionOrder(format!("{} has neither a value nor a class", token))
        })?;
        let dependent = vertex.token().description().to_string();
        let edges = self
            .graph
            .edges_of(token.id(), supplier)?
            .ok_or_else(|| DiError::ResolutionOrder(format!("{} lost its vertex", token)))?;

        let mut args = Vec::with_capacity(edges.len());
        let mut transient = Vec::new();
        for dependency in edges.iter() {
            let (instance, dependency_lifetime) = resolved.get(dependency.id()).ok_or_else(|| {
                DiError::ResolutionOrder(format!(
                    "{} requires {} which was not resolved before it",
                    dependent, dependency
                ))
            })?;
            if *dependency_lifetime == Lifetime::Transient {
                transient.push(dependency.description().to_string());
            }
            args.push(instance.clone());
        }
        if lifetime == Lifetime::Singleton && !transient.is_empty() {
            return Err(DiError::LifetimeConflict {
                dependent,
                dependencies: transient,
            });
        }

        let instance = class.construct(&args)?;
        tracing::trace!(token = %token, %lifetime, "constructed");
        if lifetime == Lifetime::Singleton {
            if let Some(vertex) = self.graph.get_mut(token.id()) {
                vertex.store(instance.clone());
            }
        }
        Ok((instance, lifetime))
    }
}

impl ResolveCore for Injector {
    fn resolve_any(&self, token: &Token) -> DiResult<AnyArc> {
        if !token.is_valid() {
            return Err(DiError::InvalidToken(format!(
                "cannot resolve {}: token id is empty",
                token.description()
            )));
        }

        let observers = &self.inner.observers;
        if !observers.has_observers() {
            return self.resolve_locked(token).map(|(instance, _)| instance);
        }

        let start = Instant::now();
        observers.resolving(token);
        match self.resolve_locked(token) {
            Ok((instance, computed)) => {
                if let Some(order) = computed {
                    observers.order_computed(token, &order);
                }
                observers.resolved(token, start.elapsed());
                Ok(instance)
            }
            Err(err) => {
                observers.failed(token, &err);
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Injector")
            .field("vertices", &state.graph.len())
            .field("cached_orders", &state.orders.len())
            .field("options", &self.inner.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{Arguments, Constructible};
    use crate::metadata::{Injectable, InjectableRegistry};
    use crate::registration::ExplicitProvider;
    use crate::traits::Resolve;

    struct Leaf;
    impl Constructible for Leaf {
        fn construct(_: &mut Arguments<'_>) -> DiResult<Self> {
            Ok(Leaf)
        }
    }

    struct Root {
        leaf: Arc<Leaf>,
    }
    impl Constructible for Root {
        fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
            Ok(Root { leaf: args.next()? })
        }
    }

    fn registry() -> Arc<dyn MetadataSupplier> {
        Arc::new(
            InjectableRegistry::new()
                .with(Injectable::of::<Leaf>())
                .with(Injectable::of::<Root>().param::<Leaf>()),
        )
    }

    #[test]
    fn order_is_cached_after_first_resolve() {
        let injector = Injector::new([Provider::class::<Root>(), Provider::class::<Leaf>()], registry());
        let root = Token::of::<Root>();
        assert!(injector.resolution_order(&root).is_none());

        injector.resolve_any(&root).unwrap();
        assert_eq!(injector.resolution_order(&root), Some(vec![Token::of::<Leaf>(), root]));
    }

    #[test]
    fn singleton_is_constructed_once() {
        let injector = Injector::new([Provider::class::<Root>(), Provider::class::<Leaf>()], registry());
        let a = injector.resolve_class::<Root>().unwrap();
        let b = injector.resolve_class::<Root>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a.leaf, &injector.resolve_class::<Leaf>().unwrap()));
    }

    #[test]
    fn transient_is_constructed_per_resolve() {
        let leaf = Token::new("leaf");
        let injector = Injector::new(
            [ExplicitProvider::class::<Leaf>(leaf.clone()).transient()],
            registry(),
        );
        let a = injector.resolve::<Leaf>(&leaf).unwrap();
        let b = injector.resolve::<Leaf>(&leaf).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn invalid_token_is_rejected_before_lookup() {
        let injector = Injector::new(Vec::<Provider>::new(), registry());
        let err = injector.resolve_any(&Token::with_id("", "blank")).unwrap_err();
        assert!(matches!(err, DiError::InvalidToken(_)));
    }

    #[test]
    fn failed_resolve_caches_nothing() {
        let injector = Injector::new([Provider::class::<Root>()], registry());
        let root = Token::of::<Root>();
        assert_eq!(
            injector.resolve_any(&root).unwrap_err(),
            DiError::MissingProvider("Leaf".to_string())
        );
        assert!(injector.resolution_order(&root).is_none());
    }

    #[test]
    fn added_vertices_do_not_replace_existing_ones() {
        let port = Token::new("port");
        let injector = Injector::new([ExplicitProvider::value(port.clone(), 1u16)], registry());
        let added = injector.add_vertices([
            Vertex::new(ExplicitProvider::value(port.clone(), 2u16)),
            Vertex::new(Provider::class::<Leaf>()),
        ]);
        assert_eq!(added, 1);
        assert_eq!(*injector.resolve::<u16>(&port).unwrap(), 1);
        assert!(injector.contains(&Token::of::<Leaf>()));
    }

    #[test]
    fn duplicate_vertex_keeps_built_singleton() {
        let injector = Injector::new([Provider::class::<Leaf>()], registry());
        let built = injector.resolve_class::<Leaf>().unwrap();

        assert_eq!(injector.add_vertices([Vertex::new(Provider::class::<Leaf>())]), 0);
        assert!(injector.vertices()[0].is_instantiated());
        assert!(Arc::ptr_eq(&built, &injector.resolve_class::<Leaf>().unwrap()));
    }

    #[test]
    fn cached_order_survives_added_vertices() {
        let injector = Injector::new([Provider::class::<Root>(), Provider::class::<Leaf>()], registry());
        let root = Token::of::<Root>();
        injector.resolve_any(&root).unwrap();
        let before = injector.resolution_order(&root);

        let extra = Token::new("extra");
        assert_eq!(injector.add_vertices([Vertex::new(ExplicitProvider::value(extra.clone(), 3u8))]), 1);
        assert_eq!(injector.resolution_order(&root), before);
        assert!(injector.resolution_order(&extra).is_none());
        assert!(injector.resolve_class::<Root>().is_ok());
    }
}
