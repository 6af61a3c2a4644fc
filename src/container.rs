//! Containers: the public entry point wrapping an injector.

use std::sync::Arc;

use crate::class::AnyArc;
use crate::descriptors::VertexDescriptor;
use crate::error::{DiError, DiResult};
use crate::graph::{Graph, Vertex};
use crate::graph_export::DependencyGraph;
use crate::injector::Injector;
use crate::metadata::{InjectableRegistry, MetadataSupplier};
use crate::observer::{Observers, ResolutionObserver};
use crate::options::InjectorOptions;
use crate::registration::Provider;
use crate::token::Token;
use crate::traits::ResolveCore;
use crate::validation::ValidationReport;

/// A set of bindings that resolves tokens, optionally on top of a parent.
///
/// A child container binds its own providers first and inherits every
/// parent vertex it does not shadow. The parent never sees the child's
/// bindings, and resolving through the child never alters the parent.
///
/// # Examples
///
/// ```
/// use ferrous_injector::{Container, ExplicitProvider, Resolve, Token};
///
/// let greeting = Token::new("greeting");
/// let parent = Container::create([ExplicitProvider::value(greeting.clone(), "hello")]);
/// let child = parent.create_child_container([ExplicitProvider::value(greeting.clone(), "hi")]);
///
/// assert_eq!(*parent.resolve::<&str>(&greeting).unwrap(), "hello");
/// assert_eq!(*child.resolve::<&str>(&greeting).unwrap(), "hi");
/// ```
#[derive(Clone, Debug)]
pub struct Container {
    injector: Injector,
}

impl Container {
    /// Creates a container with an empty metadata registry.
    ///
    /// Enough for value bindings and types without dependencies declared
    /// elsewhere; use [`with_metadata`](Self::with_metadata) or the
    /// [`builder`](Self::builder) for constructible types.
    pub fn create<P: Into<Provider>>(providers: impl IntoIterator<Item = P>) -> Self {
        Self::with_metadata(providers, InjectableRegistry::new())
    }

    /// Creates a container reading constructor metadata from `supplier`.
    pub fn with_metadata<P, S>(providers: impl IntoIterator<Item = P>, supplier: S) -> Self
    where
        P: Into<Provider>,
        S: MetadataSupplier + 'static,
    {
        Self {
            injector: Injector::new(providers, Arc::new(supplier)),
        }
    }

    /// Starts a builder for observers, options and metadata.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Creates a child container.
    ///
    /// The child's own `providers` shadow parent bindings with the same
    /// token id. Everything else is inherited as the parent holds it now,
    /// including singletons the parent already created.
    pub fn create_child_container<P: Into<Provider>>(&self, providers: impl IntoIterator<Item = P>) -> Container {
        Container {
            injector: self.injector.spawn_child(providers),
        }
    }

    /// Snapshot of the vertices, own bindings first.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.injector.vertices()
    }

    /// The underlying injector.
    pub fn injector(&self) -> &Injector {
        &self.injector
    }

    /// The metadata supplier shared with children.
    pub fn supplier(&self) -> &Arc<dyn MetadataSupplier> {
        self.injector.supplier()
    }

    /// Eagerly checks every binding. See [`ValidationReport`].
    pub fn validate(&self) -> ValidationReport {
        self.injector.validate()
    }

    /// Describes every vertex.
    pub fn descriptors(&self) -> Vec<VertexDescriptor> {
        self.injector.descriptors()
    }

    /// Snapshot of the dependency graph for export.
    pub fn export_graph(&self) -> DependencyGraph {
        let descriptors = self.descriptors();
        let has_cycles = self.validate().errors().iter().any(|e| matches!(e, DiError::Circular(_)));
        DependencyGraph::from_descriptors(&descriptors, has_cycles)
    }
}

impl ResolveCore for Container {
    fn resolve_any(&self, token: &Token) -> DiResult<AnyArc> {
        self.injector.resolve_any(token)
    }
}

/// Builder for [`Container`].
///
/// # Examples
///
/// ```
/// use ferrous_injector::{
///     Arguments, Constructible, Container, DiResult, Injectable, InjectableRegistry, InjectorOptions,
///     LoggingObserver, Provider, Resolve,
/// };
/// use std::sync::Arc;
///
/// struct Clock;
/// impl Constructible for Clock {
///     fn construct(_: &mut Arguments<'_>) -> DiResult<Self> { Ok(Clock) }
/// }
///
/// let container = Container::builder()
///     .provider(Provider::class::<Clock>())
///     .metadata(InjectableRegistry::new().with(Injectable::of::<Clock>()))
///     .observer(Arc::new(LoggingObserver::new()))
///     .options(InjectorOptions::default().validate_on_build(true))
///     .build()
///     .unwrap();
///
/// assert!(container.resolve_class::<Clock>().is_ok());
/// ```
pub struct ContainerBuilder {
    providers: Vec<Provider>,
    supplier: Option<Arc<dyn MetadataSupplier>>,
    observers: Observers,
    options: InjectorOptions,
}

impl ContainerBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            supplier: None,
            observers: Observers::new(),
            options: InjectorOptions::default(),
        }
    }

    /// Adds one provider.
    pub fn provider(mut self, provider: impl Into<Provider>) -> Self {
        self.providers.push(provider.into());
        self
    }

    /// Adds providers in order.
    pub fn providers<P: Into<Provider>>(mut self, providers: impl IntoIterator<Item = P>) -> Self {
        self.providers.extend(providers.into_iter().map(Into::into));
        self
    }

    /// Sets the metadata supplier. Defaults to an empty [`InjectableRegistry`].
    pub fn metadata(self, supplier: impl MetadataSupplier + 'static) -> Self {
        self.shared_metadata(Arc::new(supplier))
    }

    /// Sets an already shared metadata supplier.
    pub fn shared_metadata(mut self, supplier: Arc<dyn MetadataSupplier>) -> Self {
        self.supplier = Some(supplier);
        self
    }

    /// Registers a resolution observer.
    pub fn observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    /// Sets injector options.
    pub fn options(mut self, options: InjectorOptions) -> Self {
        self.options = options;
        self
    }

    /// Applies options and value bindings from a configuration.
    #[cfg(feature = "config")]
    pub fn config(mut self, config: &crate::config::ContainerConfig) -> DiResult<Self> {
        self.providers.extend(config.providers()?.into_iter().map(Provider::from));
        self.options = config.options.clone();
        Ok(self)
    }

    /// Builds the container.
    ///
    /// With [`InjectorOptions::validate_on_build`] set, fails with the first
    /// validation error.
    pub fn build(self) -> DiResult<Container> {
        let supplier = self
            .supplier
            .unwrap_or_else(|| Arc::new(InjectableRegistry::new()) as Arc<dyn MetadataSupplier>);
        let validate = self.options.validate_on_build;
        let injector = Injector::from_parts(
            Graph::from_providers(self.providers),
            supplier,
            self.observers,
            self.options,
        );
        if validate {
            injector.validate().into_result()?;
        }
        tracing::debug!(vertices = injector.vertices().len(), "container built");
        Ok(Container { injector })
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
