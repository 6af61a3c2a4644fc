//! Registering constructible components with an external registry.
//!
//! Some hosts construct objects themselves, by name, long after the
//! program defined them. The registrar resolves a component's declared
//! dependencies through a container up front and hands the host a
//! [`ComponentFactory`] that builds the component from those instances.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::class::{AnyArc, ClassType, Constructible};
use crate::container::Container;
use crate::error::{DiError, DiResult};
use crate::graph::dependency_tokens;
use crate::internal::HashMap;
use crate::registration::Provider;
use crate::traits::Resolve;

/// Host-specific definition options passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionOptions {
    /// Name of a built-in component this one extends
    pub extends: Option<String>,
}

/// Builds one component from dependencies resolved at registration time.
///
/// Every call constructs a new instance from the same dependency instances.
#[derive(Clone)]
pub struct ComponentFactory {
    class: ClassType,
    arguments: Arc<[AnyArc]>,
}

impl ComponentFactory {
    /// The component type.
    pub fn class(&self) -> &ClassType {
        &self.class
    }

    /// Number of pre-resolved constructor arguments.
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Constructs a new instance.
    pub fn create(&self) -> DiResult<AnyArc> {
        self.class.construct(&self.arguments)
    }

    /// Constructs a new instance and downcasts it.
    pub fn create_as<T: Any + Send + Sync>(&self) -> DiResult<Arc<T>> {
        self.create()?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }
}

impl fmt::Debug for ComponentFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentFactory")
            .field("class", &self.class)
            .field("arity", &self.arguments.len())
            .finish()
    }
}

/// A named registry components are defined in.
pub trait ComponentRegistry {
    /// Defines `name` to be built by `factory`.
    fn define(&mut self, name: &str, factory: ComponentFactory, options: Option<&DefinitionOptions>) -> DiResult<()>;
}

/// A component to define.
#[derive(Debug, Clone)]
pub struct ComponentRegistration {
    /// The component type
    pub class: ClassType,
    /// Name the component is defined under
    pub name: String,
    /// Options handed to the registry
    pub options: Option<DefinitionOptions>,
}

impl ComponentRegistration {
    /// Registration of `T` under `name`.
    pub fn of<T: Constructible>(name: impl Into<String>) -> Self {
        Self {
            class: ClassType::of::<T>(),
            name: name.into(),
            options: None,
        }
    }

    /// Sets definition options.
    pub fn with_options(mut self, options: DefinitionOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Defines components in a registry, resolving their dependencies
/// through a container.
///
/// # Examples
///
/// ```
/// use ferrous_injector::{
///     Arguments, ComponentRegistrar, ComponentRegistration, Constructible, Container, DiResult,
///     ExplicitProvider, Injectable, InjectableRegistry, MemoryRegistry, Token,
/// };
/// use std::sync::Arc;
///
/// struct Banner { text: Arc<String> }
/// impl Constructible for Banner {
///     fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
///         Ok(Banner { text: args.next()? })
///     }
/// }
///
/// let title = Token::new("title");
/// let container = Container::with_metadata(
///     [ExplicitProvider::value(title.clone(), "Welcome".to_string())],
///     InjectableRegistry::new().with(Injectable::of::<Banner>().inject(0, title)),
/// );
///
/// let mut registrar = ComponentRegistrar::new(container, MemoryRegistry::new());
/// registrar.register([ComponentRegistration::of::<Banner>("app-banner")]).unwrap();
///
/// let banner = registrar.registry().create_as::<Banner>("app-banner").unwrap();
/// assert_eq!(banner.text.as_str(), "Welcome");
/// ```
pub struct ComponentRegistrar<R> {
    container: Container,
    registry: R,
}

impl<R: ComponentRegistry> ComponentRegistrar<R> {
    /// Registrar resolving through `container` and defining into `registry`.
    pub fn new(container: Container, registry: R) -> Self {
        Self { container, registry }
    }

    /// Defines every registration in order, stopping at the first failure.
    ///
    /// A type without metadata fails with `MissingMetadata`; a parameter
    /// without a token fails with `InvalidToken`. Dependencies are
    /// resolved once, here.
    pub fn register(&mut self, registrations: impl IntoIterator<Item = ComponentRegistration>) -> DiResult<()> {
        for ComponentRegistration { class, name, options } in registrations {
            let tokens = dependency_tokens(&Provider::Class(class.clone()), self.container.supplier().as_ref())?;
            let arguments: Vec<AnyArc> = self.container.resolve_all(&tokens)?;
            tracing::debug!(component = %name, class = class.name(), dependencies = arguments.len(), "defining component");
            let factory = ComponentFactory {
                class,
                arguments: arguments.into(),
            };
            self.registry.define(&name, factory, options.as_ref())?;
        }
        Ok(())
    }

    /// The container dependencies are resolved through.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// The registry components are defined in.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Consumes the registrar, returning its registry.
    pub fn into_registry(self) -> R {
        self.registry
    }
}

/// In-process [`ComponentRegistry`] keyed by name.
///
/// Defining the same name twice is an error, as in host registries.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    definitions: HashMap<String, (ComponentFactory, Option<DefinitionOptions>)>,
}

impl MemoryRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The factory defined for `name`.
    pub fn get(&self, name: &str) -> Option<&ComponentFactory> {
        self.definitions.get(name).map(|(factory, _)| factory)
    }

    /// Options `name` was defined with.
    pub fn options(&self, name: &str) -> Option<&DefinitionOptions> {
        self.definitions.get(name).and_then(|(_, options)| options.as_ref())
    }

    /// Constructs a new `name` component.
    pub fn create_as<T: Any + Send + Sync>(&self, name: &str) -> DiResult<Arc<T>> {
        self.get(name)
            .ok_or_else(|| DiError::Construction(format!("no component is defined as {name}")))?
            .create_as()
    }

    /// Number of defined components.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether nothing has been defined.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ComponentRegistry for MemoryRegistry {
    fn define(&mut self, name: &str, factory: ComponentFactory, options: Option<&DefinitionOptions>) -> DiResult<()> {
        if self.definitions.contains_key(name) {
            return Err(DiError::Construction(format!("{name} has already been defined")));
        }
        self.definitions.insert(name.to_string(), (factory, options.cloned()));
        Ok(())
    }
}
