//! Dependency declarations for constructible types.
//!
//! The injector never inspects constructors. It asks a [`MetadataSupplier`]
//! for the ordered list of tokens a type's constructor depends on, once per
//! vertex, the first time that vertex's edges are needed.

use std::any::TypeId;
use std::collections::BTreeMap;
use std::fmt;

use crate::class::{ClassType, Constructible};
use crate::internal::HashMap;
use crate::token::Token;

/// Supplies constructor dependency declarations.
///
/// `None` means the type was never declared injectable. `Some(vec![])`
/// means it has no dependencies. Entries are positional and may be
/// sparse; a `None` entry is a parameter nobody declared a token for.
///
/// Closures with the matching signature implement this trait.
pub trait MetadataSupplier: Send + Sync {
    /// Ordered dependency tokens of `class`'s constructor.
    fn dependencies_of(&self, class: &ClassType) -> Option<Vec<Option<Token>>>;
}

impl<F> MetadataSupplier for F
where
    F: Fn(&ClassType) -> Option<Vec<Option<Token>>> + Send + Sync,
{
    fn dependencies_of(&self, class: &ClassType) -> Option<Vec<Option<Token>>> {
        self(class)
    }
}

#[derive(Clone, Debug)]
enum Param {
    Class(Token),
    Value,
}

/// Declaration that a type is injectable, with its constructor parameters.
///
/// Parameters are declared in positional order. Class-typed parameters are
/// back-filled with the parameter type's own token; explicitly injected
/// tokens always take precedence, whichever order the calls were made in.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Arguments, Constructible, DiResult, Injectable, Token};
/// use std::sync::Arc;
///
/// struct Database;
/// impl Constructible for Database {
///     fn construct(_: &mut Arguments<'_>) -> DiResult<Self> { Ok(Database) }
/// }
///
/// struct Repository { db: Arc<Database>, table: Arc<String> }
/// impl Constructible for Repository {
///     fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
///         Ok(Repository { db: args.next()?, table: args.next()? })
///     }
/// }
///
/// let table = Token::new("table name");
/// let decl = Injectable::of::<Repository>()
///     .param::<Database>()
///     .value_param()
///     .inject(1, table.clone());
///
/// assert_eq!(decl.tokens(), vec![Some(Token::of::<Database>()), Some(table)]);
/// ```
#[derive(Clone)]
pub struct Injectable {
    class: ClassType,
    params: Vec<Param>,
    injected: BTreeMap<usize, Token>,
}

impl Injectable {
    /// Starts a declaration for `T` with no parameters.
    pub fn of<T: Constructible>() -> Self {
        Self::for_class(ClassType::of::<T>())
    }

    /// Starts a declaration for an existing class handle.
    pub fn for_class(class: ClassType) -> Self {
        Self {
            class,
            params: Vec::new(),
            injected: BTreeMap::new(),
        }
    }

    /// Declares the next parameter as class-typed `D`.
    pub fn param<D: 'static>(mut self) -> Self {
        self.params.push(Param::Class(Token::of::<D>()));
        self
    }

    /// Declares the next parameter as a plain value with no class type.
    ///
    /// It stays unfilled unless a token is injected at its position.
    pub fn value_param(mut self) -> Self {
        self.params.push(Param::Value);
        self
    }

    /// Binds the parameter at `index` to an explicit token.
    pub fn inject(mut self, index: usize, token: Token) -> Self {
        self.injected.insert(index, token);
        self
    }

    /// The declared class.
    pub fn class(&self) -> &ClassType {
        &self.class
    }

    /// Number of constructor parameters.
    pub fn arity(&self) -> usize {
        let injected = self.injected.keys().next_back().map_or(0, |last| last + 1);
        self.params.len().max(injected)
    }

    /// Positional tokens after back-filling class-typed parameters.
    pub fn tokens(&self) -> Vec<Option<Token>> {
        (0..self.arity())
            .map(|index| match self.injected.get(&index) {
                Some(token) => Some(token.clone()),
                None => match self.params.get(index) {
                    Some(Param::Class(token)) => Some(token.clone()),
                    Some(Param::Value) | None => None,
                },
            })
            .collect()
    }
}

impl fmt::Debug for Injectable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injectable")
            .field("class", &self.class.name())
            .field("tokens", &self.tokens())
            .finish()
    }
}

/// Default [`MetadataSupplier`]: a registry of [`Injectable`] declarations
/// keyed by type.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Arguments, ClassType, Constructible, DiResult, Injectable, InjectableRegistry, MetadataSupplier};
///
/// struct Clock;
/// impl Constructible for Clock {
///     fn construct(_: &mut Arguments<'_>) -> DiResult<Self> { Ok(Clock) }
/// }
///
/// let registry = InjectableRegistry::new().with(Injectable::of::<Clock>());
/// assert_eq!(registry.dependencies_of(&ClassType::of::<Clock>()), Some(vec![]));
/// ```
#[derive(Default, Clone, Debug)]
pub struct InjectableRegistry {
    declarations: HashMap<TypeId, Injectable>,
}

impl InjectableRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration, replacing any earlier one for the same type.
    pub fn register(&mut self, declaration: Injectable) -> &mut Self {
        self.declarations.insert(declaration.class.type_id(), declaration);
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, declaration: Injectable) -> Self {
        self.register(declaration);
        self
    }

    /// Looks up the declaration for a class.
    pub fn get(&self, class: &ClassType) -> Option<&Injectable> {
        self.declarations.get(&class.type_id())
    }

    /// Whether `class` was declared injectable.
    pub fn contains(&self, class: &ClassType) -> bool {
        self.get(class).is_some()
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the registry holds no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl MetadataSupplier for InjectableRegistry {
    fn dependencies_of(&self, class: &ClassType) -> Option<Vec<Option<Token>>> {
        self.get(class).map(Injectable::tokens)
    }
}
