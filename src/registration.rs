//! Provider types: bindings from tokens to values or constructible types.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::class::{AnyArc, ClassType, Constructible};
use crate::error::{DiError, DiResult};
use crate::lifetime::Lifetime;
use crate::token::Token;

/// What an explicit provider hands out in exchange for its token.
#[derive(Clone)]
pub enum Binding {
    /// A plain value returned verbatim. Has no dependencies.
    Value(AnyArc),
    /// A type constructed from its declared dependencies.
    Class(ClassType),
}

impl Binding {
    /// Wraps a plain value.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Binding::Value(Arc::new(value))
    }

    /// Binds a constructible type.
    pub fn class<T: Constructible>() -> Self {
        Binding::Class(ClassType::of::<T>())
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Value(_) => f.write_str("Value(..)"),
            Binding::Class(class) => f.debug_tuple("Class").field(class).finish(),
        }
    }
}

impl From<ClassType> for Binding {
    fn from(class: ClassType) -> Self {
        Binding::Class(class)
    }
}

/// Token-to-value exchange with a declared lifetime.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{ExplicitProvider, Lifetime, Token};
///
/// let port = Token::new("port");
/// let provider = ExplicitProvider::value(port.clone(), 8080u16);
/// assert_eq!(provider.token(), &port);
/// assert_eq!(provider.lifetime(), Lifetime::Singleton);
///
/// // The builder reports a missing token instead of producing a provider
/// assert!(ExplicitProvider::builder().value(1u8).build().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct ExplicitProvider {
    token: Token,
    binding: Binding,
    lifetime: Lifetime,
}

impl ExplicitProvider {
    /// Binds `token` to an arbitrary binding with Singleton lifetime.
    pub fn new(token: Token, binding: impl Into<Binding>) -> Self {
        Self {
            token,
            binding: binding.into(),
            lifetime: Lifetime::Singleton,
        }
    }

    /// Binds `token` to a plain value.
    pub fn value<T: Any + Send + Sync>(token: Token, value: T) -> Self {
        Self::new(token, Binding::value(value))
    }

    /// Binds `token` to a constructible type.
    pub fn class<T: Constructible>(token: Token) -> Self {
        Self::new(token, Binding::class::<T>())
    }

    /// Starts a builder that validates the token at build time.
    pub fn builder() -> ExplicitProviderBuilder {
        ExplicitProviderBuilder::default()
    }

    /// Sets the lifetime.
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Shorthand for `with_lifetime(Lifetime::Transient)`.
    pub fn transient(self) -> Self {
        self.with_lifetime(Lifetime::Transient)
    }

    /// The token this provider answers for.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The bound value or class.
    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// The declared lifetime.
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }
}

/// Builder for [`ExplicitProvider`]s assembled from optional parts, e.g.
/// when reading bindings from configuration.
#[derive(Default)]
pub struct ExplicitProviderBuilder {
    token: Option<Token>,
    binding: Option<Binding>,
    lifetime: Option<Lifetime>,
}

impl ExplicitProviderBuilder {
    /// Sets the token to exchange.
    pub fn token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets a plain value binding.
    pub fn value<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.binding = Some(Binding::value(value));
        self
    }

    /// Sets any binding.
    pub fn binding(mut self, binding: impl Into<Binding>) -> Self {
        self.binding = Some(binding.into());
        self
    }

    /// Sets the lifetime. Defaults to Singleton.
    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Builds the provider, failing fast when the token or binding is absent.
    pub fn build(self) -> DiResult<ExplicitProvider> {
        let binding = self.binding.ok_or_else(|| {
            DiError::Construction("ExplicitProvider value was not provided".to_string())
        })?;
        let token = self.token.ok_or_else(|| {
            DiError::Construction(format!(
                "ExplicitProvider token was not provided for value: {:?}",
                binding
            ))
        })?;
        Ok(ExplicitProvider {
            token,
            binding,
            lifetime: self.lifetime.unwrap_or_default(),
        })
    }
}

/// A binding known to the injector.
///
/// - **Class**: the type is both identity (via its type-derived token) and
///   recipe. Always Singleton.
/// - **Explicit**: an explicit token bound to a value or a type.
#[derive(Clone, Debug)]
pub enum Provider {
    /// The constructible type provides itself.
    Class(ClassType),
    /// Explicit token binding.
    Explicit(ExplicitProvider),
}

impl Provider {
    /// Class provider for `T`.
    pub fn class<T: Constructible>() -> Self {
        Provider::Class(ClassType::of::<T>())
    }

    /// The token this provider answers for.
    pub fn token(&self) -> &Token {
        match self {
            Provider::Class(class) => class.token(),
            Provider::Explicit(explicit) => explicit.token(),
        }
    }

    /// Declared (or implied) lifetime.
    pub fn lifetime(&self) -> Lifetime {
        match self {
            Provider::Class(_) => Lifetime::Singleton,
            Provider::Explicit(explicit) => explicit.lifetime(),
        }
    }

    /// The underlying constructible type, if this is not a plain value.
    pub fn class_type(&self) -> Option<&ClassType> {
        match self {
            Provider::Class(class) => Some(class),
            Provider::Explicit(ExplicitProvider { binding: Binding::Class(class), .. }) => Some(class),
            Provider::Explicit(ExplicitProvider { binding: Binding::Value(_), .. }) => None,
        }
    }

    /// The plain value, if this binds one.
    pub fn value(&self) -> Option<&AnyArc> {
        match self {
            Provider::Explicit(ExplicitProvider { binding: Binding::Value(value), .. }) => Some(value),
            _ => None,
        }
    }
}

impl From<ClassType> for Provider {
    fn from(class: ClassType) -> Self {
        Provider::Class(class)
    }
}

impl From<ExplicitProvider> for Provider {
    fn from(explicit: ExplicitProvider) -> Self {
        Provider::Explicit(explicit)
    }
}
