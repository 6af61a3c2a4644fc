//! Resolve traits: the contract exposed to code that builds objects
//! outside the injector.

use std::any::Any;
use std::sync::Arc;

use crate::class::{AnyArc, Constructible};
use crate::error::{DiError, DiResult};
use crate::token::Token;

/// Object-safe resolution of a token to a type-erased instance.
///
/// Implemented by [`Injector`](crate::Injector) and
/// [`Container`](crate::Container). Most callers use the generic methods
/// of [`Resolve`] instead.
pub trait ResolveCore: Send + Sync {
    /// Exchanges `token` for an instance.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The instance wrapped in `Arc<dyn Any>`
    /// * `Err(DiError)` - Invalid token, missing provider or metadata,
    ///   lifetime conflict, cycle, or constructor failure
    fn resolve_any(&self, token: &Token) -> DiResult<AnyArc>;
}

/// Typed resolution built on [`ResolveCore`].
///
/// # Examples
///
/// ```
/// use ferrous_injector::{Container, ExplicitProvider, Resolve, Token};
///
/// let greeting = Token::new("greeting");
/// let container = Container::create([ExplicitProvider::value(greeting.clone(), "hello".to_string())]);
///
/// let value = container.resolve::<String>(&greeting).unwrap();
/// assert_eq!(&*value, "hello");
/// assert!(container.resolve::<u32>(&greeting).is_err());
/// ```
pub trait Resolve: ResolveCore {
    /// Exchanges `token` for an instance of `T`.
    fn resolve<T: Any + Send + Sync>(&self, token: &Token) -> DiResult<Arc<T>> {
        self.resolve_any(token)?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Resolves the class provider of `T` through its type-derived token.
    fn resolve_class<T: Constructible>(&self) -> DiResult<Arc<T>> {
        self.resolve(&Token::of::<T>())
    }

    /// Resolves each token in order, stopping at the first failure.
    fn resolve_all(&self, tokens: &[Token]) -> DiResult<Vec<AnyArc>> {
        tokens.iter().map(|token| self.resolve_any(token)).collect()
    }
}

impl<R: ResolveCore + ?Sized> Resolve for R {}
