//! Constructible types: recipes that build an instance from resolved
//! positional dependencies.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::token::{short_type_name, Token};

/// Type-erased Arc for storage
pub type AnyArc = Arc<dyn Any + Send + Sync>;

type Ctor = Arc<dyn Fn(&mut Arguments<'_>) -> DiResult<AnyArc> + Send + Sync>;

/// A type that can be constructed from its resolved dependencies.
///
/// The dependencies arrive in declared positional order; which tokens fill
/// those positions is declared separately through a
/// [`MetadataSupplier`](crate::MetadataSupplier).
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Arguments, Constructible, DiResult};
/// use std::sync::Arc;
///
/// struct Config { url: String }
/// struct Database { config: Arc<Config> }
///
/// impl Constructible for Database {
///     fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
///         Ok(Database { config: args.next()? })
///     }
/// }
/// ```
pub trait Constructible: Any + Send + Sync + Sized {
    /// Builds an instance from positional arguments.
    fn construct(args: &mut Arguments<'_>) -> DiResult<Self>;
}

/// Handle to a constructible type.
///
/// Cheap to clone. Its identity (and its [`Token`]) is the `TypeId` of the
/// type it builds.
#[derive(Clone)]
pub struct ClassType {
    type_id: TypeId,
    token: Token,
    full_name: &'static str,
    ctor: Ctor,
}

impl ClassType {
    /// Class handle for a [`Constructible`] type.
    pub fn of<T: Constructible>() -> Self {
        Self::from_fn::<T, _>(T::construct)
    }

    /// Class handle for `T` built by a closure instead of a trait impl.
    ///
    /// Registering two handles for the same `T` yields the same token, so
    /// only one of them can be bound per injector.
    pub fn from_fn<T, F>(ctor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut Arguments<'_>) -> DiResult<T> + Send + Sync + 'static,
    {
        let full_name = std::any::type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            token: Token::for_type(TypeId::of::<T>(), short_type_name(full_name)),
            full_name,
            ctor: Arc::new(move |args: &mut Arguments<'_>| -> DiResult<AnyArc> {
                Ok(Arc::new(ctor(args)?))
            }),
        }
    }

    /// The type-derived token for this class.
    #[inline]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// `TypeId` of the constructed type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Short type name.
    pub fn name(&self) -> &str {
        self.token.description()
    }

    /// Full `type_name` including the module path.
    pub fn full_name(&self) -> &'static str {
        self.full_name
    }

    /// Invokes the constructor with already-resolved dependency instances.
    pub fn construct(&self, dependencies: &[AnyArc]) -> DiResult<AnyArc> {
        let mut args = Arguments::new(self.name(), dependencies);
        (self.ctor)(&mut args)
    }
}

impl fmt::Debug for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassType").field(&self.full_name).finish()
    }
}

impl PartialEq for ClassType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ClassType {}

/// Positional dependency instances handed to a constructor.
pub struct Arguments<'a> {
    owner: &'a str,
    values: &'a [AnyArc],
    cursor: usize,
}

impl<'a> Arguments<'a> {
    pub(crate) fn new(owner: &'a str, values: &'a [AnyArc]) -> Self {
        Self { owner, values, cursor: 0 }
    }

    /// Takes the next positional argument and downcasts it to `T`.
    pub fn next<T: Any + Send + Sync>(&mut self) -> DiResult<Arc<T>> {
        let value = self.get(self.cursor)?;
        self.cursor += 1;
        Ok(value)
    }

    /// Downcasts the argument at `index` without moving the cursor.
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> DiResult<Arc<T>> {
        let any = self.values.get(index).ok_or_else(|| {
            DiError::Construction(format!(
                "{} expected an argument at position {} but only {} were declared",
                self.owner,
                index,
                self.values.len()
            ))
        })?;
        any.clone()
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// The untyped argument at `index`.
    pub fn raw(&self, index: usize) -> Option<&AnyArc> {
        self.values.get(index)
    }

    /// Number of declared arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no arguments were declared.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arguments not yet taken with [`next`](Self::next).
    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        left: Arc<u32>,
        right: Arc<String>,
    }

    impl Constructible for Pair {
        fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
            Ok(Pair { left: args.next()?, right: args.next()? })
        }
    }

    #[test]
    fn constructs_from_positional_arguments() {
        let class = ClassType::of::<Pair>();
        let args: Vec<AnyArc> = vec![Arc::new(3u32), Arc::new("x".to_string())];

        let pair = class.construct(&args).unwrap().downcast::<Pair>().unwrap();
        assert_eq!(*pair.left, 3);
        assert_eq!(*pair.right, "x");
        assert_eq!(class.name(), "Pair");
    }

    #[test]
    fn wrong_argument_type_is_a_mismatch() {
        let class = ClassType::of::<Pair>();
        let args: Vec<AnyArc> = vec![Arc::new("x".to_string()), Arc::new(3u32)];

        assert!(matches!(class.construct(&args), Err(DiError::TypeMismatch(_))));
    }

    #[test]
    fn missing_argument_is_a_construction_error() {
        let class = ClassType::of::<Pair>();
        let args: Vec<AnyArc> = vec![Arc::new(3u32)];

        match class.construct(&args) {
            Err(DiError::Construction(msg)) => assert!(msg.contains("Pair")),
            other => panic!("expected construction error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn class_token_matches_type_token() {
        assert_eq!(ClassType::of::<Pair>().token(), &Token::of::<Pair>());
    }
}
