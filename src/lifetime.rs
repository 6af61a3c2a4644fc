//! Vertex lifetime definitions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifetimes controlling instance caching behavior
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Container, ExplicitProvider, Lifetime, Resolve, Token};
/// use std::sync::Arc;
///
/// let shared = Token::new("shared");
/// let fresh = Token::new("fresh");
///
/// let container = Container::create([
///     ExplicitProvider::value(shared.clone(), 7u32),
///     ExplicitProvider::value(fresh.clone(), 9u32).with_lifetime(Lifetime::Transient),
/// ]);
///
/// let a = container.resolve::<u32>(&shared).unwrap();
/// let b = container.resolve::<u32>(&shared).unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(*container.resolve::<u32>(&fresh).unwrap(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Lifetime {
    /// One instance per injector, created on first resolution and reused
    /// for the life of the owning injector.
    #[default]
    Singleton,
    /// A new instance on every resolution path that needs it. Never cached.
    Transient,
}

impl Lifetime {
    /// Name used in diagnostics and graph exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Singleton => "Singleton",
            Lifetime::Transient => "Transient",
        }
    }
}

impl std::fmt::Display for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
