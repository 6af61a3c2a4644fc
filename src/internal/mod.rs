//! Internal implementation details.

pub(crate) mod sync;

pub(crate) use sync::Lock;

/// Hash map used for injector state.
#[cfg(feature = "ahash")]
pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V>;
