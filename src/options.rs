//! Injector options.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default limit on the length of a dependency chain.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Options shared by a container and every child created from it.
///
/// # Examples
///
/// ```
/// use ferrous_injector::InjectorOptions;
///
/// let options = InjectorOptions::default().max_depth(64).validate_on_build(true);
/// assert_eq!(options.max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InjectorOptions {
    /// Longest dependency chain the ordering walk follows before failing
    /// with `DepthExceeded`.
    pub max_depth: usize,
    /// Run [`validate`](crate::Container::validate) when a container is
    /// built from a [`ContainerBuilder`](crate::ContainerBuilder) and fail
    /// on the first error.
    pub validate_on_build: bool,
}

impl InjectorOptions {
    /// Sets [`max_depth`](Self::max_depth).
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets [`validate_on_build`](Self::validate_on_build).
    pub fn validate_on_build(mut self, validate: bool) -> Self {
        self.validate_on_build = validate;
        self
    }
}

impl Default for InjectorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            validate_on_build: false,
        }
    }
}
