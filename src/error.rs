//! Error types for the dependency injection container.

use thiserror::Error;

/// Dependency injection errors
///
/// Every variant is a programmer or configuration error: resolution is
/// deterministic for a fixed set of providers, so retrying without changing
/// the bindings reproduces the same error.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Container, DiError, Resolve, Token};
///
/// let container = Container::create(Vec::<ferrous_injector::Provider>::new());
/// let token = Token::new("database url");
///
/// match container.resolve::<String>(&token) {
///     Err(DiError::MissingProvider(description)) => assert_eq!(description, "database url"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use ferrous_injector::DiError;
///
/// let conflict = DiError::LifetimeConflict {
///     dependent: "UserService".to_string(),
///     dependencies: vec!["RequestClock".to_string()],
/// };
/// assert_eq!(
///     conflict.to_string(),
///     "UserService has a Singleton lifetime but its dependencies RequestClock have Transient lifetimes"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiError {
    /// A token that cannot identify any binding was used (empty id, or an
    /// unfilled constructor parameter)
    #[error("Invalid injection token: {0}")]
    InvalidToken(String),
    /// The requested token, or one it transitively requires, has no vertex
    #[error("Injector does not have provider for {0}.")]
    MissingProvider(String),
    /// A constructible type has no dependency declaration
    #[error("Missing injection metadata for {0}. Did you forget to declare it injectable?")]
    MissingMetadata(String),
    /// A Singleton vertex depends directly on Transient vertices
    #[error(
        "{dependent} has a Singleton lifetime but its dependencies {} have Transient lifetimes",
        .dependencies.join(", ")
    )]
    LifetimeConflict {
        /// Description of the Singleton vertex
        dependent: String,
        /// Descriptions of its Transient dependencies
        dependencies: Vec<String>,
    },
    /// The computed order omits a dependency that instantiation needs.
    ///
    /// This indicates a bug in graph construction, never a user error.
    #[error("Resolution order is inconsistent: {0}")]
    ResolutionOrder(String),
    /// A provider or a constructed value could not be built
    #[error("Construction failed: {0}")]
    Construction(String),
    /// Downcast of a resolved instance failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),
    /// Maximum dependency chain depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// Container configuration could not be read
    #[error("Configuration error: {0}")]
    Config(String),
    /// Dependency graph could not be exported
    #[error("Graph export failed: {0}")]
    Export(String),
}

impl DiError {
    /// Returns `true` for errors that indicate a defect in the injector
    /// itself rather than in the caller's bindings.
    pub fn is_internal(&self) -> bool {
        matches!(self, DiError::ResolutionOrder(_))
    }
}

/// Result type for DI operations
///
/// A convenience alias for `Result<T, DiError>` used throughout ferrous-injector.
pub type DiResult<T> = Result<T, DiError>;
