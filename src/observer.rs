//! Diagnostic observers for resolution events.
//!
//! Observers are notified synchronously from inside `resolve`, so keep
//! implementations lightweight.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::token::Token;

/// Observer trait for resolution events.
///
/// # Examples
///
/// ```
/// use ferrous_injector::{Container, DiError, ExplicitProvider, ResolutionObserver, Resolve, Token};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     seen: Mutex<Vec<String>>,
/// }
///
/// impl ResolutionObserver for Recorder {
///     fn resolving(&self, token: &Token) {
///         self.seen.lock().unwrap().push(format!("resolving {}", token));
///     }
///
///     fn resolved(&self, token: &Token, _duration: Duration) {
///         self.seen.lock().unwrap().push(format!("resolved {}", token));
///     }
/// }
///
/// let greeting = Token::new("greeting");
/// let recorder = Arc::new(Recorder::default());
/// let container = Container::builder()
///     .provider(ExplicitProvider::value(greeting.clone(), "hello"))
///     .observer(recorder.clone())
///     .build()
///     .unwrap();
///
/// container.resolve::<&str>(&greeting).unwrap();
/// assert_eq!(*recorder.seen.lock().unwrap(), vec!["resolving greeting", "resolved greeting"]);
/// ```
pub trait ResolutionObserver: Send + Sync {
    /// Called before a requested token is resolved.
    fn resolving(&self, token: &Token);

    /// Called after a requested token resolved successfully.
    ///
    /// `duration` covers ordering and instantiation of the whole closure.
    fn resolved(&self, token: &Token, duration: Duration);

    /// Called when resolution of a requested token failed.
    fn failed(&self, token: &Token, error: &DiError) {
        let _ = (token, error);
    }

    /// Called when a resolution order was computed and cached.
    ///
    /// Not called on cache hits.
    fn order_computed(&self, token: &Token, order: &[Token]) {
        let _ = (token, order);
    }
}

/// Registered observers, shared by a container and its children.
#[derive(Clone, Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn ResolutionObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn ResolutionObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn resolving(&self, token: &Token) {
        for observer in &self.observers {
            observer.resolving(token);
        }
    }

    pub(crate) fn resolved(&self, token: &Token, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(token, duration);
        }
    }

    pub(crate) fn failed(&self, token: &Token, error: &DiError) {
        for observer in &self.observers {
            observer.failed(token, error);
        }
    }

    pub(crate) fn order_computed(&self, token: &Token, order: &[Token]) {
        for observer in &self.observers {
            observer.order_computed(token, order);
        }
    }
}

/// Built-in observer that emits `tracing` events.
///
/// Resolution events are logged at `debug`, failures at `warn`.
///
/// # Examples
///
/// ```
/// use ferrous_injector::{Container, LoggingObserver};
/// use std::sync::Arc;
///
/// let container = Container::builder()
///     .observer(Arc::new(LoggingObserver::new()))
///     .build()
///     .unwrap();
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self::with_prefix("ferrous-injector")
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionObserver for LoggingObserver {
    fn resolving(&self, token: &Token) {
        tracing::debug!(prefix = %self.prefix, token = %token, "resolving");
    }

    fn resolved(&self, token: &Token, duration: Duration) {
        tracing::debug!(prefix = %self.prefix, token = %token, ?duration, "resolved");
    }

    fn failed(&self, token: &Token, error: &DiError) {
        tracing::warn!(prefix = %self.prefix, token = %token, %error, "resolution failed");
    }

    fn order_computed(&self, token: &Token, order: &[Token]) {
        tracing::debug!(
            prefix = %self.prefix,
            token = %token,
            order = ?order.iter().map(Token::description).collect::<Vec<_>>(),
            "resolution order cached"
        );
    }
}
