//! Graph vertices: a provider plus its instance slot.

use std::fmt;

use crate::class::{AnyArc, ClassType};
use crate::lifetime::Lifetime;
use crate::registration::Provider;
use crate::token::Token;

/// A provider in an injector's dependency graph.
///
/// Token and lifetime are derived from the provider. The instance slot is
/// empty until the vertex is first resolved, and stays empty for Transient
/// class vertices.
#[derive(Clone)]
pub struct Vertex {
    provider: Provider,
    instance: Option<AnyArc>,
}

impl Vertex {
    /// Creates an uninstantiated vertex.
    pub fn new(provider: impl Into<Provider>) -> Self {
        Self {
            provider: provider.into(),
            instance: None,
        }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// The injection token.
    pub fn token(&self) -> &Token {
        self.provider.token()
    }

    /// The provider's lifetime.
    pub fn lifetime(&self) -> Lifetime {
        self.provider.lifetime()
    }

    /// The underlying constructible type, `None` for plain values.
    pub fn class_type(&self) -> Option<&ClassType> {
        self.provider.class_type()
    }

    /// Whether the provider binds a plain value.
    pub fn is_value(&self) -> bool {
        self.provider.value().is_some()
    }

    /// The cached instance, if any.
    pub fn instance(&self) -> Option<&AnyArc> {
        self.instance.as_ref()
    }

    /// Whether an instance is cached on this vertex.
    pub fn is_instantiated(&self) -> bool {
        self.instance.is_some()
    }

    pub(crate) fn store(&mut self, instance: AnyArc) {
        self.instance = Some(instance);
    }
}

impl From<Provider> for Vertex {
    fn from(provider: Provider) -> Self {
        Vertex::new(provider)
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("token", self.token())
            .field("lifetime", &self.lifetime())
            .field("instantiated", &self.is_instantiated())
            .finish()
    }
}
