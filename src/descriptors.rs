//! Vertex descriptors for introspection and diagnostics.

use crate::graph::Vertex;
use crate::lifetime::Lifetime;
use crate::token::Token;

/// What a vertex hands out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexKind {
    /// A plain value.
    Value,
    /// A constructible type.
    Class {
        /// Short type name
        name: String,
        /// Full `type_name` including the module path
        type_name: &'static str,
    },
}

/// Snapshot of one vertex for debugging and graph export.
///
/// # Use Cases
///
/// - **Debugging**: inspect which tokens are bound and how
/// - **Health checks**: confirm which singletons were already built
/// - **Documentation**: feed [`DependencyGraph`](crate::DependencyGraph)
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Container, ExplicitProvider, Lifetime, Token, VertexKind};
///
/// let port = Token::new("port");
/// let container = Container::create([ExplicitProvider::value(port.clone(), 8080u16)]);
///
/// let descriptors = container.descriptors();
/// let descriptor = descriptors.iter().find(|d| d.token == port).unwrap();
/// assert_eq!(descriptor.kind, VertexKind::Value);
/// assert_eq!(descriptor.lifetime, Lifetime::Singleton);
/// assert_eq!(descriptor.dependencies, Some(vec![]));
/// assert!(!descriptor.instantiated);
/// ```
#[derive(Debug, Clone)]
pub struct VertexDescriptor {
    /// The token the vertex answers for
    pub token: Token,
    /// Declared lifetime
    pub lifetime: Lifetime,
    /// Value or constructible type
    pub kind: VertexKind,
    /// Whether the vertex currently holds an instance
    pub instantiated: bool,
    /// Dependency tokens in parameter order, `None` when metadata is
    /// missing or incomplete
    pub dependencies: Option<Vec<Token>>,
}

impl VertexDescriptor {
    pub(crate) fn describe(vertex: &Vertex, dependencies: Option<Vec<Token>>) -> Self {
        let kind = match vertex.class_type() {
            Some(class) => VertexKind::Class {
                name: class.name().to_string(),
                type_name: class.full_name(),
            },
            None => VertexKind::Value,
        };
        Self {
            token: vertex.token().clone(),
            lifetime: vertex.lifetime(),
            kind,
            instantiated: vertex.is_instantiated(),
            dependencies,
        }
    }

    /// Short description of the token.
    pub fn name(&self) -> &str {
        self.token.description()
    }

    /// Whether the vertex binds a constructible type.
    pub fn is_class(&self) -> bool {
        matches!(self.kind, VertexKind::Class { .. })
    }
}
