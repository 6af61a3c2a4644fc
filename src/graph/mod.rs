//! Provider graph: vertices plus lazily discovered dependency edges.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::internal::HashMap;
use crate::metadata::MetadataSupplier;
use crate::registration::Provider;
use crate::token::{Token, TokenId};

mod vertex;

pub use vertex::Vertex;

/// Dependency tokens of a provider, in constructor parameter order.
///
/// Plain values have none. Constructible types are looked up in the
/// supplier; a type it knows nothing about is a `MissingMetadata` error, and
/// a parameter without a usable token is an `InvalidToken` error.
pub fn dependency_tokens(provider: &Provider, supplier: &dyn MetadataSupplier) -> DiResult<Vec<Token>> {
    let Some(class) = provider.class_type() else {
        return Ok(Vec::new());
    };
    let declared = supplier
        .dependencies_of(class)
        .ok_or_else(|| DiError::MissingMetadata(class.name().to_string()))?;

    declared
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Some(token) if token.is_valid() => Ok(token),
            Some(token) => Err(DiError::InvalidToken(format!(
                "parameter {} of {} is bound to a token with an empty id ({})",
                index,
                class.name(),
                token.description()
            ))),
            None => Err(DiError::InvalidToken(format!(
                "parameter {} of {} has no injection token",
                index,
                class.name()
            ))),
        })
        .collect()
}

/// Vertices of one injector, unique by token id, plus their edges.
///
/// Insertion is idempotent on id collision: the first registration wins.
/// Edge lists are computed once per id and never removed.
#[derive(Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    index: HashMap<TokenId, usize>,
    edges: HashMap<TokenId, Arc<[Token]>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from providers, first registration winning.
    pub fn from_providers<P: Into<Provider>>(providers: impl IntoIterator<Item = P>) -> Self {
        let mut graph = Self::new();
        graph.extend(providers.into_iter().map(Vertex::new));
        graph
    }

    /// Adds a vertex unless its token id is already present.
    ///
    /// Returns whether the vertex was inserted.
    pub fn insert(&mut self, vertex: Vertex) -> bool {
        let id = vertex.token().id().clone();
        if self.index.contains_key(&id) {
            tracing::debug!(token = %vertex.token(), "ignoring duplicate vertex");
            return false;
        }
        self.index.insert(id, self.vertices.len());
        self.vertices.push(vertex);
        true
    }

    /// Adds every vertex whose id is not yet present. Returns how many were added.
    pub fn extend(&mut self, vertices: impl IntoIterator<Item = Vertex>) -> usize {
        let mut added = 0;
        for vertex in vertices {
            if self.insert(vertex) {
                added += 1;
            }
        }
        added
    }

    /// Whether a vertex exists for `id`.
    pub fn contains(&self, id: &TokenId) -> bool {
        self.index.contains_key(id)
    }

    /// Vertex for `id`.
    pub fn get(&self, id: &TokenId) -> Option<&Vertex> {
        self.index.get(id).map(|&i| &self.vertices[i])
    }

    pub(crate) fn get_mut(&mut self, id: &TokenId) -> Option<&mut Vertex> {
        match self.index.get(id) {
            Some(&i) => self.vertices.get_mut(i),
            None => None,
        }
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges already discovered for `id`, without consulting the supplier.
    pub fn discovered_edges(&self, id: &TokenId) -> Option<&Arc<[Token]>> {
        self.edges.get(id)
    }

    /// Dependency tokens of the vertex for `id`, discovering them on first use.
    ///
    /// Returns `Ok(None)` when the graph has no vertex for `id`.
    pub fn edges_of(
        &mut self,
        id: &TokenId,
        supplier: &dyn MetadataSupplier,
    ) -> DiResult<Option<Arc<[Token]>>> {
        if let Some(edges) = self.edges.get(id) {
            return Ok(Some(edges.clone()));
        }
        let Some(vertex) = self.get(id) else {
            return Ok(None);
        };
        let edges: Arc<[Token]> = dependency_tokens(vertex.provider(), supplier)?.into();
        self.edges.insert(id.clone(), edges.clone());
        Ok(Some(edges))
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertices)
            .field("discovered_edges", &self.edges.len())
            .finish()
    }
}
