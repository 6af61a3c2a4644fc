//! Dependency ordering: depth-first post-order over a token's closure.

use crate::error::{DiError, DiResult};
use crate::graph::Graph;
use crate::internal::HashMap;
use crate::metadata::MetadataSupplier;
use crate::token::{Token, TokenId};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

struct OrderWalk<'a> {
    graph: &'a mut Graph,
    supplier: &'a dyn MetadataSupplier,
    max_depth: usize,
    marks: HashMap<TokenId, Mark>,
    path: Vec<Token>,
    order: Vec<Token>,
}

/// Computes the instantiation order for `root`: every transitive dependency
/// before its dependents, `root` last.
///
/// Fails with `MissingProvider` when any token in the closure has no
/// vertex, `Circular` on a dependency cycle and `DepthExceeded` when a
/// chain is longer than `max_depth`.
pub(crate) fn resolution_order(
    graph: &mut Graph,
    supplier: &dyn MetadataSupplier,
    max_depth: usize,
    root: &Token,
) -> DiResult<Vec<Token>> {
    let mut walk = OrderWalk {
        graph,
        supplier,
        max_depth,
        marks: HashMap::default(),
        path: Vec::new(),
        order: Vec::new(),
    };
    walk.visit(root)?;
    Ok(walk.order)
}

impl OrderWalk<'_> {
    fn visit(&mut self, token: &Token) -> DiResult<()> {
        match self.marks.get(token.id()) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => return Err(DiError::Circular(cycle_path(&self.path, token))),
            None => {}
        }
        if self.path.len() >= self.max_depth {
            return Err(DiError::DepthExceeded(self.max_depth));
        }

        let edges = self
            .graph
            .edges_of(token.id(), self.supplier)?
            .ok_or_else(|| DiError::MissingProvider(token.description().to_string()))?;
        // Order entries carry the vertex's own token, not the requesting one.
        let own = self
            .graph
            .get(token.id())
            .map(|v| v.token().clone())
            .unwrap_or_else(|| token.clone());

        self.marks.insert(own.id().clone(), Mark::InProgress);
        self.path.push(own.clone());
        for dependency in edges.iter() {
            self.visit(dependency)?;
        }
        self.path.pop();
        self.marks.insert(own.id().clone(), Mark::Done);
        self.order.push(own);
        Ok(())
    }
}

fn cycle_path(path: &[Token], repeated: &Token) -> Vec<String> {
    let start = path.iter().position(|t| t == repeated).unwrap_or(0);
    path[start..]
        .iter()
        .chain(std::iter::once(repeated))
        .map(|t| t.description().to_string())
        .collect()
}

/// Finds dependency cycles among already discovered edges.
///
/// Each cycle is reported once, as the path from its first vertex back to
/// itself. Vertices whose edges were never discovered and ids without a
/// vertex are treated as leaves.
pub(crate) fn find_cycles(graph: &Graph) -> Vec<Vec<String>> {
    fn visit(
        graph: &Graph,
        token: &Token,
        marks: &mut HashMap<TokenId, Mark>,
        path: &mut Vec<Token>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        match marks.get(token.id()) {
            Some(Mark::Done) => return,
            Some(Mark::InProgress) => {
                cycles.push(cycle_path(path, token));
                return;
            }
            None => {}
        }
        if !graph.contains(token.id()) {
            return;
        }
        marks.insert(token.id().clone(), Mark::InProgress);
        path.push(token.clone());
        if let Some(edges) = graph.discovered_edges(token.id()) {
            for dependency in edges.iter() {
                visit(graph, dependency, marks, path, cycles);
            }
        }
        path.pop();
        marks.insert(token.id().clone(), Mark::Done);
    }

    let mut marks = HashMap::default();
    let mut path = Vec::new();
    let mut cycles = Vec::new();
    for vertex in graph.vertices() {
        visit(graph, vertex.token(), &mut marks, &mut path, &mut cycles);
    }
    cycles
}
