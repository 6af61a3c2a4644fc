//! Eager validation of an injector's graph.
//!
//! Resolution discovers configuration errors lazily, one requested token
//! at a time. Validation walks every vertex up front and reports all of
//! them at once without constructing anything.
//!
//! # Validation Rules
//!
//! - **Missing metadata**: a bound type the metadata supplier knows nothing about
//! - **Invalid tokens**: a constructor parameter without a usable token
//! - **Missing providers**: a dependency token with no vertex
//! - **Singleton → Transient**: a singleton that would capture transient instances
//! - **Circular dependencies**: vertices that depend on each other in a cycle

use crate::error::{DiError, DiResult};
use crate::graph::Graph;
use crate::injector::find_cycles;
use crate::lifetime::Lifetime;
use crate::metadata::MetadataSupplier;
use crate::token::Token;

/// Result of validating a graph.
///
/// # Examples
///
/// ```
/// use ferrous_injector::{Container, DiError, ExplicitProvider, Token};
///
/// let container = Container::create([ExplicitProvider::value(Token::new("port"), 8080u16)]);
/// let report = container.validate();
/// assert!(report.is_valid());
/// assert!(report.into_result().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<DiError>,
}

impl ValidationReport {
    /// Whether no errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors in discovery order, without duplicates.
    pub fn errors(&self) -> &[DiError] {
        &self.errors
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first error, if any.
    pub fn into_result(self) -> DiResult<()> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn push(&mut self, err: DiError) {
        if !self.errors.contains(&err) {
            self.errors.push(err);
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("no errors");
        }
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "- {}", err)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_graph(graph: &mut Graph, supplier: &dyn MetadataSupplier) -> ValidationReport {
    let mut report = ValidationReport::default();
    let tokens: Vec<Token> = graph.vertices().iter().map(|v| v.token().clone()).collect();

    for token in &tokens {
        let edges = match graph.edges_of(token.id(), supplier) {
            Ok(Some(edges)) => edges,
            Ok(None) => continue,
            Err(err) => {
                report.push(err);
                continue;
            }
        };

        let mut transient = Vec::new();
        for dependency in edges.iter() {
            match graph.get(dependency.id()) {
                None => report.push(DiError::MissingProvider(dependency.description().to_string())),
                Some(vertex) if vertex.lifetime() == Lifetime::Transient => {
                    transient.push(dependency.description().to_string())
                }
                Some(_) => {}
            }
        }

        // Already-built singletons are reused as they are.
        let Some(vertex) = graph.get(token.id()) else { continue };
        if vertex.lifetime() == Lifetime::Singleton && !vertex.is_instantiated() && !transient.is_empty() {
            report.push(DiError::LifetimeConflict {
                dependent: vertex.token().description().to_string(),
                dependencies: transient,
            });
        }
    }

    for cycle in find_cycles(graph) {
        report.push(DiError::Circular(cycle));
    }

    if !report.is_valid() {
        tracing::debug!(errors = report.len(), "graph validation found errors");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{Arguments, Constructible};
    use crate::metadata::{Injectable, InjectableRegistry};
    use crate::registration::{ExplicitProvider, Provider};

    struct Service;
    impl Constructible for Service {
        fn construct(_: &mut Arguments<'_>) -> DiResult<Self> {
            Ok(Service)
        }
    }

    #[test]
    fn empty_graph_is_valid() {
        let report = validate_graph(&mut Graph::new(), &InjectableRegistry::new());
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "no errors");
    }

    #[test]
    fn reports_every_problem() {
        let clock = Token::new("clock");
        let supplier = InjectableRegistry::new().with(Injectable::of::<Service>().inject(0, clock.clone()));
        let unknown = Token::new("unknown");
        let mut graph = Graph::from_providers([
            Provider::class::<Service>(),
            ExplicitProvider::class::<Service>(unknown.clone()).into(),
        ]);

        let report = validate_graph(&mut graph, &supplier);
        // Both vertices miss the same dependency; it is reported once.
        assert_eq!(report.errors(), &[DiError::MissingProvider("clock".to_string())]);
    }

    #[test]
    fn singleton_on_transient_is_a_conflict() {
        let clock = Token::new("clock");
        let supplier = InjectableRegistry::new().with(Injectable::of::<Service>().inject(0, clock.clone()));
        let mut graph = Graph::from_providers([
            Provider::class::<Service>(),
            ExplicitProvider::value(clock, 0u64).transient().into(),
        ]);

        let report = validate_graph(&mut graph, &supplier);
        assert_eq!(
            report.into_result(),
            Err(DiError::LifetimeConflict {
                dependent: "Service".to_string(),
                dependencies: vec!["clock".to_string()],
            })
        );
    }
}
