//! Graph export for dependency visualization.
//!
//! Builds a [`DependencyGraph`] from a container's vertices and renders it
//! as DOT or Mermaid text. JSON and YAML output need the `graph-export`
//! feature.

use std::collections::HashMap;

#[cfg(feature = "graph-export")]
use serde::{Deserialize, Serialize};

use crate::descriptors::{VertexDescriptor, VertexKind};
use crate::error::{DiError, DiResult};
use crate::lifetime::Lifetime;

const FORMAT_VERSION: &str = "1.0.0";

/// A vertex, or a dependency token no vertex answers for.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub struct GraphNode {
    /// Identifier unique within one export
    pub id: String,
    /// Token description
    pub label: String,
    /// `value`, `class` or `missing`
    pub kind: String,
    /// Lifetime name, absent for missing nodes
    pub lifetime: Option<String>,
    /// Whether the vertex holds an instance
    pub instantiated: bool,
    /// Dependency labels in parameter order
    pub dependencies: Vec<String>,
}

/// A dependency from `from` on `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub struct GraphEdge {
    /// Dependent node id
    pub from: String,
    /// Dependency node id
    pub to: String,
    /// Constructor parameter position
    pub position: usize,
}

/// Counts and export details.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub struct GraphMetadata {
    pub vertex_count: usize,
    pub singleton_count: usize,
    pub transient_count: usize,
    pub instantiated_count: usize,
    /// Dependency tokens without a vertex
    pub missing_count: usize,
    pub has_circular_dependencies: bool,
    pub exported_at: String,
    pub version: String,
}

/// Complete dependency graph of one container.
///
/// # Examples
///
/// ```
/// use ferrous_injector::{Container, ExplicitProvider, ExportFormat, Token};
///
/// let container = Container::create([ExplicitProvider::value(Token::new("port"), 8080u16)]);
/// let graph = container.export_graph();
/// assert_eq!(graph.nodes.len(), 1);
///
/// let dot = graph.export(ExportFormat::Dot).unwrap();
/// assert!(dot.starts_with("digraph DependencyGraph {"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub metadata: GraphMetadata,
}

/// Export formats supported for dependency graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON for tooling (`graph-export` feature)
    Json,
    /// YAML for humans (`graph-export` feature)
    Yaml,
    /// DOT for Graphviz
    Dot,
    /// Mermaid for documentation
    Mermaid,
}

impl DependencyGraph {
    /// Builds the graph from vertex descriptors.
    ///
    /// Dependencies that no descriptor answers for become `missing` nodes.
    pub fn from_descriptors(descriptors: &[VertexDescriptor], has_circular_dependencies: bool) -> Self {
        let mut nodes = Vec::with_capacity(descriptors.len());
        let mut ids = HashMap::new();

        for descriptor in descriptors {
            let id = format!("n{}", nodes.len());
            ids.insert(descriptor.token.clone(), id.clone());
            nodes.push(GraphNode {
                id,
                label: descriptor.name().to_string(),
                kind: match descriptor.kind {
                    VertexKind::Value => "value".to_string(),
                    VertexKind::Class { .. } => "class".to_string(),
                },
                lifetime: Some(descriptor.lifetime.to_string()),
                instantiated: descriptor.instantiated,
                dependencies: descriptor
                    .dependencies
                    .iter()
                    .flatten()
                    .map(|t| t.description().to_string())
                    .collect(),
            });
        }

        let mut edges = Vec::new();
        let mut missing_count = 0;
        for descriptor in descriptors {
            let (Some(dependencies), Some(from)) = (&descriptor.dependencies, ids.get(&descriptor.token).cloned())
            else {
                continue;
            };
            for (position, dependency) in dependencies.iter().enumerate() {
                let to = match ids.get(dependency) {
                    Some(id) => id.clone(),
                    None => {
                        let id = format!("n{}", nodes.len());
                        nodes.push(GraphNode {
                            id: id.clone(),
                            label: dependency.description().to_string(),
                            kind: "missing".to_string(),
                            lifetime: None,
                            instantiated: false,
                            dependencies: Vec::new(),
                        });
                        ids.insert(dependency.clone(), id.clone());
                        missing_count += 1;
                        id
                    }
                };
                edges.push(GraphEdge {
                    from: from.clone(),
                    to,
                    position,
                });
            }
        }

        let count = |lifetime: Lifetime| descriptors.iter().filter(|d| d.lifetime == lifetime).count();
        let metadata = GraphMetadata {
            vertex_count: descriptors.len(),
            singleton_count: count(Lifetime::Singleton),
            transient_count: count(Lifetime::Transient),
            instantiated_count: descriptors.iter().filter(|d| d.instantiated).count(),
            missing_count,
            has_circular_dependencies,
            exported_at: timestamp(),
            version: FORMAT_VERSION.to_string(),
        };

        Self { nodes, edges, metadata }
    }

    /// Renders the graph in `format`.
    pub fn export(&self, format: ExportFormat) -> DiResult<String> {
        match format {
            ExportFormat::Json => self.to_json(),
            ExportFormat::Yaml => self.to_yaml(),
            ExportFormat::Dot => Ok(self.to_dot()),
            ExportFormat::Mermaid => Ok(self.to_mermaid()),
        }
    }

    #[cfg(feature = "graph-export")]
    fn to_json(&self) -> DiResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiError::Export(format!("JSON serialization failed: {e}")))
    }

    #[cfg(not(feature = "graph-export"))]
    fn to_json(&self) -> DiResult<String> {
        Err(DiError::Export("JSON export requires the `graph-export` feature".to_string()))
    }

    #[cfg(feature = "graph-export")]
    fn to_yaml(&self) -> DiResult<String> {
        serde_yaml::to_string(self).map_err(|e| DiError::Export(format!("YAML serialization failed: {e}")))
    }

    #[cfg(not(feature = "graph-export"))]
    fn to_yaml(&self) -> DiResult<String> {
        Err(DiError::Export("YAML export requires the `graph-export` feature".to_string()))
    }

    fn to_dot(&self) -> String {
        let mut output = String::new();
        output.push_str("digraph DependencyGraph {\n");
        output.push_str("  rankdir=TB;\n");
        output.push_str("  node [shape=box];\n\n");

        for node in &self.nodes {
            let (shape, color) = match (node.kind.as_str(), node.lifetime.as_deref()) {
                ("missing", _) => ("octagon", "lightcoral"),
                ("value", _) => ("ellipse", "white"),
                (_, Some("Transient")) => ("box", "lightyellow"),
                _ => ("box", "lightblue"),
            };
            let lifetime = node.lifetime.as_deref().unwrap_or("missing");
            output.push_str(&format!(
                "  \"{}\" [label=\"{}\\n({})\", shape={}, fillcolor={}, style=filled];\n",
                node.id,
                escape(&node.label),
                lifetime,
                shape,
                color
            ));
        }

        output.push('\n');
        for edge in &self.edges {
            output.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                edge.from, edge.to, edge.position
            ));
        }

        output.push_str("}\n");
        output
    }

    fn to_mermaid(&self) -> String {
        let mut output = String::new();
        output.push_str("graph TD\n");

        for node in &self.nodes {
            let label = escape(&node.label);
            let shape = match node.kind.as_str() {
                "value" => format!("{}([\"{}\"])", node.id, label),
                "missing" => format!("{}{{{{\"{}\"}}}}", node.id, label),
                _ => format!("{}[\"{}\"]", node.id, label),
            };
            output.push_str(&format!("  {}\n", shape));
        }

        for edge in &self.edges {
            output.push_str(&format!("  {} --> {}\n", edge.from, edge.to));
        }

        output.push_str("\n  classDef singleton fill:#e1f5fe\n");
        output.push_str("  classDef transient fill:#fff3e0\n");
        output.push_str("  classDef missing fill:#ffcdd2\n");

        for node in &self.nodes {
            let class = match (node.kind.as_str(), node.lifetime.as_deref()) {
                ("missing", _) => "missing",
                (_, Some("Transient")) => "transient",
                _ => "singleton",
            };
            output.push_str(&format!("  class {} {}\n", node.id, class));
        }

        output
    }
}

fn escape(label: &str) -> String {
    label.replace('"', "\\\"")
}

fn timestamp() -> String {
    #[cfg(feature = "graph-export")]
    {
        chrono::Utc::now().to_rfc3339()
    }
    #[cfg(not(feature = "graph-export"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
            .to_string()
    }
}
