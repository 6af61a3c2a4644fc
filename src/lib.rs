//! # ferrous-injector
//!
//! Provider-graph dependency injection for Rust: bind tokens to values or
//! constructible types, and let the injector work out the order in which
//! to build everything a requested token needs.
//!
//! ## Features
//!
//! - **Tokens**: type-derived, explicit-id or opaque identities for bindings
//! - **Lazy ordering**: dependency edges are discovered on first use and the
//!   instantiation order of each requested token is cached
//! - **Lifetimes**: Singleton (one per container) and Transient (fresh per resolution)
//! - **Child containers**: shadow some bindings, inherit the rest
//! - **Circular dependency detection**: cycles fail with the offending path
//! - **Diagnostics**: eager validation, vertex descriptors and graph export
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_injector::{
//!     Arguments, Constructible, Container, DiResult, ExplicitProvider, Injectable,
//!     InjectableRegistry, Provider, Resolve, Token,
//! };
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: Arc<String>,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! impl Constructible for Database {
//!     fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
//!         Ok(Database { url: args.next()? })
//!     }
//! }
//!
//! impl Constructible for UserService {
//!     fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
//!         Ok(UserService { db: args.next()? })
//!     }
//! }
//!
//! // Declare what each constructor takes
//! let url = Token::new("database url");
//! let metadata = InjectableRegistry::new()
//!     .with(Injectable::of::<Database>().inject(0, url.clone()))
//!     .with(Injectable::of::<UserService>().param::<Database>());
//!
//! // Bind and resolve
//! let container = Container::with_metadata(
//!     [
//!         Provider::class::<UserService>(),
//!         Provider::class::<Database>(),
//!         ExplicitProvider::value(url, "postgres://localhost".to_string()).into(),
//!     ],
//!     metadata,
//! );
//!
//! let users = container.resolve_class::<UserService>().unwrap();
//! assert_eq!(users.db.url.as_str(), "postgres://localhost");
//! ```
//!
//! ## Lifetimes
//!
//! - **Singleton**: created on first resolution and reused by the container
//!   that owns the vertex. Class providers are always Singleton.
//! - **Transient**: created on every resolution that needs it. A Singleton
//!   may not depend directly on a Transient; that is a `LifetimeConflict`.
//!
//! ## Child Containers
//!
//! ```rust
//! use ferrous_injector::{Container, ExplicitProvider, Resolve, Token};
//!
//! let greeting = Token::new("greeting");
//! let parent = Container::create([ExplicitProvider::value(greeting.clone(), "hello")]);
//! let child = parent.create_child_container(Vec::<ExplicitProvider>::new());
//!
//! // Unshadowed bindings are inherited
//! assert_eq!(*child.resolve::<&str>(&greeting).unwrap(), "hello");
//! ```
//!
//! ## Cargo Features
//!
//! - `parking-lot`: `parking_lot::Mutex` for the injector lock
//! - `ahash`: `ahash` hashing for internal maps
//! - `performance`: both of the above
//! - `config`: [`ContainerConfig`] read from JSON
//! - `graph-export`: JSON and YAML graph export

mod internal;

pub mod class;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod graph;
pub mod graph_export;
pub mod injector;
pub mod lifetime;
pub mod metadata;
pub mod observer;
pub mod options;
pub mod registrar;
pub mod registration;
pub mod token;
pub mod traits;
pub mod validation;

#[cfg(feature = "config")]
pub mod config;

pub use class::{AnyArc, Arguments, ClassType, Constructible};
pub use container::{Container, ContainerBuilder};
pub use descriptors::{VertexDescriptor, VertexKind};
pub use error::{DiError, DiResult};
pub use graph::{dependency_tokens, Graph, Vertex};
pub use graph_export::{DependencyGraph, ExportFormat, GraphEdge, GraphMetadata, GraphNode};
pub use injector::Injector;
pub use lifetime::Lifetime;
pub use metadata::{Injectable, InjectableRegistry, MetadataSupplier};
pub use observer::{LoggingObserver, ResolutionObserver};
pub use options::{InjectorOptions, DEFAULT_MAX_DEPTH};
pub use registrar::{
    ComponentFactory, ComponentRegistrar, ComponentRegistration, ComponentRegistry, DefinitionOptions,
    MemoryRegistry,
};
pub use registration::{Binding, ExplicitProvider, ExplicitProviderBuilder, Provider};
pub use token::{Token, TokenId};
pub use traits::{Resolve, ResolveCore};

#[cfg(feature = "config")]
pub use config::{ContainerConfig, ValueBinding};
