//! Core traits for the dependency injection container.

mod resolve;

pub use resolve::{Resolve, ResolveCore};
