//! Core traits and types shared by the storage, the graph and the algorithms.
//!
//! The algorithms in [`algo`](crate::algo) are generic over the traits
//! defined here, so that they can run on any type that provides vertex
//! enumeration and neighbor lookup, not only on [`Graph`](crate::Graph).

pub mod consistency;
pub mod error;
pub mod facts;

mod base;

pub use base::*;
pub use error::{GraphError, InvalidArgumentKind};
