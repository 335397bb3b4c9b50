//! Graph storage.
//!
//! A _storage_ is the representation of the graph. It implements the traits
//! from the [`core`](crate::core) module and maintains the structural
//! invariants by construction, but it does not report _why_ a mutation was
//! rejected. That is the job of [`Graph`](crate::Graph), which validates
//! arguments, produces [errors](crate::core::GraphError) and re-checks
//! consistency after every change.
//!
//! The only storage is the [ordered adjacency map](adj_map), which keeps the
//! vertices and every adjacency set sorted.
//!
//! |                  | **[AdjMap]**    |
//! |------------------|-----------------|
//! | add vertex       | _O(log V)_      |
//! | add edge         | _O(log V)_      |
//! | get neighbors    | _O(d)_          |
//! | lookup vertex    | _O(log V)_      |
//! | lookup edge      | _O(log V)_      |
//! | remove vertex    | _O(d log V)_    |
//! | remove edge      | _O(log V)_      |
//! | space            | _O(V + E)_      |
//!
//! * _V_ – vertex count
//! * _E_ – edge count
//! * _d_ – vertex degree

pub mod adj_map;

#[doc(inline)]
pub use self::adj_map::AdjMap;
