pub mod diameter;
pub mod shortest_paths;

pub use diameter::{diameter, Diameter};
pub use shortest_paths::ShortestPaths;
