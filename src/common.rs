pub mod vertex_index_map;
pub mod visit_set;

pub use vertex_index_map::VertexIndexMap;
pub use visit_set::VisitSet;
