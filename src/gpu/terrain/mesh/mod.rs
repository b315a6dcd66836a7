mod vertex;
pub mod grid;
pub mod normals;
pub mod tessellate;
pub mod grow;

pub use vertex::{TerrainVertex, UP, VERTEX_STRIDE};
