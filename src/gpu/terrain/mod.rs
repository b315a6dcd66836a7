// ============================================
// Terrain Module - Процедурный height-field меш
// ============================================

pub mod generation;
pub mod mesh;
pub mod gpu;
pub mod budget;
mod engine;

// Re-exports
pub use mesh::{TerrainVertex, VERTEX_STRIDE};
pub use engine::{Terrain, TerrainMode, MeshChange};
pub use generation::{FalloffMask, HeightParams};
pub use gpu::{BufferAllocator, HostAllocator, WgpuAllocator};
