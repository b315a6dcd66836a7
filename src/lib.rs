pub mod gpu;

pub use gpu::core::{Result, TerrainCommand, TerrainConfig, TerrainError};
pub use gpu::terrain::{
    BufferAllocator, HostAllocator, MeshChange, Terrain, TerrainMode, TerrainVertex, WgpuAllocator,
};
