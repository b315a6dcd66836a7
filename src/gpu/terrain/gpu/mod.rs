mod allocator;
mod host;
mod device;
mod mirror;

pub use allocator::{BufferAllocator, BufferKind};
pub use host::{HostAllocator, HostBuffer};
pub use device::{WgpuAllocator, init_device};
pub use mirror::MeshMirror;
