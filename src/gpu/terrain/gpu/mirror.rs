// ============================================
// Mesh Mirror - GPU копия вершин и индексов меша
// ============================================
// Размер зеркала фиксирован при выделении. При смене числа вершин
// движок выделяет новое зеркало и освобождает старое (swap), in-place
// resize не используется.

use crate::gpu::core::Result;
use crate::gpu::terrain::mesh::{TerrainVertex, VERTEX_STRIDE};
use super::allocator::{BufferAllocator, BufferKind};

const INDEX_STRIDE: u64 = std::mem::size_of::<u32>() as u64;

pub struct MeshMirror<H> {
    vertex_buffer: H,
    index_buffer: H,
    vertex_count: u32,
    index_count: u32,
    /// Сколько байт вершинного буфера совпадает с CPU массивом
    valid_bytes: u64,
    synced: bool,
}

impl<H> MeshMirror<H> {
    /// Выделить буферы под меш; при ошибке ничего не остаётся выделенным
    pub fn allocate<A>(allocator: &mut A, vertex_count: u32, index_count: u32) -> Result<Self>
    where
        A: BufferAllocator<Handle = H>,
    {
        let vertex_bytes = vertex_count as u64 * VERTEX_STRIDE;
        let index_bytes = index_count as u64 * INDEX_STRIDE;

        let vertex_buffer = allocator.allocate("Terrain Vertices", vertex_bytes, BufferKind::Vertex)?;
        let index_buffer = match allocator.allocate("Terrain Indices", index_bytes, BufferKind::Index) {
            Ok(buffer) => buffer,
            Err(e) => {
                allocator.release(vertex_buffer);
                return Err(e);
            }
        };

        log::debug!(
            "Terrain mirror allocated: {} vertices ({} bytes), {} indices",
            vertex_count, vertex_bytes, index_count
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            vertex_count,
            index_count,
            valid_bytes: 0,
            synced: false,
        })
    }

    /// Записать CPU массивы в зеркало целиком
    pub fn upload<A>(&mut self, allocator: &mut A, vertices: &[TerrainVertex], indices: &[u32]) -> Result<()>
    where
        A: BufferAllocator<Handle = H>,
    {
        debug_assert_eq!(vertices.len(), self.vertex_count as usize);
        debug_assert_eq!(indices.len(), self.index_count as usize);

        allocator.write(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices))?;
        allocator.write(&self.index_buffer, 0, bytemuck::cast_slice(indices))?;

        self.valid_bytes = vertices.len() as u64 * VERTEX_STRIDE;
        self.synced = true;
        Ok(())
    }

    /// CPU массивы изменились, содержимое зеркала устарело
    pub fn mark_stale(&mut self) {
        self.synced = false;
    }

    pub fn release<A>(self, allocator: &mut A)
    where
        A: BufferAllocator<Handle = H>,
    {
        allocator.release(self.vertex_buffer);
        allocator.release(self.index_buffer);
    }

    pub fn vertex_buffer(&self) -> &H {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &H {
        &self.index_buffer
    }

    pub fn valid_bytes(&self) -> u64 {
        self.valid_bytes
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }
}
