// ============================================
// Buffer Allocator - Абстракция выделения GPU памяти
// ============================================
// Контракт: allocate(N байт) -> handle; write(handle, bytes) становится
// видимым GPU после синхронизации очереди. Буферы не меняют размер на
// месте: при росте меша выделяется новый, старый освобождается.

use crate::gpu::core::Result;

/// Назначение буфера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Vertex,
    Index,
}

impl BufferKind {
    pub fn usages(self) -> wgpu::BufferUsages {
        match self {
            BufferKind::Vertex => wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            BufferKind::Index => wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        }
    }
}

pub trait BufferAllocator {
    type Handle;

    /// Выделить буфер на `size` байт
    fn allocate(&mut self, label: &str, size: u64, kind: BufferKind) -> Result<Self::Handle>;

    /// Записать байты по смещению, заменяя прежнее содержимое
    fn write(&mut self, handle: &Self::Handle, offset: u64, bytes: &[u8]) -> Result<()>;

    /// Освободить буфер
    fn release(&mut self, handle: Self::Handle);

    /// Размер буфера в байтах
    fn size(&self, handle: &Self::Handle) -> u64;
}
