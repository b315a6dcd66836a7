// ============================================
// Host Allocator - Буферы в оперативной памяти
// ============================================
// Для headless режима и тестов: то же поведение, что у GPU аллокатора,
// плюс доступ к содержимому и опциональный лимит байт.

use std::collections::HashMap;

use crate::gpu::core::{Result, TerrainError};
use super::allocator::{BufferAllocator, BufferKind};

/// Handle буфера в памяти хоста
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct HostBuffer {
    id: u64,
    kind: BufferKind,
}

impl HostBuffer {
    pub fn kind(&self) -> BufferKind {
        self.kind
    }
}

#[derive(Debug, Default)]
pub struct HostAllocator {
    buffers: HashMap<u64, Vec<u8>>,
    next_id: u64,
    /// Лимит суммарного размера живых буферов
    byte_budget: Option<u64>,
    allocated: u64,
}

impl HostAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Аллокатор с ограничением памяти
    pub fn with_budget(bytes: u64) -> Self {
        Self {
            byte_budget: Some(bytes),
            ..Self::default()
        }
    }

    /// Содержимое буфера
    pub fn contents(&self, handle: &HostBuffer) -> Option<&[u8]> {
        self.buffers.get(&handle.id).map(|b| b.as_slice())
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn allocated_bytes(&self) -> u64 {
        self.allocated
    }
}

impl BufferAllocator for HostAllocator {
    type Handle = HostBuffer;

    fn allocate(&mut self, label: &str, size: u64, kind: BufferKind) -> Result<HostBuffer> {
        if let Some(budget) = self.byte_budget {
            if self.allocated.saturating_add(size) > budget {
                return Err(TerrainError::Allocation {
                    label: label.to_string(),
                    size,
                    reason: format!(
                        "host budget of {} bytes exhausted ({} in use)",
                        budget, self.allocated
                    ),
                });
            }
        }

        let len = usize::try_from(size).map_err(|_| TerrainError::Allocation {
            label: label.to_string(),
            size,
            reason: "size does not fit in host memory".into(),
        })?;

        let id = self.next_id;
        self.next_id += 1;
        self.buffers.insert(id, vec![0u8; len]);
        self.allocated += size;
        log::trace!("Host {:?} buffer '{}' #{} allocated: {} bytes", kind, label, id, size);

        Ok(HostBuffer { id, kind })
    }

    fn write(&mut self, handle: &HostBuffer, offset: u64, bytes: &[u8]) -> Result<()> {
        let buffer = self
            .buffers
            .get_mut(&handle.id)
            .ok_or(TerrainError::ReleasedBuffer { id: handle.id })?;

        let size = buffer.len() as u64;
        let end = offset.checked_add(bytes.len() as u64);
        match end {
            Some(end) if end <= size => {
                buffer[offset as usize..end as usize].copy_from_slice(bytes);
                Ok(())
            }
            _ => Err(TerrainError::BufferOverflow {
                offset,
                len: bytes.len() as u64,
                size,
            }),
        }
    }

    fn release(&mut self, handle: HostBuffer) {
        if let Some(buffer) = self.buffers.remove(&handle.id) {
            self.allocated -= buffer.len() as u64;
        }
    }

    fn size(&self, handle: &HostBuffer) -> u64 {
        self.buffers.get(&handle.id).map_or(0, |b| b.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_write_release() {
        let mut alloc = HostAllocator::new();
        let buf = alloc.allocate("test", 8, BufferKind::Vertex).unwrap();
        assert_eq!(alloc.size(&buf), 8);

        alloc.write(&buf, 4, &[1, 2, 3, 4]).unwrap();
        assert_eq!(alloc.contents(&buf).unwrap(), &[0, 0, 0, 0, 1, 2, 3, 4]);

        alloc.release(buf);
        assert_eq!(alloc.live_buffers(), 0);
        assert_eq!(alloc.allocated_bytes(), 0);
    }

    #[test]
    fn test_write_overflow() {
        let mut alloc = HostAllocator::new();
        let buf = alloc.allocate("small", 4, BufferKind::Index).unwrap();
        let err = alloc.write(&buf, 2, &[0; 4]).unwrap_err();
        assert!(matches!(err, TerrainError::BufferOverflow { size: 4, .. }));
    }

    #[test]
    fn test_write_after_release() {
        let mut alloc = HostAllocator::new();
        let buf = alloc.allocate("gone", 8, BufferKind::Vertex).unwrap();
        let stale = HostBuffer { id: buf.id, kind: buf.kind() };
        alloc.release(buf);

        let err = alloc.write(&stale, 0, &[1, 2]).unwrap_err();
        assert!(matches!(err, TerrainError::ReleasedBuffer { id: 0 }));
        assert_eq!(alloc.size(&stale), 0);
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut alloc = HostAllocator::with_budget(16);
        let a = alloc.allocate("a", 12, BufferKind::Vertex).unwrap();
        assert!(alloc.allocate("b", 8, BufferKind::Vertex).is_err());
        alloc.release(a);
        assert!(alloc.allocate("b", 8, BufferKind::Vertex).is_ok());
    }
}
