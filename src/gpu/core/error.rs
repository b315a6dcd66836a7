// ============================================
// Terrain Error - Ошибки движка террейна
// ============================================

use thiserror::Error;

/// Ошибки построения и изменения меша
#[derive(Debug, Error)]
pub enum TerrainError {
    /// Нулевая ширина или длина сетки
    #[error("invalid grid dimensions {width}x{length}: both must be positive")]
    InvalidDimensions { width: u32, length: u32 },

    /// Аллокатор не смог выделить буфер
    #[error("failed to allocate buffer '{label}' ({size} bytes): {reason}")]
    Allocation { label: String, size: u64, reason: String },

    /// Запись за пределы буфера
    #[error("write of {len} bytes at offset {offset} overflows buffer of {size} bytes")]
    BufferOverflow { offset: u64, len: u64, size: u64 },

    /// Handle указывает на уже освобождённый буфер
    #[error("buffer #{id} was released")]
    ReleasedBuffer { id: u64 },

    /// Тесселяция/рост до create_blank_mesh
    #[error("{operation} called on an uninitialized mesh; call create_blank_mesh first")]
    Uninitialized { operation: &'static str },

    /// Превышен бюджет вершин (меш не изменён)
    #[error("vertex budget exceeded: {requested} vertices requested, limit is {limit}")]
    VertexBudgetExceeded { requested: u64, limit: u64 },

    #[error("invalid terrain config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse terrain config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// GPU адаптер или устройство недоступны
    #[error("gpu device unavailable: {0}")]
    Device(String),
}

impl TerrainError {
    /// Ошибка не портит состояние меша, можно продолжать работу
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TerrainError::VertexBudgetExceeded { .. }
                | TerrainError::Uninitialized { .. }
                | TerrainError::Allocation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TerrainError>;
