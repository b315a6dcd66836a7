// ============================================
// Vertex Budget - Ограничение роста меша
// ============================================
// Тесселяция растёт как 4^n по числу вершин, поэтому каждая
// перестройка сначала проверяется по бюджету. Превышение не фатально:
// ошибка возвращается вызывающему, меш остаётся прежним.

use log::{debug, warn};

use crate::gpu::core::{Result, TerrainError};
use crate::gpu::terrain::mesh::VERTEX_STRIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBudget {
    max_vertices: u64,
}

impl VertexBudget {
    pub fn new(max_vertices: u64) -> Self {
        Self { max_vertices }
    }

    pub fn max_vertices(&self) -> u64 {
        self.max_vertices
    }

    /// Проверить запрос на `requested` вершин для операции `operation`
    pub fn check(&self, requested: u64, operation: &str) -> Result<()> {
        if requested > self.max_vertices {
            warn!(
                "{} rejected: {} vertices ({:.2} MiB) exceeds budget of {} vertices ({:.2} MiB)",
                operation,
                requested,
                mib(requested),
                self.max_vertices,
                mib(self.max_vertices)
            );
            return Err(TerrainError::VertexBudgetExceeded {
                requested,
                limit: self.max_vertices,
            });
        }

        debug!(
            "{}: {} vertices ({:.2} MiB), {:.1}% of budget",
            operation,
            requested,
            mib(requested),
            requested as f64 * 100.0 / self.max_vertices as f64
        );
        Ok(())
    }
}

/// Размер вершинного буфера в MiB
fn mib(vertices: u64) -> f64 {
    vertices as f64 * VERTEX_STRIDE as f64 / (1024.0 * 1024.0)
}
