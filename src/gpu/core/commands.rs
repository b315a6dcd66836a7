// ============================================
// Terrain Commands - Команды пользователя для меша
// ============================================
// Клавиши (или символы скрипта) -> операции движка. После каждой
// мутации зеркало синхронизируется, чтобы кадр видел актуальный буфер.

use crate::gpu::core::{Result, TerrainError};
use crate::gpu::terrain::gpu::BufferAllocator;
use crate::gpu::terrain::Terrain;

/// Действия, которые можно вызвать вводом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainCommand {
    /// B - пересоздать плоский меш
    Rebuild,
    /// T - тесселяция
    Tessellate,
    /// G - рост сетки
    Grow,
    /// U - принудительная синхронизация буфера
    Upload,
}

impl TerrainCommand {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'b' => Some(Self::Rebuild),
            't' => Some(Self::Tessellate),
            'g' => Some(Self::Grow),
            'u' => Some(Self::Upload),
            _ => None,
        }
    }

    /// Разобрать скрипт вида "ttg"; неизвестные символы пропускаются
    pub fn parse_script(script: &str) -> Vec<Self> {
        script
            .chars()
            .filter(|c| !c.is_whitespace())
            .filter_map(|c| {
                let command = Self::from_key(c);
                if command.is_none() {
                    log::warn!("Unknown terrain command key '{}'", c);
                }
                command
            })
            .collect()
    }

    /// Выполнить команду. Превышение бюджета только логируется,
    /// остальные ошибки возвращаются.
    pub fn apply<A: BufferAllocator>(self, terrain: &mut Terrain<A>) -> Result<()> {
        let result = match self {
            Self::Rebuild => Ok(terrain.create_blank_mesh()),
            Self::Tessellate => terrain.tesalate(),
            Self::Grow => terrain.grow_mesh(),
            Self::Upload => return terrain.update_buffer(),
        };

        match result {
            Ok(change) => {
                if change.needs_upload() {
                    terrain.update_buffer()?;
                }
                Ok(())
            }
            Err(e @ TerrainError::VertexBudgetExceeded { .. }) => {
                log::warn!("[TERRAIN] {:?} skipped: {}", self, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
