// ============================================
// Terrain Config - Параметры генерации террейна
// ============================================
// Data-driven: конфиг можно загрузить из JSON, отсутствующие поля
// берутся из значений по умолчанию

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{Result, TerrainError};

pub const DEFAULT_SEED: u64 = 12345;

/// Размер ячейки на исходном уровне детализации
pub const DEFAULT_CELL_SIZE: f32 = 1.0;

/// Потолок вершин: 4M вершин * 24 байта = 96 MiB
pub const DEFAULT_MAX_VERTICES: u64 = 4 * 1024 * 1024;

/// Верхняя граница max_vertices: число индексов (до 6 на вершину) влезает в u32
pub const MAX_VERTEX_LIMIT: u64 = (u32::MAX / 6) as u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: u64,
    /// Расстояние между соседними вершинами до тесселяции
    pub cell_size: f32,
    /// Высота плоского меша
    pub baseline: f32,
    /// Амплитуда первой октавы рельефа
    pub amplitude: f32,
    /// Частота первой октавы (в мировых единицах)
    pub frequency: f32,
    /// Множитель амплитуды на каждую следующую октаву
    pub persistence: f32,
    /// Множитель частоты на каждую следующую октаву
    pub lacunarity: f32,
    /// Крутизна спада маски к краю острова
    pub falloff_exponent: f32,
    /// Сдвиг начала спада (больше = плато шире)
    pub falloff_shift: f32,
    /// Сколько строк/столбцов добавляет grow_mesh
    pub growth_increment: u32,
    pub max_vertices: u64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            cell_size: DEFAULT_CELL_SIZE,
            baseline: 0.0,
            amplitude: 8.0,
            frequency: 0.05,
            persistence: 0.5,
            lacunarity: 2.0,
            falloff_exponent: 3.0,
            falloff_shift: 2.2,
            growth_increment: 1,
            max_vertices: DEFAULT_MAX_VERTICES,
        }
    }
}

impl TerrainConfig {
    /// Загрузить конфиг из JSON строки
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить конфиг из файла
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&content)?;
        log::info!("Terrain config loaded from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(TerrainError::InvalidConfig(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if !(self.falloff_exponent > 0.0 && self.falloff_shift > 0.0) {
            return Err(TerrainError::InvalidConfig(
                "falloff_exponent and falloff_shift must be positive".into(),
            ));
        }
        if !(self.frequency.is_finite() && self.amplitude.is_finite() && self.baseline.is_finite()) {
            return Err(TerrainError::InvalidConfig("height parameters must be finite".into()));
        }
        if !(self.persistence.is_finite() && self.lacunarity.is_finite()) {
            return Err(TerrainError::InvalidConfig(format!(
                "persistence and lacunarity must be finite, got {} and {}",
                self.persistence, self.lacunarity
            )));
        }
        if self.growth_increment == 0 {
            return Err(TerrainError::InvalidConfig("growth_increment must be at least 1".into()));
        }
        if self.max_vertices == 0 || self.max_vertices > MAX_VERTEX_LIMIT {
            return Err(TerrainError::InvalidConfig(format!(
                "max_vertices must be in 1..={}, got {}",
                MAX_VERTEX_LIMIT, self.max_vertices
            )));
        }
        Ok(())
    }
}
