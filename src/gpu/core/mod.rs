// ============================================
// Core Module - Конфигурация, ошибки, запуск
// ============================================

pub mod app;
mod config;
mod error;
mod commands;

pub use app::run;
pub use config::{TerrainConfig, DEFAULT_SEED, DEFAULT_CELL_SIZE, DEFAULT_MAX_VERTICES, MAX_VERTEX_LIMIT};
pub use error::{TerrainError, Result};
pub use commands::TerrainCommand;
