// ============================================
// GPU Module - Террейн с синхронизацией GPU буфера
// ============================================

pub mod terrain;
pub mod core;

pub use core::app::run;
