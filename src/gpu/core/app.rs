// ============================================
// App - Headless запуск генератора террейна
// ============================================
// terramesh [config.json] [size] [commands]
//   config.json - параметры TerrainConfig (по умолчанию встроенные)
//   size        - ширина и длина стартовой сетки (по умолчанию DEMO_SIZE)
//   commands    - скрипт команд, например "bttg" (по умолчанию DEFAULT_SCRIPT)

use crate::gpu::core::{Result, TerrainCommand, TerrainConfig, TerrainError};
use crate::gpu::terrain::gpu::{init_device, WgpuAllocator};
use crate::gpu::terrain::{Terrain, TerrainVertex};

/// Стартовый размер острова, если size не задан
pub const DEMO_SIZE: u32 = 32;

/// Плоский меш, две тесселяции, рост
pub const DEFAULT_SCRIPT: &str = "bttg";

/// Аргументы командной строки
#[derive(Debug, Default, PartialEq)]
pub struct RunArgs {
    pub config_path: Option<String>,
    pub size: Option<u32>,
    pub script: Option<String>,
}

impl RunArgs {
    /// Стартовая сетка size x size
    pub fn grid_size(&self) -> u32 {
        self.size.unwrap_or(DEMO_SIZE)
    }

    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            if arg.ends_with(".json") && parsed.config_path.is_none() {
                parsed.config_path = Some(arg);
            } else if let (None, Ok(size)) = (parsed.size, arg.parse::<u32>()) {
                parsed.size = Some(size);
            } else if parsed.script.is_none() {
                parsed.script = Some(arg);
            }
        }
        parsed
    }
}

/// Запуск генератора
pub fn run() -> Result<()> {
    env_logger::init();

    let args = RunArgs::parse(std::env::args().skip(1));
    let config = match &args.config_path {
        Some(path) => TerrainConfig::load_from_file(path)?,
        None => TerrainConfig::default(),
    };
    let script = args.script.as_deref().unwrap_or(DEFAULT_SCRIPT);

    let (device, queue) = pollster::block_on(init_device())?;
    let allocator = WgpuAllocator::new(device, queue);
    let size = args.grid_size();
    let mut terrain = Terrain::init_falloff(allocator, size, size, config)?;

    let layout = TerrainVertex::desc();
    log::info!(
        "Vertex layout: stride {} bytes, {} attributes",
        layout.array_stride,
        layout.attributes.len()
    );

    for command in TerrainCommand::parse_script(script) {
        command.apply(&mut terrain)?;
        log::info!(
            "{:?}: {}x{} grid, {} vertices, {} indices, tier {}",
            command,
            terrain.width(),
            terrain.length(),
            terrain.get_verticies(),
            terrain.index_count(),
            terrain.detail_tier()
        );
    }

    // Рендерер читает буфер только после синхронизации
    if !terrain.is_synced() {
        terrain.update_buffer()?;
    }
    terrain.allocator().queue().submit(std::iter::empty());
    terrain
        .allocator()
        .device()
        .poll(wgpu::PollType::Wait)
        .map_err(|e| TerrainError::Device(e.to_string()))?;

    log::info!(
        "Terrain ready: {} vertices, {} bytes on GPU",
        terrain.get_verticies(),
        terrain.mirror_len()
    );
    Ok(())
}
