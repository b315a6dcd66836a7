// ============================================
// Wgpu Allocator - Буферы на GPU через wgpu
// ============================================

use std::sync::Arc;

use crate::gpu::core::{Result, TerrainError};
use super::allocator::{BufferAllocator, BufferKind};

/// Аллокатор поверх wgpu устройства и очереди
pub struct WgpuAllocator {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl WgpuAllocator {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        Self { device, queue }
    }

    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    pub fn queue(&self) -> &Arc<wgpu::Queue> {
        &self.queue
    }
}

impl BufferAllocator for WgpuAllocator {
    type Handle = wgpu::Buffer;

    fn allocate(&mut self, label: &str, size: u64, kind: BufferKind) -> Result<wgpu::Buffer> {
        // Пустой индексный список всё равно получает буфер минимального размера
        let size = size.max(wgpu::COPY_BUFFER_ALIGNMENT);
        let limit = self.device.limits().max_buffer_size;
        if size > limit {
            return Err(TerrainError::Allocation {
                label: label.to_string(),
                size,
                reason: format!("exceeds device max_buffer_size of {} bytes", limit),
            });
        }

        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: kind.usages(),
            mapped_at_creation: false,
        });

        if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
            buffer.destroy();
            return Err(TerrainError::Allocation {
                label: label.to_string(),
                size,
                reason: err.to_string(),
            });
        }

        Ok(buffer)
    }

    fn write(&mut self, handle: &wgpu::Buffer, offset: u64, bytes: &[u8]) -> Result<()> {
        let size = handle.size();
        match offset.checked_add(bytes.len() as u64) {
            Some(end) if end <= size => {
                if !bytes.is_empty() {
                    self.queue.write_buffer(handle, offset, bytes);
                }
                Ok(())
            }
            _ => Err(TerrainError::BufferOverflow {
                offset,
                len: bytes.len() as u64,
                size,
            }),
        }
    }

    fn release(&mut self, handle: wgpu::Buffer) {
        handle.destroy();
    }

    fn size(&self, handle: &wgpu::Buffer) -> u64 {
        handle.size()
    }
}

/// Headless инициализация GPU устройства (без surface)
pub async fn init_device() -> Result<(Arc<wgpu::Device>, Arc<wgpu::Queue>)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| TerrainError::Device(e.to_string()))?;

    let info = adapter.get_info();
    log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("Terrain Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .map_err(|e| TerrainError::Device(e.to_string()))?;

    Ok((Arc::new(device), Arc::new(queue)))
}
