// ============================================
// Terrain Vertex - Структура вершины
// ============================================
// Раскладка для GPU (совпадает побайтно с CPU массивом):
//   offset 0  : position Float32x3 (location 0)
//   offset 12 : normal   Float32x3 (location 1)
//   stride 24, выравнивание 4, без паддинга

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Default)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Нормаль плоского меша
pub const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Размер вершины в байтах
pub const VERTEX_STRIDE: u64 = std::mem::size_of::<TerrainVertex>() as u64;

impl TerrainVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: VERTEX_STRIDE as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }

    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Вершина плоского меша
    pub fn flat(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z], normal: UP }
    }
}
