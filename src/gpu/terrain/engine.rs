// ============================================
// Terrain Engine - Height-field меш с GPU зеркалом
// ============================================
// Жизненный цикл:
//   init / init_falloff  -> буферы выделены, меш не заполнен
//   create_blank_mesh    -> плоский меш на текущих размерах
//   tesalate / grow_mesh -> перестройка меша и реаллокация зеркала
//   update_buffer        -> синхронизация зеркала с CPU массивами
//
// Мутации не синхронизируют зеркало сами. Перестройка сначала собирает
// новые массивы и новое зеркало, и только потом подменяет состояние,
// поэтому ошибка посередине оставляет прежний валидный меш.

use crate::gpu::core::{Result, TerrainConfig, TerrainError};
use crate::gpu::terrain::budget::VertexBudget;
use crate::gpu::terrain::generation::{FalloffMask, FalloffParams, HeightParams};
use crate::gpu::terrain::gpu::{BufferAllocator, MeshMirror};
use crate::gpu::terrain::mesh::{grid, grow, normals, tessellate, TerrainVertex, UP, VERTEX_STRIDE};

/// Вариант террейна
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainMode {
    /// Рельеф без маски
    Standard,
    /// Рельеф спадает к краям (остров)
    Falloff,
}

/// Результат мутации меша
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshChange {
    pub previous_vertices: u32,
    pub vertices: u32,
    /// Зеркало было выделено заново
    pub reallocated: bool,
    dirty: bool,
}

impl MeshChange {
    /// Зеркало устарело, нужен update_buffer перед отрисовкой
    pub fn needs_upload(&self) -> bool {
        self.dirty
    }
}

/// Размеры и уровень детализации перестроенного меша
#[derive(Debug, Clone, Copy)]
struct Layout {
    width: u32,
    length: u32,
    cell_size: f32,
    tier: u32,
}

#[inline]
fn mask_at(mask: Option<&FalloffMask>, row: u32, col: u32) -> f32 {
    mask.map_or(1.0, |m| m.get(row, col))
}

pub struct Terrain<A: BufferAllocator> {
    allocator: A,
    config: TerrainConfig,
    height: HeightParams,
    falloff_params: FalloffParams,
    budget: VertexBudget,
    mode: TerrainMode,

    width: u32,
    length: u32,
    cell_size: f32,
    /// Число октав рельефа (0 = плоский меш)
    tier: u32,

    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
    /// Кэш маски для текущих (width, length), только в режиме Falloff
    falloff: Option<FalloffMask>,
    mirror: MeshMirror<A::Handle>,
    populated: bool,
}

impl<A: BufferAllocator> Terrain<A> {
    /// Террейн без маски спада
    pub fn init(allocator: A, width: u32, length: u32, config: TerrainConfig) -> Result<Self> {
        Self::build(allocator, width, length, config, TerrainMode::Standard)
    }

    /// Террейн с маской спада к краям
    pub fn init_falloff(allocator: A, width: u32, length: u32, config: TerrainConfig) -> Result<Self> {
        Self::build(allocator, width, length, config, TerrainMode::Falloff)
    }

    fn build(
        mut allocator: A,
        width: u32,
        length: u32,
        config: TerrainConfig,
        mode: TerrainMode,
    ) -> Result<Self> {
        if width == 0 || length == 0 {
            return Err(TerrainError::InvalidDimensions { width, length });
        }
        config.validate()?;

        let budget = VertexBudget::new(config.max_vertices);
        let count = grid::vertex_count(width, length);
        budget.check(count, "init")?;

        let indices = grid::build_indices(width, length);
        let mirror = MeshMirror::allocate(&mut allocator, count as u32, indices.len() as u32)?;

        let falloff_params = FalloffParams::from_config(&config);
        let falloff = match mode {
            TerrainMode::Falloff => Some(FalloffMask::generate(width, length, falloff_params)),
            TerrainMode::Standard => None,
        };

        log::info!(
            "Terrain created: {}x{} ({} vertices, {:?}, seed {})",
            width, length, count, mode, config.seed
        );

        Ok(Self {
            allocator,
            height: HeightParams::from_config(&config),
            falloff_params,
            budget,
            mode,
            width,
            length,
            cell_size: config.cell_size,
            tier: 0,
            vertices: vec![TerrainVertex::default(); count as usize],
            indices,
            falloff,
            mirror,
            populated: false,
            config,
        })
    }

    /// Заполнить сетку плоским мешем (высота baseline, нормали вверх).
    /// Размеры сохраняются, детализация сбрасывается. Можно вызывать повторно.
    pub fn create_blank_mesh(&mut self) -> MeshChange {
        let previous = self.get_verticies();
        self.cell_size = self.config.cell_size;
        self.tier = 0;
        self.falloff = self.mask_for(self.width, self.length);

        let vertices = self.sample_grid(self.width, self.length, self.cell_size, self.tier, self.falloff.as_ref());

        let unchanged = self.populated && self.mirror.is_synced() && vertices == self.vertices;
        self.vertices = vertices;
        self.populated = true;
        if !unchanged {
            self.mirror.mark_stale();
        }

        log::debug!("Blank mesh: {}x{} at baseline {}", self.width, self.length, self.config.baseline);

        MeshChange {
            previous_vertices: previous,
            vertices: self.get_verticies(),
            reallocated: false,
            dirty: !unchanged,
        }
    }

    /// Один уровень деления: w x l -> 2w x 2l, добавляет октаву рельефа
    pub fn tesalate(&mut self) -> Result<MeshChange> {
        self.ensure_populated("tesalate")?;

        let (width, length) = tessellate::subdivided_extent(self.width, self.length)
            .ok_or_else(|| self.overflow_error())?;
        self.budget.check(grid::vertex_count(width, length), "tesalate")?;

        let layout = Layout {
            width,
            length,
            cell_size: self.cell_size * 0.5,
            tier: self.tier.saturating_add(1),
        };
        let mask = self.mask_for(width, length);
        let params = self.height;
        let mask_ref = mask.as_ref();

        let mut vertices = tessellate::subdivide(
            &self.vertices,
            self.width,
            self.length,
            self.cell_size,
            |row, col, [x, z]| params.height(x, z, layout.tier, mask_at(mask_ref, row, col)),
        );
        normals::recompute_normals(&mut vertices, width, length, layout.cell_size);

        let change = self.commit(layout, vertices, mask)?;
        log::info!(
            "Tessellated: {}x{} -> {}x{} (tier {}, {} vertices)",
            width / 2, length / 2, width, length, layout.tier, change.vertices
        );
        Ok(change)
    }

    /// Добавить growth_increment столбцов по +X и строк по +Z
    pub fn grow_mesh(&mut self) -> Result<MeshChange> {
        self.ensure_populated("grow_mesh")?;

        let (width, length) = grow::grown_extent(self.width, self.length, self.config.growth_increment)
            .ok_or_else(|| self.overflow_error())?;
        self.budget.check(grid::vertex_count(width, length), "grow_mesh")?;

        let layout = Layout {
            width,
            length,
            cell_size: self.cell_size,
            tier: self.tier,
        };
        let mask = self.mask_for(width, length);
        let params = self.height;
        let mask_ref = mask.as_ref();

        let mut vertices = grow::grow(&self.vertices, self.width, self.length, width, length, |row, col| {
            let [x, z] = grid::sample_position(row, col, layout.cell_size);
            let y = params.height(x, z, layout.tier, mask_at(mask_ref, row, col));
            TerrainVertex::new([x, y, z], UP)
        });
        normals::recompute_normals(&mut vertices, width, length, layout.cell_size);

        let (old_w, old_l) = (self.width, self.length);
        let change = self.commit(layout, vertices, mask)?;
        log::info!(
            "Grown: {}x{} -> {}x{} ({} vertices)",
            old_w, old_l, width, length, change.vertices
        );
        Ok(change)
    }

    /// Скопировать вершины и индексы в GPU зеркало
    pub fn update_buffer(&mut self) -> Result<()> {
        self.mirror.upload(&mut self.allocator, &self.vertices, &self.indices)?;
        log::debug!(
            "Terrain buffer updated: {} vertices, {} bytes",
            self.vertices.len(),
            self.mirror.valid_bytes()
        );
        Ok(())
    }

    /// Вершинный буфер для отрисовки (валиден для текущего get_verticies)
    pub fn get_mesh(&self) -> &A::Handle {
        self.mirror.vertex_buffer()
    }

    /// Количество вершин: width * length
    pub fn get_verticies(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn get_index_buffer(&self) -> &A::Handle {
        self.mirror.index_buffer()
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn detail_tier(&self) -> u32 {
        self.tier
    }

    pub fn mode(&self) -> TerrainMode {
        self.mode
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn falloff_mask(&self) -> Option<&FalloffMask> {
        self.falloff.as_ref()
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Зеркало совпадает с CPU массивами
    pub fn is_synced(&self) -> bool {
        self.mirror.is_synced()
    }

    /// Байт вершинного буфера, совпадающих с CPU массивом
    pub fn mirror_len(&self) -> u64 {
        self.mirror.valid_bytes()
    }

    /// Размер вершинного буфера при полной синхронизации
    pub fn expected_mirror_len(&self) -> u64 {
        self.get_verticies() as u64 * VERTEX_STRIDE
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    fn ensure_populated(&self, operation: &'static str) -> Result<()> {
        if self.populated {
            Ok(())
        } else {
            log::warn!("{} called before create_blank_mesh", operation);
            Err(TerrainError::Uninitialized { operation })
        }
    }

    fn overflow_error(&self) -> TerrainError {
        TerrainError::VertexBudgetExceeded {
            requested: u64::MAX,
            limit: self.budget.max_vertices(),
        }
    }

    /// Маска для размеров (из кэша, если размеры совпадают)
    fn mask_for(&self, width: u32, length: u32) -> Option<FalloffMask> {
        match self.mode {
            TerrainMode::Standard => None,
            TerrainMode::Falloff => match &self.falloff {
                Some(mask) if mask.matches(width, length) => Some(mask.clone()),
                _ => Some(FalloffMask::generate(width, length, self.falloff_params)),
            },
        }
    }

    /// Сетка целиком из правила высоты
    fn sample_grid(
        &self,
        width: u32,
        length: u32,
        cell_size: f32,
        tier: u32,
        mask: Option<&FalloffMask>,
    ) -> Vec<TerrainVertex> {
        use rayon::prelude::*;

        let params = self.height;
        let mut vertices = vec![TerrainVertex::default(); grid::vertex_count(width, length) as usize];
        vertices
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(row, line)| {
                let row = row as u32;
                for (col, vertex) in line.iter_mut().enumerate() {
                    let col = col as u32;
                    let [x, z] = grid::sample_position(row, col, cell_size);
                    let y = params.height(x, z, tier, mask_at(mask, row, col));
                    vertex.position = [x, y, z];
                }
            });
        normals::recompute_normals(&mut vertices, width, length, cell_size);
        vertices
    }

    /// Подменить меш новым: сначала новое зеркало, потом освобождение старого
    fn commit(
        &mut self,
        layout: Layout,
        vertices: Vec<TerrainVertex>,
        mask: Option<FalloffMask>,
    ) -> Result<MeshChange> {
        let indices = grid::build_indices(layout.width, layout.length);
        let mirror = MeshMirror::allocate(&mut self.allocator, vertices.len() as u32, indices.len() as u32)?;

        let previous = self.get_verticies();
        let old = std::mem::replace(&mut self.mirror, mirror);
        old.release(&mut self.allocator);

        self.width = layout.width;
        self.length = layout.length;
        self.cell_size = layout.cell_size;
        self.tier = layout.tier;
        self.vertices = vertices;
        self.indices = indices;
        self.falloff = mask;

        Ok(MeshChange {
            previous_vertices: previous,
            vertices: self.get_verticies(),
            reallocated: true,
            dirty: true,
        })
    }
}
