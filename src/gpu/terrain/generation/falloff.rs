// ============================================
// Falloff Mask - Маска спада к краям (острова)
// ============================================
// Маска зависит только от размеров сетки, поэтому хранится как кэш,
// привязанный к (width, length), и пересчитывается при смене размеров.

use rayon::prelude::*;

use crate::gpu::core::TerrainConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FalloffParams {
    pub exponent: f32,
    pub shift: f32,
}

impl FalloffParams {
    pub fn from_config(config: &TerrainConfig) -> Self {
        Self {
            exponent: config.falloff_exponent,
            shift: config.falloff_shift,
        }
    }

    /// 1.0 в центре (d = 0), 0.0 на границе (d = 1)
    #[inline]
    pub fn value(&self, distance: f32) -> f32 {
        let d = distance.clamp(0.0, 1.0);
        let a = d.powf(self.exponent);
        let b = (self.shift - self.shift * d).powf(self.exponent);
        1.0 - a / (a + b)
    }
}

/// Нормированная координата сэмпла по оси: -1.0 у первого, 1.0 у последнего
#[inline]
fn axis_coord(index: u32, count: u32) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    let span = (count - 1) as f32;
    (2.0 * index as f32 - span) / span
}

/// Маска спада для сетки width x length (row-major)
#[derive(Debug, Clone, PartialEq)]
pub struct FalloffMask {
    width: u32,
    length: u32,
    values: Vec<f32>,
}

impl FalloffMask {
    pub fn generate(width: u32, length: u32, params: FalloffParams) -> Self {
        let mut values = vec![0.0f32; width as usize * length as usize];

        values
            .par_chunks_mut(width.max(1) as usize)
            .enumerate()
            .for_each(|(row, line)| {
                let v = axis_coord(row as u32, length).abs();
                for (col, value) in line.iter_mut().enumerate() {
                    let u = axis_coord(col as u32, width).abs();
                    *value = params.value(u.max(v));
                }
            });

        Self { width, length, values }
    }

    /// Маска построена для этих размеров
    #[inline]
    pub fn matches(&self, width: u32, length: u32) -> bool {
        self.width == width && self.length == length
    }

    pub fn extent(&self) -> (u32, u32) {
        (self.width, self.length)
    }

    #[inline]
    pub fn get(&self, row: u32, col: u32) -> f32 {
        self.values[(row * self.width + col) as usize]
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}
