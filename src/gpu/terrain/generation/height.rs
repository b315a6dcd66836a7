// ============================================
// Height Rule - Высота вершины по мировым координатам
// ============================================
// Рельеф = сумма октав value noise. Число октав равно уровню детализации:
// плоский меш имеет уровень 0, каждая тесселяция добавляет одну октаву.
// Маска спада (если есть) умножает только рельеф, не базовую высоту.

use crate::gpu::core::TerrainConfig;
use super::noise::{octave_seed, signed_noise2d};

/// Параметры правила высоты (копия нужных полей конфига, Copy для rayon)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightParams {
    pub seed: u64,
    pub baseline: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub persistence: f32,
    pub lacunarity: f32,
}

impl HeightParams {
    pub fn from_config(config: &TerrainConfig) -> Self {
        Self {
            seed: config.seed,
            baseline: config.baseline,
            amplitude: config.amplitude,
            frequency: config.frequency,
            persistence: config.persistence,
            lacunarity: config.lacunarity,
        }
    }

    /// Рельеф без маски: первые `tier` октав
    #[inline]
    pub fn relief(&self, x: f32, z: f32, tier: u32) -> f32 {
        let mut value = 0.0;
        let mut amplitude = self.amplitude;
        let mut frequency = self.frequency;

        for octave in 0..tier {
            let seed = octave_seed(self.seed, octave);
            value += amplitude * signed_noise2d(x * frequency, z * frequency, seed);
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        value
    }

    /// Итоговая высота: baseline + relief * mask
    #[inline]
    pub fn height(&self, x: f32, z: f32, tier: u32, mask: f32) -> f32 {
        self.baseline + self.relief(x, z, tier) * mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> HeightParams {
        HeightParams::from_config(&TerrainConfig::default())
    }

    #[test]
    fn test_tier_zero_is_flat() {
        let p = params();
        for i in 0..50 {
            let x = i as f32 * 1.3;
            assert_eq!(p.height(x, -x, 0, 1.0), p.baseline);
        }
    }

    #[test]
    fn test_zero_mask_gives_baseline() {
        let p = params();
        assert_eq!(p.height(17.5, 3.25, 4, 0.0), p.baseline);
    }

    #[test]
    fn test_relief_bounded_by_octave_sum() {
        let p = params();
        let bound = p.amplitude * (1.0 + p.persistence + p.persistence * p.persistence);
        for i in 0..100 {
            let h = p.relief(i as f32 * 0.9, i as f32 * 0.4, 3);
            assert!(h.abs() <= bound + 1e-4);
        }
    }

    #[test]
    fn test_deterministic() {
        let p = params();
        assert_eq!(p.height(5.5, 9.25, 3, 0.7), p.height(5.5, 9.25, 3, 0.7));
    }
}
