// ============================================
// Normals - Нормали из высот (центральные разности)
// ============================================
// Нормали всегда пересчитываются целиком из массива позиций,
// без инкрементальных патчей.

use rayon::prelude::*;
use ultraviolet::Vec3;

use super::vertex::TerrainVertex;

/// Пересчитать нормали всех вершин сетки width x length
pub fn recompute_normals(vertices: &mut [TerrainVertex], width: u32, length: u32, cell_size: f32) {
    let w = width as usize;
    let l = length as usize;
    if w == 0 || l == 0 {
        return;
    }
    debug_assert_eq!(vertices.len(), w * l);

    let heights: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();

    vertices
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(row, line)| {
            let up = row.saturating_sub(1);
            let down = (row + 1).min(l - 1);
            let span_z = (down - up) as f32 * cell_size;

            for (col, vertex) in line.iter_mut().enumerate() {
                let left = col.saturating_sub(1);
                let right = (col + 1).min(w - 1);
                let span_x = (right - left) as f32 * cell_size;

                let dx = if span_x > 0.0 {
                    (heights[row * w + left] - heights[row * w + right]) / span_x
                } else {
                    0.0
                };
                let dz = if span_z > 0.0 {
                    (heights[up * w + col] - heights[down * w + col]) / span_z
                } else {
                    0.0
                };

                // n = (-dh/dx, 1, -dh/dz), знак уже учтён порядком разности
                let n = Vec3::new(dx, 1.0, dz).normalized();
                vertex.normal = [n.x, n.y, n.z];
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::terrain::mesh::vertex::UP;

    fn grid(width: u32, length: u32, height: impl Fn(f32, f32) -> f32) -> Vec<TerrainVertex> {
        let mut out = Vec::new();
        for r in 0..length {
            for c in 0..width {
                let (x, z) = (c as f32, r as f32);
                out.push(TerrainVertex::new([x, height(x, z), z], [0.0; 3]));
            }
        }
        out
    }

    #[test]
    fn test_flat_grid_points_up() {
        let mut v = grid(5, 4, |_, _| 3.0);
        recompute_normals(&mut v, 5, 4, 1.0);
        assert!(v.iter().all(|v| v.normal == UP));
    }

    #[test]
    fn test_slope_along_x() {
        // h = x: нормаль наклонена в -X
        let mut v = grid(4, 4, |x, _| x);
        recompute_normals(&mut v, 4, 4, 1.0);
        let expected = 1.0 / 2.0f32.sqrt();
        for vert in &v {
            assert!((vert.normal[0] + expected).abs() < 1e-6);
            assert!((vert.normal[1] - expected).abs() < 1e-6);
            assert!(vert.normal[2].abs() < 1e-6);
        }
    }

    #[test]
    fn test_normals_unit_length() {
        let mut v = grid(6, 6, |x, z| (x * 0.7).sin() * 2.0 + z * z * 0.1);
        recompute_normals(&mut v, 6, 6, 1.0);
        for vert in &v {
            let n = Vec3::from(vert.normal);
            assert!((n.mag() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_single_row() {
        let mut v = grid(3, 1, |x, _| x * 2.0);
        recompute_normals(&mut v, 3, 1, 1.0);
        assert!(v.iter().all(|v| v.normal[2] == 0.0));
    }
}
