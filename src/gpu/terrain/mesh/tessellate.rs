// ============================================
// Tessellation - Деление каждой ячейки на 4
// ============================================
// Сетка w x l становится 2w x 2l при том же охвате. Планарная позиция
// дочернего сэмпла интерполируется билинейно по углам родительской
// ячейки, высота берётся из процедурного правила на новом уровне.

use rayon::prelude::*;

use super::grid::vertex_index;
use super::vertex::TerrainVertex;

/// Размеры после одного уровня деления (None при переполнении u32)
pub fn subdivided_extent(width: u32, length: u32) -> Option<(u32, u32)> {
    Some((width.checked_mul(2)?, length.checked_mul(2)?))
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Построить вершины мелкой сетки из грубой.
///
/// `height(row, col, [x, z])` вызывается для каждой дочерней вершины
/// (координаты в мелкой сетке). Нормали остаются нулевыми, их пересчитывает
/// вызывающий после сборки.
pub fn subdivide<F>(
    coarse: &[TerrainVertex],
    width: u32,
    length: u32,
    cell_size: f32,
    height: F,
) -> Vec<TerrainVertex>
where
    F: Fn(u32, u32, [f32; 2]) -> f32 + Sync,
{
    let fine_w = width as usize * 2;
    let fine_l = length as usize * 2;
    let half = cell_size * 0.5;
    let mut fine = vec![TerrainVertex::default(); fine_w * fine_l];

    fine.par_chunks_mut(fine_w)
        .enumerate()
        .for_each(|(fine_row, line)| {
            let parent_row = (fine_row / 2) as u32;
            // Четверть ячейки от угла: 0.25 или 0.75
            let tz = if fine_row % 2 == 0 { 0.25 } else { 0.75 };

            for (fine_col, vertex) in line.iter_mut().enumerate() {
                let parent_col = (fine_col / 2) as u32;
                let tx = if fine_col % 2 == 0 { 0.25 } else { 0.75 };

                let parent = coarse[vertex_index(width, parent_row, parent_col)].position;
                // Углы родительской ячейки
                let (x0, x1) = (parent[0] - half, parent[0] + half);
                let (z0, z1) = (parent[2] - half, parent[2] + half);
                let x = lerp(x0, x1, tx);
                let z = lerp(z0, z1, tz);

                let y = height(fine_row as u32, fine_col as u32, [x, z]);
                vertex.position = [x, y, z];
            }
        });

    fine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::terrain::mesh::grid::sample_position;

    fn coarse_grid(width: u32, length: u32, cell: f32) -> Vec<TerrainVertex> {
        let mut out = Vec::new();
        for r in 0..length {
            for c in 0..width {
                let [x, z] = sample_position(r, c, cell);
                out.push(TerrainVertex::flat(x, 0.0, z));
            }
        }
        out
    }

    #[test]
    fn test_extent_doubles() {
        assert_eq!(subdivided_extent(4, 3), Some((8, 6)));
        assert_eq!(subdivided_extent(u32::MAX, 1), None);
    }

    #[test]
    fn test_children_stay_inside_parent() {
        let coarse = coarse_grid(3, 2, 2.0);
        let fine = subdivide(&coarse, 3, 2, 2.0, |_, _, _| 0.0);
        assert_eq!(fine.len(), 6 * 4);
        // Охват сетки не меняется: 3 * 2.0 по x, 2 * 2.0 по z
        for v in &fine {
            assert!(v.position[0] > 0.0 && v.position[0] < 6.0);
            assert!(v.position[2] > 0.0 && v.position[2] < 4.0);
        }
    }

    #[test]
    fn test_children_on_fine_lattice() {
        let coarse = coarse_grid(2, 2, 1.0);
        let fine = subdivide(&coarse, 2, 2, 1.0, |_, _, _| 0.0);
        for r in 0..4 {
            for c in 0..4 {
                let expected = sample_position(r, c, 0.5);
                let v = fine[vertex_index(4, r, c)].position;
                assert!((v[0] - expected[0]).abs() < 1e-6);
                assert!((v[2] - expected[1]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_height_callback_receives_fine_coords() {
        let coarse = coarse_grid(2, 1, 1.0);
        let fine = subdivide(&coarse, 2, 1, 1.0, |row, col, _| (row * 10 + col) as f32);
        assert_eq!(fine[vertex_index(4, 1, 3)].position[1], 13.0);
    }
}
