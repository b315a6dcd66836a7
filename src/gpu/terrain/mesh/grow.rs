// ============================================
// Growth - Расширение сетки новыми строками/столбцами
// ============================================
// Новые столбцы добавляются по +X, новые строки по +Z. Старые вершины
// копируются как есть (побитово), новые генерируются колбэком.

use rayon::prelude::*;

use super::grid::vertex_index;
use super::vertex::TerrainVertex;

/// Размеры после роста (None при переполнении u32)
pub fn grown_extent(width: u32, length: u32, increment: u32) -> Option<(u32, u32)> {
    Some((width.checked_add(increment)?, length.checked_add(increment)?))
}

/// Вершина добавлена ростом (вне старого прямоугольника)
#[inline]
pub fn is_new_sample(row: u32, col: u32, old_w: u32, old_l: u32) -> bool {
    row >= old_l || col >= old_w
}

/// Собрать вершины расширенной сетки new_w x new_l.
///
/// `sample(row, col)` строит вершину для новой позиции сетки.
pub fn grow<F>(
    old: &[TerrainVertex],
    old_w: u32,
    old_l: u32,
    new_w: u32,
    new_l: u32,
    sample: F,
) -> Vec<TerrainVertex>
where
    F: Fn(u32, u32) -> TerrainVertex + Sync,
{
    debug_assert!(new_w >= old_w && new_l >= old_l);
    let mut grown = vec![TerrainVertex::default(); new_w as usize * new_l as usize];

    grown
        .par_chunks_mut(new_w as usize)
        .enumerate()
        .for_each(|(row, line)| {
            let row = row as u32;
            for (col, vertex) in line.iter_mut().enumerate() {
                let col = col as u32;
                *vertex = if is_new_sample(row, col, old_w, old_l) {
                    sample(row, col)
                } else {
                    old[vertex_index(old_w, row, col)]
                };
            }
        });

    grown
}
