// ============================================
// Grid - Топология height-field сетки
// ============================================
// Сетка width x length сэмплов, по одной общей вершине на сэмпл.
// Сэмплы центрированы в ячейках: (c + 0.5) * cell_size, поэтому
// деление ячейки на 4 не меняет общий охват сетки.
//
// Количество вершин = width * length

/// Индекс вершины (row-major)
#[inline]
pub fn vertex_index(width: u32, row: u32, col: u32) -> usize {
    row as usize * width as usize + col as usize
}

#[inline]
pub fn vertex_count(width: u32, length: u32) -> u64 {
    width as u64 * length as u64
}

/// Планарная позиция (x, z) сэмпла
#[inline]
pub fn sample_position(row: u32, col: u32, cell_size: f32) -> [f32; 2] {
    [(col as f32 + 0.5) * cell_size, (row as f32 + 0.5) * cell_size]
}

/// Индексы треугольников: по 2 треугольника (CCW сверху) на квад между
/// четырьмя соседними сэмплами
pub fn build_indices(width: u32, length: u32) -> Vec<u32> {
    if width < 2 || length < 2 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity(index_count(width, length) as usize);
    for row in 0..length - 1 {
        for col in 0..width - 1 {
            let i0 = row * width + col;
            let i1 = i0 + 1;
            let i2 = i0 + width;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }
    indices
}

#[inline]
pub fn index_count(width: u32, length: u32) -> u64 {
    if width < 2 || length < 2 {
        return 0;
    }
    (width as u64 - 1) * (length as u64 - 1) * 6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count_formula() {
        assert_eq!(vertex_count(4, 4), 16);
        assert_eq!(vertex_count(8, 3), 24);
    }

    #[test]
    fn test_indices_cover_grid() {
        let indices = build_indices(3, 2);
        assert_eq!(indices.len() as u64, index_count(3, 2));
        assert_eq!(indices, vec![0, 3, 1, 1, 3, 4, 1, 4, 2, 2, 4, 5]);
    }

    #[test]
    fn test_degenerate_grid_has_no_triangles() {
        assert!(build_indices(1, 5).is_empty());
        assert_eq!(index_count(5, 1), 0);
    }

    #[test]
    fn test_triangles_face_up() {
        // Нормаль (b - a) x (c - a) первого треугольника смотрит вверх (+Y)
        let a = sample_position(0, 0, 1.0);
        let b = sample_position(1, 0, 1.0);
        let c = sample_position(0, 1, 1.0);
        let e1 = [b[0] - a[0], b[1] - a[1]];
        let e2 = [c[0] - a[0], c[1] - a[1]];
        // y-компонента векторного произведения в (x, y=0, z): e1.z * e2.x - e1.x * e2.z
        let ny = e1[1] * e2[0] - e1[0] * e2[1];
        assert!(ny > 0.0);
    }
}
