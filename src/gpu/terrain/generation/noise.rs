// ============================================
// Noise Functions - Шумовые функции для генерации
// ============================================

/// Hash2D с сидом, возвращает значение в диапазоне 0.0..1.0
#[inline(always)]
pub fn hash2d(x: i32, z: i32, seed: u32) -> f32 {
    let n = x.wrapping_mul(374761393)
        .wrapping_add(z.wrapping_mul(668265263))
        .wrapping_add((seed as i32).wrapping_mul(1274126177));
    let n = (n ^ (n >> 13)).wrapping_mul(1911520717);
    let n = n ^ (n >> 16);
    ((n as u32) as f32) / (u32::MAX as f32)
}

#[inline(always)]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// 2D Value Noise, 0.0..1.0
#[inline]
pub fn noise2d(x: f32, z: f32, seed: u32) -> f32 {
    let xi = x.floor() as i32;
    let zi = z.floor() as i32;
    let xf = smoothstep(x - x.floor());
    let zf = smoothstep(z - z.floor());

    let n00 = hash2d(xi, zi, seed);
    let n10 = hash2d(xi + 1, zi, seed);
    let n01 = hash2d(xi, zi + 1, seed);
    let n11 = hash2d(xi + 1, zi + 1, seed);

    let nx0 = n00 + xf * (n10 - n00);
    let nx1 = n01 + xf * (n11 - n01);

    nx0 + zf * (nx1 - nx0)
}

/// Знаковый шум -1.0..1.0 (для рельефа вокруг базовой высоты)
#[inline]
pub fn signed_noise2d(x: f32, z: f32, seed: u32) -> f32 {
    noise2d(x, z, seed) * 2.0 - 1.0
}

/// Сид октавы: каждая октава берёт свою решётку, чтобы октавы не коррелировали
#[inline]
pub fn octave_seed(seed: u64, octave: u32) -> u32 {
    let folded = (seed ^ (seed >> 32)) as u32;
    folded.wrapping_add(octave.wrapping_mul(0x9E37_79B9))
}
