use canopy_geom::Color;
use rand::Rng;

/// Default per-channel deviation used for decorative color variety.
pub const DEFAULT_JITTER: u8 = 10;

pub fn hash2(ix: i32, iy: i32, seed: u32) -> u32 {
    let mut h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iy as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

/// Uniform in `[0, 1)` for a lattice cell.
pub fn rand01(seed: u32, ix: i32, iy: i32, salt: u32) -> f32 {
    let h = hash2(ix, iy, (seed ^ salt).wrapping_add(0x9E37_79B9));
    ((h & 0x00FF_FFFF) as f32) / 16_777_216.0
}

#[inline]
fn delta_from(u: f32, jitter: u8) -> i16 {
    let j = jitter as i16;
    // u in [0,1) -> [-j, j]
    ((u * (2 * j + 1) as f32).floor() as i16 - j).clamp(-j, j)
}

/// Deterministic color variation for a lattice cell; same inputs, same color.
pub fn approximate_color_at(base: Color, jitter: u8, seed: u32, ix: i32, iy: i32) -> Color {
    let dr = delta_from(rand01(seed, ix, iy, 0x0052_4544), jitter);
    let dg = delta_from(rand01(seed, ix, iy, 0x0047_524E), jitter);
    let db = delta_from(rand01(seed, ix, iy, 0x0042_4C55), jitter);
    base.shifted(dr, dg, db)
}

pub fn approximate_color<R: Rng + ?Sized>(rng: &mut R, base: Color, jitter: u8) -> Color {
    let j = jitter as i16;
    base.shifted(
        rng.gen_range(-j..=j),
        rng.gen_range(-j..=j),
        rng.gen_range(-j..=j),
    )
}
