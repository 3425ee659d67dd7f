use canopy_geom::{Aabb2, Color, Vec2};

use crate::color::approximate_color_at;
use crate::noise::HeightField;
use crate::worldgen::TerrainParams;

/// Surface heights are snapped to 1/256 px so block rows stack exactly in f32.
const SURFACE_GRID: f32 = 256.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockTag {
    Ground,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub top_left: Vec2,
    pub size: f32,
    pub color: Color,
    pub tag: BlockTag,
}

impl Block {
    #[inline]
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_top_left(self.top_left, Vec2::splat(self.size))
    }
}

/// Noise-driven ground surface materialized as block columns.
///
/// Screen coordinates: y grows downward and the window bottom is at
/// `window_height`.
pub struct Terrain {
    window_height: f32,
    seed: i32,
    baseline: f32,
    params: TerrainParams,
    field: HeightField,
}

impl Terrain {
    pub fn new(window_height: f32, seed: i32, params: TerrainParams) -> Self {
        assert!(
            window_height.is_finite() && window_height > 0.0,
            "window height must be positive, got {window_height}"
        );
        assert!(
            params.block_size.is_finite() && params.block_size > 0.0,
            "block size must be positive, got {}",
            params.block_size
        );
        let baseline = window_height * params.baseline_fraction;
        let field = HeightField::new(seed, params.amplitude.unwrap_or(baseline));
        log::debug!(
            "terrain: seed={} window_height={} baseline={:.2} amplitude={:.2} block={}",
            seed,
            window_height,
            baseline,
            field.amplitude(),
            params.block_size
        );
        Self {
            window_height,
            seed,
            baseline,
            params,
            field,
        }
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    #[inline]
    pub fn window_height(&self) -> f32 {
        self.window_height
    }

    /// Unquantized ground offset at x = 0, measured up from the window bottom.
    #[inline]
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.field.amplitude()
    }

    #[inline]
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    #[inline]
    pub fn block_size(&self) -> f32 {
        self.params.block_size
    }

    /// Top edge of the ground surface at `x`.
    pub fn ground_height_at(&self, x: f32) -> f32 {
        let b = self.params.block_size;
        let raw = self.params.relief * self.field.noise(x, self.params.smoothing);
        // snap the relief to whole blocks so neighbouring columns sit flush
        let stepped = (raw / b).floor() * b;
        let top = self.window_height - (stepped + self.baseline);
        (top * SURFACE_GRID).round() / SURFACE_GRID
    }

    /// Borrowed height query for placement and spawning.
    pub fn height_fn(&self) -> impl Fn(f32) -> f32 + '_ {
        move |x| self.ground_height_at(x)
    }

    /// Ground blocks for every cell in `[min_x, max_x)`, column by column, top down.
    pub fn create_in_range(&self, min_x: i32, max_x: i32) -> Vec<Block> {
        assert!(min_x <= max_x, "reversed terrain range [{min_x}, {max_x})");
        let b = self.params.block_size;
        let mut blocks = Vec::new();
        let mut col = 0_i32;
        loop {
            let x = min_x as f32 + col as f32 * b;
            if x >= max_x as f32 {
                break;
            }
            let ix = (x / b).floor() as i32;
            let top = self.ground_height_at(x);
            let mut row = 0_i32;
            loop {
                let y = (f64::from(top) + f64::from(row) * f64::from(b)) as f32;
                if y >= self.window_height {
                    break;
                }
                let iy = (y / b).floor() as i32;
                blocks.push(Block {
                    top_left: Vec2::new(x, y),
                    size: b,
                    color: approximate_color_at(
                        self.params.ground_color,
                        self.params.color_jitter,
                        self.seed as u32,
                        ix,
                        iy,
                    ),
                    tag: BlockTag::Ground,
                });
                row += 1;
            }
            col += 1;
        }
        log::debug!(
            "terrain: {} blocks in {} columns for [{}, {})",
            blocks.len(),
            col,
            min_x,
            max_x
        );
        blocks
    }
}
