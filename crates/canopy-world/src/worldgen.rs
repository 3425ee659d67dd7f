use canopy_geom::Color;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub flora: Flora,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Terrain {
    #[serde(default = "default_block_size")]
    pub block_size: f32,
    /// Coarse noise stride, in blocks.
    #[serde(default = "default_smoothing_blocks")]
    pub smoothing_blocks: f32,
    /// Noise amplitude in pixels; defaults to the baseline height.
    #[serde(default)]
    pub amplitude: Option<f32>,
    #[serde(default = "default_relief")]
    pub relief: f32,
    #[serde(default = "default_baseline_fraction")]
    pub baseline_fraction: f32,
    #[serde(default = "default_ground_color")]
    pub ground_color: String,
    #[serde(default = "default_color_jitter")]
    pub color_jitter: u8,
}
fn default_block_size() -> f32 {
    20.0
}
fn default_smoothing_blocks() -> f32 {
    7.0
}
fn default_relief() -> f32 {
    1.3
}
fn default_baseline_fraction() -> f32 {
    1.0 / 3.0
}
fn default_ground_color() -> String {
    "#D47B4A".into()
}
fn default_color_jitter() -> u8 {
    10
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            smoothing_blocks: default_smoothing_blocks(),
            amplitude: None,
            relief: default_relief(),
            baseline_fraction: default_baseline_fraction(),
            ground_color: default_ground_color(),
            color_jitter: default_color_jitter(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Flora {
    #[serde(default = "default_tree_prob")]
    pub tree_probability: f32,
    #[serde(default = "default_tree_height")]
    pub tree_height: f32,
    #[serde(default = "default_leaf_prob")]
    pub leaf_probability: f32,
    #[serde(default = "default_fruit_prob")]
    pub fruit_probability: f32,
    /// Leaf edge as a fraction of the block size.
    #[serde(default = "default_leaf_scale")]
    pub leaf_scale: f32,
    /// Half-width of the canopy square, in leaves.
    #[serde(default = "default_canopy_reach")]
    pub canopy_reach: i32,
    #[serde(default = "default_flutter_stagger")]
    pub flutter_stagger: f32,
    #[serde(default = "default_flutter_sweep")]
    pub flutter_sweep_secs: f32,
    #[serde(default = "default_flutter_nudge")]
    pub flutter_nudge_secs: f32,
    #[serde(default = "default_fruit_cooldown")]
    pub fruit_cooldown_secs: f32,
}
fn default_tree_prob() -> f32 {
    0.05
}
fn default_tree_height() -> f32 {
    130.0
}
fn default_leaf_prob() -> f32 {
    0.6
}
fn default_fruit_prob() -> f32 {
    0.08
}
fn default_leaf_scale() -> f32 {
    0.75
}
fn default_canopy_reach() -> i32 {
    4
}
fn default_flutter_stagger() -> f32 {
    0.08
}
fn default_flutter_sweep() -> f32 {
    1.0
}
fn default_flutter_nudge() -> f32 {
    0.1
}
fn default_fruit_cooldown() -> f32 {
    30.0
}
impl Default for Flora {
    fn default() -> Self {
        Self {
            tree_probability: default_tree_prob(),
            tree_height: default_tree_height(),
            leaf_probability: default_leaf_prob(),
            fruit_probability: default_fruit_prob(),
            leaf_scale: default_leaf_scale(),
            canopy_reach: default_canopy_reach(),
            flutter_stagger: default_flutter_stagger(),
            flutter_sweep_secs: default_flutter_sweep(),
            flutter_nudge_secs: default_flutter_nudge(),
            fruit_cooldown_secs: default_fruit_cooldown(),
        }
    }
}

// Flattened params used by the generators (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    pub block_size: f32,
    pub smoothing: f32,
    pub amplitude: Option<f32>,
    pub relief: f32,
    pub baseline_fraction: f32,
    pub ground_color: Color,
    pub color_jitter: u8,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self::build(&Terrain::default(), Color::rgb(212, 123, 74))
    }
}

impl TerrainParams {
    pub fn from_config(cfg: &Terrain) -> Result<Self, Box<dyn Error>> {
        let ground_color = Color::from_hex(&cfg.ground_color)
            .ok_or_else(|| format!("terrain.ground_color: bad color {:?}", cfg.ground_color))?;
        let p = Self::build(cfg, ground_color);
        p.validate()?;
        Ok(p)
    }

    fn build(cfg: &Terrain, ground_color: Color) -> Self {
        Self {
            block_size: cfg.block_size,
            smoothing: cfg.smoothing_blocks * cfg.block_size,
            amplitude: cfg.amplitude,
            relief: cfg.relief,
            baseline_fraction: cfg.baseline_fraction,
            ground_color,
            color_jitter: cfg.color_jitter,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.block_size.is_finite() && self.block_size > 0.0) {
            return Err(format!("terrain.block_size must be > 0, got {}", self.block_size));
        }
        if !(self.smoothing.is_finite() && self.smoothing > 0.0) {
            return Err(format!("terrain.smoothing_blocks must be > 0, got {}", self.smoothing));
        }
        if self.amplitude.is_some_and(|a| !a.is_finite()) || !self.relief.is_finite() {
            return Err("terrain.amplitude and terrain.relief must be finite".into());
        }
        if !(0.0..=1.0).contains(&self.baseline_fraction) {
            return Err(format!(
                "terrain.baseline_fraction must be within [0, 1], got {}",
                self.baseline_fraction
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloraParams {
    pub tree_probability: f32,
    pub tree_height: f32,
    pub tree_width: f32,
    pub leaf_probability: f32,
    pub fruit_probability: f32,
    pub leaf_size: f32,
    pub fruit_size: f32,
    pub canopy_reach: i32,
    pub flutter_stagger: f32,
    pub flutter_sweep_secs: f32,
    pub flutter_nudge_secs: f32,
    pub fruit_cooldown_secs: f32,
}

impl Default for FloraParams {
    fn default() -> Self {
        Self::build(&Flora::default(), default_block_size())
    }
}

impl FloraParams {
    pub fn from_config(cfg: &Flora, block_size: f32) -> Result<Self, Box<dyn Error>> {
        let p = Self::build(cfg, block_size);
        p.validate()?;
        Ok(p)
    }

    fn build(cfg: &Flora, block_size: f32) -> Self {
        // leaf size truncates to whole pixels, fruit is two pixels smaller
        let leaf_size = (block_size * cfg.leaf_scale).floor();
        Self {
            tree_probability: cfg.tree_probability,
            tree_height: cfg.tree_height,
            tree_width: block_size,
            leaf_probability: cfg.leaf_probability,
            fruit_probability: cfg.fruit_probability,
            leaf_size,
            fruit_size: (leaf_size - 2.0).max(1.0),
            canopy_reach: cfg.canopy_reach,
            flutter_stagger: cfg.flutter_stagger,
            flutter_sweep_secs: cfg.flutter_sweep_secs,
            flutter_nudge_secs: cfg.flutter_nudge_secs,
            fruit_cooldown_secs: cfg.fruit_cooldown_secs,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, v) in [
            ("flora.tree_probability", self.tree_probability),
            ("flora.leaf_probability", self.leaf_probability),
            ("flora.fruit_probability", self.fruit_probability),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("{name} must be within [0, 1], got {v}"));
            }
        }
        if !(self.leaf_size > 0.0) {
            return Err(format!("flora.leaf_scale yields leaf size {}", self.leaf_size));
        }
        if self.canopy_reach < 0 {
            return Err(format!("flora.canopy_reach must be >= 0, got {}", self.canopy_reach));
        }
        if !(self.flutter_stagger > 0.0) {
            return Err("flora.flutter_stagger must be > 0".into());
        }
        if !(self.flutter_sweep_secs > 0.0 && self.flutter_nudge_secs > 0.0) {
            return Err("flora flutter durations must be > 0".into());
        }
        if !(self.fruit_cooldown_secs.is_finite() && self.fruit_cooldown_secs >= 0.0) {
            return Err(format!(
                "flora.fruit_cooldown_secs must be >= 0, got {}",
                self.fruit_cooldown_secs
            ));
        }
        if !(self.tree_height.is_finite() && self.tree_height >= 0.0) {
            return Err(format!("flora.tree_height must be >= 0, got {}", self.tree_height));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldGenParams {
    pub terrain: TerrainParams,
    pub flora: FloraParams,
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            terrain: TerrainParams::from_config(&cfg.terrain)?,
            flora: FloraParams::from_config(&cfg.flora, cfg.terrain.block_size)?,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: WorldGenConfig = toml::from_str(s)?;
        Self::from_config(&cfg)
    }
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    WorldGenParams::from_toml_str(&s)
}
