use canopy_geom::Color;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct DayNightConfig {
    /// Length of one full day and night, in seconds.
    #[serde(default = "default_cycle_secs")]
    pub cycle_secs: f32,
    #[serde(default = "default_night_opacity")]
    pub night_opacity: f32,
    #[serde(default = "default_sun_size")]
    pub sun_size: f32,
    #[serde(default = "default_halo_size")]
    pub halo_size: f32,
    #[serde(default = "default_halo_alpha")]
    pub halo_alpha: u8,
    #[serde(default = "default_sky_color")]
    pub sky_color: String,
}
fn default_cycle_secs() -> f32 {
    30.0
}
fn default_night_opacity() -> f32 {
    0.5
}
fn default_sun_size() -> f32 {
    90.0
}
fn default_halo_size() -> f32 {
    130.0
}
fn default_halo_alpha() -> u8 {
    20
}
fn default_sky_color() -> String {
    "#80C6E5".into()
}
impl Default for DayNightConfig {
    fn default() -> Self {
        Self {
            cycle_secs: default_cycle_secs(),
            night_opacity: default_night_opacity(),
            sun_size: default_sun_size(),
            halo_size: default_halo_size(),
            halo_alpha: default_halo_alpha(),
            sky_color: default_sky_color(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DayNightParams {
    pub cycle_secs: f32,
    pub night_opacity: f32,
    pub sun_size: f32,
    pub halo_size: f32,
    pub halo_color: Color,
    pub sky_color: Color,
}

impl Default for DayNightParams {
    fn default() -> Self {
        let cfg = DayNightConfig::default();
        Self {
            cycle_secs: cfg.cycle_secs,
            night_opacity: cfg.night_opacity,
            sun_size: cfg.sun_size,
            halo_size: cfg.halo_size,
            halo_color: Color::rgba(255, 255, 0, cfg.halo_alpha),
            sky_color: Color::rgb(0x80, 0xC6, 0xE5),
        }
    }
}

impl DayNightParams {
    pub fn from_config(cfg: &DayNightConfig) -> Result<Self, String> {
        let sky_color = Color::from_hex(&cfg.sky_color)
            .ok_or_else(|| format!("day_night.sky_color: bad color {:?}", cfg.sky_color))?;
        let p = Self {
            cycle_secs: cfg.cycle_secs,
            night_opacity: cfg.night_opacity,
            sun_size: cfg.sun_size,
            halo_size: cfg.halo_size,
            halo_color: Color::rgba(255, 255, 0, cfg.halo_alpha),
            sky_color,
        };
        p.validate()?;
        Ok(p)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.cycle_secs.is_finite() && self.cycle_secs > 0.0) {
            return Err(format!("day_night.cycle_secs must be > 0, got {}", self.cycle_secs));
        }
        if !(0.0..=1.0).contains(&self.night_opacity) {
            return Err(format!(
                "day_night.night_opacity must be within [0, 1], got {}",
                self.night_opacity
            ));
        }
        if !(self.sun_size >= 0.0 && self.halo_size >= 0.0) {
            return Err("day_night sun and halo sizes must be >= 0".into());
        }
        Ok(())
    }
}
