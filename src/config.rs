use std::error::Error;
use std::fs;
use std::path::Path;

use canopy_avatar::{AvatarConfig, AvatarParams};
use canopy_daynight::{DayNightConfig, DayNightParams};
use canopy_world::worldgen::{Flora, Terrain};
use canopy_world::{WorldGenConfig, WorldGenParams};
use serde::Deserialize;

/// Whole-application config file. Every section and key is optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: Window,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub flora: Flora,
    #[serde(default)]
    pub avatar: AvatarConfig,
    #[serde(default)]
    pub day_night: DayNightConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Window {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
    /// Extra world generated past each side of the window, in window widths.
    #[serde(default = "default_margin")]
    pub margin_screens: f32,
}
fn default_width() -> f32 {
    1000.0
}
fn default_height() -> f32 {
    700.0
}
fn default_target_fps() -> u32 {
    42
}
fn default_margin() -> f32 {
    1.0
}
impl Default for Window {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            target_fps: default_target_fps(),
            margin_screens: default_margin(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WindowParams {
    pub width: f32,
    pub height: f32,
    pub target_fps: u32,
    pub margin_screens: f32,
}

impl WindowParams {
    /// Seconds per tick at the target frame rate.
    #[inline]
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.target_fps as f32
    }

    /// Horizontal span of generated world, `[min_x, max_x)`.
    pub fn world_range(&self) -> (i32, i32) {
        let margin = (self.width * self.margin_screens).ceil() as i32;
        (-margin, self.width.ceil() as i32 + margin)
    }
}

/// Validated runtime parameters for every component.
#[derive(Clone, Debug, PartialEq)]
pub struct AppParams {
    pub window: WindowParams,
    pub world: WorldGenParams,
    pub avatar: AvatarParams,
    pub day_night: DayNightParams,
}

impl AppConfig {
    pub fn into_params(self) -> Result<AppParams, Box<dyn Error>> {
        let w = &self.window;
        if !(w.width.is_finite() && w.width > 0.0 && w.height.is_finite() && w.height > 0.0) {
            return Err(format!("window size must be positive, got {}x{}", w.width, w.height).into());
        }
        if w.target_fps == 0 {
            return Err("window.target_fps must be > 0".into());
        }
        if !(w.margin_screens.is_finite() && w.margin_screens >= 0.0) {
            return Err(format!("window.margin_screens must be >= 0, got {}", w.margin_screens).into());
        }
        let window = WindowParams {
            width: w.width,
            height: w.height,
            target_fps: w.target_fps,
            margin_screens: w.margin_screens,
        };
        let world = WorldGenParams::from_config(&WorldGenConfig {
            terrain: self.terrain,
            flora: self.flora,
        })?;
        Ok(AppParams {
            window,
            world,
            avatar: AvatarParams::from_config(&self.avatar)?,
            day_night: DayNightParams::from_config(&self.day_night)?,
        })
    }
}

pub fn parse_config(s: &str) -> Result<AppConfig, Box<dyn Error>> {
    Ok(toml::from_str(s)?)
}

pub fn load_config_from_path(path: &Path) -> Result<AppConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)
        .map_err(|e| format!("reading config {}: {}", path.display(), e))?;
    parse_config(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let p = parse_config("").unwrap().into_params().unwrap();
        assert_eq!(p.window.width, 1000.0);
        assert_eq!(p.window.target_fps, 42);
        assert_eq!(p.world, WorldGenParams::default());
        assert_eq!(p.avatar, AvatarParams::default());
        assert_eq!(p.day_night, DayNightParams::default());
    }

    #[test]
    fn sections_override_independently() {
        let p = parse_config(
            r#"
            [window]
            height = 600.0

            [avatar]
            jump_cost = 20.0

            [day_night]
            cycle_secs = 60.0
            "#,
        )
        .unwrap()
        .into_params()
        .unwrap();
        assert_eq!(p.window.height, 600.0);
        assert_eq!(p.window.width, 1000.0);
        assert_eq!(p.avatar.jump_cost, 20.0);
        assert_eq!(p.day_night.cycle_secs, 60.0);
        assert_eq!(p.world.terrain.block_size, 20.0);
    }

    #[test]
    fn invalid_values_are_errors() {
        for bad in [
            "[window]\nwidth = -1.0",
            "[window]\ntarget_fps = 0",
            "[flora]\nleaf_probability = 2.0",
            "[avatar]\ngravity = -5.0",
            "[day_night]\nnight_opacity = 3.0",
        ] {
            let cfg = parse_config(bad).unwrap();
            assert!(cfg.into_params().is_err(), "accepted {bad:?}");
        }
        assert!(parse_config("[window]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn world_range_covers_window_plus_margins() {
        let w = parse_config("").unwrap().into_params().unwrap().window;
        assert_eq!(w.world_range(), (-1000, 2000));
    }

    #[test]
    fn bundled_config_is_valid() {
        let p = parse_config(include_str!("../config/canopy.toml"))
            .unwrap()
            .into_params()
            .unwrap();
        assert_eq!(p.avatar, AvatarParams::default());
        assert_eq!(p.day_night, DayNightParams::default());
        assert_eq!(p.world.flora, WorldGenParams::default().flora);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config_from_path(Path::new("/nonexistent/canopy.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/canopy.toml"));
    }
}
