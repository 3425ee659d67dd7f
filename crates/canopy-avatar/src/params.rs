use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct AvatarConfig {
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default = "default_max_energy")]
    pub max_energy: f32,
    #[serde(default = "default_run_cost")]
    pub run_cost: f32,
    #[serde(default = "default_jump_cost")]
    pub jump_cost: f32,
    #[serde(default = "default_idle_regen")]
    pub idle_regen: f32,
    #[serde(default = "default_fruit_energy")]
    pub fruit_energy: f32,
    #[serde(default = "default_run_speed")]
    pub run_speed: f32,
    #[serde(default = "default_jump_speed")]
    pub jump_speed: f32,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
}
fn default_size() -> f32 {
    40.0
}
fn default_max_energy() -> f32 {
    100.0
}
fn default_run_cost() -> f32 {
    0.5
}
fn default_jump_cost() -> f32 {
    10.0
}
fn default_idle_regen() -> f32 {
    1.0
}
fn default_fruit_energy() -> f32 {
    10.0
}
fn default_run_speed() -> f32 {
    210.0
}
fn default_jump_speed() -> f32 {
    400.0
}
fn default_gravity() -> f32 {
    400.0
}
impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            max_energy: default_max_energy(),
            run_cost: default_run_cost(),
            jump_cost: default_jump_cost(),
            idle_regen: default_idle_regen(),
            fruit_energy: default_fruit_energy(),
            run_speed: default_run_speed(),
            jump_speed: default_jump_speed(),
            gravity: default_gravity(),
        }
    }
}

/// Runtime tunables. Costs and regen are per tick; speeds in px/s;
/// gravity in px/s² pointing down the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct AvatarParams {
    pub size: f32,
    pub max_energy: f32,
    pub run_cost: f32,
    pub jump_cost: f32,
    pub idle_regen: f32,
    pub fruit_energy: f32,
    pub run_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
}

impl Default for AvatarParams {
    fn default() -> Self {
        Self::from_config_unchecked(&AvatarConfig::default())
    }
}

impl AvatarParams {
    pub fn from_config(cfg: &AvatarConfig) -> Result<Self, String> {
        let p = Self::from_config_unchecked(cfg);
        p.validate()?;
        Ok(p)
    }

    fn from_config_unchecked(cfg: &AvatarConfig) -> Self {
        Self {
            size: cfg.size,
            max_energy: cfg.max_energy,
            run_cost: cfg.run_cost,
            jump_cost: cfg.jump_cost,
            idle_regen: cfg.idle_regen,
            fruit_energy: cfg.fruit_energy,
            run_speed: cfg.run_speed,
            jump_speed: cfg.jump_speed,
            gravity: cfg.gravity,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, v) in [
            ("avatar.size", self.size),
            ("avatar.max_energy", self.max_energy),
            ("avatar.run_cost", self.run_cost),
            ("avatar.jump_cost", self.jump_cost),
            ("avatar.idle_regen", self.idle_regen),
            ("avatar.fruit_energy", self.fruit_energy),
            ("avatar.run_speed", self.run_speed),
            ("avatar.jump_speed", self.jump_speed),
            ("avatar.gravity", self.gravity),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(format!("{name} must be finite and >= 0, got {v}"));
            }
        }
        if self.size == 0.0 {
            return Err("avatar.size must be > 0".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_fills_defaults() {
        let cfg: AvatarConfig = toml::from_str("jump_cost = 25.0").unwrap();
        let p = AvatarParams::from_config(&cfg).unwrap();
        assert_eq!(p.jump_cost, 25.0);
        assert_eq!(p.run_cost, 0.5);
        assert_eq!(p.max_energy, 100.0);
    }

    #[test]
    fn negative_cost_is_rejected() {
        let cfg = AvatarConfig {
            run_cost: -1.0,
            ..AvatarConfig::default()
        };
        assert!(AvatarParams::from_config(&cfg).is_err());
    }
}
