use canopy_daynight::{DayNightCycle, DayNightSample};

use crate::config::WindowParams;
use crate::gamestate::GameState;
use crate::hud::EnergyDisplay;
use crate::input::ScriptedInput;

pub struct App {
    pub gs: GameState,
    pub window: WindowParams,
    pub day_cycle: DayNightCycle,
    pub day_sample: DayNightSample,
    pub hud: EnergyDisplay,
    pub input: ScriptedInput,
    pub stats: RunStats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub ticks: u64,
    pub jumps: u32,
    pub fruit_eaten: u32,
    pub fruit_restocked: u32,
    pub leaves_fluttered: u32,
    pub special_mode_toggles: u32,
    pub clip_swaps: u32,
}
