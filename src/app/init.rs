use std::sync::Arc;

use canopy_avatar::Avatar;
use canopy_daynight::DayNightCycle;
use canopy_geom::Vec2;
use canopy_runtime::Scheduler;
use canopy_world::{FloraPlacer, Terrain};

use super::{App, RunStats};
use crate::config::AppParams;
use crate::gamestate::{GameState, ground_query};
use crate::hud::EnergyDisplay;
use crate::input::ScriptedInput;

/// Folds a 64-bit run seed into the terrain's 32-bit noise seed.
#[inline]
pub fn terrain_seed(seed: u64) -> i32 {
    (seed ^ (seed >> 32)) as u32 as i32
}

impl App {
    pub fn new(params: AppParams, seed: u64, input: ScriptedInput) -> Self {
        let window = params.window;
        let terrain = Arc::new(Terrain::new(
            window.height,
            terrain_seed(seed),
            params.world.terrain,
        ));
        let (min_x, max_x) = window.world_range();
        let blocks = terrain.create_in_range(min_x, max_x);

        let mut scheduler = Scheduler::new();
        let mut placer = FloraPlacer::seeded(ground_query(&terrain), params.world.flora, seed);
        let grove = placer.populate(min_x, max_x, &mut scheduler);

        let avatar = Avatar::spawn(0.0, ground_query(&terrain), params.avatar);
        let day_cycle = DayNightCycle::new(params.day_night, Vec2::new(window.width, window.height));
        let day_sample = day_cycle.sample(0.0);
        let mut hud = EnergyDisplay::new();
        hud.update(avatar.energy());

        log::info!(
            "world ready: seed={} span=[{}, {}) blocks={} trees={} pending events={}",
            seed,
            min_x,
            max_x,
            blocks.len(),
            grove.trees.len(),
            scheduler.pending()
        );

        Self {
            gs: GameState {
                tick: 0,
                terrain,
                blocks,
                placer,
                grove,
                scheduler,
                avatar,
            },
            window,
            day_cycle,
            day_sample,
            hud,
            input,
            stats: RunStats::default(),
        }
    }
}
