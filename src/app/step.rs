use canopy_world::{FloraEvent, FruitId};

use super::App;

impl App {
    /// Advances the whole world by one tick of `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let gs = &mut self.gs;

        // deferred flora callbacks due by the end of this tick
        gs.scheduler.advance(dt);
        while let Some(env) = gs.scheduler.pop_ready() {
            let event = env.payload;
            if gs.grove.handle_event(event) {
                match event {
                    FloraEvent::LeafFlutter(_) => self.stats.leaves_fluttered += 1,
                    FloraEvent::FruitRestock { .. } => self.stats.fruit_restocked += 1,
                }
            }
        }

        let keys = self.input.keys_at(gs.tick);
        let out = gs.avatar.update(dt, &keys);
        if out.airborne {
            self.stats.jumps += 1;
        }
        if gs.placer.set_airborne(out.airborne) {
            self.stats.special_mode_toggles += 1;
        }
        if let Some(clip) = out.clip {
            self.stats.clip_swaps += 1;
            log::debug!(target: "events", "tick {}: clip -> {:?}", gs.tick, clip);
        }
        if self.hud.update(out.energy) {
            log::trace!(target: "events", "tick {}: energy {}", gs.tick, self.hud.text());
        }

        // avatar vs fruit overlap
        let body = gs.avatar.bounds();
        let touching: Vec<FruitId> = gs
            .grove
            .available_fruit()
            .filter(|f| f.bounds().intersects(&body))
            .map(|f| f.id)
            .collect();
        for id in touching {
            if let Some(fruit) = gs.grove.fruit_mut(id) {
                if gs.avatar.on_fruit_collision(fruit, &mut gs.scheduler) {
                    self.stats.fruit_eaten += 1;
                    self.hud.update(gs.avatar.energy());
                }
            }
        }

        gs.placer.update_grove(&mut gs.grove, dt);
        self.day_sample = self.day_cycle.advance(dt);

        gs.tick += 1;
        self.stats.ticks += 1;
    }

    pub fn run(&mut self, ticks: u64, dt: f32) {
        for _ in 0..ticks {
            self.step(dt);
        }
        let s = &self.stats;
        log::info!(
            "ran {} ticks: jumps={} fruit eaten={} restocked={} leaves fluttered={} energy={}",
            s.ticks,
            s.jumps,
            s.fruit_eaten,
            s.fruit_restocked,
            s.leaves_fluttered,
            self.hud.text()
        );
        log::info!(
            "day/night at {:.2}s: night opacity {:.3}, sun at ({:.1}, {:.1})",
            self.day_sample.elapsed,
            self.day_sample.night_opacity,
            self.day_sample.sun.center.x,
            self.day_sample.sun.center.y
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::config::parse_config;
    use crate::input::ScriptedInput;

    fn app(extra: &str, script: &str) -> App {
        let params = parse_config(extra).unwrap().into_params().unwrap();
        App::new(params, 7, ScriptedInput::parse(script).unwrap())
    }

    #[test]
    fn idle_world_keeps_full_energy() {
        let mut a = app("", "");
        a.run(100, 1.0 / 42.0);
        assert_eq!(a.stats.ticks, 100);
        assert_eq!(a.stats.jumps, 0);
        assert_eq!(a.hud.text(), "100%");
        assert!(a.gs.avatar.is_grounded());
    }

    #[test]
    fn jump_toggles_special_mode_on_and_off() {
        let mut a = app("[flora]\nfruit_probability = 0.0\n", "J,.*200");
        a.step(1.0 / 42.0);
        assert_eq!(a.stats.jumps, 1);
        assert!(a.gs.placer.visual_state().special_mode);
        assert_eq!(a.hud.text(), "90%");
        a.step(1.0 / 42.0);
        assert!(!a.gs.placer.visual_state().special_mode);
        assert_eq!(a.stats.special_mode_toggles, 2);
    }

    #[test]
    fn flutters_cascade_over_time() {
        let mut a = app("[flora]\ntree_probability = 1.0\nfruit_probability = 0.0\n", "");
        let pending = a.gs.scheduler.pending();
        assert!(pending > 0);
        a.run(42 * 5, 1.0 / 42.0);
        assert!(a.stats.leaves_fluttered > 0);
        assert_eq!(a.gs.scheduler.pending() + a.stats.leaves_fluttered as usize, pending);
    }

    #[test]
    fn avatar_eats_fruit_it_walks_into() {
        let mut a = app("[flora]\ntree_probability = 0.0\n", "");
        // drop one fruit right where the avatar stands
        let pos = a.gs.avatar.pos;
        let mut sched = canopy_runtime::Scheduler::new();
        let mut placer = canopy_world::FloraPlacer::seeded(
            |_| pos.y + 130.0,
            canopy_world::FloraParams {
                tree_probability: 1.0,
                leaf_probability: 0.0,
                fruit_probability: 1.0,
                canopy_reach: 1,
                ..canopy_world::FloraParams::default()
            },
            1,
        );
        let grove = placer.populate(pos.x as i32, pos.x as i32 + 1, &mut sched);
        a.gs.grove = grove;
        a.gs.avatar.set_energy(50.0);

        a.step(1.0 / 42.0);
        assert!(a.stats.fruit_eaten >= 1);
        assert!(a.gs.avatar.energy() > 51.0);
        assert!(a.gs.scheduler.pending() >= 1);
    }
}
