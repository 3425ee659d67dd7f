use canopy_geom::{Color, Vec2};
use canopy_runtime::{Curve, Transition, TransitionMode};

use crate::params::DayNightParams;

/// A filled circle in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disc {
    pub center: Vec2,
    pub size: f32,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayNightSample {
    pub elapsed: f32,
    /// Opacity of the black overlay, 0 at noon.
    pub night_opacity: f32,
    /// Orbit angle in degrees.
    pub sun_angle: f32,
    pub sun: Disc,
    pub halo: Disc,
    pub sky: Color,
}

/// Lighting as a pure function of elapsed time.
///
/// The darkness overlay bounces between 0 and `night_opacity` with a half
/// period of half a cycle. The sun starts at the window center and orbits
/// `(w/2, 2h/3 + 50)` once per cycle; the halo is centered on the sun.
pub struct DayNightCycle {
    params: DayNightParams,
    night: Transition,
    orbit: Transition,
    orbit_center: Vec2,
    sun_offset: Vec2,
    elapsed: f32,
}

impl DayNightCycle {
    pub fn new(params: DayNightParams, window: Vec2) -> Self {
        assert!(
            window.is_finite() && window.x > 0.0 && window.y > 0.0,
            "window must be positive, got {window:?}"
        );
        assert!(
            params.cycle_secs.is_finite() && params.cycle_secs > 0.0,
            "cycle length must be positive, got {}",
            params.cycle_secs
        );
        let night = Transition::new(
            0.0,
            params.night_opacity,
            Curve::Cubic,
            params.cycle_secs * 0.5,
            TransitionMode::BackAndForth,
        );
        let orbit = Transition::new(
            0.0,
            360.0,
            Curve::Linear,
            params.cycle_secs,
            TransitionMode::Loop,
        );
        let initial = window * 0.5;
        let orbit_center = Vec2::new(window.x * 0.5, window.y * 2.0 / 3.0 + 50.0);
        log::debug!(
            "day/night: cycle={}s orbit center=({:.1}, {:.1})",
            params.cycle_secs,
            orbit_center.x,
            orbit_center.y
        );
        Self {
            params,
            night,
            orbit,
            orbit_center,
            sun_offset: initial - orbit_center,
            elapsed: 0.0,
        }
    }

    #[inline]
    pub fn params(&self) -> &DayNightParams {
        &self.params
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn night_opacity_at(&self, elapsed: f32) -> f32 {
        self.night.value_at(elapsed)
    }

    pub fn sun_center_at(&self, elapsed: f32) -> Vec2 {
        self.sun_offset.rotated(self.orbit.value_at(elapsed)) + self.orbit_center
    }

    pub fn sample(&self, elapsed: f32) -> DayNightSample {
        let sun_angle = self.orbit.value_at(elapsed);
        let center = self.sun_offset.rotated(sun_angle) + self.orbit_center;
        DayNightSample {
            elapsed,
            night_opacity: self.night.value_at(elapsed),
            sun_angle,
            sun: Disc {
                center,
                size: self.params.sun_size,
                color: Color::YELLOW,
            },
            halo: Disc {
                center,
                size: self.params.halo_size,
                color: self.params.halo_color,
            },
            sky: self.params.sky_color,
        }
    }

    pub fn advance(&mut self, dt: f32) -> DayNightSample {
        // both curves repeat every cycle, so wrapping keeps precision
        self.elapsed = (self.elapsed + dt.max(0.0)).rem_euclid(self.params.cycle_secs);
        self.sample(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> DayNightCycle {
        DayNightCycle::new(DayNightParams::default(), Vec2::new(1000.0, 600.0))
    }

    fn near(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-2
    }

    #[test]
    fn sun_starts_at_window_center() {
        assert!(near(cycle().sun_center_at(0.0), Vec2::new(500.0, 300.0)));
    }

    #[test]
    fn sun_is_opposite_at_half_cycle() {
        // center (500, 450), radius 150
        assert!(near(cycle().sun_center_at(15.0), Vec2::new(500.0, 600.0)));
    }

    #[test]
    fn halo_follows_the_sun() {
        let c = cycle();
        for i in 0..60 {
            let s = c.sample(i as f32 * 0.7);
            assert_eq!(s.halo.center, s.sun.center);
            assert_eq!(s.halo.size, 130.0);
            assert_eq!(s.sky, Color::rgb(0x80, 0xC6, 0xE5));
        }
    }

    #[test]
    fn darkest_at_half_cycle() {
        let c = cycle();
        assert_eq!(c.night_opacity_at(0.0), 0.0);
        assert!((c.night_opacity_at(15.0) - 0.5).abs() < 1e-6);
        assert!(c.night_opacity_at(30.0).abs() < 1e-6);
    }

    #[test]
    fn advance_matches_sample() {
        let mut c = cycle();
        let mut last = c.sample(0.0);
        for _ in 0..100 {
            last = c.advance(0.25);
        }
        let expect = c.sample(25.0);
        assert!((last.night_opacity - expect.night_opacity).abs() < 1e-4);
        assert!(near(last.sun.center, expect.sun.center));
    }
}
