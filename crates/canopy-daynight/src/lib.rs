//! Time-driven day/night lighting: darkness overlay, orbiting sun, halo, sky.
#![forbid(unsafe_code)]

mod cycle;
pub mod params;

pub use cycle::{DayNightCycle, DayNightSample, Disc};
pub use params::{DayNightConfig, DayNightParams};
