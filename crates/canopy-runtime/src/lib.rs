//! Host-side primitives the world core runs on: deferred one-shot events,
//! property transitions, and discrete input queries.
#![forbid(unsafe_code)]

pub mod input;
pub mod schedule;
pub mod transition;

pub use input::{InputSource, Key, NoInput};
pub use schedule::{Envelope, Scheduler, SimTime, secs_to_sim, sim_to_secs};
pub use transition::{Curve, Transition, TransitionMode};
