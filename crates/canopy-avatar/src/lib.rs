//! Player avatar: energy-gated action machine and its kinematics.
#![forbid(unsafe_code)]

mod avatar;
pub mod energy;
pub mod params;

pub use avatar::{AnimationClip, Avatar, AvatarAction, AvatarTick};
pub use energy::Energy;
pub use params::{AvatarConfig, AvatarParams};
