use std::sync::Arc;

use canopy_avatar::Avatar;
use canopy_runtime::Scheduler;
use canopy_world::{Block, FloraEvent, FloraPlacer, Grove, Terrain};

/// Shared terrain height query handed to flora and the avatar.
pub type Ground = Box<dyn Fn(f32) -> f32>;

pub fn ground_query(terrain: &Arc<Terrain>) -> Ground {
    let terrain = Arc::clone(terrain);
    Box::new(move |x| terrain.ground_height_at(x))
}

pub struct GameState {
    pub tick: u64,
    pub terrain: Arc<Terrain>,
    pub blocks: Vec<Block>,
    pub placer: FloraPlacer<Ground>,
    pub grove: Grove,
    pub scheduler: Scheduler<FloraEvent>,
    pub avatar: Avatar<Ground>,
}
