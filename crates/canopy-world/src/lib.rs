//! Terrain, flora, and their generation parameters.
#![forbid(unsafe_code)]

pub mod color;
pub mod flora;
pub mod noise;
pub mod terrain;
pub mod visual;
pub mod worldgen;

pub use flora::{
    Canopy, FloraEvent, FloraPlacer, FlutterTiming, Fruit, FruitId, FruitState, Grove, Leaf, LeafId,
    Tree, TreeId,
};
pub use noise::HeightField;
pub use terrain::{Block, BlockTag, Terrain};
pub use visual::VisualState;
pub use worldgen::{FloraParams, TerrainParams, WorldGenConfig, WorldGenParams};
