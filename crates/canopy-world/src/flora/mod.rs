//! Stochastic trees, leaves and fruit anchored to the terrain surface.

mod foliage;

pub use foliage::{FlutterTiming, Fruit, FruitState, LEAF_GREEN, Leaf, TREE_BROWN, Tree};

use canopy_geom::Vec2;
use canopy_runtime::Scheduler;
use hashbrown::HashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::visual::VisualState;
use crate::worldgen::FloraParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FruitId(pub u32);

/// Deferred flora callbacks, delivered through a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloraEvent {
    LeafFlutter(LeafId),
    FruitRestock { fruit: FruitId, generation: u32 },
}

/// Leaves and fruit placed around one crown.
#[derive(Default)]
pub struct Canopy {
    pub leaves: Vec<Leaf>,
    pub fruit: Vec<Fruit>,
}

/// Places flora along a ground query and owns the shared visual state.
///
/// `H` is the height query (`x -> ground y`). Every placement roll draws from
/// `R`; seed it to get reproducible worlds.
pub struct FloraPlacer<H, R = ChaCha8Rng> {
    ground: H,
    rng: R,
    params: FloraParams,
    visual: VisualState,
    next_id: u32,
}

impl<H> FloraPlacer<H, ChaCha8Rng>
where
    H: Fn(f32) -> f32,
{
    pub fn new(ground: H, params: FloraParams) -> Self {
        Self::with_rng(ground, params, ChaCha8Rng::from_entropy())
    }

    pub fn seeded(ground: H, params: FloraParams, seed: u64) -> Self {
        Self::with_rng(ground, params, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<H, R> FloraPlacer<H, R>
where
    H: Fn(f32) -> f32,
    R: Rng,
{
    pub fn with_rng(ground: H, params: FloraParams, rng: R) -> Self {
        Self {
            ground,
            rng,
            params,
            visual: VisualState::default(),
            next_id: 0,
        }
    }

    #[inline]
    pub fn params(&self) -> &FloraParams {
        &self.params
    }

    #[inline]
    pub fn visual_state(&self) -> VisualState {
        self.visual
    }

    #[inline]
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    #[inline]
    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    #[inline]
    fn roll(&mut self, probability: f32) -> bool {
        self.rng.r#gen::<f32>() < probability
    }

    /// One independent roll per block-wide cell in `[min_x, max_x)`.
    pub fn create_trees_in_range(&mut self, min_x: i32, max_x: i32) -> Vec<Tree> {
        assert!(min_x <= max_x, "reversed flora range [{min_x}, {max_x})");
        let stride = self.params.tree_width;
        let size = Vec2::new(self.params.tree_width, self.params.tree_height);
        let mut trees = Vec::new();
        let mut cell = 0_i32;
        loop {
            let x = min_x as f32 + cell as f32 * stride;
            if x >= max_x as f32 {
                break;
            }
            cell += 1;
            if !self.roll(self.params.tree_probability) {
                continue;
            }
            let crown_y = (self.ground)(x) - self.params.tree_height;
            let id = TreeId(self.alloc_id());
            trees.push(Tree::new(id, Vec2::new(x, crown_y), size, &mut self.rng));
        }
        log::debug!("flora: {} trees in [{}, {})", trees.len(), min_x, max_x);
        trees
    }

    /// Fills the square around `crown` with leaves and fruit.
    ///
    /// Each leaf gets a flutter event at a delay one stagger step later than
    /// the previous leaf's.
    pub fn create_canopy(&mut self, crown: Vec2, scheduler: &mut Scheduler<FloraEvent>) -> Canopy {
        assert!(crown.is_finite(), "canopy crown must be finite, got {crown:?}");
        let leaf = self.params.leaf_size;
        let reach = self.params.canopy_reach as f32 * leaf;
        let timing = FlutterTiming {
            nudge_secs: self.params.flutter_nudge_secs,
            sweep_secs: self.params.flutter_sweep_secs,
        };
        let x0 = (crown.x - reach).floor();
        let y0 = (crown.y - reach).floor();
        let mut canopy = Canopy::default();
        let mut delay = 0.0_f32;
        let mut i = 0_i32;
        loop {
            let x = x0 + i as f32 * leaf;
            if x >= crown.x + reach {
                break;
            }
            let mut j = 0_i32;
            loop {
                let y = y0 + j as f32 * leaf;
                if y >= crown.y + reach {
                    break;
                }
                j += 1;
                let pos = Vec2::new(x, y);
                if self.roll(self.params.leaf_probability) {
                    let id = LeafId(self.alloc_id());
                    delay += self.params.flutter_stagger;
                    scheduler.schedule_after(delay, FloraEvent::LeafFlutter(id));
                    canopy
                        .leaves
                        .push(Leaf::new(id, pos, leaf, timing, &mut self.rng));
                } else if self.roll(self.params.fruit_probability) {
                    let id = FruitId(self.alloc_id());
                    canopy.fruit.push(Fruit::new(
                        id,
                        pos,
                        self.params.fruit_size,
                        self.params.fruit_cooldown_secs,
                    ));
                }
            }
            i += 1;
        }
        log::trace!(
            "flora: canopy at ({:.1}, {:.1}) with {} leaves, {} fruit",
            crown.x,
            crown.y,
            canopy.leaves.len(),
            canopy.fruit.len()
        );
        canopy
    }

    /// Trees for `[min_x, max_x)` together with their canopies.
    pub fn populate(
        &mut self,
        min_x: i32,
        max_x: i32,
        scheduler: &mut Scheduler<FloraEvent>,
    ) -> Grove {
        let mut grove = Grove::default();
        for tree in self.create_trees_in_range(min_x, max_x) {
            let canopy = self.create_canopy(tree.crown(), scheduler);
            grove.insert(tree, canopy);
        }
        log::info!(
            "flora: populated [{}, {}) with {} trees, {} leaves, {} fruit",
            min_x,
            max_x,
            grove.trees.len(),
            grove.leaves.len(),
            grove.fruit.len()
        );
        grove
    }

    /// Switches special mode on an airborne transition. Returns whether the
    /// state changed; repeated calls with the same value are no-ops.
    pub fn set_airborne(&mut self, airborne: bool) -> bool {
        if self.visual.special_mode == airborne {
            return false;
        }
        self.visual.special_mode = airborne;
        log::debug!(target: "events", "flora: special mode {}", if airborne { "on" } else { "off" });
        true
    }

    /// Runs one tick of every entity in `grove` under the current visual state.
    pub fn update_grove(&mut self, grove: &mut Grove, dt: f32) {
        let visual = self.visual;
        grove.update(dt, &visual, &mut self.rng);
    }
}

/// Owning store for placed flora, indexed by id.
#[derive(Default)]
pub struct Grove {
    pub trees: Vec<Tree>,
    pub leaves: HashMap<LeafId, Leaf>,
    pub fruit: HashMap<FruitId, Fruit>,
}

impl Grove {
    pub fn insert(&mut self, mut tree: Tree, canopy: Canopy) {
        for leaf in canopy.leaves {
            tree.leaves.push(leaf.id);
            self.leaves.insert(leaf.id, leaf);
        }
        for fruit in canopy.fruit {
            tree.fruit.push(fruit.id);
            self.fruit.insert(fruit.id, fruit);
        }
        self.trees.push(tree);
    }

    #[inline]
    pub fn leaf(&self, id: LeafId) -> Option<&Leaf> {
        self.leaves.get(&id)
    }

    #[inline]
    pub fn fruit(&self, id: FruitId) -> Option<&Fruit> {
        self.fruit.get(&id)
    }

    #[inline]
    pub fn fruit_mut(&mut self, id: FruitId) -> Option<&mut Fruit> {
        self.fruit.get_mut(&id)
    }

    pub fn available_fruit(&self) -> impl Iterator<Item = &Fruit> + '_ {
        self.fruit.values().filter(|f| f.is_available())
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, visual: &VisualState, rng: &mut R) {
        for tree in &mut self.trees {
            tree.update(visual, rng);
        }
        for leaf in self.leaves.values_mut() {
            leaf.update(dt, visual);
        }
        for fruit in self.fruit.values_mut() {
            fruit.update(visual);
        }
    }

    /// Applies a fired flora event. Returns false if its target is gone or
    /// the event is stale.
    pub fn handle_event(&mut self, event: FloraEvent) -> bool {
        match event {
            FloraEvent::LeafFlutter(id) => match self.leaves.get_mut(&id) {
                Some(leaf) => {
                    leaf.start_flutter();
                    log::trace!(target: "events", "leaf {:?} flutters", id);
                    true
                }
                None => false,
            },
            FloraEvent::FruitRestock { fruit, generation } => {
                let restocked = self
                    .fruit
                    .get_mut(&fruit)
                    .is_some_and(|f| f.restock(generation));
                if restocked {
                    log::debug!(target: "events", "fruit {:?} restocked", fruit);
                }
                restocked
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(y: f32) -> impl Fn(f32) -> f32 {
        move |_| y
    }

    #[test]
    fn zero_probability_places_nothing() {
        let params = FloraParams {
            tree_probability: 0.0,
            ..FloraParams::default()
        };
        let mut placer = FloraPlacer::seeded(flat(400.0), params, 1);
        assert!(placer.create_trees_in_range(-1000, 1000).is_empty());
    }

    #[test]
    fn same_seed_same_trees() {
        let params = FloraParams {
            tree_probability: 0.3,
            ..FloraParams::default()
        };
        let xs = |seed| {
            let mut p = FloraPlacer::seeded(flat(400.0), params.clone(), seed);
            p.create_trees_in_range(0, 2000)
                .iter()
                .map(|t| t.top_left.x)
                .collect::<Vec<_>>()
        };
        assert_eq!(xs(9), xs(9));
    }

    #[test]
    fn canopy_cells_are_exclusive_and_on_grid() {
        let params = FloraParams {
            leaf_probability: 0.5,
            fruit_probability: 1.0,
            ..FloraParams::default()
        };
        let mut placer = FloraPlacer::seeded(flat(400.0), params, 4);
        let mut sched = Scheduler::new();
        let c = placer.create_canopy(Vec2::new(100.0, 270.0), &mut sched);
        // 8x8 cells, every cell holds exactly one of leaf or fruit
        assert_eq!(c.leaves.len() + c.fruit.len(), 64);
        for p in c.leaves.iter().map(|l| l.top_left).chain(c.fruit.iter().map(|f| f.top_left)) {
            assert_eq!((p.x - 40.0) % 15.0, 0.0);
            assert_eq!((p.y - 210.0) % 15.0, 0.0);
        }
        assert_eq!(sched.pending(), c.leaves.len());
    }

    #[test]
    fn airborne_broadcast_is_edge_triggered() {
        let mut placer = FloraPlacer::seeded(flat(0.0), FloraParams::default(), 0);
        assert!(!placer.set_airborne(false));
        assert!(placer.set_airborne(true));
        assert!(!placer.set_airborne(true));
        assert!(placer.visual_state().special_mode);
        assert!(placer.set_airborne(false));
        assert!(!placer.visual_state().special_mode);
    }

    #[test]
    fn grove_ignores_unknown_ids() {
        let mut grove = Grove::default();
        assert!(!grove.handle_event(FloraEvent::LeafFlutter(LeafId(3))));
        assert!(!grove.handle_event(FloraEvent::FruitRestock {
            fruit: FruitId(3),
            generation: 1
        }));
    }
}
