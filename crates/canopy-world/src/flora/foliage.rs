use canopy_geom::{Aabb2, Color, Vec2};
use canopy_runtime::{Curve, Scheduler, Transition, TransitionMode};
use rand::Rng;

use super::{FloraEvent, FruitId, LeafId, TreeId};
use crate::color::{DEFAULT_JITTER, approximate_color};
use crate::visual::VisualState;

pub const TREE_BROWN: Color = Color::rgb(100, 50, 20);
pub const LEAF_GREEN: Color = Color::rgb(50, 200, 30);

const SWEEP_DEGREES: f32 = 90.0;
const NUDGE_PIXELS: f32 = 0.5;

pub struct Tree {
    pub id: TreeId,
    pub top_left: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub leaves: Vec<LeafId>,
    pub fruit: Vec<FruitId>,
}

impl Tree {
    pub fn new<R: Rng + ?Sized>(id: TreeId, top_left: Vec2, size: Vec2, rng: &mut R) -> Self {
        Self {
            id,
            top_left,
            size,
            color: approximate_color(rng, TREE_BROWN, DEFAULT_JITTER),
            leaves: Vec::new(),
            fruit: Vec::new(),
        }
    }

    /// Anchor of the canopy: the top of the trunk.
    #[inline]
    pub fn crown(&self) -> Vec2 {
        self.top_left
    }

    #[inline]
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_top_left(self.top_left, self.size)
    }

    pub fn update<R: Rng + ?Sized>(&mut self, visual: &VisualState, rng: &mut R) {
        if visual.special_mode {
            self.color = Color::rgb(rng.gen_range(50..=150), 50, 20);
        }
    }
}

/// Durations for a leaf's flutter, copied from the flora params at placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlutterTiming {
    pub nudge_secs: f32,
    pub sweep_secs: f32,
}

pub struct Leaf {
    pub id: LeafId,
    pub top_left: Vec2,
    pub size: f32,
    pub color: Color,
    /// Rotation in degrees.
    pub angle: f32,
    /// Horizontal wobble added to `top_left.x`.
    pub x_offset: f32,
    timing: FlutterTiming,
    angle_anim: Option<Transition>,
    nudge_anim: Option<Transition>,
}

fn sweep(secs: f32) -> Transition {
    Transition::new(0.0, SWEEP_DEGREES, Curve::Cubic, secs, TransitionMode::Once)
}

impl Leaf {
    pub fn new<R: Rng + ?Sized>(
        id: LeafId,
        top_left: Vec2,
        size: f32,
        timing: FlutterTiming,
        rng: &mut R,
    ) -> Self {
        Self {
            id,
            top_left,
            size,
            color: approximate_color(rng, LEAF_GREEN, DEFAULT_JITTER),
            angle: 0.0,
            x_offset: 0.0,
            timing,
            angle_anim: None,
            nudge_anim: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.top_left.x + self.x_offset, self.top_left.y)
    }

    #[inline]
    pub fn is_fluttering(&self) -> bool {
        self.nudge_anim.is_some()
    }

    pub fn start_flutter(&mut self) {
        self.nudge_anim = Some(Transition::new(
            0.0,
            NUDGE_PIXELS,
            Curve::Cubic,
            self.timing.nudge_secs,
            TransitionMode::BackAndForth,
        ));
        self.angle_anim = Some(sweep(self.timing.sweep_secs));
    }

    pub fn update(&mut self, dt: f32, visual: &VisualState) {
        if visual.special_mode {
            // restarted every tick while airborne
            self.angle_anim = Some(sweep(self.timing.sweep_secs));
        }
        if let Some(anim) = self.angle_anim.as_mut() {
            self.angle = anim.advance(dt);
        }
        if let Some(anim) = self.nudge_anim.as_mut() {
            self.x_offset = anim.advance(dt);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FruitState {
    Available,
    Cooldown,
}

pub struct Fruit {
    pub id: FruitId,
    pub top_left: Vec2,
    pub size: f32,
    pub opacity: f32,
    state: FruitState,
    generation: u32,
    cooldown_secs: f32,
    colors: [Color; 2],
    shade: usize,
}

impl Fruit {
    pub fn new(id: FruitId, top_left: Vec2, size: f32, cooldown_secs: f32) -> Self {
        Self {
            id,
            top_left,
            size,
            opacity: 1.0,
            state: FruitState::Available,
            generation: 0,
            cooldown_secs,
            colors: [Color::RED, Color::ORANGE],
            shade: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> FruitState {
        self.state
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.state == FruitState::Available
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.colors[self.shade]
    }

    #[inline]
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_top_left(self.top_left, Vec2::splat(self.size))
    }

    pub fn update(&mut self, visual: &VisualState) {
        if visual.special_mode {
            self.shade ^= 1;
        }
    }

    /// Takes the fruit out of play and schedules its restock.
    /// Returns false if it was already in cooldown.
    pub fn consume(&mut self, scheduler: &mut Scheduler<FloraEvent>) -> bool {
        if self.state != FruitState::Available {
            return false;
        }
        self.state = FruitState::Cooldown;
        self.generation = self.generation.wrapping_add(1);
        self.opacity = 0.0;
        scheduler.schedule_after(
            self.cooldown_secs,
            FloraEvent::FruitRestock {
                fruit: self.id,
                generation: self.generation,
            },
        );
        log::debug!(target: "events", "fruit {:?} consumed (gen {})", self.id, self.generation);
        true
    }

    /// Applies a restock scheduled for `generation`; stale generations are ignored.
    pub fn restock(&mut self, generation: u32) -> bool {
        if self.state != FruitState::Cooldown || generation != self.generation {
            log::debug!(
                target: "events",
                "fruit {:?}: ignoring stale restock gen {} (current {})",
                self.id,
                generation,
                self.generation
            );
            return false;
        }
        self.state = FruitState::Available;
        self.opacity = 1.0;
        true
    }
}
