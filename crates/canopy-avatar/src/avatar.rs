use canopy_geom::{Aabb2, Vec2};
use canopy_runtime::{InputSource, Key, Scheduler};
use canopy_world::{FloraEvent, Fruit};

use crate::energy::Energy;
use crate::params::AvatarParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AvatarAction {
    Idle,
    Jump,
    MoveLeft,
    MoveRight,
}

/// Animation the renderer should switch to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationClip {
    Idle,
    Jump,
    Run { flip_x: bool },
}

impl From<AvatarAction> for AnimationClip {
    fn from(action: AvatarAction) -> Self {
        match action {
            AvatarAction::Idle => Self::Idle,
            AvatarAction::Jump => Self::Jump,
            AvatarAction::MoveLeft => Self::Run { flip_x: true },
            AvatarAction::MoveRight => Self::Run { flip_x: false },
        }
    }
}

/// What one tick of the avatar produced, for the host's observers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvatarTick {
    pub action: AvatarAction,
    pub energy: f32,
    /// True only on the tick a jump starts.
    pub airborne: bool,
    /// Present only when the rendered animation has to change.
    pub clip: Option<AnimationClip>,
}

/// The player. `G` is the terrain height query used to spawn and land.
pub struct Avatar<G> {
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    ground: G,
    energy: Energy,
    action: AvatarAction,
    rendered: Option<AvatarAction>,
    params: AvatarParams,
}

impl<G> Avatar<G>
where
    G: Fn(f32) -> f32,
{
    /// Places the avatar with its feet on the ground at `x`.
    pub fn spawn(x: f32, ground: G, params: AvatarParams) -> Self {
        assert!(x.is_finite(), "spawn x must be finite, got {x}");
        let pos = Vec2::new(x, ground(x) - params.size);
        log::info!("avatar: spawned at ({:.1}, {:.1})", pos.x, pos.y);
        Self {
            pos,
            vel: Vec2::ZERO,
            on_ground: true,
            ground,
            energy: Energy::full(params.max_energy),
            action: AvatarAction::Idle,
            rendered: None,
            params,
        }
    }

    #[inline]
    pub fn action(&self) -> AvatarAction {
        self.action
    }

    #[inline]
    pub fn energy(&self) -> f32 {
        self.energy.value()
    }

    pub fn set_energy(&mut self, value: f32) {
        self.energy.set(value);
    }

    #[inline]
    pub fn params(&self) -> &AvatarParams {
        &self.params
    }

    #[inline]
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_top_left(self.pos, Vec2::splat(self.params.size))
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.on_ground && self.vel.y == 0.0
    }

    /// Picks this tick's action from `input`, then moves the avatar by `dt`.
    ///
    /// Idle regeneration only happens on the ground; in the air the previous
    /// action carries over until the avatar lands or runs.
    pub fn update<I: InputSource + ?Sized>(&mut self, dt: f32, input: &I) -> AvatarTick {
        let p = &self.params;
        let mut action = AvatarAction::Idle;
        self.vel.x = 0.0;
        if input.is_pressed(Key::Left) && self.energy.try_spend(p.run_cost) {
            action = AvatarAction::MoveLeft;
            self.vel.x = -p.run_speed;
        } else if input.is_pressed(Key::Right) && self.energy.try_spend(p.run_cost) {
            action = AvatarAction::MoveRight;
            self.vel.x = p.run_speed;
        }

        let mut airborne = false;
        if action == AvatarAction::Idle {
            if !self.is_grounded() {
                // mid-air without running: keep the current action, no regen
                action = self.action;
            } else if input.is_pressed(Key::Jump) && self.energy.try_spend(p.jump_cost) {
                action = AvatarAction::Jump;
                self.vel.y = -p.jump_speed;
                airborne = true;
            } else {
                self.energy.credit(p.idle_regen);
            }
        }

        self.action = action;
        let clip = if self.rendered != Some(action) {
            self.rendered = Some(action);
            Some(AnimationClip::from(action))
        } else {
            None
        };

        self.integrate(dt);
        log::trace!(
            target: "events",
            "avatar: {:?} energy={:.1} pos=({:.1}, {:.1})",
            action,
            self.energy.value(),
            self.pos.x,
            self.pos.y
        );
        AvatarTick {
            action,
            energy: self.energy.value(),
            airborne,
            clip,
        }
    }

    fn integrate(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.vel.y += self.params.gravity * dt;
        self.pos += self.vel * dt;
        let floor = (self.ground)(self.pos.x) - self.params.size;
        self.on_ground = self.vel.y >= 0.0 && self.pos.y >= floor;
        if self.on_ground {
            self.pos.y = floor;
            self.vel.y = 0.0;
        }
    }

    /// Eats `fruit` if it is available. Returns whether energy was credited.
    pub fn on_fruit_collision(
        &mut self,
        fruit: &mut Fruit,
        scheduler: &mut Scheduler<FloraEvent>,
    ) -> bool {
        if !fruit.consume(scheduler) {
            return false;
        }
        self.energy.credit(self.params.fruit_energy);
        log::debug!(
            target: "events",
            "avatar: ate fruit {:?}, energy {:.1}",
            fruit.id,
            self.energy.value()
        );
        true
    }
}
