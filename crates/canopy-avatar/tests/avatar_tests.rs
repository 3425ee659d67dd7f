use canopy_avatar::{AnimationClip, Avatar, AvatarAction, AvatarParams};
use canopy_geom::Vec2;
use canopy_runtime::{Key, NoInput, Scheduler};
use canopy_world::{FloraEvent, Fruit, FruitId};
use proptest::prelude::*;

const DT: f32 = 1.0 / 42.0;

fn flat(_x: f32) -> f32 {
    500.0
}

fn avatar() -> Avatar<fn(f32) -> f32> {
    Avatar::spawn(0.0, flat as fn(f32) -> f32, AvatarParams::default())
}

fn pressing(keys: &'static [Key]) -> impl Fn(Key) -> bool {
    move |k| keys.contains(&k)
}

#[test]
fn spawns_on_the_ground() {
    let a = avatar();
    assert_eq!(a.pos, Vec2::new(0.0, 460.0));
    assert!(a.is_grounded());
    assert_eq!(a.energy(), 100.0);
}

#[test]
fn full_energy_jump() {
    let mut a = avatar();
    let jump = pressing(&[Key::Jump]);
    let first = a.update(DT, &jump);
    assert_eq!(first.action, AvatarAction::Jump);
    assert_eq!(first.energy, 90.0);
    assert!(first.airborne);
    assert!(a.pos.y < 460.0);

    // holding jump mid-air neither jumps again nor reports airborne
    let mut airborne_ticks = 1;
    for _ in 0..200 {
        let t = a.update(DT, &jump);
        if t.airborne {
            airborne_ticks += 1;
        }
        if a.is_grounded() {
            break;
        }
        assert_eq!(t.energy, 90.0);
    }
    assert_eq!(airborne_ticks, 1);
    assert!(a.is_grounded());
    assert_eq!(a.pos.y, 460.0);
}

#[test]
fn jump_cost_sticks_until_landing() {
    let mut a = avatar();
    let first = a.update(DT, &pressing(&[Key::Jump]));
    assert_eq!(first.clip, Some(AnimationClip::Jump));

    let mut flight = 0;
    while !a.is_grounded() {
        let t = a.update(DT, &NoInput);
        flight += 1;
        assert!(flight < 500, "never landed");
        if a.is_grounded() {
            break;
        }
        assert_eq!(t.action, AvatarAction::Jump);
        assert_eq!(t.energy, 90.0);
        assert!(!t.airborne);
        assert_eq!(t.clip, None);
    }
    assert!(flight > 1);

    // first grounded idle tick regenerates and swaps back to idle
    let t = a.update(DT, &NoInput);
    assert_eq!(t.action, AvatarAction::Idle);
    assert_eq!(t.energy, 91.0);
    assert_eq!(t.clip, Some(AnimationClip::Idle));
}

#[test]
fn low_energy_runs_but_cannot_jump_the_same_tick() {
    let mut a = avatar();
    a.set_energy(5.0);
    let t = a.update(DT, &pressing(&[Key::Left, Key::Jump]));
    assert_eq!(t.action, AvatarAction::MoveLeft);
    assert_eq!(t.energy, 4.5);
    assert!(!t.airborne);
    assert_eq!(a.vel.x, -210.0);
}

#[test]
fn jump_without_energy_falls_back_to_idle() {
    let mut a = avatar();
    a.set_energy(9.0);
    let t = a.update(DT, &pressing(&[Key::Jump]));
    assert_eq!(t.action, AvatarAction::Idle);
    assert!(!t.airborne);
    assert_eq!(t.energy, 10.0);
}

#[test]
fn idle_regen_caps_at_max() {
    let mut a = avatar();
    a.set_energy(99.5);
    assert_eq!(a.update(DT, &NoInput).energy, 100.0);
    assert_eq!(a.update(DT, &NoInput).energy, 100.0);
}

#[test]
fn clip_changes_only_on_new_action() {
    let mut a = avatar();
    let right = pressing(&[Key::Right]);
    let left = pressing(&[Key::Left]);
    assert_eq!(a.update(DT, &NoInput).clip, Some(AnimationClip::Idle));
    assert_eq!(a.update(DT, &NoInput).clip, None);
    assert_eq!(
        a.update(DT, &right).clip,
        Some(AnimationClip::Run { flip_x: false })
    );
    assert_eq!(a.update(DT, &right).clip, None);
    assert_eq!(
        a.update(DT, &left).clip,
        Some(AnimationClip::Run { flip_x: true })
    );
}

#[test]
fn fruit_credits_once_and_caps() {
    let mut a = avatar();
    let mut sched: Scheduler<FloraEvent> = Scheduler::new();
    let mut fruit = Fruit::new(FruitId(1), Vec2::ZERO, 13.0, 30.0);
    a.set_energy(95.0);
    assert!(a.on_fruit_collision(&mut fruit, &mut sched));
    assert_eq!(a.energy(), 100.0);
    a.set_energy(50.0);
    assert!(!a.on_fruit_collision(&mut fruit, &mut sched));
    assert_eq!(a.energy(), 50.0);
    assert!(!fruit.is_available());
}

#[test]
fn eaten_fruit_comes_back_without_interaction() {
    let mut a = avatar();
    let mut sched = Scheduler::new();
    let mut fruit = Fruit::new(FruitId(1), Vec2::ZERO, 13.0, 30.0);
    a.on_fruit_collision(&mut fruit, &mut sched);

    sched.advance(29.999);
    assert!(sched.pop_ready().is_none());
    sched.advance(0.001);
    let env = sched.pop_ready().expect("restock due at 30s");
    match env.payload {
        FloraEvent::FruitRestock { generation, .. } => assert!(fruit.restock(generation)),
        other => panic!("unexpected {other:?}"),
    }
    assert!(fruit.is_available());
}

proptest! {
    // a run is accepted iff energy covers it, and costs exactly the run cost
    #[test]
    fn run_accepted_iff_affordable(e in 0.0f32..100.0) {
        let mut a = avatar();
        a.set_energy(e);
        let t = a.update(DT, &pressing(&[Key::Right]));
        if e >= 0.5 {
            prop_assert_eq!(t.action, AvatarAction::MoveRight);
            prop_assert_eq!(t.energy, e - 0.5);
        } else {
            prop_assert_eq!(t.action, AvatarAction::Idle);
            prop_assert_eq!(t.energy, (e + 1.0).min(100.0));
        }
    }

    #[test]
    fn energy_stays_in_bounds(keys in proptest::collection::vec(0u8..8, 1..300)) {
        let mut a = avatar();
        let mut sched = Scheduler::new();
        for k in keys {
            let input = move |key: Key| match key {
                Key::Left => k & 1 != 0,
                Key::Right => k & 2 != 0,
                Key::Jump => k & 4 != 0,
            };
            let t = a.update(DT, &input);
            prop_assert!((0.0..=100.0).contains(&t.energy));
            let mut fruit = Fruit::new(FruitId(0), Vec2::ZERO, 13.0, 30.0);
            a.on_fruit_collision(&mut fruit, &mut sched);
            prop_assert!(a.energy() <= 100.0);
        }
    }
}
