use canopy_geom::{Aabb2, Color, Vec2};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec2_approx_eq(a: Vec2, b: Vec2, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps)
}

#[test]
fn vec2_add_sub() {
    let a = Vec2::new(1.0, 2.0);
    let b = Vec2::new(-4.0, 5.0);
    let c = a + b;
    assert!(vec2_approx_eq(c, Vec2::new(-3.0, 7.0), 1e-6));
    assert!(vec2_approx_eq(c - a, b, 1e-6));
}

#[test]
fn vec2_rotate_quarter_turn() {
    let v = Vec2::new(1.0, 0.0);
    assert!(vec2_approx_eq(v.rotated(90.0), Vec2::new(0.0, 1.0), 1e-6));
    assert!(vec2_approx_eq(v.rotated(180.0), Vec2::new(-1.0, 0.0), 1e-6));
}

#[test]
fn aabb_touching_edges_do_not_intersect() {
    let a = Aabb2::from_top_left(Vec2::ZERO, Vec2::splat(10.0));
    let b = Aabb2::from_top_left(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
    assert!(!a.intersects(&b));
    let c = Aabb2::from_top_left(Vec2::new(9.5, 9.5), Vec2::splat(10.0));
    assert!(a.intersects(&c));
    assert!(vec2_approx_eq(a.center(), Vec2::splat(5.0), 1e-6));
}

#[test]
fn color_hex_and_shift() {
    assert_eq!(Color::from_hex("#80C6E5"), Some(Color::rgb(0x80, 0xC6, 0xE5)));
    assert_eq!(Color::from_hex("80C6E5"), None);
    assert_eq!(Color::from_hex("#80C6"), None);
    let c = Color::rgb(250, 5, 100).shifted(10, -10, 3);
    assert_eq!(c, Color::rgb(255, 0, 103));
}
