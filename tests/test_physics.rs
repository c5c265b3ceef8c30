use std::f32::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;

use wave_shooter::entities::{ThreatKind, Vec2};
use wave_shooter::physics::*;

#[test]
fn angle_between_points() {
    let origin = Vec2::new(100.0, 100.0);
    assert_relative_eq!(angle_between(origin, Vec2::new(200.0, 100.0)), 0.0);
    assert_relative_eq!(angle_between(origin, Vec2::new(100.0, 200.0)), FRAC_PI_2);
    assert_relative_eq!(angle_between(origin, Vec2::new(0.0, 100.0)), PI);
}

#[test]
fn velocity_toward_has_requested_speed() {
    let v = velocity_toward(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0), 200.0);
    assert_relative_eq!(v.x, 120.0, epsilon = 1e-3);
    assert_relative_eq!(v.y, 160.0, epsilon = 1e-3);
}

#[test]
fn velocity_toward_same_point_points_right() {
    let p = Vec2::new(5.0, 5.0);
    let v = velocity_toward(p, p, 10.0);
    assert_relative_eq!(v.x, 10.0);
    assert_relative_eq!(v.y, 0.0);
}

#[test]
fn integrate_uses_milliseconds() {
    let p = integrate(Vec2::new(10.0, 10.0), Vec2::new(100.0, -50.0), 250);
    assert_relative_eq!(p.x, 35.0);
    assert_relative_eq!(p.y, -2.5);
}

#[test]
fn clamp_keeps_body_inside() {
    let p = clamp_to_world(Vec2::new(-10.0, 700.0), 24.0, 800.0, 600.0);
    assert_eq!(p, Vec2::new(24.0, 576.0));
    let inside = Vec2::new(400.0, 300.0);
    assert_eq!(clamp_to_world(inside, 24.0, 800.0, 600.0), inside);
}

#[test]
fn out_of_bounds_respects_margin() {
    assert!(!out_of_bounds(Vec2::new(860.0, 300.0), 800.0, 600.0, 64.0));
    assert!(out_of_bounds(Vec2::new(865.0, 300.0), 800.0, 600.0, 64.0));
    assert!(out_of_bounds(Vec2::new(10.0, -65.0), 800.0, 600.0, 64.0));
    assert!(!out_of_bounds(Vec2::new(-64.0, 664.0), 800.0, 600.0, 64.0));
}

#[test]
fn touching_circles_do_not_overlap() {
    let a = Vec2::new(0.0, 0.0);
    assert!(overlaps(a, 5.0, Vec2::new(9.9, 0.0), 5.0));
    assert!(!overlaps(a, 5.0, Vec2::new(10.0, 0.0), 5.0));
}

#[test]
fn enemy_bullets_are_the_smallest_threat() {
    assert!(hit_radius(ThreatKind::EnemyBullet) < hit_radius(ThreatKind::CollidingEnemy));
    assert!(hit_radius(ThreatKind::EnemyBullet) < hit_radius(ThreatKind::Shooter));
}
