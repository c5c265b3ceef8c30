/// Arcade physics helpers: steering, integration, bounds and overlap tests.
///
/// Bodies are circles. Radii approximate the half-scaled sprites of the
/// ship and enemy artwork in world units.
use crate::entities::{ThreatKind, Vec2};

pub const PLAYER_RADIUS: f32 = 24.0;
pub const PLAYER_BULLET_RADIUS: f32 = 8.0;

pub fn hit_radius(kind: ThreatKind) -> f32 {
    match kind {
        ThreatKind::CollidingEnemy => 22.0,
        ThreatKind::Shooter => 24.0,
        ThreatKind::EnemyBullet => 6.0,
    }
}

/// Angle in radians from `from` to `to`, measured from the +x axis.
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Velocity of magnitude `speed` pointing from `from` to `to`.
/// Coincident points yield a velocity along +x.
pub fn velocity_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let angle = angle_between(from, to);
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Advance `pos` by `vel` (units per second) over `dt_ms`.
pub fn integrate(pos: Vec2, vel: Vec2, dt_ms: u64) -> Vec2 {
    let dt = dt_ms as f32 / 1000.0;
    Vec2::new(pos.x + vel.x * dt, pos.y + vel.y * dt)
}

/// Keep a body of `radius` fully inside the `width` x `height` world.
pub fn clamp_to_world(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, (width - radius).max(radius)),
        pos.y.clamp(radius, (height - radius).max(radius)),
    )
}

/// True once `pos` is more than `margin` outside the world rectangle.
pub fn out_of_bounds(pos: Vec2, width: f32, height: f32, margin: f32) -> bool {
    pos.x < -margin || pos.x > width + margin || pos.y < -margin || pos.y > height + margin
}

pub fn overlaps(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let reach = ra + rb;
    dx * dx + dy * dy < reach * reach
}
