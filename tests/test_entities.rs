use rand::rngs::StdRng;
use rand::SeedableRng;

use wave_shooter::compute::init_state;
use wave_shooter::config::Rules;
use wave_shooter::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq, so equality comparisons must work
    assert_eq!(ThreatKind::Shooter, ThreatKind::Shooter);
    assert_ne!(ThreatKind::Shooter, ThreatKind::EnemyBullet);
    assert_ne!(GameStatus::WaveActive, GameStatus::WaveCleared);
    assert_ne!(Sound::Laser, Sound::Explosion);
    assert_eq!(Directions::default(), Directions {
        left: false,
        right: false,
        up: false,
        down: false
    });

    // Copy must produce an equal value
    let kind = ThreatKind::CollidingEnemy;
    let copy = kind;
    assert_eq!(copy, kind);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(Rules::default(), &mut StdRng::seed_from_u64(1));
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.pos.x = 99.0;
    cloned.run.score = 999;
    cloned.threats.clear();
    cloned.timers.once(0, 10, wave_shooter::timers::TimerAction::EndIntermission);

    assert_eq!(original.player.pos.x, 50.0);
    assert_eq!(original.run.score, 0);
    assert_eq!(original.threats.len(), 2);
    assert_eq!(original.timers.pending() + 1, cloned.timers.pending());
}

#[test]
fn count_of_filters_by_kind() {
    let mut s = init_state(Rules::default(), &mut StdRng::seed_from_u64(1));
    s.threats.push(Threat {
        id: 77,
        kind: ThreatKind::EnemyBullet,
        pos: Vec2::ZERO,
        vel: Vec2::ZERO,
        rotation: 0.0,
    });
    assert_eq!(s.count_of(ThreatKind::CollidingEnemy), 1);
    assert_eq!(s.count_of(ThreatKind::Shooter), 1);
    assert_eq!(s.count_of(ThreatKind::EnemyBullet), 1);
}
