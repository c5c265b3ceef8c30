use std::io::Write;

use approx::assert_relative_eq;

use wave_shooter::config::{GameConfig, SpawnRange};
use wave_shooter::error::GameError;

#[test]
fn defaults_match_the_classic_tuning() {
    let rules = GameConfig::default().rules();
    assert_relative_eq!(rules.world_width, 800.0);
    assert_relative_eq!(rules.world_height, 600.0);
    assert_eq!(rules.fire_rate_ms, 400);
    assert_eq!(rules.max_lives, 3);
    assert_eq!(rules.starting_level, 1);
    assert_eq!(rules.wave_duration_ms, 7000);
    assert_eq!(rules.spawn_delay_min_ms, 500);
    assert_eq!(rules.intermission_ms, 2000);
    assert_eq!(rules.enemy_fire_period_ms, 1000);
    assert_relative_eq!(rules.enemy_bullet_speed, 200.0);
    assert_eq!(rules.colliding_y, SpawnRange { min: 50, max: 550 });
    assert_eq!(rules.shooter_y, SpawnRange { min: 30, max: 550 });
    assert!(!rules.escalate_levels);
}

#[test]
fn wave_formulas() {
    let rules = GameConfig::default().rules();
    assert_eq!(rules.colliding_count(1), 5);
    assert_eq!(rules.shooter_count(1), 4);
    assert_relative_eq!(rules.homing_speed(1), 120.0);
    assert_relative_eq!(rules.homing_speed(4), 180.0);
}

#[test]
fn partial_toml_overrides_only_named_values() {
    let cfg = GameConfig::from_toml_str(
        r#"
        [player]
        fire_rate_ms = 250

        [waves]
        escalate_levels = true

        [assets]
        enemyOne = "X"
        "#,
    )
    .unwrap();
    assert_eq!(cfg.player.fire_rate_ms, 250);
    assert_relative_eq!(cfg.player.speed, 200.0);
    assert!(cfg.waves.escalate_levels);
    assert_eq!(cfg.waves.duration_ms, 7000);
    assert_eq!(cfg.assets.get("enemyOne").map(String::as_str), Some("X"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("[player\nspeed = ").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse(_)));
}

#[test]
fn inverted_spawn_range_is_rejected() {
    let err = GameConfig::from_toml_str(
        r#"
        [enemies.shooter_y]
        min = 400
        max = 100
        "#,
    )
    .unwrap_err();
    match err {
        GameError::InvalidConfig(msg) => assert!(msg.contains("enemies.shooter_y")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn spawn_delay_longer_than_wave_is_rejected() {
    let mut cfg = GameConfig::default();
    cfg.waves.spawn_delay_min_ms = 8000;
    assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
}

#[test]
fn zero_sized_world_and_zero_lives_are_rejected() {
    let mut cfg = GameConfig::default();
    cfg.world.width = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = GameConfig::default();
    cfg.player.max_lives = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = GameConfig::default();
    cfg.enemies.fire_period_ms = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn more_than_three_lives_is_rejected() {
    let err = GameConfig::from_toml_str("[player]\nmax_lives = 7\n").unwrap_err();
    match err {
        GameError::InvalidConfig(msg) => assert!(msg.contains("player.max_lives"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }

    let cfg = GameConfig::from_toml_str("[player]\nmax_lives = 2\n").unwrap();
    assert_eq!(cfg.rules().max_lives, 2);
}

#[test]
fn default_config_has_no_warnings() {
    let cfg = GameConfig::default();
    assert!(cfg.validate().is_ok());
    assert!(cfg.warnings().is_empty(), "{:?}", cfg.warnings());
}

#[test]
fn suspicious_values_produce_warnings() {
    let mut cfg = GameConfig::default();
    cfg.player.fire_rate_ms = 0;
    cfg.enemies.colliding_y = SpawnRange { min: -10, max: 700 };
    let warnings = cfg.warnings().join(" | ");
    assert!(warnings.contains("fire_rate_ms"), "{warnings}");
    assert!(warnings.contains("enemies.colliding_y"), "{warnings}");
}

#[test]
fn load_from_file_reads_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[world]\nwidth = 1024.0").unwrap();
    let cfg = GameConfig::load_from_file(file.path()).unwrap();
    assert_relative_eq!(cfg.world.width, 1024.0);
    assert_relative_eq!(cfg.world.height, 600.0);
}

#[test]
fn missing_file_is_a_read_error() {
    let err = GameConfig::load_from_file("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, GameError::ConfigRead { .. }));
    assert!(err.to_string().contains("/definitely/not/here.toml"));
}

#[test]
fn sample_config_matches_defaults() {
    let cfg = GameConfig::from_toml_str(include_str!("../config/wave_shooter.toml")).unwrap();
    assert_eq!(cfg, GameConfig::default());
    assert!(cfg.warnings().is_empty());
}
