use wave_shooter::boot::*;
use wave_shooter::config::GameConfig;
use wave_shooter::entities::{Sound, ThreatKind};
use wave_shooter::error::GameError;

fn config_with(overrides: &[(&str, &str)]) -> GameConfig {
    let mut cfg = GameConfig::default();
    for (k, v) in overrides {
        cfg.assets.insert(k.to_string(), v.to_string());
    }
    cfg
}

#[test]
fn default_manifest_loads_every_key() {
    let assets = load_assets(&GameConfig::default()).unwrap();
    assert_eq!(assets.len(), AssetKey::ALL.len());
    for key in AssetKey::ALL {
        match key.kind() {
            AssetKind::Image => assert!(!assets.glyph(key).is_empty(), "{key:?}"),
            AssetKind::Audio => assert!(matches!(assets.get(key), Some(Asset::Audio(_)))),
        }
    }
}

#[test]
fn key_names_round_trip() {
    assert_eq!(AssetKey::from_name("enemyLaser"), Some(AssetKey::EnemyLaser));
    assert_eq!(AssetKey::from_name("life3"), Some(AssetKey::Life3));
    assert_eq!(AssetKey::from_name("boss"), None);
}

#[test]
fn glyph_override_is_applied() {
    let assets = load_assets(&config_with(&[("enemyTwo", "<S>")])).unwrap();
    assert_eq!(assets.glyph(AssetKey::EnemyTwo), "<S>");
    assert_eq!(assets.glyph(AssetKey::for_threat(ThreatKind::Shooter)), "<S>");
}

#[test]
fn empty_or_wide_glyphs_are_rejected() {
    assert!(matches!(
        load_assets(&config_with(&[("player", "")])),
        Err(GameError::MissingAsset(_))
    ));
    assert!(load_assets(&config_with(&[("laser", "====")])).is_err());
}

#[test]
fn unknown_key_is_rejected() {
    let err = load_assets(&config_with(&[("boss", "B")])).unwrap_err();
    assert!(err.to_string().contains("boss"));
}

#[test]
fn audio_cues() {
    let assets = load_assets(&GameConfig::default()).unwrap();
    assert_eq!(assets.cue(Sound::Explosion), AudioCue::Bell);
    assert_eq!(assets.cue(Sound::Laser), AudioCue::Silent);

    let loud = load_assets(&config_with(&[("laserSound", "bell")])).unwrap();
    assert_eq!(loud.cue(Sound::Laser), AudioCue::Bell);

    assert!(load_assets(&config_with(&[("laserSound", "pew.ogg")])).is_err());
}

#[test]
fn bell_can_be_disabled() {
    let mut cfg = GameConfig::default();
    cfg.audio.bell = false;
    let assets = load_assets(&cfg).unwrap();
    assert_eq!(assets.cue(Sound::Explosion), AudioCue::Silent);
}

#[test]
fn lives_display_uses_numeral_assets() {
    let assets = load_assets(&config_with(&[("life2", "II")])).unwrap();
    assert_eq!(assets.life_glyph(3), "3");
    assert_eq!(assets.life_glyph(2), "II");
    assert_eq!(assets.life_glyph(0), "0");
}
