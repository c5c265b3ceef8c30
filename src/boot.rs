/// Boot stage: resolve every asset the gameplay stage needs before the first
/// frame.
///
/// Images resolve to terminal glyphs and audio resolves to cues the front end
/// can play (the terminal bell) or drop. Keys and their string names follow
/// the asset manifest the game has always shipped with.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::entities::{Sound, ThreatKind};
use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetKey {
    Player,
    Laser,
    EnemyLaser,
    EnemyOne,
    EnemyTwo,
    Background,
    ExplosionSound,
    LaserSound,
    Life0,
    Life1,
    Life2,
    Life3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Audio,
}

impl AssetKey {
    pub const ALL: [AssetKey; 12] = [
        AssetKey::Player,
        AssetKey::Laser,
        AssetKey::EnemyLaser,
        AssetKey::EnemyOne,
        AssetKey::EnemyTwo,
        AssetKey::Background,
        AssetKey::ExplosionSound,
        AssetKey::LaserSound,
        AssetKey::Life0,
        AssetKey::Life1,
        AssetKey::Life2,
        AssetKey::Life3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AssetKey::Player => "player",
            AssetKey::Laser => "laser",
            AssetKey::EnemyLaser => "enemyLaser",
            AssetKey::EnemyOne => "enemyOne",
            AssetKey::EnemyTwo => "enemyTwo",
            AssetKey::Background => "background",
            AssetKey::ExplosionSound => "explosionSound",
            AssetKey::LaserSound => "laserSound",
            AssetKey::Life0 => "life0",
            AssetKey::Life1 => "life1",
            AssetKey::Life2 => "life2",
            AssetKey::Life3 => "life3",
        }
    }

    pub fn from_name(name: &str) -> Option<AssetKey> {
        AssetKey::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn kind(self) -> AssetKind {
        match self {
            AssetKey::ExplosionSound | AssetKey::LaserSound => AssetKind::Audio,
            _ => AssetKind::Image,
        }
    }

    fn default_glyph(self) -> &'static str {
        match self {
            AssetKey::Player => "═▶",
            AssetKey::Laser => "─",
            AssetKey::EnemyLaser => "•",
            AssetKey::EnemyOne => "«◆»",
            AssetKey::EnemyTwo => "[◎]",
            AssetKey::Background => "·",
            AssetKey::Life0 => "0",
            AssetKey::Life1 => "1",
            AssetKey::Life2 => "2",
            AssetKey::Life3 => "3",
            AssetKey::ExplosionSound => "bell",
            AssetKey::LaserSound => "silent",
        }
    }

    pub fn for_threat(kind: ThreatKind) -> AssetKey {
        match kind {
            ThreatKind::CollidingEnemy => AssetKey::EnemyOne,
            ThreatKind::Shooter => AssetKey::EnemyTwo,
            ThreatKind::EnemyBullet => AssetKey::EnemyLaser,
        }
    }

    pub fn for_sound(sound: Sound) -> AssetKey {
        match sound {
            Sound::Laser => AssetKey::LaserSound,
            Sound::Explosion => AssetKey::ExplosionSound,
        }
    }
}

/// How the terminal front end plays an audio asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Bell,
    Silent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Asset {
    Glyph(String),
    Audio(AudioCue),
}

/// Glyphs longer than this would overlap neighbouring cells.
const MAX_GLYPH_CHARS: usize = 3;

#[derive(Clone, Debug)]
pub struct Assets {
    entries: BTreeMap<AssetKey, Asset>,
}

impl Assets {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: AssetKey) -> Option<&Asset> {
        self.entries.get(&key)
    }

    /// Glyph for an image asset; audio keys yield an empty string.
    pub fn glyph(&self, key: AssetKey) -> &str {
        match self.entries.get(&key) {
            Some(Asset::Glyph(g)) => g,
            _ => "",
        }
    }

    pub fn cue(&self, sound: Sound) -> AudioCue {
        match self.entries.get(&AssetKey::for_sound(sound)) {
            Some(Asset::Audio(cue)) => *cue,
            _ => AudioCue::Silent,
        }
    }

    /// Numeral shown by the lives display. Lives are capped at
    /// [`MAX_LIVES`](crate::config::MAX_LIVES), so `life3` covers the rest.
    pub fn life_glyph(&self, lives: u32) -> &str {
        let key = match lives {
            0 => AssetKey::Life0,
            1 => AssetKey::Life1,
            2 => AssetKey::Life2,
            _ => AssetKey::Life3,
        };
        self.glyph(key)
    }
}

fn parse_audio(key: AssetKey, value: &str) -> Result<AudioCue> {
    match value {
        "bell" => Ok(AudioCue::Bell),
        "silent" => Ok(AudioCue::Silent),
        other => Err(GameError::MissingAsset(format!(
            "audio asset '{}' must be \"bell\" or \"silent\", got {other:?}",
            key.name()
        ))),
    }
}

fn parse_glyph(key: AssetKey, value: &str) -> Result<String> {
    let chars = value.chars().count();
    if chars == 0 || chars > MAX_GLYPH_CHARS {
        return Err(GameError::MissingAsset(format!(
            "image asset '{}' needs 1..={MAX_GLYPH_CHARS} characters, got {value:?}",
            key.name()
        )));
    }
    Ok(value.to_string())
}

/// Resolve the full manifest, applying overrides from `config.assets`.
pub fn load_assets(config: &GameConfig) -> Result<Assets> {
    if let Some(unknown) = config
        .assets
        .keys()
        .find(|name| AssetKey::from_name(name).is_none())
    {
        return Err(GameError::MissingAsset(format!("unknown asset key '{unknown}'")));
    }

    let mut entries = BTreeMap::new();
    for key in AssetKey::ALL {
        let source = config
            .assets
            .get(key.name())
            .map(String::as_str)
            .unwrap_or_else(|| key.default_glyph());
        let asset = match key.kind() {
            AssetKind::Image => Asset::Glyph(parse_glyph(key, source)?),
            AssetKind::Audio => {
                let cue = parse_audio(key, source)?;
                if cue == AudioCue::Bell && !config.audio.bell {
                    Asset::Audio(AudioCue::Silent)
                } else {
                    Asset::Audio(cue)
                }
            }
        };
        tracing::debug!(key = key.name(), ?asset, "asset loaded");
        entries.insert(key, asset);
    }

    tracing::info!(count = entries.len(), "boot stage complete");
    Ok(Assets { entries })
}
