/// Game configuration loaded from TOML.
///
/// Every section is `#[serde(default)]`, so a config file only needs the
/// values it changes. `GameConfig::rules` flattens the gameplay numbers into
/// the `Copy` struct carried by `GameState`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::entities::Vec2;
use crate::error::{GameError, Result};

/// Lives never exceed this; the lives display has a numeral asset for each
/// value up to it.
pub const MAX_LIVES: u32 = 3;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Projectiles further than this outside the world are removed.
    pub cull_margin: f32,
}
impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            cull_margin: 64.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: f32,
    pub start_y: f32,
    pub speed: f32,
    pub bullet_speed: f32,
    /// Bullets spawn this far ahead (+x) of the ship.
    pub bullet_offset: f32,
    pub fire_rate_ms: u64,
    pub max_lives: u32,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_x: 50.0,
            start_y: 300.0,
            speed: 200.0,
            bullet_speed: 350.0,
            bullet_offset: 20.0,
            fire_rate_ms: 400,
            max_lives: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WaveConfig {
    pub starting_level: u32,
    pub base_colliding: u32,
    pub base_shooters: u32,
    /// Late spawns are scheduled within `[spawn_delay_min_ms, duration_ms]`.
    pub duration_ms: u64,
    pub spawn_delay_min_ms: u64,
    pub intermission_ms: u64,
    /// Increment the level after each cleared wave. Off by default: the level
    /// stays fixed for the whole run.
    pub escalate_levels: bool,
}
impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            starting_level: 1,
            base_colliding: 4,
            base_shooters: 3,
            duration_ms: 7000,
            spawn_delay_min_ms: 500,
            intermission_ms: 2000,
            escalate_levels: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SpawnRange {
    pub min: i32,
    pub max: i32,
}
impl Default for SpawnRange {
    fn default() -> Self {
        Self { min: 50, max: 550 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EnemyConfig {
    pub spawn_x: f32,
    pub colliding_y: SpawnRange,
    pub shooter_y: SpawnRange,
    pub homing_base_speed: f32,
    pub homing_per_level: f32,
    pub bullet_speed: f32,
    /// Enemy bullets spawn this far behind (-x) the shooter.
    pub bullet_offset: f32,
    pub fire_period_ms: u64,
}
impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_x: 800.0,
            colliding_y: SpawnRange { min: 50, max: 550 },
            shooter_y: SpawnRange { min: 30, max: 550 },
            homing_base_speed: 100.0,
            homing_per_level: 20.0,
            bullet_speed: 200.0,
            bullet_offset: 20.0,
            fire_period_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Ring the terminal bell for explosions.
    pub bell: bool,
}
impl Default for AudioConfig {
    fn default() -> Self {
        Self { bell: true }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub waves: WaveConfig,
    pub enemies: EnemyConfig,
    pub audio: AudioConfig,
    /// Asset key (e.g. `"enemyOne"`) to glyph override.
    pub assets: BTreeMap<String, String>,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    pub fn from_toml_str(data: &str) -> Result<Self> {
        let cfg: GameConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return invalid(format!(
                "world dimensions must be > 0 (got {}x{})",
                self.world.width, self.world.height
            ));
        }
        if self.player.max_lives == 0 || self.player.max_lives > MAX_LIVES {
            return invalid(format!(
                "player.max_lives must be in 1..={MAX_LIVES} (got {})",
                self.player.max_lives
            ));
        }
        if self.waves.spawn_delay_min_ms > self.waves.duration_ms {
            return invalid(format!(
                "waves.spawn_delay_min_ms ({}) exceeds waves.duration_ms ({})",
                self.waves.spawn_delay_min_ms, self.waves.duration_ms
            ));
        }
        if self.enemies.fire_period_ms == 0 {
            return invalid("enemies.fire_period_ms must be > 0".into());
        }
        for (name, range) in [
            ("enemies.colliding_y", self.enemies.colliding_y),
            ("enemies.shooter_y", self.enemies.shooter_y),
        ] {
            if range.min > range.max {
                return invalid(format!("{name} has min {} > max {}", range.min, range.max));
            }
        }
        Ok(())
    }

    /// Legal but suspicious values. The binary logs each with `warn!`.
    pub fn warnings(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.player.fire_rate_ms == 0 {
            w.push("player.fire_rate_ms is 0; fire is not rate limited".into());
        }
        if self.waves.base_colliding + self.waves.starting_level == 0 {
            w.push("no colliding enemies will spawn".into());
        }
        if self.enemies.spawn_x < self.player.start_x {
            w.push(format!(
                "enemies.spawn_x ({}) is left of the player start ({})",
                self.enemies.spawn_x, self.player.start_x
            ));
        }
        for (name, range) in [
            ("enemies.colliding_y", self.enemies.colliding_y),
            ("enemies.shooter_y", self.enemies.shooter_y),
        ] {
            if range.min < 0 || range.max as f32 > self.world.height {
                w.push(format!("{name} reaches outside the world height"));
            }
        }
        w
    }

    pub fn rules(&self) -> Rules {
        Rules {
            world_width: self.world.width,
            world_height: self.world.height,
            cull_margin: self.world.cull_margin,
            player_start: Vec2::new(self.player.start_x, self.player.start_y),
            player_speed: self.player.speed,
            player_bullet_speed: self.player.bullet_speed,
            player_bullet_offset: self.player.bullet_offset,
            fire_rate_ms: self.player.fire_rate_ms,
            max_lives: self.player.max_lives,
            starting_level: self.waves.starting_level,
            base_colliding: self.waves.base_colliding,
            base_shooters: self.waves.base_shooters,
            wave_duration_ms: self.waves.duration_ms,
            spawn_delay_min_ms: self.waves.spawn_delay_min_ms,
            intermission_ms: self.waves.intermission_ms,
            escalate_levels: self.waves.escalate_levels,
            spawn_x: self.enemies.spawn_x,
            colliding_y: self.enemies.colliding_y,
            shooter_y: self.enemies.shooter_y,
            homing_base_speed: self.enemies.homing_base_speed,
            homing_per_level: self.enemies.homing_per_level,
            enemy_bullet_speed: self.enemies.bullet_speed,
            enemy_bullet_offset: self.enemies.bullet_offset,
            enemy_fire_period_ms: self.enemies.fire_period_ms,
        }
    }
}

/// Gameplay numbers, flattened from `GameConfig`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub world_width: f32,
    pub world_height: f32,
    pub cull_margin: f32,
    pub player_start: Vec2,
    pub player_speed: f32,
    pub player_bullet_speed: f32,
    pub player_bullet_offset: f32,
    pub fire_rate_ms: u64,
    pub max_lives: u32,
    pub starting_level: u32,
    pub base_colliding: u32,
    pub base_shooters: u32,
    pub wave_duration_ms: u64,
    pub spawn_delay_min_ms: u64,
    pub intermission_ms: u64,
    pub escalate_levels: bool,
    pub spawn_x: f32,
    pub colliding_y: SpawnRange,
    pub shooter_y: SpawnRange,
    pub homing_base_speed: f32,
    pub homing_per_level: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_offset: f32,
    pub enemy_fire_period_ms: u64,
}

impl Default for Rules {
    fn default() -> Self {
        GameConfig::default().rules()
    }
}

impl Rules {
    pub fn colliding_count(&self, level: u32) -> u32 {
        self.base_colliding + level
    }

    pub fn shooter_count(&self, level: u32) -> u32 {
        self.base_shooters + level
    }

    pub fn homing_speed(&self, level: u32) -> f32 {
        self.homing_base_speed + level as f32 * self.homing_per_level
    }
}
