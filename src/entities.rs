/// All game entity types: pure data, no logic.
use crate::config::Rules;
use crate::timers::Scheduler;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A point or velocity in world units (origin top-left, y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ── Tags ──────────────────────────────────────────────────────────────────────

/// Every hostile entity shares one collection; the kind decides how it moves,
/// whether a player bullet can destroy it and what it pays out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThreatKind {
    /// Homes toward the player every tick.
    CollidingEnemy,
    /// Stationary; fires an `EnemyBullet` on every enemy-fire period.
    Shooter,
    /// Fired by a shooter. Only removable by hitting the player or leaving
    /// the play area.
    EnemyBullet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    WaveActive,
    /// "Next Wave" banner is up; the next wave starts when the intermission
    /// timer fires.
    WaveCleared,
    GameOver,
}

/// Audio cues raised by the simulation and drained by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Laser,
    Explosion,
}

/// Work postponed to the next tick boundary so it never runs inside the
/// collision pass that produced it. A hit hides the player, so the queue
/// holds at most one `LoseLife` per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    LoseLife,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Direction keys held during a tick (arrows and WASD already merged).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Everything that can drive the state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// Advance the clock by `dt_ms` and run one simulation step.
    Tick { dt_ms: u64, held: Directions },
    /// Discrete fire key-down.
    Fire,
    /// Discrete confirm key-down; restarts the run from game over.
    Confirm,
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub struct PlayerBullet {
    pub id: u64,
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
    /// Degrees.
    pub angle: f32,
}

#[derive(Clone, Debug)]
pub struct Threat {
    pub id: u64,
    pub kind: ThreatKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians.
    pub rotation: f32,
}

// ── Run & wave bookkeeping ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct RunState {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaveState {
    /// Bumped by every wave start; spawns scheduled under an older epoch are
    /// dropped when they fire.
    pub epoch: u64,
    pub colliding_total: u32,
    pub shooter_total: u32,
    /// Scheduled spawns of the current epoch that have not fired yet.
    pub pending_spawns: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub player_bullets: Vec<PlayerBullet>,
    pub threats: Vec<Threat>,
    pub run: RunState,
    pub wave: WaveState,
    pub status: GameStatus,
    pub timers: Scheduler,
    pub deferred: Vec<Deferred>,
    /// Monotonic simulation clock.
    pub now_ms: u64,
    pub last_fired_ms: Option<u64>,
    /// Sounds raised by the most recent update only.
    pub sounds: Vec<Sound>,
    pub next_id: u64,
    pub rules: Rules,
}

impl GameState {
    pub fn count_of(&self, kind: ThreatKind) -> usize {
        self.threats.iter().filter(|t| t.kind == kind).count()
    }
}
