/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`. Side effects are limited to the injected RNG and `tracing`.
/// Internally each public function clones once and applies `&mut` helpers
/// to the copy.
use std::f32::consts::FRAC_PI_2;

use rand::Rng;

use crate::config::{Rules, SpawnRange, MAX_LIVES};
use crate::entities::{
    Deferred, Directions, GameEvent, GameState, GameStatus, Player, PlayerBullet, RunState,
    Sound, Threat, ThreatKind, Vec2, WaveState,
};
use crate::physics::{
    angle_between, clamp_to_world, hit_radius, integrate, out_of_bounds, overlaps,
    velocity_toward, PLAYER_BULLET_RADIUS, PLAYER_RADIUS,
};
use crate::timers::{Scheduler, TimerAction};

// ── Payoff tables ────────────────────────────────────────────────────────────

/// Score awarded when a player bullet destroys a threat of this kind.
pub fn score_for(kind: ThreatKind) -> u32 {
    match kind {
        ThreatKind::CollidingEnemy => 100,
        ThreatKind::Shooter => 150,
        ThreatKind::EnemyBullet => 0,
    }
}

/// Enemy bullets can't be shot down.
pub fn can_be_shot(kind: ThreatKind) -> bool {
    match kind {
        ThreatKind::CollidingEnemy | ThreatKind::Shooter => true,
        ThreatKind::EnemyBullet => false,
    }
}

/// Banner lines to overlay on the play area.
pub fn banners(state: &GameState) -> &'static [&'static str] {
    match state.status {
        GameStatus::WaveActive => &[],
        GameStatus::WaveCleared => &["Next Wave"],
        GameStatus::GameOver => &["GAME OVER", "Press SPACE to Restart"],
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh run: full lives, zero score, enemy fire armed and the first
/// wave spawned.
pub fn init_state(rules: Rules, rng: &mut impl Rng) -> GameState {
    let mut state = GameState {
        player: Player {
            pos: rules.player_start,
            vel: Vec2::ZERO,
            visible: true,
        },
        player_bullets: Vec::new(),
        threats: Vec::new(),
        run: RunState {
            score: 0,
            lives: rules.max_lives.min(MAX_LIVES),
            level: rules.starting_level,
        },
        wave: WaveState {
            epoch: 0,
            colliding_total: 0,
            shooter_total: 0,
            pending_spawns: 0,
        },
        status: GameStatus::WaveActive,
        timers: Scheduler::new(),
        deferred: Vec::new(),
        now_ms: 0,
        last_fired_ms: None,
        sounds: Vec::new(),
        next_id: 0,
        rules,
    };
    state
        .timers
        .repeating(0, rules.enemy_fire_period_ms, TimerAction::EnemyFire);
    start_wave(&mut state, rng);
    tracing::info!(lives = state.run.lives, level = state.run.level, "run started");
    state
}

// ── Event dispatch ───────────────────────────────────────────────────────────

/// The single entry point the front end drives.
pub fn update(state: &GameState, event: &GameEvent, rng: &mut impl Rng) -> GameState {
    match *event {
        GameEvent::Tick { dt_ms, held } => tick(state, dt_ms, held, rng),
        GameEvent::Fire => player_fire(state),
        GameEvent::Confirm => restart(state, rng),
    }
}

/// Start over from game over. Any other status ignores the confirm.
pub fn restart(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::GameOver {
        return fresh_copy(state);
    }
    tracing::info!(final_score = state.run.score, "restarting run");
    init_state(state.rules, rng)
}

/// Clear all threats and begin the wave for the current level.
pub fn spawn_wave(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = fresh_copy(state);
    start_wave(&mut next, rng);
    next
}

/// Discrete fire input. Rejected while dead or within `fire_rate_ms` of the
/// last accepted shot.
pub fn player_fire(state: &GameState) -> GameState {
    let mut next = fresh_copy(state);
    fire_player_bullet(&mut next);
    next
}

/// Every shooter fires one bullet aimed at the player's current position.
pub fn fire_enemy_bullets(state: &GameState) -> GameState {
    let mut next = fresh_copy(state);
    fire_shooters(&mut next);
    next
}

// ── Per-frame tick (nearly pure; RNG is injected) ────────────────────────────

/// Advance the simulation by `dt_ms`. All randomness comes through `rng`
/// so callers control determinism (tests use a seeded RNG).
pub fn tick(state: &GameState, dt_ms: u64, held: Directions, rng: &mut impl Rng) -> GameState {
    let mut s = fresh_copy(state);
    s.now_ms += dt_ms;

    // ── 1. Effects deferred by the previous collision pass ───────────────────
    for effect in std::mem::take(&mut s.deferred) {
        match effect {
            Deferred::LoseLife => lose_life_and_restart_wave(&mut s, rng),
        }
    }

    // ── 2. Timers, earliest first ────────────────────────────────────────────
    for (due_ms, action) in s.timers.drain_due(s.now_ms) {
        tracing::trace!(due_ms, ?action, "timer fired");
        run_timer(&mut s, action, rng);
    }

    // ── 3. Steering ──────────────────────────────────────────────────────────
    steer_player(&mut s, held);
    home_colliding_enemies(&mut s);

    // ── 4. Integrate ─────────────────────────────────────────────────────────
    move_bodies(&mut s, dt_ms);

    // ── 5. Projectiles that left the play area ───────────────────────────────
    cull_projectiles(&mut s);

    // ── 6. Collisions ────────────────────────────────────────────────────────
    resolve_player_bullet_hits(&mut s);
    resolve_player_hits(&mut s);

    // ── 7. Wave bookkeeping ──────────────────────────────────────────────────
    check_wave_cleared(&mut s);

    s
}

// ── Internals ────────────────────────────────────────────────────────────────

/// Sounds only live for one update.
fn fresh_copy(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.sounds.clear();
    next
}

fn next_id(s: &mut GameState) -> u64 {
    s.next_id += 1;
    s.next_id
}

fn start_wave(s: &mut GameState, rng: &mut impl Rng) {
    s.player.visible = true;
    s.threats.clear();
    s.status = GameStatus::WaveActive;

    let level = s.run.level;
    let epoch = s.wave.epoch + 1;
    let colliding = s.rules.colliding_count(level);
    let shooters = s.rules.shooter_count(level);
    s.wave = WaveState {
        epoch,
        colliding_total: colliding,
        shooter_total: shooters,
        pending_spawns: 0,
    };

    if colliding > 0 {
        spawn_threat(s, ThreatKind::CollidingEnemy, rng);
    }
    for _ in 1..colliding {
        let delay = spawn_delay(&s.rules, rng);
        s.timers
            .once(s.now_ms, delay, TimerAction::SpawnCollidingEnemy { epoch });
        s.wave.pending_spawns += 1;
    }

    if shooters > 0 {
        spawn_threat(s, ThreatKind::Shooter, rng);
    }
    for _ in 1..shooters {
        let delay = spawn_delay(&s.rules, rng);
        s.timers.once(s.now_ms, delay, TimerAction::SpawnShooter { epoch });
        s.wave.pending_spawns += 1;
    }

    tracing::info!(
        level,
        epoch,
        colliding,
        shooters,
        score = s.run.score,
        lives = s.run.lives,
        "wave started"
    );
}

fn spawn_delay(rules: &Rules, rng: &mut impl Rng) -> u64 {
    rng.gen_range(rules.spawn_delay_min_ms..=rules.wave_duration_ms)
}

fn spawn_y(range: SpawnRange, rng: &mut impl Rng) -> f32 {
    rng.gen_range(range.min..=range.max) as f32
}

/// No-op once the run has no lives left.
fn spawn_threat(s: &mut GameState, kind: ThreatKind, rng: &mut impl Rng) {
    if s.run.lives == 0 {
        return;
    }
    let y = match kind {
        ThreatKind::CollidingEnemy => spawn_y(s.rules.colliding_y, rng),
        ThreatKind::Shooter => spawn_y(s.rules.shooter_y, rng),
        ThreatKind::EnemyBullet => return,
    };
    let pos = Vec2::new(s.rules.spawn_x, y);
    let rotation = angle_between(pos, s.player.pos);
    let id = next_id(s);
    tracing::debug!(id, ?kind, x = pos.x, y = pos.y, "threat spawned");
    s.threats.push(Threat {
        id,
        kind,
        pos,
        vel: Vec2::ZERO,
        rotation,
    });
}

fn run_timer(s: &mut GameState, action: TimerAction, rng: &mut impl Rng) {
    match action {
        TimerAction::SpawnCollidingEnemy { epoch } | TimerAction::SpawnShooter { epoch } => {
            if epoch != s.wave.epoch || s.status != GameStatus::WaveActive {
                tracing::debug!(epoch, current = s.wave.epoch, "stale spawn dropped");
                return;
            }
            s.wave.pending_spawns = s.wave.pending_spawns.saturating_sub(1);
            let kind = match action {
                TimerAction::SpawnShooter { .. } => ThreatKind::Shooter,
                _ => ThreatKind::CollidingEnemy,
            };
            spawn_threat(s, kind, rng);
        }
        TimerAction::EnemyFire => fire_shooters(s),
        TimerAction::EndIntermission => {
            if s.status == GameStatus::WaveCleared {
                start_wave(s, rng);
            }
        }
    }
}

fn fire_player_bullet(s: &mut GameState) {
    if s.status == GameStatus::GameOver || !s.player.visible {
        return;
    }
    if let Some(last) = s.last_fired_ms {
        if s.now_ms.saturating_sub(last) < s.rules.fire_rate_ms {
            tracing::trace!(now_ms = s.now_ms, last, "shot rate limited");
            return;
        }
    }
    s.last_fired_ms = Some(s.now_ms);

    let id = next_id(s);
    s.player_bullets.push(PlayerBullet {
        id,
        pos: Vec2::new(s.player.pos.x + s.rules.player_bullet_offset, s.player.pos.y),
        vel: Vec2::new(s.rules.player_bullet_speed, 0.0),
        scale: 0.5,
        angle: 90.0,
    });
    s.sounds.push(Sound::Laser);
    tracing::debug!(id, now_ms = s.now_ms, "player fired");
}

fn fire_shooters(s: &mut GameState) {
    let origins: Vec<Vec2> = s
        .threats
        .iter()
        .filter_map(|t| match t.kind {
            ThreatKind::Shooter => Some(t.pos),
            ThreatKind::CollidingEnemy | ThreatKind::EnemyBullet => None,
        })
        .collect();

    let target = s.player.pos;
    for origin in origins {
        let pos = Vec2::new(origin.x - s.rules.enemy_bullet_offset, origin.y);
        let id = next_id(s);
        s.threats.push(Threat {
            id,
            kind: ThreatKind::EnemyBullet,
            pos,
            vel: velocity_toward(pos, target, s.rules.enemy_bullet_speed),
            rotation: angle_between(pos, target) + FRAC_PI_2,
        });
    }
}

/// Velocity resets every tick; for opposite keys the later branch wins.
fn steer_player(s: &mut GameState, held: Directions) {
    s.player.vel = Vec2::ZERO;
    if s.status == GameStatus::GameOver {
        return;
    }
    let speed = s.rules.player_speed;
    if held.left {
        s.player.vel.x = -speed;
    }
    if held.right {
        s.player.vel.x = speed;
    }
    if held.up {
        s.player.vel.y = -speed;
    }
    if held.down {
        s.player.vel.y = speed;
    }
}

fn home_colliding_enemies(s: &mut GameState) {
    let target = s.player.pos;
    let speed = s.rules.homing_speed(s.run.level);
    for threat in &mut s.threats {
        match threat.kind {
            ThreatKind::CollidingEnemy => {
                threat.vel = velocity_toward(threat.pos, target, speed);
            }
            ThreatKind::Shooter | ThreatKind::EnemyBullet => {}
        }
    }
}

fn move_bodies(s: &mut GameState, dt_ms: u64) {
    let (w, h) = (s.rules.world_width, s.rules.world_height);
    s.player.pos = clamp_to_world(integrate(s.player.pos, s.player.vel, dt_ms), PLAYER_RADIUS, w, h);
    for bullet in &mut s.player_bullets {
        bullet.pos = integrate(bullet.pos, bullet.vel, dt_ms);
    }
    for threat in &mut s.threats {
        threat.pos = integrate(threat.pos, threat.vel, dt_ms);
    }
}

fn cull_projectiles(s: &mut GameState) {
    let (w, h, m) = (s.rules.world_width, s.rules.world_height, s.rules.cull_margin);
    s.player_bullets.retain(|b| !out_of_bounds(b.pos, w, h, m));
    s.threats.retain(|t| match t.kind {
        ThreatKind::EnemyBullet => !out_of_bounds(t.pos, w, h, m),
        ThreatKind::CollidingEnemy | ThreatKind::Shooter => true,
    });
}

/// Player bullet vs. any shootable threat: both destroyed, score awarded.
fn resolve_player_bullet_hits(s: &mut GameState) {
    let bullets = std::mem::take(&mut s.player_bullets);
    for bullet in bullets {
        let hit = s.threats.iter().position(|t| {
            can_be_shot(t.kind)
                && overlaps(bullet.pos, PLAYER_BULLET_RADIUS, t.pos, hit_radius(t.kind))
        });
        match hit {
            Some(i) => {
                let threat = s.threats.remove(i);
                let points = score_for(threat.kind);
                s.run.score = s.run.score.saturating_add(points);
                s.sounds.push(Sound::Explosion);
                tracing::debug!(
                    id = threat.id,
                    kind = ?threat.kind,
                    points,
                    score = s.run.score,
                    "threat destroyed"
                );
            }
            None => s.player_bullets.push(bullet),
        }
    }
}

/// Player vs. any threat. Life loss is deferred to the next tick boundary.
/// Once hidden the player can't be hit again, so at most one `LoseLife` is
/// queued per tick.
fn resolve_player_hits(s: &mut GameState) {
    if !s.player.visible {
        return;
    }
    let player = s.player.pos;
    let hit = s
        .threats
        .iter()
        .position(|t| overlaps(player, PLAYER_RADIUS, t.pos, hit_radius(t.kind)));
    if let Some(i) = hit {
        let threat = s.threats.remove(i);
        s.player.visible = false;
        s.deferred.push(Deferred::LoseLife);
        tracing::debug!(id = threat.id, kind = ?threat.kind, "player hit");
    }
}

fn lose_life_and_restart_wave(s: &mut GameState, rng: &mut impl Rng) {
    s.run.lives = s.run.lives.saturating_sub(1).min(MAX_LIVES);
    tracing::info!(lives = s.run.lives, "life lost");
    if s.run.lives > 0 {
        start_wave(s, rng);
    } else {
        game_over(s);
    }
}

fn game_over(s: &mut GameState) {
    s.status = GameStatus::GameOver;
    s.player.visible = false;
    tracing::info!(score = s.run.score, level = s.run.level, "game over");
}

fn check_wave_cleared(s: &mut GameState) {
    let cleared = s.status == GameStatus::WaveActive
        && s.player.visible
        && s.deferred.is_empty()
        && s.threats.is_empty();
    if !cleared {
        return;
    }
    // Spawns still scheduled for this wave are abandoned with it.
    s.status = GameStatus::WaveCleared;
    s.wave.pending_spawns = 0;
    if s.rules.escalate_levels {
        s.run.level += 1;
    }
    s.timers
        .once(s.now_ms, s.rules.intermission_ms, TimerAction::EndIntermission);
    tracing::info!(
        score = s.run.score,
        next_level = s.run.level,
        "wave cleared"
    );
}
