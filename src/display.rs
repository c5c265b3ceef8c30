/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state. No game logic is performed; this module only translates
/// world coordinates into terminal cells and state into terminal commands.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use wave_shooter::boot::{AssetKey, Assets};
use wave_shooter::compute::banners;
use wave_shooter::entities::{GameState, GameStatus, ThreatKind, Vec2};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BACKGROUND: Color = Color::DarkMagenta;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Green;
const C_PLAYER: Color = Color::Red;
const C_COLLIDING: Color = Color::Green;
const C_SHOOTER: Color = Color::Blue;
const C_BULLET_PLAYER: Color = Color::Green;
const C_BULLET_ENEMY: Color = Color::Cyan;
const C_BANNER: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Terminal size the frame is drawn into.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub width: u16,
    pub height: u16,
}

impl Screen {
    // Play area: columns 1..width-1, rows 2..height-2 (inside the border).
    fn left(&self) -> u16 {
        1
    }
    fn right(&self) -> u16 {
        self.width.saturating_sub(2).max(1)
    }
    fn top(&self) -> u16 {
        2
    }
    fn bottom(&self) -> u16 {
        self.height.saturating_sub(3).max(2)
    }

    /// World position to the play-area cell it falls in; `None` off-world.
    fn cell(&self, pos: Vec2, state: &GameState) -> Option<(u16, u16)> {
        let (ww, wh) = (state.rules.world_width, state.rules.world_height);
        if pos.x < 0.0 || pos.y < 0.0 || pos.x > ww || pos.y > wh {
            return None;
        }
        let cols = f32::from(self.right() - self.left());
        let rows = f32::from(self.bottom() - self.top());
        let col = self.left() + (pos.x / ww * cols).round() as u16;
        let row = self.top() + (pos.y / wh * rows).round() as u16;
        Some((col.min(self.right()), row.min(self.bottom())))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    assets: &Assets,
    screen: Screen,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, assets, screen)?;
    draw_border(out, screen)?;
    draw_hud(out, state, assets, screen)?;

    for threat in &state.threats {
        let color = match threat.kind {
            ThreatKind::CollidingEnemy => C_COLLIDING,
            ThreatKind::Shooter => C_SHOOTER,
            ThreatKind::EnemyBullet => C_BULLET_ENEMY,
        };
        draw_glyph(out, state, screen, threat.pos, assets.glyph(AssetKey::for_threat(threat.kind)), color)?;
    }
    for bullet in &state.player_bullets {
        draw_glyph(out, state, screen, bullet.pos, assets.glyph(AssetKey::Laser), C_BULLET_PLAYER)?;
    }
    if state.player.visible {
        draw_glyph(out, state, screen, state.player.pos, assets.glyph(AssetKey::Player), C_PLAYER)?;
    }

    draw_controls_hint(out, state, screen)?;
    draw_banners(out, state, screen)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

/// Sparse fixed starfield; the pattern depends only on the cell.
fn draw_background<W: Write>(out: &mut W, assets: &Assets, screen: Screen) -> std::io::Result<()> {
    let star = assets.glyph(AssetKey::Background);
    out.queue(style::SetForegroundColor(C_BACKGROUND))?;
    for row in screen.top()..=screen.bottom() {
        for col in screen.left()..=screen.right() {
            let h = u32::from(col).wrapping_mul(73_856_093) ^ u32::from(row).wrapping_mul(19_349_663);
            if h % 47 == 0 {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(star))?;
            }
        }
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    let w = screen.width as usize;
    let h = screen.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    assets: &Assets,
    screen: Screen,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score {}", state.run.score)))?;

    let level_str = format!("[ LEVEL {} ]", state.run.level);
    let lx = (screen.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    let lives_str = format!("Lives {}", assets.life_glyph(state.run.lives));
    let rx = screen
        .width
        .saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw `glyph` centred on the cell for `pos`, kept inside the border.
fn draw_glyph<W: Write>(
    out: &mut W,
    state: &GameState,
    screen: Screen,
    pos: Vec2,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = screen.cell(pos, state) else {
        return Ok(());
    };
    let len = glyph.chars().count() as u16;
    let col = col
        .saturating_sub(len / 2)
        .max(screen.left())
        .min((screen.right() + 1).saturating_sub(len).max(screen.left()));
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState, screen: Screen) -> std::io::Result<()> {
    let hint = match state.status {
        GameStatus::GameOver => "SPACE / R : Restart   Q : Quit",
        GameStatus::WaveActive | GameStatus::WaveCleared => {
            "← ↑ → ↓ / W A S D : Move   SPACE : Shoot   Q : Quit"
        }
    };
    out.queue(cursor::MoveTo(1, screen.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Banner overlay ────────────────────────────────────────────────────────────

fn draw_banners<W: Write>(out: &mut W, state: &GameState, screen: Screen) -> std::io::Result<()> {
    let lines = banners(state);
    if lines.is_empty() {
        return Ok(());
    }

    let cx = screen.width / 2;
    let start_row = (screen.height / 2).saturating_sub(lines.len() as u16 / 2);
    out.queue(style::SetForegroundColor(C_BANNER))?;
    for (i, msg) in lines.iter().enumerate() {
        let row = start_row + i as u16 * 2;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(*msg))?;
    }

    if state.status == GameStatus::GameOver {
        let score_line = format!("Final Score: {}", state.run.score);
        let row = start_row + lines.len() as u16 * 2;
        let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(&score_line))?;
    }

    Ok(())
}
