/// Keyboard model: held-key tracking for movement and key-down mapping for
/// discrete actions.
///
/// Terminals without keyboard-enhancement only report presses (OS key repeat
/// shows up as repeated presses), so a key counts as held while its last
/// press/repeat is at most `HOLD_WINDOW` frames old. Enhanced terminals also
/// report releases, which drop the key immediately.
use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::entities::{Directions, GameEvent, GameStatus};

/// ≈133 ms at 30 FPS, shorter than any OS key-repeat interval.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Debug, Default)]
pub struct HeldKeys {
    key_frame: HashMap<KeyCode, u64>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or repeat seen on `frame`.
    pub fn refresh(&mut self, code: KeyCode, frame: u64) {
        self.key_frame.insert(normalize(code), frame);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.key_frame.remove(&normalize(code));
    }

    pub fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&normalize(code))
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Arrow keys and WASD merged per direction.
    pub fn directions(&self, frame: u64) -> Directions {
        let any = |codes: [KeyCode; 2]| codes.iter().any(|&c| self.is_held(c, frame));
        Directions {
            left: any([KeyCode::Left, KeyCode::Char('a')]),
            right: any([KeyCode::Right, KeyCode::Char('d')]),
            up: any([KeyCode::Up, KeyCode::Char('w')]),
            down: any([KeyCode::Down, KeyCode::Char('s')]),
        }
    }
}

/// Shift and caps lock must not change which key is held.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Quit,
    Game(GameEvent),
}

/// Map a key-down to a discrete command. SPACE fires while playing and
/// confirms the restart on game over; R only confirms.
pub fn command_for(code: KeyCode, modifiers: KeyModifiers, status: GameStatus) -> Option<Command> {
    match normalize(code) {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::Game(match status {
            GameStatus::GameOver => GameEvent::Confirm,
            GameStatus::WaveActive | GameStatus::WaveCleared => GameEvent::Fire,
        })),
        KeyCode::Char('r') if status == GameStatus::GameOver => {
            Some(Command::Game(GameEvent::Confirm))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_expires_after_hold_window() {
        let mut keys = HeldKeys::new();
        keys.refresh(KeyCode::Left, 10);
        assert!(keys.is_held(KeyCode::Left, 10 + HOLD_WINDOW));
        assert!(!keys.is_held(KeyCode::Left, 11 + HOLD_WINDOW));
    }

    #[test]
    fn release_drops_key_immediately() {
        let mut keys = HeldKeys::new();
        keys.refresh(KeyCode::Char('d'), 3);
        keys.release(KeyCode::Char('D'));
        assert!(!keys.is_held(KeyCode::Char('d'), 3));
    }

    #[test]
    fn arrows_and_wasd_merge() {
        let mut keys = HeldKeys::new();
        keys.refresh(KeyCode::Char('W'), 1);
        keys.refresh(KeyCode::Right, 1);
        let d = keys.directions(2);
        assert_eq!(
            d,
            Directions {
                left: false,
                right: true,
                up: true,
                down: false
            }
        );
    }

    #[test]
    fn space_fires_while_playing_and_confirms_on_game_over() {
        let none = KeyModifiers::NONE;
        assert_eq!(
            command_for(KeyCode::Char(' '), none, GameStatus::WaveActive),
            Some(Command::Game(GameEvent::Fire))
        );
        assert_eq!(
            command_for(KeyCode::Char(' '), none, GameStatus::GameOver),
            Some(Command::Game(GameEvent::Confirm))
        );
        assert_eq!(command_for(KeyCode::Char('r'), none, GameStatus::WaveActive), None);
        assert_eq!(
            command_for(KeyCode::Char('R'), none, GameStatus::GameOver),
            Some(Command::Game(GameEvent::Confirm))
        );
    }

    #[test]
    fn quit_keys() {
        assert_eq!(
            command_for(KeyCode::Char('c'), KeyModifiers::CONTROL, GameStatus::WaveActive),
            Some(Command::Quit)
        );
        assert_eq!(
            command_for(KeyCode::Esc, KeyModifiers::NONE, GameStatus::GameOver),
            Some(Command::Quit)
        );
        assert_eq!(command_for(KeyCode::Char('c'), KeyModifiers::NONE, GameStatus::WaveActive), None);
    }
}
