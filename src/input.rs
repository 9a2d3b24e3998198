//! Keyboard handling on top of crossterm key events.
//!
//! Instead of acting on each key event individually, `KeyTracker` records the
//! frame number of the last press/repeat event for every key.  Each frame it
//! reports which keys are still "fresh" (within `HOLD_WINDOW` frames), so
//! movement and fire can be held together with no interference.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): proper
//!   `Press` / `Repeat` / `Release` events, so keys are dropped on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows up as
//!   repeated presses).  Keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::{Command, InputState, Level, Mode};

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  At 120 FPS this is 100 ms, longer than the gap between OS
/// key-repeat events once repetition has started.
pub const HOLD_WINDOW: u64 = 12;

/// What a single key event asks the frame loop to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    Quit,
    Command(Command),
    None,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    /// One-shot commands are ignored before this frame.
    commands_from: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event seen during `frame`.
    pub fn record(&mut self, event: &KeyEvent, frame: u64) {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    pub fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Forget every key, e.g. when leaving the playing screen.
    pub fn clear(&mut self) {
        self.key_frame.clear();
    }

    /// Forget every key and ignore commands for `HOLD_WINDOW` frames.  Call
    /// on every mode change so a key held on the old screen (fire on the
    /// last frame of play, say) cannot act on the new one.
    pub fn settle(&mut self, frame: u64) {
        self.clear();
        self.commands_from = frame + HOLD_WINDOW;
    }

    /// True if `event` may trigger a command: the settle window has passed
    /// and the key was not already held.  Check before `record`, since
    /// classic terminals report auto-repeat as fresh presses.
    pub fn accepts_command(&self, event: &KeyEvent, frame: u64) -> bool {
        frame >= self.commands_from && !self.is_held(normalize(event.code), frame)
    }

    /// Held movement/fire keys as of `frame`.
    pub fn sample(&self, frame: u64) -> InputState {
        let any = |keys: &[KeyCode]| keys.iter().any(|k| self.is_held(*k, frame));
        InputState {
            up: any(&[KeyCode::Up, KeyCode::Char('w')]),
            down: any(&[KeyCode::Down, KeyCode::Char('s')]),
            left: any(&[KeyCode::Left, KeyCode::Char('a')]),
            right: any(&[KeyCode::Right, KeyCode::Char('d')]),
            fire: any(&[KeyCode::Char(' ')]),
        }
    }
}

/// Letters are tracked case-insensitively so Shift does not break movement.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Map a key press to a one-shot action for the current mode.  Repeats and
/// releases never trigger commands.
pub fn key_action(event: &KeyEvent, mode: Mode) -> KeyAction {
    if event.kind != KeyEventKind::Press {
        return KeyAction::None;
    }
    let code = normalize(event.code);
    match code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char(c @ '1'..='3') if mode == Mode::LevelSelect => {
            match c.to_digit(10).and_then(|n| Level::from_number(n as u8)) {
                Some(level) => KeyAction::Command(Command::SelectLevel(level)),
                None => KeyAction::None,
            }
        }
        KeyCode::Esc | KeyCode::Char('p') if matches!(mode, Mode::Playing | Mode::Paused) => {
            KeyAction::Command(Command::TogglePause)
        }
        KeyCode::Char(' ') if mode == Mode::GameOver => KeyAction::Command(Command::ReturnToMenu),
        KeyCode::Char('r') if mode == Mode::GameOver => KeyAction::Command(Command::Replay),
        _ => KeyAction::None,
    }
}
