use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use zombie_land::entities::{Command, Level, Mode};
use zombie_land::input::*;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
}

fn release(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
}

fn repeat(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
}

// ── KeyTracker ────────────────────────────────────────────────────────────────

#[test]
fn key_held_within_window() {
    let mut keys = KeyTracker::new();
    keys.record(&press(KeyCode::Left), 10);
    assert!(keys.is_held(KeyCode::Left, 10));
    assert!(keys.is_held(KeyCode::Left, 10 + HOLD_WINDOW));
    assert!(!keys.is_held(KeyCode::Left, 11 + HOLD_WINDOW));
}

#[test]
fn repeat_refreshes_hold() {
    let mut keys = KeyTracker::new();
    keys.record(&press(KeyCode::Char(' ')), 1);
    keys.record(&repeat(KeyCode::Char(' ')), 1 + HOLD_WINDOW);
    assert!(keys.sample(1 + 2 * HOLD_WINDOW).fire);
}

#[test]
fn release_drops_key_immediately() {
    let mut keys = KeyTracker::new();
    keys.record(&press(KeyCode::Right), 5);
    keys.record(&release(KeyCode::Right), 5);
    assert!(!keys.sample(5).right);
}

#[test]
fn arrows_and_wasd_both_move() {
    let mut keys = KeyTracker::new();
    keys.record(&press(KeyCode::Up), 1);
    keys.record(&press(KeyCode::Char('a')), 1);
    let input = keys.sample(1);
    assert!(input.up && input.left);
    assert!(!input.down && !input.right && !input.fire);

    let mut keys = KeyTracker::new();
    keys.record(&press(KeyCode::Char('s')), 1);
    keys.record(&press(KeyCode::Right), 1);
    let input = keys.sample(1);
    assert!(input.down && input.right);
}

#[test]
fn shifted_letters_still_count() {
    let mut keys = KeyTracker::new();
    keys.record(&press(KeyCode::Char('D')), 3);
    assert!(keys.sample(3).right);
}

#[test]
fn clear_forgets_keys() {
    let mut keys = KeyTracker::new();
    keys.record(&press(KeyCode::Char(' ')), 3);
    keys.clear();
    assert!(!keys.sample(3).fire);
}

// ── key_action ────────────────────────────────────────────────────────────────

#[test]
fn number_keys_select_level_on_menu() {
    let action = key_action(&press(KeyCode::Char('2')), Mode::LevelSelect);
    assert_eq!(action, KeyAction::Command(Command::SelectLevel(Level::Medium)));
    let action = key_action(&press(KeyCode::Char('3')), Mode::LevelSelect);
    assert_eq!(action, KeyAction::Command(Command::SelectLevel(Level::Hard)));
}

#[test]
fn number_keys_ignored_while_playing() {
    assert_eq!(key_action(&press(KeyCode::Char('1')), Mode::Playing), KeyAction::None);
}

#[test]
fn escape_toggles_pause() {
    let esc = press(KeyCode::Esc);
    assert_eq!(key_action(&esc, Mode::Playing), KeyAction::Command(Command::TogglePause));
    assert_eq!(key_action(&esc, Mode::Paused), KeyAction::Command(Command::TogglePause));
    assert_eq!(key_action(&esc, Mode::LevelSelect), KeyAction::None);
}

#[test]
fn game_over_keys() {
    assert_eq!(
        key_action(&press(KeyCode::Char(' ')), Mode::GameOver),
        KeyAction::Command(Command::ReturnToMenu)
    );
    assert_eq!(
        key_action(&press(KeyCode::Char('R')), Mode::GameOver),
        KeyAction::Command(Command::Replay)
    );
    assert_eq!(key_action(&press(KeyCode::Char(' ')), Mode::Playing), KeyAction::None);
}

#[test]
fn quit_keys_work_everywhere() {
    for mode in [Mode::LevelSelect, Mode::Playing, Mode::Paused, Mode::GameOver] {
        assert_eq!(key_action(&press(KeyCode::Char('q')), mode), KeyAction::Quit);
        let ctrl_c = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert_eq!(key_action(&ctrl_c, mode), KeyAction::Quit);
    }
}

#[test]
fn repeats_and_releases_are_not_commands() {
    assert_eq!(key_action(&repeat(KeyCode::Esc), Mode::Playing), KeyAction::None);
    assert_eq!(key_action(&release(KeyCode::Char('q')), Mode::Playing), KeyAction::None);
}

// ── Command settling ──────────────────────────────────────────────────────────

#[test]
fn fresh_press_accepts_command() {
    let keys = KeyTracker::new();
    assert!(keys.accepts_command(&press(KeyCode::Char('1')), 0));
}

#[test]
fn held_fire_does_not_skip_game_over_screen() {
    let mut keys = KeyTracker::new();
    let space = press(KeyCode::Char(' '));
    // Fire held through the last frames of play.
    for frame in 90..=100 {
        keys.record(&space, frame);
    }
    keys.settle(100);
    assert!(!keys.sample(100).fire);

    // Auto-repeat keeps arriving as presses every few frames.
    let mut frame = 100;
    while frame < 100 + 5 * HOLD_WINDOW {
        assert!(!keys.accepts_command(&space, frame), "frame {frame}");
        keys.record(&space, frame);
        frame += 4;
    }

    // Released, then pressed again once the hold has expired.
    let later = frame + HOLD_WINDOW + 1;
    assert!(keys.accepts_command(&space, later));
}

#[test]
fn settle_blocks_commands_for_hold_window() {
    let mut keys = KeyTracker::new();
    keys.settle(50);
    let esc = press(KeyCode::Esc);
    assert!(!keys.accepts_command(&esc, 50));
    assert!(!keys.accepts_command(&esc, 49 + HOLD_WINDOW));
    assert!(keys.accepts_command(&esc, 50 + HOLD_WINDOW));
}

#[test]
fn released_key_accepts_command_again() {
    let mut keys = KeyTracker::new();
    keys.record(&press(KeyCode::Char('r')), 10);
    assert!(!keys.accepts_command(&press(KeyCode::Char('r')), 11));
    keys.record(&release(KeyCode::Char('r')), 11);
    assert!(keys.accepts_command(&press(KeyCode::Char('r')), 12));
}
