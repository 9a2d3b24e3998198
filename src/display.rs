/// Rendering layer — all terminal output lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only scales world
/// coordinates onto the terminal grid and translates state into commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use zombie_land::compute::elapsed_seconds;
use zombie_land::entities::{Entity, GameState, Level, Mode};
use zombie_land::pool::Pool;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::White;
const C_ZOMBIE: Color = Color::Green;
const C_BULLET: Color = Color::Yellow;
const C_HEALTH_DROP: Color = Color::Red;
const C_AMMO_DROP: Color = Color::Cyan;
const C_HUD: Color = Color::White;
const C_FPS: Color = Color::Yellow;
const C_HEALTH_BAR: Color = Color::Red;
const C_BOX: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

const G_PLAYER: char = '█';
const G_ZOMBIE: char = 'Z';
const G_BULLET: char = '║';
const G_HEALTH_DROP: char = '+';
const G_AMMO_DROP: char = '≡';

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Scales world units onto the terminal.  Row 0 carries the HUD text and
/// the last row the health bar; entities are clipped to the rows between.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(state: &GameState, cols: u16, rows: u16) -> Self {
        Viewport {
            cols,
            rows,
            sx: cols as f32 / state.config.arena_width,
            sy: rows as f32 / state.config.arena_height,
        }
    }

    /// Cell span `[start, end)` covered by a world interval; never empty.
    fn span(pos: f32, len: f32, scale: f32) -> (i32, i32) {
        let start = (pos * scale).floor() as i32;
        let end = ((pos + len) * scale).ceil() as i32;
        (start, end.max(start + 1))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, fps: f32) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(state, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.mode {
        Mode::LevelSelect => draw_level_select(out, &view)?,
        Mode::Playing => {
            draw_world(out, &view, state)?;
            draw_hud(out, &view, state, fps)?;
        }
        Mode::Paused => {
            draw_world(out, &view, state)?;
            draw_hud(out, &view, state, fps)?;
            draw_centered_box(
                out,
                &view,
                &[
                    ("Paused", Color::White),
                    ("Press ESC to resume", Color::DarkGrey),
                ],
            )?;
        }
        Mode::GameOver => draw_game_over(out, &view, state)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_world<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    draw_pool(out, view, &state.zombies, G_ZOMBIE, C_ZOMBIE)?;
    draw_pool(out, view, &state.health_drops, G_HEALTH_DROP, C_HEALTH_DROP)?;
    draw_pool(out, view, &state.ammo_drops, G_AMMO_DROP, C_AMMO_DROP)?;
    draw_pool(out, view, &state.bullets, G_BULLET, C_BULLET)?;
    draw_entity(out, view, &state.player.body, G_PLAYER, C_PLAYER)
}

fn draw_pool<W: Write>(
    out: &mut W,
    view: &Viewport,
    pool: &Pool,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    for (_, entity) in pool.iter_active() {
        draw_entity(out, view, entity, glyph, color)?;
    }
    Ok(())
}

/// Fill the cells an entity covers, clipped to the play rows.
fn draw_entity<W: Write>(
    out: &mut W,
    view: &Viewport,
    entity: &Entity,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    if !entity.active {
        return Ok(());
    }
    let (c0, c1) = Viewport::span(entity.x, entity.w, view.sx);
    let (r0, r1) = Viewport::span(entity.y, entity.h, view.sy);
    let c0 = c0.max(0);
    let c1 = c1.min(view.cols as i32);
    let r0 = r0.max(1);
    let r1 = r1.min(view.rows as i32 - 1);
    if c0 >= c1 || r0 >= r1 {
        return Ok(());
    }

    let line: String = std::iter::repeat(glyph).take((c1 - c0) as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0 as u16, row as u16))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD (row 0 and the bottom row) ────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
    fps: f32,
) -> std::io::Result<()> {
    // Metrics — left
    let metrics = format!(
        "Score: {}  Level: {}  Ammo: {}  Time: {}s",
        state.score,
        state.level.number(),
        state.player.ammo,
        elapsed_seconds(state) as u32
    );
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&metrics))?;

    // FPS — right
    let fps_text = format!("FPS: {:.2}", fps);
    let fx = view
        .cols
        .saturating_sub(fps_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(fx, 0))?;
    out.queue(style::SetForegroundColor(C_FPS))?;
    out.queue(Print(&fps_text))?;

    draw_health_bar(out, view, state)
}

fn draw_health_bar<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
) -> std::io::Result<()> {
    let max = state.config.max_health.max(1.0);
    let health = state.player.health.clamp(0.0, max);
    let width = (view.cols / 2).max(10) as usize;
    let filled = ((health / max) * width as f32).round() as usize;

    let label = format!(" {}/{}", health as u32, max as u32);
    let total = width + 2 + label.chars().count();
    let x = (view.cols as usize).saturating_sub(total) / 2;
    let y = view.rows.saturating_sub(1);

    out.queue(cursor::MoveTo(x as u16, y))?;
    out.queue(style::SetForegroundColor(C_BOX))?;
    out.queue(Print("["))?;
    out.queue(style::SetForegroundColor(C_HEALTH_BAR))?;
    out.queue(Print("█".repeat(filled.min(width))))?;
    out.queue(Print(" ".repeat(width - filled.min(width))))?;
    out.queue(style::SetForegroundColor(C_BOX))?;
    out.queue(Print("]"))?;
    out.queue(Print(&label))?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_level_select<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let title = "Z O M B I E   L A N D";
    let tx = (view.cols / 2).saturating_sub(title.chars().count() as u16 / 2);
    let ty = (view.rows / 4).max(1);
    out.queue(cursor::MoveTo(tx, ty))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print(title))?;

    let options: Vec<String> = [Level::Easy, Level::Medium, Level::Hard]
        .iter()
        .map(|l| format!("{} - {:?}", l.number(), l))
        .collect();
    let mut lines: Vec<(&str, Color)> = vec![("Select Level:", Color::White)];
    lines.extend(options.iter().map(|s| (s.as_str(), Color::White)));
    draw_centered_box(out, view, &lines)?;

    let hint = "Arrows / WASD : Move   SPACE : Shoot   ESC : Pause   Q : Quit";
    let hx = (view.cols / 2).saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(hx, view.rows.saturating_sub(2)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
) -> std::io::Result<()> {
    let score_line = format!("Score: {}", state.score);
    let time_line = format!("Time Survived: {} seconds", elapsed_seconds(state) as u32);
    draw_centered_box(
        out,
        view,
        &[
            ("Game Over!", Color::Red),
            (score_line.as_str(), Color::Yellow),
            (time_line.as_str(), Color::White),
            ("SPACE - Level select   R - Replay   Q - Quit", Color::DarkGrey),
        ],
    )
}

/// Bordered box centred on screen, one entry per line.
fn draw_centered_box<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let inner = lines
        .iter()
        .map(|(s, _)| s.chars().count())
        .max()
        .unwrap_or(0)
        + 4;
    let height = lines.len() as u16 + 2;
    let left = (view.cols / 2).saturating_sub(inner as u16 / 2 + 1);
    let top = (view.rows / 2).saturating_sub(height / 2);

    out.queue(style::SetForegroundColor(C_BOX))?;
    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(inner))))?;
    for (i, (text, color)) in lines.iter().enumerate() {
        let row = top + 1 + i as u16;
        let pad = inner - text.chars().count();
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(C_BOX))?;
        out.queue(Print("║"))?;
        out.queue(Print(" ".repeat(pad / 2)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
        out.queue(Print(" ".repeat(pad - pad / 2)))?;
        out.queue(style::SetForegroundColor(C_BOX))?;
        out.queue(Print("║"))?;
    }
    out.queue(cursor::MoveTo(left, top + height - 1))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(inner))))?;
    Ok(())
}
