/// All game entity types: plain data with a little geometry.

use crate::config::GameConfig;
use crate::pool::Pool;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    /// Level number shown in the HUD and used as the select key.
    pub fn number(self) -> u8 {
        match self {
            Level::Easy => 1,
            Level::Medium => 2,
            Level::Hard => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Level> {
        match n {
            1 => Some(Level::Easy),
            2 => Some(Level::Medium),
            3 => Some(Level::Hard),
            _ => None,
        }
    }
}

/// Coarse screen selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    LevelSelect,
    Playing,
    Paused,
    GameOver,
}

/// Something noteworthy that happened during one simulated frame.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Shot,
    ZombieGroan,
    ZombieKilled,
    PlayerHit { damage: f32 },
    HealthPickup,
    AmmoPickup,
    GameOver,
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Boundary-inclusive overlap test: rectangles sharing an edge intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.w
            && other.x <= self.x + self.w
            && self.y <= other.y + other.h
            && other.y <= self.y + self.h
    }
}

// ── Entities ─────────────────────────────────────────────────────────────────

/// A simulated rectangle: player, zombie, bullet or drop.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub active: bool,
}

impl Entity {
    /// An inactive slot of the given size, parked at the origin.
    pub fn inactive(w: f32, h: f32) -> Self {
        Entity { x: 0.0, y: 0.0, w, h, active: false }
    }

    pub fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: self.w, h: self.h }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// True when both entities are active and their boxes overlap.
    pub fn touches(&self, other: &Entity) -> bool {
        self.active && other.active && self.bounds().intersects(&other.bounds())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Entity,
    pub health: f32,
    pub ammo: u32,
}

/// Frame counters driving shooting and spawning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timers {
    pub shoot: u32,
    pub zombie_spawn: u32,
    pub health_drop: u32,
    pub ammo_drop: u32,
}

/// Held-key state sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Discrete actions triggered by a single key press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    SelectLevel(Level),
    TogglePause,
    /// Leave the game-over screen for level select.
    ReturnToMenu,
    /// Leave the game-over screen and play the same level again.
    Replay,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bullets: Pool,
    pub zombies: Pool,
    pub health_drops: Pool,
    pub ammo_drops: Pool,
    pub timers: Timers,
    pub score: u32,
    pub level: Level,
    pub mode: Mode,
    /// Frames simulated since the level started.
    pub frame: u64,
    /// Play time frozen at the moment of game over.
    pub time_survived: Option<f32>,
    /// Events emitted by the most recent tick.
    pub events: Vec<GameEvent>,
    pub config: GameConfig,
}
