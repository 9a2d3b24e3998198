/// Tunable game constants.
///
/// `GameConfig::default()` reproduces the stock game.  A JSON file may
/// override any subset of the keys; missing keys keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;
use crate::entities::Level;
use crate::error::GameError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ZOMBIE_LAND_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "zombie_land.json";

// ── Sub-tables ───────────────────────────────────────────────────────────────

/// Width and height of an entity kind, in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

/// Per-difficulty zombie behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Downward displacement per frame.
    pub zombie_speed: f32,
    /// Frames between zombie spawn attempts.
    pub spawn_interval: u32,
    /// Health removed when a zombie touches the player.
    pub zombie_damage: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub muted: bool,
    /// Cues that ring the terminal bell.  Everything else is only logged.
    pub audible: Vec<SoundEffect>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            muted: false,
            audible: vec![
                SoundEffect::GameOver,
                SoundEffect::HealthPickup,
                SoundEffect::AmmoPickup,
            ],
        }
    }
}

// ── Master config ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Strip at the top reserved for the HUD; the player cannot enter it.
    pub hud_margin: f32,

    pub player_speed: f32,
    pub bullet_speed: f32,
    pub drop_speed: f32,

    /// Minimum frames between two shots.
    pub fire_rate: u32,
    pub initial_ammo: u32,
    pub max_ammo: u32,
    pub initial_health: f32,
    pub max_health: f32,
    pub score_per_kill: u32,

    pub health_drop_interval: u32,
    pub health_drop_amount: f32,
    pub ammo_drop_interval: u32,
    pub ammo_drop_amount: u32,
    /// No drops spawn before this much play time has elapsed.
    pub drop_start_delay_ms: u32,

    pub easy: LevelSettings,
    pub medium: LevelSettings,
    pub hard: LevelSettings,

    pub max_bullets: usize,
    pub max_zombies: usize,
    pub max_drops: usize,

    pub player_size: Size,
    pub zombie_size: Size,
    pub bullet_size: Size,
    pub drop_size: Size,
    /// Horizontal inset kept clear on both sides when spawning.
    pub spawn_margin: f32,
    /// A spawning zombie groans with probability 1 / groan_chance.
    pub groan_chance: u32,

    pub frame_rate: u32,
    pub audio: AudioSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 1200.0,
            arena_height: 900.0,
            hud_margin: 80.0,

            player_speed: 6.0,
            bullet_speed: 20.0,
            drop_speed: 2.0,

            fire_rate: 10,
            initial_ammo: 100,
            max_ammo: 100,
            initial_health: 500.0,
            max_health: 500.0,
            score_per_kill: 10,

            health_drop_interval: 1000,
            health_drop_amount: 100.0,
            ammo_drop_interval: 1000,
            ammo_drop_amount: 30,
            drop_start_delay_ms: 1000,

            easy: LevelSettings {
                zombie_speed: 2.0,
                spawn_interval: 60,
                zombie_damage: 25.0,
            },
            medium: LevelSettings {
                zombie_speed: 3.0,
                spawn_interval: 30,
                zombie_damage: 50.0,
            },
            hard: LevelSettings {
                zombie_speed: 4.0,
                spawn_interval: 15,
                zombie_damage: 100.0,
            },

            max_bullets: 100,
            max_zombies: 50,
            max_drops: 20,

            player_size: Size { w: 48.0, h: 48.0 },
            zombie_size: Size { w: 48.0, h: 48.0 },
            bullet_size: Size { w: 8.0, h: 20.0 },
            drop_size: Size { w: 32.0, h: 32.0 },
            spawn_margin: 10.0,
            groan_chance: 5,

            frame_rate: 120,
            audio: AudioSettings::default(),
        }
    }
}

impl GameConfig {
    pub fn level(&self, level: Level) -> &LevelSettings {
        match level {
            Level::Easy => &self.easy,
            Level::Medium => &self.medium,
            Level::Hard => &self.hard,
        }
    }

    /// `drop_start_delay_ms` expressed in simulated frames.
    pub fn drop_start_delay_frames(&self) -> u64 {
        self.drop_start_delay_ms as u64 * self.frame_rate as u64 / 1000
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), GameError> {
        let fail = |reason: &str| Err(GameError::InvalidConfig(reason.to_string()));

        if self.frame_rate == 0 {
            return fail("frame_rate must be positive");
        }
        if self.initial_ammo > self.max_ammo {
            return fail("initial_ammo exceeds max_ammo");
        }
        if self.initial_health <= 0.0 || self.initial_health > self.max_health {
            return fail("initial_health must be in (0, max_health]");
        }
        if self.player_size.w > self.arena_width
            || self.player_size.h > self.arena_height - self.hud_margin
        {
            return fail("player does not fit in the arena");
        }
        for size in [self.zombie_size, self.drop_size] {
            if size.w + 2.0 * self.spawn_margin > self.arena_width {
                return fail("spawn_margin leaves no room to spawn");
            }
        }
        if self.groan_chance == 0 {
            return fail("groan_chance must be positive");
        }
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config source: `$ZOMBIE_LAND_CONFIG`, then
    /// `./zombie_land.json`, then built-in defaults.  Returns the file used.
    pub fn load() -> Result<(Self, Option<PathBuf>), GameError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let path = match explicit {
            Some(p) => Some(p),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                p.is_file().then_some(p)
            }
        };
        match path {
            Some(p) => Ok((Self::load_from(&p)?, Some(p))),
            None => Ok((Self::default(), None)),
        }
    }
}
