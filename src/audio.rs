//! Sound cues.
//!
//! The game only ever fires and forgets; nothing waits on playback.  The
//! terminal backend rings the bell for the cues listed in `AudioSettings`
//! and logs the rest.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::config::AudioSettings;
use crate::entities::GameEvent;

/// Sound effect types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player fires a bullet
    Shoot,
    /// A zombie appears (not every spawn)
    ZombieGroan,
    /// Bullet kills a zombie
    ZombieKilled,
    /// Zombie reaches the player
    PlayerHit,
    /// Health drop collected
    HealthPickup,
    /// Ammo drop collected
    AmmoPickup,
    /// Health ran out
    GameOver,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> SoundEffect {
        match event {
            GameEvent::Shot => SoundEffect::Shoot,
            GameEvent::ZombieGroan => SoundEffect::ZombieGroan,
            GameEvent::ZombieKilled => SoundEffect::ZombieKilled,
            GameEvent::PlayerHit { .. } => SoundEffect::PlayerHit,
            GameEvent::HealthPickup => SoundEffect::HealthPickup,
            GameEvent::AmmoPickup => SoundEffect::AmmoPickup,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }
}

const BELL: &str = "\x07";

/// Audio manager for the game
pub struct AudioManager {
    settings: AudioSettings,
}

impl AudioManager {
    pub fn new(settings: AudioSettings) -> Self {
        if settings.muted {
            log::info!("Audio muted");
        }
        Self { settings }
    }

    /// True if `effect` makes an audible sound with the current settings.
    pub fn is_audible(&self, effect: SoundEffect) -> bool {
        !self.settings.muted && self.settings.audible.contains(&effect)
    }

    /// Play a single cue.
    pub fn play<W: Write>(&self, out: &mut W, effect: SoundEffect) -> std::io::Result<()> {
        self.cue(out, effect, true).map(|_| ())
    }

    /// Play the cue for every event of the last frame.  At most one bell is
    /// rung per frame no matter how many audible cues fired.
    pub fn play_events<W: Write>(&self, out: &mut W, events: &[GameEvent]) -> std::io::Result<()> {
        let mut rang = false;
        for event in events {
            rang |= self.cue(out, SoundEffect::for_event(event), !rang)?;
        }
        Ok(())
    }

    /// Log `effect` and ring the bell if it is audible and `ring` allows it.
    /// Returns whether the bell rang.
    fn cue<W: Write>(&self, out: &mut W, effect: SoundEffect, ring: bool) -> std::io::Result<bool> {
        log::debug!("sound cue: {:?}", effect);
        if ring && self.is_audible(effect) {
            out.write_all(BELL.as_bytes())?;
            return Ok(true);
        }
        Ok(false)
    }
}
