use zombie_land::audio::*;
use zombie_land::config::AudioSettings;
use zombie_land::entities::GameEvent;

#[test]
fn default_audible_cues() {
    let audio = AudioManager::new(AudioSettings::default());
    assert!(audio.is_audible(SoundEffect::GameOver));
    assert!(audio.is_audible(SoundEffect::HealthPickup));
    assert!(!audio.is_audible(SoundEffect::Shoot));
}

#[test]
fn muted_is_silent() {
    let audio = AudioManager::new(AudioSettings {
        muted: true,
        ..AudioSettings::default()
    });
    assert!(!audio.is_audible(SoundEffect::GameOver));
    let mut out = Vec::new();
    audio.play(&mut out, SoundEffect::GameOver).unwrap();
    audio.play_events(&mut out, &[GameEvent::GameOver]).unwrap();
    assert!(out.is_empty());
}

#[test]
fn one_bell_per_frame() {
    let audio = AudioManager::new(AudioSettings::default());
    let mut out = Vec::new();
    let events = [
        GameEvent::Shot,
        GameEvent::HealthPickup,
        GameEvent::AmmoPickup,
        GameEvent::GameOver,
    ];
    audio.play_events(&mut out, &events).unwrap();
    assert_eq!(out, b"\x07");
}

#[test]
fn single_cue_rings_when_audible() {
    let audio = AudioManager::new(AudioSettings::default());
    let mut out = Vec::new();
    audio.play(&mut out, SoundEffect::AmmoPickup).unwrap();
    audio.play(&mut out, SoundEffect::Shoot).unwrap();
    assert_eq!(out, b"\x07");
}

#[test]
fn quiet_cues_write_nothing() {
    let audio = AudioManager::new(AudioSettings::default());
    let mut out = Vec::new();
    audio
        .play_events(&mut out, &[GameEvent::Shot, GameEvent::ZombieKilled])
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn events_map_to_effects() {
    assert_eq!(SoundEffect::for_event(&GameEvent::Shot), SoundEffect::Shoot);
    assert_eq!(
        SoundEffect::for_event(&GameEvent::PlayerHit { damage: 25.0 }),
        SoundEffect::PlayerHit
    );
    assert_eq!(SoundEffect::for_event(&GameEvent::GameOver), SoundEffect::GameOver);
}
