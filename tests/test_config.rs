use zombie_land::audio::SoundEffect;
use zombie_land::config::*;
use zombie_land::entities::Level;
use zombie_land::error::GameError;

#[test]
fn defaults_match_stock_game() {
    let c = GameConfig::default();
    assert_eq!((c.arena_width, c.arena_height), (1200.0, 900.0));
    assert_eq!(c.hud_margin, 80.0);
    assert_eq!(c.fire_rate, 10);
    assert_eq!(c.max_health, 500.0);
    assert_eq!(c.score_per_kill, 10);
    assert_eq!(c.frame_rate, 120);
    assert!(c.validate().is_ok());
}

#[test]
fn level_table() {
    let c = GameConfig::default();
    let speeds: Vec<f32> = [Level::Easy, Level::Medium, Level::Hard]
        .iter()
        .map(|l| c.level(*l).zombie_speed)
        .collect();
    assert_eq!(speeds, vec![2.0, 3.0, 4.0]);
    assert_eq!(c.level(Level::Medium).spawn_interval, 30);
    assert_eq!(c.level(Level::Hard).zombie_damage, 100.0);
}

#[test]
fn drop_delay_in_frames() {
    let mut c = GameConfig::default();
    assert_eq!(c.drop_start_delay_frames(), 120);
    c.frame_rate = 60;
    assert_eq!(c.drop_start_delay_frames(), 60);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = GameConfig::from_json(
        r#"{
            "frame_rate": 60,
            "hard": { "zombie_speed": 6.0, "spawn_interval": 10, "zombie_damage": 200.0 },
            "audio": { "muted": true }
        }"#,
    )
    .unwrap();
    assert_eq!(c.frame_rate, 60);
    assert_eq!(c.level(Level::Hard).zombie_speed, 6.0);
    assert_eq!(c.level(Level::Easy).zombie_speed, 2.0);
    assert_eq!(c.arena_width, 1200.0);
    assert!(c.audio.muted);
    assert!(c.audio.audible.contains(&SoundEffect::GameOver));
}

#[test]
fn malformed_json_is_an_error() {
    assert!(GameConfig::from_json("{ frame_rate: }").is_err());
    assert!(GameConfig::from_json(r#"{ "frame_rate": "fast" }"#).is_err());
}

#[test]
fn validate_rejects_unplayable_values() {
    let mut c = GameConfig::default();
    c.frame_rate = 0;
    assert!(matches!(c.validate(), Err(GameError::InvalidConfig(_))));

    let mut c = GameConfig::default();
    c.initial_ammo = 200;
    assert!(c.validate().is_err());

    let mut c = GameConfig::default();
    c.spawn_margin = 700.0;
    assert!(c.validate().is_err());
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("zombie_land_cfg_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "max_zombies": 5 }"#).unwrap();
    let c = GameConfig::load_from(&path).unwrap();
    assert_eq!(c.max_zombies, 5);

    std::fs::write(&path, "not json").unwrap();
    let err = GameConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, GameError::Config { .. }));
    assert!(err.to_string().contains("bad config file"));

    std::fs::remove_file(&path).unwrap();
    assert!(matches!(GameConfig::load_from(&path), Err(GameError::Io(_))));
}
