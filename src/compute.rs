/// Game-logic functions.
///
/// Every public transition takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  The per-frame steps inside `tick` work on one owned copy.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Command, Entity, GameEvent, GameState, InputState, Level, Mode, Player, Timers,
};
use crate::pool::Pool;

// ── Constructors ─────────────────────────────────────────────────────────────

fn fresh_player(config: &GameConfig) -> Player {
    let size = config.player_size;
    let mut body = Entity {
        x: (config.arena_width - size.w) / 2.0,
        y: config.arena_height - 100.0,
        w: size.w,
        h: size.h,
        active: true,
    };
    clamp_player(&mut body, config);
    Player {
        body,
        health: config.initial_health,
        ammo: config.initial_ammo,
    }
}

/// Build a fully reset state in the given mode.
fn fresh_state(config: GameConfig, level: Level, mode: Mode) -> GameState {
    GameState {
        player: fresh_player(&config),
        bullets: Pool::new(config.max_bullets, config.bullet_size.w, config.bullet_size.h),
        zombies: Pool::new(config.max_zombies, config.zombie_size.w, config.zombie_size.h),
        health_drops: Pool::new(config.max_drops, config.drop_size.w, config.drop_size.h),
        ammo_drops: Pool::new(config.max_drops, config.drop_size.w, config.drop_size.h),
        timers: Timers::default(),
        score: 0,
        level,
        mode,
        frame: 0,
        time_survived: None,
        events: Vec::new(),
        config,
    }
}

/// Initial state: the level-select screen.
pub fn init_state(config: GameConfig) -> GameState {
    fresh_state(config, Level::Easy, Mode::LevelSelect)
}

// ── Mode transitions ─────────────────────────────────────────────────────────

/// Reset counters, pools and timers and start playing `level`.
pub fn start_level(state: &GameState, level: Level) -> GameState {
    log::info!("starting level {} ({:?})", level.number(), level);
    fresh_state(state.config.clone(), level, Mode::Playing)
}

/// Playing ↔ Paused.  Ignored on the menu and game-over screens.
pub fn toggle_pause(state: &GameState) -> GameState {
    let mode = match state.mode {
        Mode::Playing => Mode::Paused,
        Mode::Paused => Mode::Playing,
        other => other,
    };
    if mode != state.mode {
        log::info!("{:?} -> {:?}", state.mode, mode);
    }
    GameState {
        mode,
        ..state.clone()
    }
}

/// Game over → level select, with everything reset.
pub fn return_to_menu(state: &GameState) -> GameState {
    if state.mode != Mode::GameOver {
        return state.clone();
    }
    fresh_state(state.config.clone(), state.level, Mode::LevelSelect)
}

/// Game over → the same level again.
pub fn replay(state: &GameState) -> GameState {
    if state.mode != Mode::GameOver {
        return state.clone();
    }
    start_level(state, state.level)
}

/// Dispatch a key command.  Commands that make no sense in the current
/// mode leave the state unchanged.
pub fn apply_command(state: &GameState, command: Command) -> GameState {
    match (command, state.mode) {
        (Command::SelectLevel(level), Mode::LevelSelect) => start_level(state, level),
        (Command::TogglePause, Mode::Playing | Mode::Paused) => toggle_pause(state),
        (Command::ReturnToMenu, Mode::GameOver) => return_to_menu(state),
        (Command::Replay, Mode::GameOver) => replay(state),
        _ => state.clone(),
    }
}

/// Seconds shown on the HUD: frozen at game over, live otherwise.
pub fn elapsed_seconds(state: &GameState) -> f32 {
    state
        .time_survived
        .unwrap_or_else(|| play_seconds(state.frame, &state.config))
}

fn play_seconds(frame: u64, config: &GameConfig) -> f32 {
    frame as f32 / config.frame_rate.max(1) as f32
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Keep the player inside the arena and below the HUD strip.
pub fn clamp_player(body: &mut Entity, config: &GameConfig) {
    let max_x = (config.arena_width - body.w).max(0.0);
    let max_y = (config.arena_height - body.h).max(config.hud_margin);
    body.x = body.x.clamp(0.0, max_x);
    body.y = body.y.clamp(config.hud_margin, max_y);
}

fn step_player(state: &mut GameState, input: &InputState) {
    let speed = state.config.player_speed;
    let body = &mut state.player.body;
    if input.left {
        body.x -= speed;
    }
    if input.right {
        body.x += speed;
    }
    if input.up {
        body.y -= speed;
    }
    if input.down {
        body.y += speed;
    }
    clamp_player(body, &state.config);
}

pub fn move_player(state: &GameState, input: &InputState) -> GameState {
    let mut next = state.clone();
    step_player(&mut next, input);
    next
}

/// Bullets fly up and are retired once they pass the top edge.
pub fn move_bullets(bullets: &mut Pool, speed: f32) {
    for b in bullets.iter_active_mut() {
        b.translate(0.0, -speed);
        if b.y < 0.0 {
            b.active = false;
        }
    }
}

/// Zombies and drops fall and are retired once entirely below the arena.
pub fn move_falling(pool: &mut Pool, speed: f32, arena_height: f32) {
    for e in pool.iter_active_mut() {
        e.translate(0.0, speed);
        if e.y >= arena_height {
            e.active = false;
        }
    }
}

// ── Shooting ─────────────────────────────────────────────────────────────────

fn step_shoot(state: &mut GameState, input: &InputState) {
    if !input.fire || state.timers.shoot < state.config.fire_rate || state.player.ammo == 0 {
        return;
    }
    state.timers.shoot = 0;

    let body = &state.player.body;
    let x = body.center_x() - state.config.bullet_size.w / 2.0;
    let y = body.y;
    if state.bullets.spawn(x, y).is_some() {
        state.player.ammo -= 1;
        state.events.push(GameEvent::Shot);
    } else {
        log::trace!("bullet pool full, shot dropped");
    }
}

/// Fire one bullet if the trigger is held, the cooldown has elapsed and
/// there is ammo left.  Does not advance the cooldown timer.
pub fn try_shoot(state: &GameState, input: &InputState) -> GameState {
    let mut next = state.clone();
    step_shoot(&mut next, input);
    next
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Random whole-unit x so that an entity of width `w` stays `margin` clear
/// of both side walls.
fn spawn_x(rng: &mut impl Rng, config: &GameConfig, w: f32) -> f32 {
    let lo = config.spawn_margin.ceil() as i32;
    let hi = ((config.arena_width - config.spawn_margin - w).floor() as i32).max(lo);
    rng.gen_range(lo..=hi) as f32
}

/// Check a spawn timer: once it has reached `interval` try to spawn just
/// above the top edge and reset it.  Returns true if an entity appeared.
fn run_spawner(
    timer: &mut u32,
    interval: u32,
    pool: &mut Pool,
    rng: &mut impl Rng,
    config: &GameConfig,
    w: f32,
    h: f32,
) -> bool {
    if *timer < interval {
        return false;
    }
    *timer = 0;
    let x = spawn_x(rng, config, w);
    let spawned = pool.spawn(x, -h).is_some();
    if !spawned {
        log::trace!("pool full ({} slots), spawn dropped", pool.capacity());
    }
    spawned
}

fn step_zombies(state: &mut GameState, rng: &mut impl Rng) {
    let config = &state.config;
    let settings = *config.level(state.level);
    let size = config.zombie_size;

    let spawned = run_spawner(
        &mut state.timers.zombie_spawn,
        settings.spawn_interval,
        &mut state.zombies,
        rng,
        config,
        size.w,
        size.h,
    );
    if spawned && rng.gen_ratio(1, config.groan_chance.max(1)) {
        state.events.push(GameEvent::ZombieGroan);
    }
    state.timers.zombie_spawn = state.timers.zombie_spawn.saturating_add(1);

    move_falling(&mut state.zombies, settings.zombie_speed, config.arena_height);
}

fn step_drops(state: &mut GameState, rng: &mut impl Rng) {
    let config = &state.config;
    let size = config.drop_size;

    if state.frame > config.drop_start_delay_frames() {
        run_spawner(
            &mut state.timers.health_drop,
            config.health_drop_interval,
            &mut state.health_drops,
            rng,
            config,
            size.w,
            size.h,
        );
        run_spawner(
            &mut state.timers.ammo_drop,
            config.ammo_drop_interval,
            &mut state.ammo_drops,
            rng,
            config,
            size.w,
            size.h,
        );
    }
    state.timers.health_drop = state.timers.health_drop.saturating_add(1);
    state.timers.ammo_drop = state.timers.ammo_drop.saturating_add(1);

    move_falling(&mut state.health_drops, config.drop_speed, config.arena_height);
    move_falling(&mut state.ammo_drops, config.drop_speed, config.arena_height);
}

// ── Collisions ───────────────────────────────────────────────────────────────

fn step_collisions(state: &mut GameState) {
    let player = state.player.body.clone();
    let config = &state.config;

    // 1. Zombies reaching the player
    let damage = config.level(state.level).zombie_damage;
    for zombie in state.zombies.iter_active_mut() {
        if zombie.touches(&player) {
            state.player.health = (state.player.health - damage).max(0.0);
            zombie.active = false;
            state.events.push(GameEvent::PlayerHit { damage });
        }
    }

    // 2. Bullets ↔ zombies; a bullet kills at most one zombie
    let live_bullets: Vec<(usize, Entity)> = state
        .bullets
        .iter_active()
        .map(|(i, b)| (i, b.clone()))
        .collect();
    for (bi, bullet) in live_bullets {
        let hit = state
            .zombies
            .iter_active()
            .find(|(_, z)| z.touches(&bullet))
            .map(|(zi, _)| zi);
        if let Some(zi) = hit {
            state.zombies.deactivate(zi);
            state.bullets.deactivate(bi);
            state.score = state.score.saturating_add(config.score_per_kill);
            state.events.push(GameEvent::ZombieKilled);
        }
    }

    // 3. Health drops
    for drop in state.health_drops.iter_active_mut() {
        if drop.touches(&player) {
            state.player.health = (state.player.health + config.health_drop_amount)
                .min(config.max_health);
            drop.active = false;
            state.events.push(GameEvent::HealthPickup);
        }
    }

    // 4. Ammo drops
    for drop in state.ammo_drops.iter_active_mut() {
        if drop.touches(&player) {
            state.player.ammo = state
                .player
                .ammo
                .saturating_add(config.ammo_drop_amount)
                .min(config.max_ammo);
            drop.active = false;
            state.events.push(GameEvent::AmmoPickup);
        }
    }

    // Game over is entered once; tick never runs outside Playing.
    if state.player.health <= 0.0 && state.mode == Mode::Playing {
        let survived = play_seconds(state.frame, config);
        state.mode = Mode::GameOver;
        state.time_survived = Some(survived);
        state.events.push(GameEvent::GameOver);
        log::info!(
            "game over on level {}: score {}, survived {:.1}s",
            state.level.number(),
            state.score,
            survived
        );
    }
}

/// Run the collision pass on a copy of `state`.  Events from the pass are
/// appended to the copy's event list.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut next = state.clone();
    step_collisions(&mut next);
    next
}

// ── Per-frame tick (RNG is injected) ───────────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
/// Outside `Mode::Playing` the state is returned unchanged.
pub fn tick(state: &GameState, input: &InputState, rng: &mut impl Rng) -> GameState {
    if state.mode != Mode::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    next.events.clear();
    next.frame += 1;

    step_player(&mut next, input);

    step_shoot(&mut next, input);
    next.timers.shoot = next.timers.shoot.saturating_add(1);
    let bullet_speed = next.config.bullet_speed;
    move_bullets(&mut next.bullets, bullet_speed);

    step_zombies(&mut next, rng);
    step_drops(&mut next, rng);

    step_collisions(&mut next);
    next
}
