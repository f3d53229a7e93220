//! Per-frame simulation tick
//!
//! One call per display frame. Rate effects (drain, contact damage) scale with
//! the frame delta; cooldowns compare the simulation clock against the last
//! action timestamp, so each fires at most once per tick and never catches up.

use glam::Vec2;

use super::combat;
use super::progression;
use super::spawn::{WaveParams, spawn_wave};
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Touch drag delta applied directly to the player position
    pub drag: Option<Vec2>,
}

impl TickInput {
    /// Normalized held-direction vector (zero when nothing or opposites held)
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Accept a host frame delta: negative/NaN becomes 0, oversized is clamped
fn sanitize_delta(dt_ms: f64, max_ms: f64) -> f64 {
    if !dt_ms.is_finite() || dt_ms < 0.0 {
        log::warn!("Ignoring invalid frame delta {}", dt_ms);
        return 0.0;
    }
    if dt_ms > max_ms {
        log::warn!("Clamping frame delta {:.1}ms to {:.1}ms", dt_ms, max_ms);
        return max_ms;
    }
    dt_ms
}

/// Keep the player inside the horizontal screen and above the starting bottom edge
fn clamp_player(state: &mut GameState) {
    let player = &mut state.player;
    let max_x = (state.settings.screen_width - player.radius).max(player.radius);
    let max_y = state.settings.screen_height - player.radius;
    player.pos.x = player.pos.x.clamp(player.radius, max_x);
    player.pos.y = player.pos.y.min(max_y);
}

/// Apply held keys and touch drag to the player
pub fn apply_input(state: &mut GameState, input: &TickInput) {
    let speed = state.player.move_speed();
    state.player.vel = input.direction() * speed;
    state.player.pos += state.player.vel;
    if let Some(delta) = input.drag {
        state.player.pos += delta;
    }
    clamp_player(state);
}

/// Spawn a wave if the interval has elapsed on the simulation clock
pub fn maybe_spawn_wave(state: &mut GameState) {
    if state.clock_ms - state.last_wave_ms < WAVE_INTERVAL_MS {
        return;
    }
    state.last_wave_ms = state.clock_ms;

    let params = WaveParams {
        player_pos: state.player.pos,
        screen_width: state.settings.screen_width,
        screen_height: state.settings.screen_height,
        score: state.score,
        altitude: state.altitude(),
        now_ms: state.clock_ms,
    };
    let wave = spawn_wave(&mut state.rng, &params);
    let count = wave.len();
    let min_level = wave.iter().map(|e| e.level).min().unwrap_or(1);
    let max_level = wave.iter().map(|e| e.level).max().unwrap_or(1);
    for enemy in wave {
        state.push_enemy(enemy);
    }

    state.stats.waves_spawned += 1;
    log::info!(
        "Wave {} spawned: {} enemies, levels {}-{}, score {}",
        state.stats.waves_spawned,
        count,
        min_level,
        max_level,
        state.score
    );
    state.events.push(GameEvent::WaveSpawned {
        count,
        min_level,
        max_level,
    });
}

/// End the run if the player is out of blood or inside the darkness
pub fn check_game_over(state: &mut GameState) {
    let cause = if state.player.is_dead() {
        GameOverCause::BloodDepleted
    } else if state.darkness.reached(state.player.pos.y) {
        GameOverCause::Darkness
    } else {
        return;
    };

    state.phase = GamePhase::GameOver;
    state.game_over_cause = Some(cause);
    log::info!(
        "Game over ({:?}) at score {} after {:.1}s",
        cause,
        state.score,
        state.clock_ms / 1000.0
    );
    state.events.push(GameEvent::GameOver { cause });
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.begin_events();

    let dt_ms = sanitize_delta(dt_ms, state.settings.max_frame_ms);
    let dt_secs = (dt_ms / 1000.0) as f32;
    state.clock_ms += dt_ms;
    state.stats.ticks += 1;

    apply_input(state, input);
    state.update_camera();

    maybe_spawn_wave(state);
    progression::apply_drain(&mut state.player, dt_secs);

    combat::update_enemies(state, dt_secs);
    combat::player_auto_attack(state);
    combat::player_ranged_fire(state);
    combat::update_projectiles(state);
    combat::cull_distant(state);
    state.sweep();

    state.darkness.advance();
    check_game_over(state);
}
