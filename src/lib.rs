//! Blood Ascent - a vertical-climb arcade survival game
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, combat, progression, hazard)
//! - `game`: Host-facing lifecycle (`start_run`, `tick`, `upgrade`, snapshots)
//! - `settings`: Screen size, seed and frame-delta limits loaded from JSON
//!
//! Rendering, input wiring and UI live in the host; this crate only owns state.

pub mod game;
pub mod settings;
pub mod sim;

pub use game::{Game, Snapshot};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_START_BLOOD: f32 = 100.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const PLAYER_ATTACK_RADIUS: f32 = 80.0;
    pub const PLAYER_ATTACK_DAMAGE: f32 = 10.0;
    /// Auto-attack cooldown (ms)
    pub const PLAYER_ATTACK_COOLDOWN_MS: f64 = 500.0;

    /// Blood drained per second before attack upgrades
    pub const BASE_DRAIN_PER_SEC: f32 = 1.0;
    /// Extra drain per second for each attack level
    pub const DRAIN_PER_ATTACK_LEVEL: f32 = 0.5;

    /// Upgrade cost is `UPGRADE_BASE_COST * (level + 1)`
    pub const UPGRADE_BASE_COST: f32 = 50.0;
    pub const ATTACK_DAMAGE_PER_LEVEL: f32 = 5.0;
    pub const ATTACK_RADIUS_PER_LEVEL: f32 = 20.0;
    pub const SPEED_PER_LEVEL: f32 = 0.5;

    /// Player ranged fire
    pub const PLAYER_PROJECTILE_SPEED: f32 = 8.0;
    pub const PLAYER_PROJECTILE_RADIUS: f32 = 6.0;
    pub const PROJECTILE_BASE_COOLDOWN_MS: f64 = 300.0;
    pub const PROJECTILE_COOLDOWN_STEP_MS: f64 = 15.0;
    pub const PROJECTILE_MIN_COOLDOWN_MS: f64 = 100.0;
    pub const PROJECTILE_BASE_DAMAGE: f32 = 15.0;
    pub const PROJECTILE_DAMAGE_PER_LEVEL: f32 = 5.0;
    /// Projectile level at which player shots start homing
    pub const HOMING_LEVEL: u32 = 10;
    /// Fraction of the way a homing shot turns toward its target each tick
    pub const HOMING_STEER: f32 = 0.15;

    /// Waves
    pub const WAVE_INTERVAL_MS: f64 = 2000.0;
    pub const WAVE_ALTITUDE_STEP: f32 = 300.0;
    pub const WAVE_SCORE_STEP: u64 = 100;
    /// Vertical distance between spawn altitude levels
    pub const LEVEL_ALTITUDE_STEP: f32 = 500.0;
    /// Extra margin above the visible screen for spawns
    pub const SPAWN_MARGIN: f32 = 100.0;
    pub const SPAWN_JITTER: f32 = 200.0;
    /// Score needed for +1.0 difficulty
    pub const DIFFICULTY_SCORE_STEP: f32 = 500.0;

    /// Enemy stats (per level, before difficulty)
    pub const ENEMY_BASE_HEALTH: f32 = 30.0;
    pub const ENEMY_BASE_DAMAGE: f32 = 5.0;
    /// Blood recovered per enemy level on kill (`floor(30 * 0.5 * level)`)
    pub const RECOVERY_PER_LEVEL: f32 = ENEMY_BASE_HEALTH * 0.5;

    /// Ranged enemies
    pub const RANGED_PREFERRED_DISTANCE: f32 = 200.0;
    pub const RANGED_DISTANCE_TOLERANCE: f32 = 50.0;
    pub const RANGED_BRAKE: f32 = 0.9;
    pub const RANGED_SHOOT_COOLDOWN_MS: f64 = 2000.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 3.0;
    pub const ENEMY_PROJECTILE_RADIUS: f32 = 5.0;
    pub const RANGED_DAMAGE_FACTOR: f32 = 0.5;

    /// Explosive enemies
    pub const EXPLOSION_TRIGGER_DISTANCE: f32 = 80.0;
    pub const EXPLOSION_RADIUS: f32 = 100.0;
    pub const EXPLOSION_DAMAGE_FACTOR: f32 = 3.0;

    /// Chaser enemies
    pub const CHASER_TRAIL_COOLDOWN_MS: f64 = 500.0;
    pub const CHASER_TRAIL_SPEED_FACTOR: f32 = 0.5;
    pub const CHASER_DAMAGE_FACTOR: f32 = 0.3;

    /// Entities further than this many screen heights from the player are culled
    pub const CULL_SCREEN_HEIGHTS: f32 = 2.0;

    /// Darkness starts this far below the player
    pub const DARKNESS_START_OFFSET: f32 = 200.0;
    /// Default darkness rise per tick
    pub const DARKNESS_RISE_PER_TICK: f32 = 0.5;

    /// Score is altitude divided by this
    pub const SCORE_DIVISOR: f32 = 10.0;
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector from `from` toward `to` (zero when the points coincide)
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_to_same_point_is_zero() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(direction_to(p, p), Vec2::ZERO);
    }

    #[test]
    fn test_direction_to_is_unit() {
        let d = direction_to(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!((d.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_unit_from_angle() {
        let v = unit_from_angle(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }
}
