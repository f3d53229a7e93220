//! Wave generation
//!
//! Waves spawn above the visible screen. Enemy level comes from spawn altitude,
//! enemy type from a per-tier probability table, and stats scale with a
//! score-based difficulty multiplier.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, Hsl};
use crate::consts::*;

/// Inputs for one wave
#[derive(Debug, Clone, Copy)]
pub struct WaveParams {
    pub player_pos: Vec2,
    pub screen_width: f32,
    pub screen_height: f32,
    pub score: u64,
    pub altitude: f32,
    /// Simulation clock at spawn (seeds enemy fire timers)
    pub now_ms: f64,
}

/// Number of enemies in a wave (always at least one)
pub fn wave_size(score: u64, altitude: f32) -> usize {
    let from_altitude = (altitude / WAVE_ALTITUDE_STEP).floor().max(0.0) as usize;
    let from_score = (score / WAVE_SCORE_STEP) as usize;
    (from_altitude + from_score).max(1)
}

/// Continuous stat multiplier from score
pub fn difficulty(score: u64) -> f32 {
    1.0 + score as f32 / DIFFICULTY_SCORE_STEP
}

/// Enemy level for a spawn Y coordinate (altitude = -y)
pub fn level_for_spawn_y(spawn_y: f32) -> u32 {
    let tier = (-spawn_y / LEVEL_ALTITUDE_STEP).floor() as i64 + 1;
    tier.max(1) as u32
}

/// Type probabilities (melee, ranged, explosive, chaser) for a level
pub fn type_weights(level: u32) -> [f32; 4] {
    match level {
        0..=5 => [1.0, 0.0, 0.0, 0.0],
        6..=9 => [0.5, 0.5, 0.0, 0.0],
        10..=19 => [0.4, 0.3, 0.3, 0.0],
        _ => [0.3, 0.25, 0.25, 0.2],
    }
}

/// Pick an enemy type for a uniform `roll` in [0, 1)
///
/// The roll is compared against cumulative thresholds in the order
/// melee, ranged, explosive, chaser.
pub fn pick_kind(level: u32, roll: f32, now_ms: f64) -> EnemyKind {
    let weights = type_weights(level);
    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if roll < cumulative {
            return match index {
                0 => EnemyKind::melee(),
                1 => EnemyKind::ranged(now_ms),
                2 => EnemyKind::explosive(),
                _ => EnemyKind::chaser(now_ms),
            };
        }
    }
    // Float rounding can leave the top of [0, 1) uncovered
    EnemyKind::melee()
}

/// (min speed, max speed, radius) before difficulty
fn base_stats(kind: &EnemyKind) -> (f32, f32, f32) {
    match kind {
        EnemyKind::Melee => (1.0, 2.0, 15.0),
        EnemyKind::Ranged { .. } => (0.8, 1.5, 12.0),
        EnemyKind::Explosive { .. } => (1.5, 2.5, 18.0),
        EnemyKind::Chaser { .. } => (2.0, 3.0, 14.0),
    }
}

/// Color for a kind, darker as difficulty rises
pub fn enemy_color(kind: &EnemyKind, difficulty: f32) -> Hsl {
    let lightness = (50.0 - (difficulty - 1.0) * 10.0).max(20.0);
    Hsl::new(kind.hue(), 70.0, lightness)
}

/// Build one enemy of `kind` at `pos`
pub fn make_enemy(
    rng: &mut impl Rng,
    kind: EnemyKind,
    pos: Vec2,
    level: u32,
    difficulty: f32,
) -> Enemy {
    let (min_speed, max_speed, radius) = base_stats(&kind);
    let speed = rng.random_range(min_speed..max_speed) * difficulty;
    let health = ENEMY_BASE_HEALTH * difficulty * level as f32;
    Enemy {
        id: 0,
        pos,
        vel: Vec2::ZERO,
        radius: radius * difficulty,
        health,
        max_health: health,
        damage: ENEMY_BASE_DAMAGE * difficulty * level as f32,
        speed,
        color: enemy_color(&kind, difficulty),
        level,
        kind,
        alive: true,
    }
}

/// Generate one wave of enemies above the visible screen
pub fn spawn_wave(rng: &mut impl Rng, params: &WaveParams) -> Vec<Enemy> {
    let count = wave_size(params.score, params.altitude);
    let difficulty = difficulty(params.score);
    let top = params.player_pos.y - params.screen_height / 2.0 - SPAWN_MARGIN;

    (0..count)
        .map(|_| {
            let x = rng.random_range(0.0..params.screen_width);
            let y = top - rng.random_range(0.0..SPAWN_JITTER);
            let level = level_for_spawn_y(y);
            let roll: f32 = rng.random();
            let kind = pick_kind(level, roll, params.now_ms);
            make_enemy(rng, kind, Vec2::new(x, y), level, difficulty)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params(player_y: f32, score: u64, altitude: f32) -> WaveParams {
        WaveParams {
            player_pos: Vec2::new(400.0, player_y),
            screen_width: 800.0,
            screen_height: 600.0,
            score,
            altitude,
            now_ms: 0.0,
        }
    }

    #[test]
    fn test_wave_size() {
        assert_eq!(wave_size(0, 0.0), 1);
        assert_eq!(wave_size(99, 299.0), 1);
        assert_eq!(wave_size(100, 0.0), 1);
        assert_eq!(wave_size(250, 650.0), 4);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_spawn_y(0.0), 1);
        assert_eq!(level_for_spawn_y(-499.0), 1);
        assert_eq!(level_for_spawn_y(-500.0), 2);
        assert_eq!(level_for_spawn_y(-999.0), 2);
        assert_eq!(level_for_spawn_y(-1000.0), 3);
        // Below the origin still clamps to level 1
        assert_eq!(level_for_spawn_y(700.0), 1);
    }

    #[test]
    fn test_low_levels_are_melee_only() {
        for roll in [0.0, 0.5, 0.999] {
            assert_eq!(pick_kind(5, roll, 0.0), EnemyKind::Melee);
        }
    }

    #[test]
    fn test_type_table_thresholds() {
        assert!(matches!(pick_kind(6, 0.49, 0.0), EnemyKind::Melee));
        assert!(matches!(pick_kind(6, 0.5, 0.0), EnemyKind::Ranged { .. }));
        assert!(matches!(pick_kind(12, 0.39, 0.0), EnemyKind::Melee));
        assert!(matches!(pick_kind(12, 0.6, 0.0), EnemyKind::Ranged { .. }));
        assert!(matches!(pick_kind(12, 0.75, 0.0), EnemyKind::Explosive { .. }));
        assert!(matches!(pick_kind(25, 0.29, 0.0), EnemyKind::Melee));
        assert!(matches!(pick_kind(25, 0.5, 0.0), EnemyKind::Ranged { .. }));
        assert!(matches!(pick_kind(25, 0.75, 0.0), EnemyKind::Explosive { .. }));
        assert!(matches!(pick_kind(25, 0.85, 0.0), EnemyKind::Chaser { .. }));
    }

    #[test]
    fn test_weights_sum_to_one() {
        for level in [1, 6, 10, 20, 100] {
            let sum: f32 = type_weights(level).iter().sum();
            assert!((sum - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_stats_scale_with_difficulty_and_level() {
        let mut rng = Pcg32::seed_from_u64(3);
        let enemy = make_enemy(&mut rng, EnemyKind::Melee, Vec2::ZERO, 2, 2.0);
        assert_eq!(enemy.max_health, 120.0);
        assert_eq!(enemy.health, enemy.max_health);
        assert_eq!(enemy.damage, 20.0);
        assert_eq!(enemy.radius, 30.0);
        assert!(enemy.speed >= 2.0 && enemy.speed < 4.0);
        assert_eq!(enemy.color.hue, 0.0);
        assert_eq!(enemy.color.lightness, 40.0);
    }

    #[test]
    fn test_wave_spawns_above_screen() {
        let mut rng = Pcg32::seed_from_u64(11);
        let wave = spawn_wave(&mut rng, &params(300.0, 250, 900.0));
        assert_eq!(wave.len(), 5);
        for enemy in &wave {
            // player_y - half_height - 100 - [0, 200)
            assert!(enemy.pos.y <= -100.0 && enemy.pos.y > -300.0);
            assert!(enemy.pos.x >= 0.0 && enemy.pos.x < 800.0);
            assert_eq!(enemy.level, level_for_spawn_y(enemy.pos.y));
        }
    }

    #[test]
    fn test_wave_is_deterministic_per_seed() {
        let a = spawn_wave(&mut Pcg32::seed_from_u64(5), &params(-4000.0, 600, 4300.0));
        let b = spawn_wave(&mut Pcg32::seed_from_u64(5), &params(-4000.0, 600, 4300.0));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.kind, y.kind);
        }
    }

    proptest! {
        #[test]
        fn level_matches_altitude(altitude in 0u32..200_000) {
            let level = level_for_spawn_y(-(altitude as f32));
            prop_assert_eq!(level, altitude / 500 + 1);
        }

        #[test]
        fn wave_never_empty(score in 0u64..10_000, altitude in -1000.0f32..50_000.0) {
            prop_assert!(wave_size(score, altitude) >= 1);
        }
    }
}
