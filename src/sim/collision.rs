//! Circle collision and proximity queries
//!
//! Every entity is a circle; a hit is strict overlap of the two radii.

use glam::Vec2;

use super::state::Enemy;

/// True when two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Index of the first live enemy overlapping the circle, in list order
pub fn first_overlapping_enemy(pos: Vec2, radius: f32, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .position(|e| e.alive && circles_overlap(pos, radius, e.pos, e.radius))
}

/// Position of the nearest live enemy
pub fn nearest_enemy_pos(pos: Vec2, enemies: &[Enemy]) -> Option<Vec2> {
    enemies
        .iter()
        .filter(|e| e.alive)
        .min_by(|a, b| {
            a.pos
                .distance_squared(pos)
                .total_cmp(&b.pos.distance_squared(pos))
        })
        .map(|e| e.pos)
}

/// Positions of up to `count` live enemies, nearest first
pub fn nearest_enemy_positions(pos: Vec2, enemies: &[Enemy], count: usize) -> Vec<Vec2> {
    let mut targets: Vec<Vec2> = enemies.iter().filter(|e| e.alive).map(|e| e.pos).collect();
    targets.sort_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)));
    targets.truncate(count);
    targets
}

/// True when `y` is more than `limit` away vertically from `player_y`
#[inline]
pub fn beyond_cull_range(y: f32, player_y: f32, limit: f32) -> bool {
    (y - player_y).abs() > limit
}
