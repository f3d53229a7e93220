//! Blood economy and upgrade tracks
//!
//! Blood drains every tick (faster with more attack levels) and is spent on
//! four independent upgrade tracks whose cost grows linearly with level.

use super::state::{Player, UpgradeTrack};
use crate::consts::*;

/// Result of a successful upgrade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeReceipt {
    pub track: UpgradeTrack,
    /// Level after the upgrade
    pub level: u32,
    pub cost: f32,
}

/// Blood drained per second at the given attack level
pub fn drain_rate(attack_level: u32) -> f32 {
    BASE_DRAIN_PER_SEC + attack_level as f32 * DRAIN_PER_ATTACK_LEVEL
}

/// Drain the player's blood for `dt_secs` of elapsed time
pub fn apply_drain(player: &mut Player, dt_secs: f32) {
    player.blood -= drain_rate(player.levels.attack) * dt_secs;
}

/// Cost of the next upgrade for a track currently at `level`
pub fn upgrade_cost(level: u32) -> f32 {
    UPGRADE_BASE_COST * (level + 1) as f32
}

/// Blood granted for killing an enemy of `level`
pub fn kill_recovery(level: u32) -> f32 {
    (RECOVERY_PER_LEVEL * level as f32).floor()
}

/// Buy one level of `track` if affordable; otherwise leave the player untouched
pub fn try_upgrade(player: &mut Player, track: UpgradeTrack) -> Option<UpgradeReceipt> {
    let current = player.levels.get(track);
    let cost = upgrade_cost(current);
    if player.blood < cost {
        return None;
    }

    player.blood -= cost;
    let level = current + 1;
    *player.levels.get_mut(track) = level;

    match track {
        UpgradeTrack::Attack => player.attack_damage += ATTACK_DAMAGE_PER_LEVEL,
        UpgradeTrack::Range => player.attack_radius += ATTACK_RADIUS_PER_LEVEL,
        // Speed is derived from the level (see `Player::move_speed`)
        UpgradeTrack::Speed => {}
        // Ranged fire reads the level directly
        UpgradeTrack::Projectile => {}
    }

    Some(UpgradeReceipt { track, level, cost })
}

/// Ranged fire cooldown (ms) at projectile `level` (>= 1)
pub fn projectile_cooldown_ms(level: u32) -> f64 {
    let steps = level.saturating_sub(1) as f64;
    (PROJECTILE_BASE_COOLDOWN_MS - steps * PROJECTILE_COOLDOWN_STEP_MS)
        .max(PROJECTILE_MIN_COOLDOWN_MS)
}

/// Projectiles per volley at projectile `level` (>= 1)
pub fn projectile_count(level: u32) -> usize {
    1 + (level.saturating_sub(1) / 3) as usize
}

/// Damage per projectile at projectile `level` (>= 1)
pub fn projectile_damage(level: u32) -> f32 {
    PROJECTILE_BASE_DAMAGE + level.saturating_sub(1) as f32 * PROJECTILE_DAMAGE_PER_LEVEL
}

/// Whether shots at this level steer toward enemies
pub fn projectiles_home(level: u32) -> bool {
    level >= HOMING_LEVEL
}
