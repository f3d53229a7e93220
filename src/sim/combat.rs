//! Combat resolution
//!
//! Enemy behaviors, player auto-attack, player ranged fire and projectile
//! hits. Entities are never removed here: deaths clear the `alive` flag and
//! `GameState::sweep` compacts the lists once per tick.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use super::collision::{
    beyond_cull_range, circles_overlap, first_overlapping_enemy, nearest_enemy_pos,
    nearest_enemy_positions,
};
use super::progression::{
    kill_recovery, projectile_cooldown_ms, projectile_count, projectile_damage, projectiles_home,
};
use super::state::{
    Enemy, EnemyKind, GameEvent, GameState, Hsl, PLAYER_PROJECTILE_COLOR, Player, Projectile,
    RunStats,
};
use crate::consts::*;
use crate::{direction_to, distance, unit_from_angle};

/// Explosion damage at `distance` with linear falloff to zero at `radius`
pub fn explosion_damage(enemy_damage: f32, distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    enemy_damage * EXPLOSION_DAMAGE_FACTOR * (1.0 - distance / radius).max(0.0)
}

/// Turn `vel` part of the way toward `target_dir`, keeping magnitude `speed`
pub fn steer_toward(vel: Vec2, target_dir: Vec2, steer: f32, speed: f32) -> Vec2 {
    let current = vel.normalize_or_zero();
    let blended = current.lerp(target_dir, steer).normalize_or_zero();
    if blended == Vec2::ZERO {
        // Exactly opposite (or no target): keep flying straight
        return current * speed;
    }
    blended * speed
}

/// Mark an enemy dead and pay out the kill recovery
fn kill_enemy(
    enemy: &mut Enemy,
    player: &mut Player,
    events: &mut Vec<GameEvent>,
    stats: &mut RunStats,
) {
    if !enemy.alive {
        return;
    }
    enemy.alive = false;
    let recovered = kill_recovery(enemy.level);
    player.blood += recovered;
    stats.enemies_killed += 1;
    log::debug!(
        "Enemy {} ({}, level {}) killed, +{} blood",
        enemy.id,
        enemy.kind.as_str(),
        enemy.level,
        recovered
    );
    events.push(GameEvent::EnemyKilled {
        id: enemy.id,
        level: enemy.level,
        recovered,
    });
}

fn enemy_shot(from: Vec2, to: Vec2, speed: f32, damage: f32, color: Hsl) -> Projectile {
    Projectile {
        id: 0,
        pos: from,
        vel: direction_to(from, to) * speed,
        radius: ENEMY_PROJECTILE_RADIUS,
        damage,
        color,
        from_player: false,
        homing: false,
        alive: true,
    }
}

/// Continuous contact damage for `dt_secs` if touching the player
fn contact_damage(enemy: &Enemy, player: &mut Player, dt_secs: f32) {
    if circles_overlap(enemy.pos, enemy.radius, player.pos, player.radius) {
        player.blood -= enemy.damage * dt_secs;
    }
}

/// Ranged movement: approach if too far, back off if too close, else brake
fn keep_distance(enemy: &mut Enemy, dir: Vec2, distance: f32) {
    let far = RANGED_PREFERRED_DISTANCE + RANGED_DISTANCE_TOLERANCE;
    let near = RANGED_PREFERRED_DISTANCE - RANGED_DISTANCE_TOLERANCE;
    if distance > far {
        enemy.vel = dir * enemy.speed;
    } else if distance < near {
        enemy.vel = -dir * enemy.speed;
    } else {
        enemy.vel *= RANGED_BRAKE;
    }
    enemy.pos += enemy.vel;
}

/// Advance every live enemy one tick
pub fn update_enemies(state: &mut GameState, dt_secs: f32) {
    let now = state.clock_ms;
    let player = &mut state.player;
    let mut shots: Vec<Projectile> = Vec::new();

    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        let gap = distance(enemy.pos, player.pos);
        let dir = direction_to(enemy.pos, player.pos);

        match enemy.kind {
            EnemyKind::Melee => {
                enemy.charge(dir);
                contact_damage(enemy, player, dt_secs);
            }
            EnemyKind::Ranged {
                shoot_cooldown_ms,
                last_shot_ms,
            } => {
                keep_distance(enemy, dir, gap);
                if now - last_shot_ms >= shoot_cooldown_ms {
                    enemy.kind = EnemyKind::Ranged {
                        shoot_cooldown_ms,
                        last_shot_ms: now,
                    };
                    shots.push(enemy_shot(
                        enemy.pos,
                        player.pos,
                        ENEMY_PROJECTILE_SPEED,
                        enemy.damage * RANGED_DAMAGE_FACTOR,
                        enemy.color,
                    ));
                }
            }
            EnemyKind::Explosive { explosion_radius, .. } => {
                if gap < EXPLOSION_TRIGGER_DISTANCE {
                    enemy.kind = EnemyKind::Explosive {
                        explosion_radius,
                        exploded: true,
                    };
                    enemy.alive = false;
                    let damage = explosion_damage(enemy.damage, gap, explosion_radius);
                    player.blood -= damage;
                    log::debug!("Enemy {} exploded for {:.1}", enemy.id, damage);
                    state.events.push(GameEvent::Exploded {
                        id: enemy.id,
                        damage,
                    });
                    if damage > 0.0 {
                        state.events.push(GameEvent::PlayerHit { damage });
                    }
                } else {
                    enemy.charge(dir);
                }
            }
            EnemyKind::Chaser {
                trail_cooldown_ms,
                last_trail_ms,
            } => {
                enemy.charge(dir);
                contact_damage(enemy, player, dt_secs);
                if now - last_trail_ms >= trail_cooldown_ms {
                    enemy.kind = EnemyKind::Chaser {
                        trail_cooldown_ms,
                        last_trail_ms: now,
                    };
                    shots.push(enemy_shot(
                        enemy.pos,
                        player.pos,
                        ENEMY_PROJECTILE_SPEED * CHASER_TRAIL_SPEED_FACTOR,
                        enemy.damage * CHASER_DAMAGE_FACTOR,
                        enemy.color,
                    ));
                }
            }
        }
    }

    for shot in shots {
        state.push_projectile(shot);
    }
}

/// Melee pulse: damage every enemy inside the attack radius once per cooldown
pub fn player_auto_attack(state: &mut GameState) {
    let now = state.clock_ms;
    let player = &mut state.player;
    if now - player.last_attack_ms < player.attack_cooldown_ms {
        return;
    }
    player.last_attack_ms = now;

    let mut hits = 0;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        if distance(enemy.pos, player.pos) > player.attack_radius {
            continue;
        }
        hits += 1;
        if enemy.take_damage(player.attack_damage) {
            kill_enemy(enemy, player, &mut state.events, &mut state.stats);
        }
    }

    if hits > 0 {
        state.events.push(GameEvent::AttackPulse { hits });
    }
}

/// Player volley: one shot per nearest enemy, leftovers fan out evenly
pub fn player_ranged_fire(state: &mut GameState) {
    let level = state.player.levels.projectile;
    if level == 0 {
        return;
    }
    let now = state.clock_ms;
    if now - state.player.last_projectile_ms < projectile_cooldown_ms(level) {
        return;
    }
    state.player.last_projectile_ms = now;

    let origin = state.player.pos;
    let count = projectile_count(level);
    let mut directions: Vec<Vec2> = nearest_enemy_positions(origin, &state.enemies, count)
        .into_iter()
        .map(|target| {
            let dir = direction_to(origin, target);
            if dir == Vec2::ZERO { Vec2::NEG_Y } else { dir }
        })
        .collect();

    let remaining = count - directions.len();
    for i in 0..remaining {
        // Start straight up (screen Y grows downward)
        let theta = -FRAC_PI_2 + i as f32 * TAU / remaining as f32;
        directions.push(unit_from_angle(theta));
    }

    let damage = projectile_damage(level);
    let homing = projectiles_home(level);
    for dir in directions {
        state.push_projectile(Projectile {
            id: 0,
            pos: origin,
            vel: dir * PLAYER_PROJECTILE_SPEED,
            radius: PLAYER_PROJECTILE_RADIUS,
            damage,
            color: PLAYER_PROJECTILE_COLOR,
            from_player: true,
            homing,
            alive: true,
        });
    }
    state.events.push(GameEvent::ProjectilesFired { count });
}

/// Move projectiles, steer homing shots and resolve hits
pub fn update_projectiles(state: &mut GameState) {
    let player = &mut state.player;

    for projectile in state.projectiles.iter_mut().filter(|p| p.alive) {
        if projectile.homing && projectile.from_player {
            if let Some(target) = nearest_enemy_pos(projectile.pos, &state.enemies) {
                let dir = direction_to(projectile.pos, target);
                projectile.vel =
                    steer_toward(projectile.vel, dir, HOMING_STEER, PLAYER_PROJECTILE_SPEED);
            }
        }
        projectile.pos += projectile.vel;

        if projectile.from_player {
            let Some(index) =
                first_overlapping_enemy(projectile.pos, projectile.radius, &state.enemies)
            else {
                continue;
            };
            projectile.alive = false;
            let enemy = &mut state.enemies[index];
            if enemy.take_damage(projectile.damage) {
                kill_enemy(enemy, player, &mut state.events, &mut state.stats);
            }
        } else if circles_overlap(projectile.pos, projectile.radius, player.pos, player.radius) {
            projectile.alive = false;
            player.blood -= projectile.damage;
            state.events.push(GameEvent::PlayerHit {
                damage: projectile.damage,
            });
        }
    }
}

/// Mark everything too far above or below the player as dead
pub fn cull_distant(state: &mut GameState) {
    let player_y = state.player.pos.y;
    let limit = CULL_SCREEN_HEIGHTS * state.settings.screen_height;

    for enemy in state.enemies.iter_mut() {
        if beyond_cull_range(enemy.pos.y, player_y, limit) {
            enemy.alive = false;
        }
    }
    for projectile in state.projectiles.iter_mut() {
        if beyond_cull_range(projectile.pos.y, player_y, limit) {
            projectile.alive = false;
        }
    }
}
