//! Game state and core simulation types
//!
//! Everything a run mutates lives in `GameState`; a new run is a new state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hazard::Darkness;
use crate::Settings;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the host to start a run
    Start,
    /// Active gameplay
    Playing,
    /// Run ended (sticky until the next run starts)
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    BloodDepleted,
    Darkness,
}

/// The four independent progression tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeTrack {
    Attack,
    Range,
    Speed,
    Projectile,
}

impl UpgradeTrack {
    pub const ALL: [UpgradeTrack; 4] = [
        UpgradeTrack::Attack,
        UpgradeTrack::Range,
        UpgradeTrack::Speed,
        UpgradeTrack::Projectile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeTrack::Attack => "attack",
            UpgradeTrack::Range => "range",
            UpgradeTrack::Speed => "speed",
            UpgradeTrack::Projectile => "projectile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "attack" | "atk" => Some(UpgradeTrack::Attack),
            "range" => Some(UpgradeTrack::Range),
            "speed" | "spd" => Some(UpgradeTrack::Speed),
            "projectile" | "proj" => Some(UpgradeTrack::Projectile),
            _ => None,
        }
    }
}

/// Upgrade levels, one per track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub attack: u32,
    pub range: u32,
    pub speed: u32,
    pub projectile: u32,
}

impl UpgradeLevels {
    pub fn get(&self, track: UpgradeTrack) -> u32 {
        match track {
            UpgradeTrack::Attack => self.attack,
            UpgradeTrack::Range => self.range,
            UpgradeTrack::Speed => self.speed,
            UpgradeTrack::Projectile => self.projectile,
        }
    }

    pub fn get_mut(&mut self, track: UpgradeTrack) -> &mut u32 {
        match track {
            UpgradeTrack::Attack => &mut self.attack,
            UpgradeTrack::Range => &mut self.range,
            UpgradeTrack::Speed => &mut self.speed,
            UpgradeTrack::Projectile => &mut self.projectile,
        }
    }
}

/// Display color (HSL, cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// CSS color string, e.g. `hsl(240, 70%, 50%)`
    pub fn to_css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue.round(),
            self.saturation.round(),
            self.lightness.round()
        )
    }
}

/// Player projectile color (gold)
pub const PLAYER_PROJECTILE_COLOR: Hsl = Hsl::new(50.0, 100.0, 60.0);

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Health and currency in one; <= 0 ends the run
    pub blood: f32,
    pub attack_radius: f32,
    pub attack_damage: f32,
    pub attack_cooldown_ms: f64,
    pub last_attack_ms: f64,
    pub levels: UpgradeLevels,
    pub last_projectile_ms: f64,
    pub base_speed: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            blood: PLAYER_START_BLOOD,
            attack_radius: PLAYER_ATTACK_RADIUS,
            attack_damage: PLAYER_ATTACK_DAMAGE,
            attack_cooldown_ms: PLAYER_ATTACK_COOLDOWN_MS,
            last_attack_ms: 0.0,
            levels: UpgradeLevels::default(),
            last_projectile_ms: 0.0,
            base_speed: PLAYER_BASE_SPEED,
        }
    }

    /// Movement speed per tick including speed upgrades
    pub fn move_speed(&self) -> f32 {
        self.base_speed + self.levels.speed as f32 * SPEED_PER_LEVEL
    }

    pub fn is_dead(&self) -> bool {
        self.blood <= 0.0
    }
}

/// Enemy variant with the transient state only that variant needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnemyKind {
    /// Charges and deals continuous contact damage
    Melee,
    /// Keeps its distance and shoots at the player
    Ranged {
        shoot_cooldown_ms: f64,
        last_shot_ms: f64,
    },
    /// Charges and detonates once near the player
    Explosive { explosion_radius: f32, exploded: bool },
    /// Charges with contact damage and leaves a trail of slow shots
    Chaser {
        trail_cooldown_ms: f64,
        last_trail_ms: f64,
    },
}

impl EnemyKind {
    pub fn melee() -> Self {
        EnemyKind::Melee
    }

    /// Ranged enemy whose first shot comes one cooldown after `now_ms`
    pub fn ranged(now_ms: f64) -> Self {
        EnemyKind::Ranged {
            shoot_cooldown_ms: RANGED_SHOOT_COOLDOWN_MS,
            last_shot_ms: now_ms,
        }
    }

    pub fn explosive() -> Self {
        EnemyKind::Explosive {
            explosion_radius: EXPLOSION_RADIUS,
            exploded: false,
        }
    }

    pub fn chaser(now_ms: f64) -> Self {
        EnemyKind::Chaser {
            trail_cooldown_ms: CHASER_TRAIL_COOLDOWN_MS,
            last_trail_ms: now_ms,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Melee => "melee",
            EnemyKind::Ranged { .. } => "ranged",
            EnemyKind::Explosive { .. } => "explosive",
            EnemyKind::Chaser { .. } => "chaser",
        }
    }

    /// Base hue: melee red, ranged blue, explosive orange, chaser purple
    pub fn hue(&self) -> f32 {
        match self {
            EnemyKind::Melee => 0.0,
            EnemyKind::Ranged { .. } => 240.0,
            EnemyKind::Explosive { .. } => 30.0,
            EnemyKind::Chaser { .. } => 280.0,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub speed: f32,
    pub color: Hsl,
    /// Altitude tier at spawn (>= 1)
    pub level: u32,
    pub kind: EnemyKind,
    /// Cleared when killed, exploded or culled; swept at end of tick
    #[serde(skip)]
    pub alive: bool,
}

impl Enemy {
    /// Set velocity toward `dir` at full speed and integrate
    pub fn charge(&mut self, dir: Vec2) {
        self.vel = dir * self.speed;
        self.pos += self.vel;
    }

    /// Apply damage, returning true if this hit killed it
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        self.health <= 0.0
    }
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub color: Hsl,
    /// Player shots hit enemies; enemy shots hit the player only
    pub from_player: bool,
    pub homing: bool,
    #[serde(skip)]
    pub alive: bool,
}

/// Things that happened during the last tick (for effects/sounds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveSpawned { count: usize, min_level: u32, max_level: u32 },
    EnemyKilled { id: u32, level: u32, recovered: f32 },
    Exploded { id: u32, damage: f32 },
    PlayerHit { damage: f32 },
    AttackPulse { hits: usize },
    ProjectilesFired { count: usize },
    Upgraded { track: UpgradeTrack, level: u32, cost: f32 },
    GameOver { cause: GameOverCause },
}

/// Per-run counters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub ticks: u64,
    pub enemies_killed: u32,
    pub waves_spawned: u32,
    pub best_score: u64,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    pub game_over_cause: Option<GameOverCause>,
    /// Simulation clock (sum of accepted frame deltas, ms)
    pub clock_ms: f64,
    pub last_wave_ms: f64,
    pub player: Player,
    /// Active enemies (spawn order)
    pub enemies: Vec<Enemy>,
    /// Active projectiles (spawn order)
    pub projectiles: Vec<Projectile>,
    pub darkness: Darkness,
    pub start_y: f32,
    pub camera_y: f32,
    pub score: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Raised between ticks; delivered with the next tick's events
    pending_events: Vec<GameEvent>,
    pub stats: RunStats,
    next_id: u32,
}

impl GameState {
    /// Create a fresh state with the player at screen center
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let start = Vec2::new(settings.screen_width / 2.0, settings.half_height());
        let darkness = Darkness::new(
            start.y + DARKNESS_START_OFFSET,
            settings.darkness_rise_per_tick,
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            game_over_cause: None,
            clock_ms: 0.0,
            last_wave_ms: 0.0,
            player: Player::new(start),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            darkness,
            start_y: start.y,
            camera_y: start.y - settings.half_height(),
            score: 0,
            events: Vec::new(),
            pending_events: Vec::new(),
            stats: RunStats::default(),
            next_id: 1,
            settings,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy, assigning it an ID
    pub fn push_enemy(&mut self, mut enemy: Enemy) {
        enemy.id = self.next_entity_id();
        enemy.alive = true;
        self.enemies.push(enemy);
    }

    /// Add a projectile, assigning it an ID
    pub fn push_projectile(&mut self, mut projectile: Projectile) {
        projectile.id = self.next_entity_id();
        projectile.alive = true;
        self.projectiles.push(projectile);
    }

    /// Climb above the starting camera position (never negative)
    pub fn altitude(&self) -> f32 {
        (-self.camera_y).max(0.0)
    }

    /// Recompute camera and score from the player position
    pub fn update_camera(&mut self) {
        self.camera_y = self.player.pos.y - self.settings.half_height();
        self.score = (-self.camera_y / SCORE_DIVISOR).floor().max(0.0) as u64;
        self.stats.best_score = self.stats.best_score.max(self.score);
    }

    /// Queue an event raised outside `tick` (e.g. an upgrade purchase)
    pub fn queue_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Start a new tick's event list with anything queued since the last one
    pub fn begin_events(&mut self) {
        self.events.clear();
        self.events.append(&mut self.pending_events);
    }

    /// Drop everything marked dead in one compaction pass
    pub fn sweep(&mut self) {
        self.enemies.retain(|e| e.alive);
        self.projectiles.retain(|p| p.alive);
    }
}
