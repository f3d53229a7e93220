//! Simulation module
//!
//! All gameplay logic lives here. Rules for this module:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Entities die by flag and are swept once per tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod hazard;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use hazard::Darkness;
pub use progression::{UpgradeReceipt, try_upgrade, upgrade_cost};
pub use spawn::{WaveParams, spawn_wave};
pub use state::{
    Enemy, EnemyKind, GameEvent, GameOverCause, GamePhase, GameState, Hsl, Player, Projectile,
    RunStats, UpgradeLevels, UpgradeTrack,
};
pub use tick::{TickInput, tick};
