//! Host-facing game lifecycle
//!
//! The host calls `start_run`, then `tick` once per frame, plus `upgrade` from
//! its UI. It reads a `Snapshot` for drawing and never touches state directly.

use serde::Serialize;

use crate::Settings;
use crate::sim::progression;
use crate::sim::state::{
    Enemy, GameEvent, GameOverCause, GamePhase, GameState, Player, Projectile, RunStats,
    UpgradeTrack,
};
use crate::sim::tick::{TickInput, tick};

/// Read-only view of the simulation for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub camera_y: f32,
    pub score: u64,
    pub darkness_y: f32,
    pub clock_ms: f64,
    pub game_over_cause: Option<GameOverCause>,
    pub events: &'a [GameEvent],
    pub stats: RunStats,
}

impl Snapshot<'_> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A game session: settings plus the state of the current (or last) run
#[derive(Debug, Clone)]
pub struct Game {
    settings: Settings,
    state: GameState,
    runs: u32,
}

impl Game {
    /// New session in the `Start` phase
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let seed = settings.seed.unwrap_or(0);
        Self {
            state: GameState::new(settings.clone(), seed),
            settings,
            runs: 0,
        }
    }

    /// Reset all state and begin playing
    pub fn start_run(&mut self) {
        let seed = self.settings.seed.unwrap_or_else(clock_seed);
        self.state = GameState::new(self.settings.clone(), seed);
        self.state.phase = GamePhase::Playing;
        self.runs += 1;
        log::info!("Run {} started (seed {})", self.runs, seed);
    }

    /// Advance one frame; no-op unless a run is in progress
    pub fn tick(&mut self, input: &TickInput, dt_ms: f64) {
        tick(&mut self.state, input, dt_ms);
    }

    /// Buy one level of `track`. Returns false (and changes nothing) when
    /// the gauge cannot cover the cost or no run is in progress. The
    /// `Upgraded` event shows up in the next tick's events.
    pub fn upgrade(&mut self, track: UpgradeTrack) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        match progression::try_upgrade(&mut self.state.player, track) {
            Some(receipt) => {
                log::info!(
                    "Upgraded {} to level {} for {} blood",
                    track.as_str(),
                    receipt.level,
                    receipt.cost
                );
                self.state.queue_event(GameEvent::Upgraded {
                    track,
                    level: receipt.level,
                    cost: receipt.cost,
                });
                true
            }
            None => false,
        }
    }

    /// Cost of the next level on `track`
    pub fn upgrade_cost(&self, track: UpgradeTrack) -> f32 {
        progression::upgrade_cost(self.state.player.levels.get(track))
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of runs started this session
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let state = &self.state;
        Snapshot {
            phase: state.phase,
            player: &state.player,
            enemies: &state.enemies,
            projectiles: &state.projectiles,
            camera_y: state.camera_y,
            score: state.score,
            darkness_y: state.darkness.y,
            clock_ms: state.clock_ms,
            game_over_cause: state.game_over_cause,
            events: &state.events,
            stats: state.stats,
        }
    }
}

/// Seed from the system clock for unseeded sessions
#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

/// `SystemTime::now` panics on wasm32-unknown-unknown; ask the browser
#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn seeded_game() -> Game {
        Game::new(Settings::with_seed(2024))
    }

    #[test]
    fn test_starts_in_start_phase() {
        let mut game = seeded_game();
        assert_eq!(game.phase(), GamePhase::Start);
        game.tick(&TickInput::default(), 16.0);
        assert_eq!(game.state().clock_ms, 0.0);
        assert!(!game.upgrade(UpgradeTrack::Attack));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut game = seeded_game();
        game.start_run();
        assert_eq!(game.phase(), GamePhase::Playing);
        let center = game.state().player.pos;
        assert_eq!(center.x, game.settings().screen_width / 2.0);
        assert_eq!(center.y, game.settings().screen_height / 2.0);

        for _ in 0..125 {
            game.tick(&TickInput::default(), 16.0);
        }
        let snapshot = game.snapshot();
        assert_eq!(snapshot.clock_ms, 2000.0);
        assert!(!snapshot.enemies.is_empty());
        assert!(snapshot.enemies.iter().all(|e| e.pos.y < snapshot.player.pos.y));
        assert!(
            snapshot
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::WaveSpawned { .. }))
        );

        game.state.player.blood = 0.5;
        game.tick(&TickInput::default(), 1000.0);
        assert!(game.state().player.blood <= 0.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.state().game_over_cause, Some(GameOverCause::BloodDepleted));

        // Game over is sticky
        let clock = game.state().clock_ms;
        game.tick(&TickInput::default(), 16.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.state().clock_ms, clock);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = seeded_game();
        game.start_run();
        game.state.player.blood = 500.0;
        assert!(game.upgrade(UpgradeTrack::Speed));
        for _ in 0..200 {
            game.tick(&TickInput::default(), 16.0);
        }

        game.start_run();
        let state = game.state();
        assert_eq!(game.runs(), 2);
        assert_eq!(state.player.levels, Default::default());
        assert_eq!(state.player.blood, PLAYER_START_BLOOD);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.clock_ms, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_upgrade_through_game() {
        let mut game = seeded_game();
        game.start_run();
        assert_eq!(game.upgrade_cost(UpgradeTrack::Projectile), 50.0);
        assert!(game.upgrade(UpgradeTrack::Projectile));
        assert_eq!(game.state().player.blood, PLAYER_START_BLOOD - 50.0);
        assert_eq!(game.upgrade_cost(UpgradeTrack::Projectile), 100.0);
        // 50 left, next costs 100
        assert!(!game.upgrade(UpgradeTrack::Projectile));
        assert_eq!(game.state().player.levels.projectile, 1);
        game.tick(&TickInput::default(), 16.0);
        assert!(game.state().events.iter().any(|e| matches!(
            e,
            GameEvent::Upgraded {
                track: UpgradeTrack::Projectile,
                level: 1,
                ..
            }
        )));
    }

    #[test]
    fn test_upgrade_event_survives_next_tick() {
        let mut game = seeded_game();
        game.start_run();
        assert!(game.upgrade(UpgradeTrack::Speed));
        game.tick(&TickInput::default(), 16.0);

        let upgraded = |events: &[GameEvent]| {
            events
                .iter()
                .filter(|e| {
                    matches!(
                        e,
                        GameEvent::Upgraded {
                            track: UpgradeTrack::Speed,
                            level: 1,
                            ..
                        }
                    )
                })
                .count()
        };
        assert_eq!(upgraded(game.snapshot().events), 1);

        // Delivered once, then gone
        game.tick(&TickInput::default(), 16.0);
        assert_eq!(upgraded(game.snapshot().events), 0);
    }

    #[test]
    fn test_zero_width_settings_do_not_panic() {
        let settings = Settings {
            screen_width: 0.0,
            ..Settings::with_seed(2024)
        };
        let mut game = Game::new(settings);
        assert_eq!(game.settings().screen_width, 800.0);
        game.start_run();
        assert_eq!(game.state().settings.screen_width, 800.0);
        // Past the first wave at 2000 ms
        for _ in 0..130 {
            game.tick(&TickInput::default(), 16.0);
        }
        assert!(game.state().stats.waves_spawned >= 1);
        assert!(!game.state().enemies.is_empty());
    }

    #[test]
    fn test_unseeded_run_starts() {
        let mut game = Game::new(Settings::default());
        game.start_run();
        assert_eq!(game.phase(), GamePhase::Playing);
        game.tick(&TickInput::default(), 16.0);
        assert_eq!(game.state().clock_ms, 16.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut game = seeded_game();
        game.start_run();
        for _ in 0..130 {
            game.tick(&TickInput::default(), 16.0);
        }
        let json = game.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Playing");
        assert!(value["enemies"].as_array().is_some_and(|a| !a.is_empty()));
        assert_eq!(value["enemies"][0]["kind"]["type"], "melee");
    }
}
