//! Blood Ascent headless runner
//!
//! Plays a seeded session with a simple autopilot and prints the final
//! snapshot as JSON. Useful for balance checks without a renderer.
//!
//! Usage: `blood-ascent [seed] [seconds] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use blood_ascent::sim::{GamePhase, GameState, TickInput, UpgradeTrack};
    use blood_ascent::{Game, Settings};

    /// Frame time the runner feeds the simulation (60 fps)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Climb, sidestepping the nearest enemy when it sits right above the player
    fn autopilot(state: &GameState) -> TickInput {
        let mut input = TickInput {
            up: true,
            ..Default::default()
        };
        let player = &state.player;
        let nearest = state.enemies.iter().min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .total_cmp(&b.pos.distance_squared(player.pos))
        });

        if let Some(enemy) = nearest {
            let offset: Vec2 = enemy.pos - player.pos;
            let danger = player.radius + enemy.radius + 40.0;
            if offset.length() < danger && offset.y < 0.0 {
                // Enemy right above: slide sideways instead of climbing into it
                input.up = false;
                if offset.x > 0.0 {
                    input.left = true;
                } else {
                    input.right = true;
                }
            }
        }
        input
    }

    /// Cheapest affordable upgrade, keeping a reserve so purchases are not fatal
    fn pick_upgrade(game: &Game) -> Option<UpgradeTrack> {
        const RESERVE: f32 = 40.0;
        let blood = game.state().player.blood;
        UpgradeTrack::ALL
            .iter()
            .copied()
            // Attack raises drain; buy it last
            .filter(|t| *t != UpgradeTrack::Attack || game.state().player.levels.attack < 2)
            .map(|t| (t, game.upgrade_cost(t)))
            .filter(|(_, cost)| blood - cost >= RESERVE)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(t, _)| t)
    }

    pub fn run() {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(1);
        let seconds = args.next().and_then(|s| s.parse::<f64>().ok()).unwrap_or(120.0);
        let mut settings = match args.next() {
            Some(path) => Settings::load_from(path),
            None => Settings::default(),
        };
        settings.seed = Some(seed);

        log::info!("Blood Ascent (headless) seed={} duration={}s", seed, seconds);

        let mut game = Game::new(settings);
        game.start_run();

        let max_ticks = (seconds * 1000.0 / FRAME_MS).ceil() as u64;
        let mut last_report = 0.0;
        for _ in 0..max_ticks {
            if game.phase() != GamePhase::Playing {
                break;
            }
            if let Some(track) = pick_upgrade(&game) {
                game.upgrade(track);
            }
            let input = autopilot(game.state());
            game.tick(&input, FRAME_MS);

            let state = game.state();
            if state.clock_ms - last_report >= 5000.0 {
                last_report = state.clock_ms;
                log::info!(
                    "t={:.0}s score={} blood={:.1} enemies={} projectiles={}",
                    state.clock_ms / 1000.0,
                    state.score,
                    state.player.blood,
                    state.enemies.len(),
                    state.projectiles.len()
                );
            }
        }

        let state = game.state();
        log::info!(
            "Finished: phase={:?} cause={:?} best score={} kills={} waves={}",
            state.phase,
            state.game_over_cause,
            state.stats.best_score,
            state.stats.enemies_killed,
            state.stats.waves_spawned
        );

        match game.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_autopilot_climbs_when_clear() {
            let mut game = Game::new(Settings::with_seed(5));
            game.start_run();
            let input = autopilot(game.state());
            assert!(input.up && !input.left && !input.right);
        }

        #[test]
        fn test_pick_upgrade_keeps_reserve() {
            let mut game = Game::new(Settings::with_seed(5));
            game.start_run();
            let track = pick_upgrade(&game).unwrap();
            assert!(game.upgrade(track));
            assert!(game.state().player.blood >= 40.0);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host drives `Game` directly on the web; nothing to run here
}
