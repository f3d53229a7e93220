//! Rising darkness line
//!
//! The darkness climbs a fixed amount every tick regardless of frame time, so
//! higher frame rates make it rise faster.

use serde::{Deserialize, Serialize};

/// The hazard boundary; the run ends when the player is at or below it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Darkness {
    /// World Y of the darkness edge (smaller = higher)
    pub y: f32,
    pub rise_per_tick: f32,
}

impl Darkness {
    pub fn new(y: f32, rise_per_tick: f32) -> Self {
        Self { y, rise_per_tick }
    }

    /// Rise by one tick's worth
    pub fn advance(&mut self) {
        self.y -= self.rise_per_tick;
    }

    /// True once the player has touched the darkness
    pub fn reached(&self, player_y: f32) -> bool {
        player_y >= self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rises_per_tick() {
        let mut darkness = Darkness::new(500.0, 0.5);
        for _ in 0..10 {
            darkness.advance();
        }
        assert_eq!(darkness.y, 495.0);
    }

    #[test]
    fn test_reached_is_inclusive() {
        let darkness = Darkness::new(500.0, 0.5);
        assert!(!darkness.reached(499.9));
        assert!(darkness.reached(500.0));
        assert!(darkness.reached(600.0));
    }

    #[test]
    fn test_catches_stationary_player() {
        let mut darkness = Darkness::new(500.0, 0.5);
        let player_y = 300.0;
        let mut ticks = 0;
        while !darkness.reached(player_y) {
            darkness.advance();
            ticks += 1;
        }
        assert_eq!(ticks, 400);
    }
}
