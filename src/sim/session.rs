//! Score, countdown clock and level bookkeeping

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start button
    Start,
    /// Active gameplay
    Playing,
    /// Clock ran out (terminal)
    GameOver,
}

/// Session counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    /// 1-based
    pub level: u32,
    /// Whole seconds left on the clock
    pub time_left: u32,
    /// Milliseconds accumulated toward the next second
    pub elapsed_ms: f32,
    pub phase: GamePhase,
}

impl Session {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            level: 1,
            time_left: tuning.start_time,
            elapsed_ms: 0.0,
            phase: GamePhase::Start,
        }
    }

    /// Start → Playing. No-op in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Start {
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Run the countdown. Returns true on the call that ends the session.
    pub fn advance_clock(&mut self, dt_ms: f32) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        while self.elapsed_ms >= 1000.0 && self.time_left > 0 {
            self.elapsed_ms -= 1000.0;
            self.time_left -= 1;
        }

        if self.time_left == 0 {
            self.phase = GamePhase::GameOver;
            return true;
        }
        false
    }

    pub fn add_score(&mut self, value: u32) {
        self.score += u64::from(value);
    }

    /// Bump the level and reset the clock to that level's budget
    pub fn advance_level(&mut self, tuning: &Tuning) {
        self.level += 1;
        self.time_left = tuning.time_budget(self.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> Session {
        let mut s = Session::new(&Tuning::default());
        assert!(s.start());
        s
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut s = playing();
        assert!(!s.start());
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_clock_ticks_once_per_second() {
        let mut s = playing();
        assert!(!s.advance_clock(999.0));
        assert_eq!(s.time_left, 60);
        assert!(!s.advance_clock(1.0));
        assert_eq!(s.time_left, 59);
        assert_eq!(s.elapsed_ms, 0.0);
    }

    #[test]
    fn test_clock_keeps_remainder() {
        let mut s = playing();
        s.advance_clock(2500.0);
        assert_eq!(s.time_left, 58);
        assert!((s.elapsed_ms - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_last_second_ends_session() {
        let mut s = playing();
        s.time_left = 1;
        assert!(s.advance_clock(1000.0));
        assert_eq!(s.time_left, 0);
        assert_eq!(s.phase, GamePhase::GameOver);

        // Terminal: further time is ignored and never reports again
        assert!(!s.advance_clock(5000.0));
        assert_eq!(s.time_left, 0);
    }

    #[test]
    fn test_clock_frozen_before_start() {
        let mut s = Session::new(&Tuning::default());
        assert!(!s.advance_clock(10_000.0));
        assert_eq!(s.time_left, 60);
    }

    #[test]
    fn test_advance_level() {
        let tuning = Tuning::default();
        let mut s = playing();
        s.advance_level(&tuning);
        assert_eq!(s.level, 2);
        assert_eq!(s.time_left, 50);
    }
}
