//! Gold Miner - swing the hook, reel in the riches
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hook, items, collisions, session clock)
//! - `game`: Host-agnostic frame loop (update → draw → reschedule)
//! - `renderer`: Layered 2D drawing through a `DrawSurface`
//! - `audio`: Cue playback and background melody scheduling
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, HudSink, HudSnapshot, LoopControl};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame length (ms). Per-frame speeds are expressed against this.
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Maximum motion substeps per update to bound work after a long stall
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield (used by the headless runner and tests)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Miner sprite, centred horizontally
    pub const MINER_Y: f32 = 80.0;
    pub const MINER_SIZE: f32 = 60.0;
    /// Hook anchor sits below the miner's centre
    pub const HOOK_ANCHOR_OFFSET: f32 = 30.0;

    /// Ground band drawn at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Particles emitted per catch
    pub const PARTICLE_BURST: usize = 10;
}

/// Hook tip for a rope hanging from `anchor`.
///
/// Angle 0 points straight down; positive angles swing toward +x.
#[inline]
pub fn rope_tip(anchor: Vec2, angle: f32, length: f32) -> Vec2 {
    anchor + Vec2::new(angle.sin() * length, angle.cos() * length)
}

/// Convert an elapsed time in ms to reference frames
#[inline]
pub fn frames(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rope_tip_straight_down() {
        let tip = rope_tip(Vec2::new(100.0, 50.0), 0.0, 40.0);
        assert!((tip - Vec2::new(100.0, 90.0)).length() < 1e-4);
    }

    #[test]
    fn test_rope_tip_sideways() {
        let tip = rope_tip(Vec2::ZERO, FRAC_PI_2, 10.0);
        assert!((tip.x - 10.0).abs() < 1e-4);
        assert!(tip.y.abs() < 1e-4);
    }

    #[test]
    fn test_frames() {
        assert!((frames(consts::FRAME_MS) - 1.0).abs() < 1e-6);
        assert_eq!(frames(0.0), 0.0);
    }
}
