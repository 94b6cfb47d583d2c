//! Data-driven game balance
//!
//! Every per-frame quantity is expressed against `consts::FRAME_MS`.
//! Values can be overridden from JSON; missing fields keep their defaults.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Hard cap on items per level
pub const MAX_ITEMS: usize = 200;

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Hook ===
    /// Swing step (radians per frame)
    pub swing_step: f32,
    /// Swing half-range (radians)
    pub swing_limit: f32,
    /// Extend speed (px per frame)
    pub extend_speed: f32,
    /// Retract speed multiplier applied to the current hook speed
    pub retract_factor: f32,
    pub min_length: f32,
    pub max_length: f32,
    /// Extension stops when the tip gets this close to the bottom edge
    pub floor_margin: f32,

    // === Item field ===
    pub base_items: u32,
    pub items_per_level: u32,
    /// Horizontal margin kept clear on both sides
    pub side_margin: f32,
    /// Space reserved at the top for the miner and HUD
    pub top_margin: f32,
    /// Space reserved at the bottom for the ground
    pub bottom_margin: f32,
    /// Sway phase step (radians per frame)
    pub sway_step: f32,
    /// Sway displacement (px per frame at peak)
    pub sway_amplitude: f32,

    // === Session clock ===
    /// Seconds on the clock for level 1
    pub start_time: u32,
    /// Budget formula: max(min_time, base_time - level * time_per_level)
    pub base_time: u32,
    pub time_per_level: u32,
    pub min_time: u32,

    // === Particles ===
    /// Velocity components are uniform in (-spread/2, spread/2) px per frame
    pub particle_spread: f32,
    pub particle_min_size: f32,
    pub particle_size_range: f32,
    /// Lifetime in seconds
    pub particle_life: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            swing_step: 0.02,
            swing_limit: std::f32::consts::FRAC_PI_3,
            extend_speed: 3.0,
            retract_factor: 1.5,
            min_length: 50.0,
            max_length: 400.0,
            floor_margin: 20.0,

            base_items: 8,
            items_per_level: 2,
            side_margin: 30.0,
            top_margin: 150.0,
            bottom_margin: 50.0,
            sway_step: 0.02,
            sway_amplitude: 0.3,

            start_time: 60,
            base_time: 60,
            time_per_level: 5,
            min_time: 30,

            particle_spread: 4.0,
            particle_min_size: 2.0,
            particle_size_range: 5.0,
            particle_life: 1.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override. Values that would break the
    /// hook or item field are rejected.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate().map_err(serde_json::Error::custom)?;
        Ok(tuning)
    }

    /// Parse tuning, falling back to defaults (with a warning) on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring invalid tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.min_length > 0.0 && self.min_length <= self.max_length) {
            return Err(format!(
                "hook lengths out of order: min {} max {}",
                self.min_length, self.max_length
            ));
        }
        if !(self.extend_speed > 0.0 && self.retract_factor > 0.0) {
            return Err("hook speeds must be positive".to_string());
        }
        if !(self.swing_step >= 0.0 && self.swing_limit >= 0.0) {
            return Err("swing step and limit must not be negative".to_string());
        }
        if self.item_count(1) == 0 {
            return Err("level 1 needs at least one item".to_string());
        }
        if !(self.particle_life > 0.0) {
            return Err("particle life must be positive".to_string());
        }
        Ok(())
    }

    /// Number of items generated at the start of `level`, capped at `MAX_ITEMS`
    pub fn item_count(&self, level: u32) -> usize {
        let count = self
            .base_items
            .saturating_add(level.saturating_mul(self.items_per_level));
        (count as usize).min(MAX_ITEMS)
    }

    /// Seconds on the clock after advancing to `level`
    pub fn time_budget(&self, level: u32) -> u32 {
        self.base_time
            .saturating_sub(level.saturating_mul(self.time_per_level))
            .max(self.min_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_count() {
        let t = Tuning::default();
        assert_eq!(t.item_count(1), 10);
        assert_eq!(t.item_count(2), 12);
        assert_eq!(t.item_count(5), 18);
    }

    #[test]
    fn test_time_budget_floors_at_min() {
        let t = Tuning::default();
        assert_eq!(t.time_budget(2), 50);
        assert_eq!(t.time_budget(6), 30);
        assert_eq!(t.time_budget(7), 30);
        assert_eq!(t.time_budget(40), 30);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "max_length": 320.0, "start_time": 90 }"#).unwrap();
        assert_eq!(t.max_length, 320.0);
        assert_eq!(t.start_time, 90);
        assert_eq!(t.min_length, Tuning::default().min_length);
    }

    #[test]
    fn test_inverted_lengths_rejected() {
        let json = r#"{ "min_length": 500.0, "max_length": 100.0 }"#;
        assert!(Tuning::from_json(json).is_err());
        assert_eq!(Tuning::from_json_or_default(json), Tuning::default());
    }

    #[test]
    fn test_huge_item_counts_saturate() {
        let t = Tuning::from_json(r#"{ "base_items": 4294967295, "items_per_level": 4294967295 }"#)
            .unwrap();
        assert_eq!(t.item_count(1), MAX_ITEMS);
        assert_eq!(t.item_count(u32::MAX), MAX_ITEMS);
    }

    #[test]
    fn test_empty_field_rejected() {
        assert!(Tuning::from_json(r#"{ "base_items": 0, "items_per_level": 0 }"#).is_err());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ max_length: }").is_err());
    }
}
