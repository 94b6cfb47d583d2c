//! Hook controller
//!
//! Swing → Extending (on activate) → Retracting → Swing. The caught item,
//! if any, travels inside the `Retracting` variant.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rope_tip;
use crate::tuning::Tuning;

/// Hook motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookState {
    /// Pendulum swing, waiting for input
    Swing,
    /// Rope paying out
    Extending,
    /// Reeling in, optionally carrying an item (by id)
    Retracting { target: Option<u32> },
}

/// The miner's hook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hook {
    pub anchor: Vec2,
    /// Radians from straight down
    pub angle: f32,
    /// +1 or -1
    pub swing_dir: f32,
    pub length: f32,
    /// Current speed (px per frame); retraction uses `speed * retract_factor`
    pub speed: f32,
    pub state: HookState,
}

impl Hook {
    pub fn new(anchor: Vec2, tuning: &Tuning) -> Self {
        Self {
            anchor,
            angle: 0.0,
            swing_dir: 1.0,
            length: tuning.min_length,
            speed: tuning.extend_speed,
            state: HookState::Swing,
        }
    }

    pub fn tip(&self) -> Vec2 {
        rope_tip(self.anchor, self.angle, self.length)
    }

    /// Id of the item being reeled in
    pub fn target(&self) -> Option<u32> {
        match self.state {
            HookState::Retracting { target } => target,
            _ => None,
        }
    }

    pub fn is_swinging(&self) -> bool {
        self.state == HookState::Swing
    }

    pub fn is_extending(&self) -> bool {
        self.state == HookState::Extending
    }

    /// Fire the hook. Returns false (and does nothing) unless swinging.
    pub fn launch(&mut self, tuning: &Tuning) -> bool {
        if !self.is_swinging() {
            return false;
        }
        self.state = HookState::Extending;
        self.speed = tuning.extend_speed;
        true
    }

    /// Grab an item: start reeling in at the item's speed
    pub fn attach(&mut self, item_id: u32, item_speed: f32) {
        self.state = HookState::Retracting {
            target: Some(item_id),
        };
        self.speed = item_speed;
    }

    /// Advance by `frames` reference frames.
    ///
    /// Returns the id of the carried item when the hook finishes reeling it in.
    pub fn update(&mut self, frames: f32, tuning: &Tuning, floor_y: f32) -> Option<u32> {
        match self.state {
            HookState::Swing => {
                self.angle += self.swing_dir * tuning.swing_step * frames;
                if self.angle > tuning.swing_limit {
                    self.angle = tuning.swing_limit;
                    self.swing_dir = -1.0;
                } else if self.angle < -tuning.swing_limit {
                    self.angle = -tuning.swing_limit;
                    self.swing_dir = 1.0;
                }
                None
            }

            HookState::Extending => {
                self.length = (self.length + self.speed * frames).min(tuning.max_length);
                if self.length >= tuning.max_length || self.tip().y >= floor_y {
                    self.state = HookState::Retracting { target: None };
                }
                None
            }

            HookState::Retracting { target } => {
                let step = self.speed * tuning.retract_factor * frames;
                self.length = (self.length - step).max(tuning.min_length);
                if self.length <= tuning.min_length {
                    self.state = HookState::Swing;
                    return target;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook() -> (Hook, Tuning) {
        let tuning = Tuning::default();
        (Hook::new(Vec2::new(400.0, 110.0), &tuning), tuning)
    }

    #[test]
    fn test_swing_reverses_at_limit() {
        let (mut hook, tuning) = hook();
        let mut max_angle: f32 = 0.0;
        let mut min_angle: f32 = 0.0;
        for _ in 0..500 {
            hook.update(1.0, &tuning, 580.0);
            max_angle = max_angle.max(hook.angle);
            min_angle = min_angle.min(hook.angle);
            assert!(hook.angle.abs() <= tuning.swing_limit + 1e-6);
        }
        assert!((max_angle - tuning.swing_limit).abs() < 1e-6);
        assert!((min_angle + tuning.swing_limit).abs() < 1e-6);
    }

    #[test]
    fn test_launch_only_from_swing() {
        let (mut hook, tuning) = hook();
        assert!(hook.launch(&tuning));
        assert_eq!(hook.state, HookState::Extending);
        assert!(!hook.launch(&tuning));
        assert_eq!(hook.state, HookState::Extending);
    }

    #[test]
    fn test_extend_stops_at_max_length() {
        let (mut hook, tuning) = hook();
        hook.launch(&tuning);
        // Floor far away so only max length matters
        for _ in 0..200 {
            hook.update(1.0, &tuning, 10_000.0);
            assert!(hook.length <= tuning.max_length);
            if hook.state != HookState::Extending {
                break;
            }
        }
        assert_eq!(hook.state, HookState::Retracting { target: None });
        assert_eq!(hook.length, tuning.max_length);
    }

    #[test]
    fn test_extend_stops_at_floor() {
        let (mut hook, tuning) = hook();
        hook.launch(&tuning);
        let floor_y = 300.0;
        while hook.is_extending() {
            hook.update(1.0, &tuning, floor_y);
        }
        assert!(hook.tip().y >= floor_y);
        assert!(hook.length < tuning.max_length);
    }

    #[test]
    fn test_empty_retract_returns_to_swing() {
        let (mut hook, tuning) = hook();
        hook.state = HookState::Retracting { target: None };
        hook.length = 100.0;
        let mut delivered = None;
        for _ in 0..100 {
            delivered = delivered.or(hook.update(1.0, &tuning, 580.0));
        }
        assert_eq!(delivered, None);
        assert!(hook.is_swinging());
        assert_eq!(hook.length, tuning.min_length);
    }

    #[test]
    fn test_attach_sets_target_and_speed() {
        let (mut hook, tuning) = hook();
        hook.launch(&tuning);
        hook.length = 200.0;
        hook.attach(42, 0.3);
        assert_eq!(hook.target(), Some(42));
        assert_eq!(hook.speed, 0.3);

        // 0.3 * 1.5 px per frame
        hook.update(1.0, &tuning, 580.0);
        assert!((hook.length - (200.0 - 0.45)).abs() < 1e-4);
    }

    #[test]
    fn test_retract_delivers_target() {
        let (mut hook, tuning) = hook();
        hook.length = 60.0;
        hook.attach(7, 1.0);
        let mut delivered = None;
        for _ in 0..20 {
            if let Some(id) = hook.update(1.0, &tuning, 580.0) {
                delivered = Some(id);
                break;
            }
        }
        assert_eq!(delivered, Some(7));
        assert_eq!(hook.target(), None);
        assert!(hook.is_swinging());
    }
}
