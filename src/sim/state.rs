//! Game state and core simulation types
//!
//! One `GameState` per session. Hosts read it to draw and drain its events
//! to drive sound and HUD updates.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::caught_count;
use super::hook::Hook;
use super::items::{Item, ItemKind, generate_items};
use super::particles::{Particle, emit_burst};
use super::session::{GamePhase, Session};
use crate::audio::Cue;
use crate::consts::*;
use crate::tuning::Tuning;

/// Drawable area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre of the miner sprite
    pub fn miner_pos(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, MINER_Y)
    }

    pub fn hook_anchor(&self) -> Vec2 {
        self.miner_pos() + Vec2::new(0.0, HOOK_ANCHOR_OFFSET)
    }
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Session went from Start to Playing
    Started,
    /// Hook grabbed an item
    Caught { item_id: u32, kind: ItemKind, pos: Vec2 },
    /// Caught item reached the miner and was scored
    Delivered { item_id: u32, value: u32, score: u64 },
    /// Field cleared, next level generated
    LevelUp { level: u32, time_left: u32 },
    /// Clock ran out
    GameOver { score: u64, level: u32 },
}

impl GameEvent {
    /// Sound to play for this event, if any
    pub fn cue(&self) -> Option<Cue> {
        match self {
            GameEvent::Caught { kind, .. } => Some(Cue::for_tier(kind.tier())),
            GameEvent::LevelUp { .. } => Some(Cue::LevelUp),
            GameEvent::GameOver { .. } => Some(Cue::GameOver),
            GameEvent::Started | GameEvent::Delivered { .. } => None,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub playfield: Playfield,
    pub tuning: Tuning,
    pub session: Session,
    pub hook: Hook,
    /// Items in spawn order (collision priority order)
    pub items: Vec<Item>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Pending events since the last drain
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session in the Start phase with level 1 generated
    pub fn new(seed: u64, playfield: Playfield, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            playfield,
            hook: Hook::new(playfield.hook_anchor(), &tuning),
            session: Session::new(&tuning),
            tuning,
            items: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        generate_items(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Catch sparkles at `at` in the colour of `kind`
    pub fn emit_particles(&mut self, at: Vec2, kind: ItemKind) {
        emit_burst(&mut self.particles, &mut self.rng, at, kind, &self.tuning);
    }

    /// Start → Playing. Returns false if already started or over.
    pub fn start(&mut self) -> bool {
        if !self.session.start() {
            return false;
        }
        self.push_event(GameEvent::Started);
        log::info!("Session started (seed {})", self.seed);
        true
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Whether a tap/click would fire the hook right now
    pub fn accepts_activation(&self) -> bool {
        self.session.is_playing() && self.hook.is_swinging()
    }

    /// Items flagged as caught (0 or 1)
    pub fn caught_count(&self) -> usize {
        caught_count(&self.items)
    }

    /// Y coordinate the hook tip may not pass
    pub fn floor_y(&self) -> f32 {
        self.playfield.height - self.tuning.floor_margin
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::items::ItemTier;

    #[test]
    fn test_new_state() {
        let state = GameState::new(1, Playfield::default(), Tuning::default());
        assert_eq!(state.phase(), GamePhase::Start);
        assert_eq!(state.session.level, 1);
        assert_eq!(state.session.time_left, 60);
        assert_eq!(state.items.len(), 10);
        assert_eq!(state.caught_count(), 0);
        assert!(state.hook.is_swinging());
        assert_eq!(state.hook.anchor, Vec2::new(400.0, 110.0));
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = GameState::new(77, Playfield::default(), Tuning::default());
        let b = GameState::new(77, Playfield::default(), Tuning::default());
        for (x, y) in a.items.iter().zip(&b.items) {
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.pos, y.pos);
        }
    }

    #[test]
    fn test_start_emits_once() {
        let mut state = GameState::new(1, Playfield::default(), Tuning::default());
        assert!(!state.accepts_activation());
        assert!(state.start());
        assert!(!state.start());
        assert!(state.accepts_activation());
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_event_cues() {
        for kind in ItemKind::ALL {
            let event = GameEvent::Caught {
                item_id: 1,
                kind,
                pos: Vec2::ZERO,
            };
            let expected = match kind.tier() {
                ItemTier::Gold => Cue::Gold,
                ItemTier::Diamond => Cue::Diamond,
                ItemTier::Rock => Cue::Rock,
                ItemTier::Other => Cue::Grab,
            };
            assert_eq!(event.cue(), Some(expected));
        }
        assert_eq!(GameEvent::Started.cue(), None);
        assert_eq!(
            GameEvent::GameOver { score: 0, level: 1 }.cue(),
            Some(Cue::GameOver)
        );
    }
}
