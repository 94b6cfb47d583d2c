//! Item field: archetypes, level generation and per-frame sway
//!
//! Items are axis-aligned boxes positioned by their top-left corner.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::tuning::Tuning;

/// Value tier, used to pick the catch sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemTier {
    Gold,
    Diamond,
    Rock,
    Other,
}

/// The fixed item templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    SmallGold,
    MediumGold,
    LargeGold,
    Diamond,
    SmallRock,
    LargeRock,
    Crystal,
}

impl ItemKind {
    pub const ALL: [ItemKind; 7] = [
        ItemKind::SmallGold,
        ItemKind::MediumGold,
        ItemKind::LargeGold,
        ItemKind::Diamond,
        ItemKind::SmallRock,
        ItemKind::LargeRock,
        ItemKind::Crystal,
    ];

    /// Bounding box (w, h)
    pub fn size(&self) -> Vec2 {
        match self {
            ItemKind::SmallGold => Vec2::new(30.0, 25.0),
            ItemKind::MediumGold => Vec2::new(45.0, 35.0),
            ItemKind::LargeGold => Vec2::new(60.0, 50.0),
            ItemKind::Diamond => Vec2::new(25.0, 25.0),
            ItemKind::SmallRock => Vec2::new(35.0, 30.0),
            ItemKind::LargeRock => Vec2::new(50.0, 40.0),
            ItemKind::Crystal => Vec2::new(20.0, 35.0),
        }
    }

    pub fn value(&self) -> u32 {
        match self {
            ItemKind::SmallGold => 50,
            ItemKind::MediumGold => 100,
            ItemKind::LargeGold => 200,
            ItemKind::Diamond => 300,
            ItemKind::SmallRock => 20,
            ItemKind::LargeRock => 10,
            ItemKind::Crystal => 150,
        }
    }

    /// Hook speed while reeling this item in (heavier = slower)
    pub fn speed(&self) -> f32 {
        match self {
            ItemKind::SmallGold => 1.0,
            ItemKind::MediumGold => 0.8,
            ItemKind::LargeGold => 0.6,
            ItemKind::Diamond => 1.2,
            ItemKind::SmallRock => 0.5,
            ItemKind::LargeRock => 0.3,
            ItemKind::Crystal => 1.5,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ItemKind::SmallGold => "#FFD700",
            ItemKind::MediumGold => "#FFA500",
            ItemKind::LargeGold => "#FF8C00",
            ItemKind::Diamond => "#00CED1",
            ItemKind::SmallRock => "#696969",
            ItemKind::LargeRock => "#2F4F4F",
            ItemKind::Crystal => "#9370DB",
        }
    }

    pub fn tier(&self) -> ItemTier {
        match self {
            ItemKind::SmallGold | ItemKind::MediumGold | ItemKind::LargeGold => ItemTier::Gold,
            ItemKind::Diamond => ItemTier::Diamond,
            ItemKind::SmallRock | ItemKind::LargeRock => ItemTier::Rock,
            ItemKind::Crystal => ItemTier::Other,
        }
    }
}

/// A collectible (or worthless rock) lying in the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub value: u32,
    pub speed: f32,
    pub caught: bool,
    /// Sway phase (radians), also used as the draw rotation
    pub phase: f32,
}

impl Item {
    pub fn new(id: u32, kind: ItemKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size: kind.size(),
            value: kind.value(),
            speed: kind.speed(),
            caught: false,
            phase: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict point-in-box test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.size.x
            && point.y > self.pos.y
            && point.y < self.pos.y + self.size.y
    }
}

/// Replace the item field with a fresh batch for the current level
pub fn generate_items(state: &mut GameState) {
    let level = state.session.level;
    let count = state.tuning.item_count(level);
    let tuning = state.tuning.clone();
    let (width, height) = (state.playfield.width, state.playfield.height);

    state.items.clear();
    for _ in 0..count {
        let id = state.next_entity_id();
        let rng = state.rng_mut();

        let kind = ItemKind::ALL[rng.random_range(0..ItemKind::ALL.len())];
        let size = kind.size();
        let x = random_in(
            rng,
            tuning.side_margin,
            width - tuning.side_margin - size.x,
        );
        let y = random_in(
            rng,
            tuning.top_margin,
            height - tuning.bottom_margin - size.y,
        );

        state.items.push(Item::new(id, kind, Vec2::new(x, y)));
    }

    log::debug!("Level {}: generated {} items", level, state.items.len());
}

/// Uniform in [lo, hi), collapsing to `lo` when the range is empty
fn random_in(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Sway loose items; keep the caught one dangling from the hook tip
pub fn update_items(items: &mut [Item], hook_tip: Vec2, frames: f32, tuning: &Tuning) {
    for item in items.iter_mut() {
        if item.caught {
            item.pos = hook_tip - item.size / 2.0;
        } else {
            item.phase += tuning.sway_step * frames;
            item.pos.x += item.phase.sin() * tuning.sway_amplitude * frames;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Playfield;

    #[test]
    fn test_tiers() {
        assert_eq!(ItemKind::LargeGold.tier(), ItemTier::Gold);
        assert_eq!(ItemKind::Diamond.tier(), ItemTier::Diamond);
        assert_eq!(ItemKind::LargeRock.tier(), ItemTier::Rock);
        assert_eq!(ItemKind::Crystal.tier(), ItemTier::Other);
    }

    #[test]
    fn test_contains_is_strict() {
        let item = Item::new(1, ItemKind::Diamond, Vec2::new(100.0, 100.0));
        assert!(item.contains(Vec2::new(112.0, 112.0)));
        assert!(!item.contains(Vec2::new(100.0, 112.0)));
        assert!(!item.contains(Vec2::new(125.0, 112.0)));
        assert!(!item.contains(Vec2::new(112.0, 125.0)));
    }

    #[test]
    fn test_generate_items_count_and_bounds() {
        let playfield = Playfield::new(800.0, 600.0);
        let mut state = GameState::new(7, playfield, Tuning::default());
        for level in 1..=4 {
            state.session.level = level;
            generate_items(&mut state);
            assert_eq!(state.items.len(), 8 + level as usize * 2);
            for item in &state.items {
                assert!(!item.caught);
                assert!(item.pos.x >= 30.0);
                assert!(item.pos.x + item.size.x <= 770.0);
                assert!(item.pos.y >= 150.0);
                assert!(item.pos.y + item.size.y <= 550.0);
            }
        }
    }

    #[test]
    fn test_generate_items_unique_ids() {
        let mut state = GameState::new(3, Playfield::new(800.0, 600.0), Tuning::default());
        generate_items(&mut state);
        let mut ids: Vec<u32> = state.items.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.items.len());
    }

    #[test]
    fn test_tiny_playfield_does_not_panic() {
        let mut state = GameState::new(1, Playfield::new(40.0, 100.0), Tuning::default());
        generate_items(&mut state);
        assert_eq!(state.items.len(), 10);
    }

    #[test]
    fn test_caught_item_follows_tip() {
        let mut items = vec![Item::new(1, ItemKind::SmallGold, Vec2::new(0.0, 0.0))];
        items[0].caught = true;
        let tip = Vec2::new(300.0, 250.0);
        update_items(&mut items, tip, 1.0, &Tuning::default());
        assert_eq!(items[0].center(), tip);
        assert_eq!(items[0].phase, 0.0);
    }

    #[test]
    fn test_loose_item_sways() {
        let mut items = vec![Item::new(1, ItemKind::SmallGold, Vec2::new(100.0, 200.0))];
        update_items(&mut items, Vec2::ZERO, 1.0, &Tuning::default());
        assert!((items[0].phase - 0.02).abs() < 1e-6);
        assert!(items[0].pos.x > 100.0);
        assert_eq!(items[0].pos.y, 200.0);
    }
}
