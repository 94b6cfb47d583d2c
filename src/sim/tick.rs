//! Per-frame simulation step
//!
//! The countdown consumes the full frame delta; motion is integrated in
//! substeps of at most one reference frame so a stalled frame cannot make
//! the hook skip over an item.

use super::collision::find_catch;
use super::items::{generate_items, update_items};
use super::particles::update_particles;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::frames;

/// Input commands for a single update
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire the hook (click/tap/space)
    pub activate: bool,
}

/// Advance the session by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    // Nothing moves before start or after the clock runs out
    if !state.session.is_playing() {
        return;
    }
    let dt_ms = dt_ms.max(0.0);

    if state.session.advance_clock(dt_ms) {
        let (score, level) = (state.session.score, state.session.level);
        log::info!("Time up! Final score {} at level {}", score, level);
        state.push_event(GameEvent::GameOver { score, level });
        return;
    }

    if input.activate && state.hook.launch(&state.tuning) {
        log::debug!("Hook fired at angle {:.2}", state.hook.angle);
    }

    // Sparkles age by the whole frame; bursts from this frame start fresh
    update_particles(&mut state.particles, dt_ms);

    let motion_ms = dt_ms.min(MAX_SUBSTEPS as f32 * FRAME_MS);
    let substeps = ((motion_ms / FRAME_MS).ceil() as u32).clamp(1, MAX_SUBSTEPS);
    let step_ms = motion_ms / substeps as f32;
    for _ in 0..substeps {
        step(state, step_ms);
    }
}

fn step(state: &mut GameState, step_ms: f32) {
    let f = frames(step_ms);

    // Hook
    let floor_y = state.floor_y();
    if let Some(item_id) = state.hook.update(f, &state.tuning, floor_y) {
        deliver(state, item_id);
    }

    // Items
    let tip = state.hook.tip();
    update_items(&mut state.items, tip, f, &state.tuning);

    // Collisions (only while the rope is paying out)
    if state.hook.is_extending() {
        if let Some(index) = find_catch(tip, &state.items) {
            catch(state, index);
        }
    }
}

fn catch(state: &mut GameState, index: usize) {
    let item = &mut state.items[index];
    item.caught = true;
    let (item_id, kind, speed, center) = (item.id, item.kind, item.speed, item.center());

    state.hook.attach(item_id, speed);
    state.emit_particles(center, kind);

    log::debug!("Caught {:?} (id {}) at {:?}", kind, item_id, center);
    state.push_event(GameEvent::Caught {
        item_id,
        kind,
        pos: center,
    });
}

fn deliver(state: &mut GameState, item_id: u32) {
    let Some(index) = state.items.iter().position(|i| i.id == item_id) else {
        log::warn!("Delivered item {} is no longer in the field", item_id);
        return;
    };
    let item = state.items.remove(index);

    state.session.add_score(item.value);
    log::debug!("Delivered {:?} for {} (score {})", item.kind, item.value, state.session.score);
    state.push_event(GameEvent::Delivered {
        item_id,
        value: item.value,
        score: state.session.score,
    });

    if state.items.is_empty() {
        next_level(state);
    }
}

fn next_level(state: &mut GameState) {
    state.session.advance_level(&state.tuning);
    generate_items(state);

    let (level, time_left) = (state.session.level, state.session.time_left);
    log::info!("Level {} ({}s, {} items)", level, time_left, state.items.len());
    state.push_event(GameEvent::LevelUp { level, time_left });
}
