//! Scene drawing: ground, miner, rope and hook, items, sparkles

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::{DrawSurface, Layer};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Item, Particle, Playfield};

const GROUND: &str = "#8B4513";
const GROUND_STRIPE: &str = "#A0522D";
const ROPE: &str = "#8B4513";
const HOOK_FILL: &str = "#C0C0C0";
const HOOK_EDGE: &str = "#808080";
const ITEM_SHINE: &str = "rgba(255, 255, 255, 0.3)";

/// Draw one full frame
pub fn render(state: &GameState, surface: &mut impl DrawSurface, settings: &Settings) {
    let field = &state.playfield;
    surface.clear(field.width, field.height);

    surface.begin_layer(Layer::Background);
    draw_background(surface, field);

    surface.begin_layer(Layer::Actor);
    draw_miner(surface, field.miner_pos());

    surface.begin_layer(Layer::Hook);
    draw_hook(surface, state.hook.anchor, state.hook.tip());

    surface.begin_layer(Layer::Items);
    for item in &state.items {
        draw_item(surface, item, settings.show_values);
    }

    surface.begin_layer(Layer::Particles);
    if settings.particles {
        for particle in &state.particles {
            draw_particle(surface, particle);
        }
    }
}

fn draw_background(surface: &mut impl DrawSurface, field: &Playfield) {
    let top = field.height - GROUND_HEIGHT;
    surface.fill_rect(0.0, top, field.width, GROUND_HEIGHT, GROUND);

    let mut x = 0.0;
    while x < field.width {
        surface.fill_rect(x, top, 10.0, GROUND_HEIGHT, GROUND_STRIPE);
        x += 20.0;
    }
}

fn draw_miner(surface: &mut impl DrawSurface, center: Vec2) {
    let half = MINER_SIZE / 2.0;
    let head_y = center.y - half + 10.0;

    // Body
    surface.fill_rect(center.x - half, center.y - half, MINER_SIZE, MINER_SIZE, "#4169E1");
    // Head
    surface.fill_circle(Vec2::new(center.x, head_y), 15.0, "#FDBCB4");
    // Hat
    surface.fill_rect(center.x - 18.0, center.y - half - 5.0, 36.0, 15.0, "#FFD700");
    // Eyes
    surface.fill_rect(center.x - 8.0, center.y - half + 5.0, 3.0, 3.0, "#000");
    surface.fill_rect(center.x + 5.0, center.y - half + 5.0, 3.0, 3.0, "#000");
    // Smile
    surface.stroke_arc(Vec2::new(center.x, head_y + 2.0), 5.0, 0.0, PI, 2.0, "#000");
}

fn draw_hook(surface: &mut impl DrawSurface, anchor: Vec2, tip: Vec2) {
    surface.stroke_line(anchor, tip, 3.0, ROPE);

    surface.fill_circle(tip, 8.0, HOOK_FILL);
    surface.stroke_arc(tip, 8.0, 0.0, TAU, 2.0, HOOK_EDGE);
    // Barb
    surface.stroke_arc(tip + Vec2::splat(6.0), 6.0, PI, PI * 1.5, 2.0, HOOK_EDGE);
}

fn draw_item(surface: &mut impl DrawSurface, item: &Item, show_value: bool) {
    let (w, h) = (item.size.x, item.size.y);
    surface.push_transform(item.center(), item.phase);

    surface.fill_rect(-w / 2.0, -h / 2.0, w, h, item.kind.color());
    surface.fill_rect(-w / 2.0, -h / 2.0, w / 3.0, h / 3.0, ITEM_SHINE);
    if show_value {
        surface.fill_text(&item.value.to_string(), Vec2::new(0.0, 4.0), "12px Arial", "#FFF");
    }

    surface.pop_transform();
}

fn draw_particle(surface: &mut impl DrawSurface, particle: &Particle) {
    surface.set_alpha(particle.life.clamp(0.0, 1.0));
    surface.fill_circle(particle.pos, particle.size, particle.color.color());
    surface.set_alpha(1.0);
}
