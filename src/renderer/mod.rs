//! 2D rendering module
//!
//! The scene is drawn through the `DrawSurface` trait so the same code drives
//! the browser canvas and headless tests. Layers are always drawn in
//! `Layer` order.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::render;

use glam::Vec2;

/// Draw order, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Background,
    Actor,
    Hook,
    Items,
    Particles,
}

/// Minimal immediate-mode drawing API (Canvas 2D semantics)
pub trait DrawSurface {
    /// Marks the start of a layer
    fn begin_layer(&mut self, _layer: Layer) {}

    fn clear(&mut self, width: f32, height: f32);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &str);

    /// Arc from `start` to `end` radians (clockwise in screen space)
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, color: &str);

    /// Centred text
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);

    /// Save state, then translate and rotate
    fn push_transform(&mut self, translate: Vec2, rotate: f32);

    /// Restore the state saved by the matching `push_transform`
    fn pop_transform(&mut self);

    fn set_alpha(&mut self, alpha: f32);
}
