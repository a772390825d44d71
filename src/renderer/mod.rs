//! Rendering module
//!
//! The draw phase talks to a backend only through [`Canvas`]: transformed line
//! segments and text. [`LineBatch`] records a frame as plain vertex data.

pub mod shapes;
pub mod vertex;

use glam::{Affine2, Vec2};

use crate::deg_to_rad;
use crate::sim::GameState;

pub use vertex::{LineBatch, LineVertex, TextCommand, colors};

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Drawing surface supplied by the presentation layer
pub trait Canvas {
    /// Segment in local space, placed by `transform`
    fn draw_segment(
        &mut self,
        transform: &Affine2,
        from: Vec2,
        to: Vec2,
        color: [f32; 4],
        thickness: f32,
    );

    /// Text anchored at the transform's local origin
    fn draw_text(&mut self, transform: &Affine2, text: &str, align: TextAlign, color: [f32; 4]);
}

/// Local-to-field transform: scale, then rotate, then translate
///
/// The order matters: scaling and rotation happen around the local origin
/// before the shape is moved into place.
pub fn compose_transform(pos: Vec2, angle_deg: f32, scale: f32) -> Affine2 {
    Affine2::from_scale_angle_translation(Vec2::splat(scale), deg_to_rad(angle_deg), pos)
}

/// Draw one frame of the current state
pub fn draw_frame(state: &GameState, canvas: &mut impl Canvas) {
    for blast in &state.blasts {
        shapes::draw_blast(canvas, blast);
    }
    for asteroid in &state.asteroids {
        shapes::draw_asteroid(canvas, asteroid);
    }
    shapes::draw_life_counter(canvas, state.lives.lives);
    shapes::draw_score(canvas, state.score.value);

    let status = state.status();
    if status.systems().draw_ship && state.ship.is_flash_visible() {
        shapes::draw_ship(canvas, &state.ship);
    }

    if let Some(banner) = status.banner(state.level.level_number) {
        shapes::draw_banner(canvas, &banner);
    }
}
