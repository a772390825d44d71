//! Line art for every drawable
//!
//! Outlines are given in local space (origin at the entity's centre, "up" is
//! -y) and placed with [`compose_transform`].

use glam::{Affine2, Vec2};

use super::vertex::colors;
use super::{Canvas, TextAlign, compose_transform};
use crate::consts::*;
use crate::sim::{Asteroid, Blast, Ship};

type Segment = ([f32; 2], [f32; 2]);

pub const SHIP_THICKNESS: f32 = 3.0;
pub const ASTEROID_THICKNESS: f32 = 2.0;

/// Arrowhead hull plus two struts
pub const SHIP_OUTLINE: [Segment; 4] = [
    ([-8.0, 9.0], [0.0, -11.0]),
    ([0.0, -11.0], [8.0, 9.0]),
    ([-6.0, 4.0], [-1.0, 4.0]),
    ([6.0, 4.0], [1.0, 4.0]),
];

/// Closed, lumpy polygon
pub const ASTEROID_OUTLINE: [Segment; 12] = [
    ([-20.0, 20.0], [-25.0, 5.0]),
    ([-25.0, 5.0], [-25.0, -10.0]),
    ([-25.0, -10.0], [-5.0, -10.0]),
    ([-5.0, -10.0], [-10.0, -20.0]),
    ([-10.0, -20.0], [5.0, -20.0]),
    ([5.0, -20.0], [20.0, -10.0]),
    ([20.0, -10.0], [20.0, -5.0]),
    ([20.0, -5.0], [0.0, 0.0]),
    ([0.0, 0.0], [20.0, 10.0]),
    ([20.0, 10.0], [10.0, 20.0]),
    ([10.0, 20.0], [0.0, 15.0]),
    ([0.0, 15.0], [-20.0, 20.0]),
];

/// Overlay text size relative to the HUD font
pub const BANNER_SCALE: f32 = 10.0;

fn draw_outline(
    canvas: &mut impl Canvas,
    transform: &Affine2,
    outline: &[Segment],
    color: [f32; 4],
    thickness: f32,
) {
    for (from, to) in outline {
        canvas.draw_segment(transform, Vec2::from(*from), Vec2::from(*to), color, thickness);
    }
}

pub fn draw_ship_at(canvas: &mut impl Canvas, pos: Vec2, heading: f32, scale: f32) {
    let transform = compose_transform(pos, heading, scale);
    draw_outline(canvas, &transform, &SHIP_OUTLINE, colors::SHIP, SHIP_THICKNESS);
}

pub fn draw_ship(canvas: &mut impl Canvas, ship: &Ship) {
    draw_ship_at(canvas, ship.pos, ship.heading, ship.scale);
}

/// Rotated by twist, not heading
pub fn draw_asteroid(canvas: &mut impl Canvas, asteroid: &Asteroid) {
    let transform = compose_transform(asteroid.pos, asteroid.twist, asteroid.scale);
    draw_outline(
        canvas,
        &transform,
        &ASTEROID_OUTLINE,
        colors::ASTEROID,
        ASTEROID_THICKNESS,
    );
}

/// A dash from the blast's position out along its heading
pub fn draw_blast(canvas: &mut impl Canvas, blast: &Blast) {
    let transform = compose_transform(blast.pos, blast.heading, 1.0);
    canvas.draw_segment(
        &transform,
        Vec2::ZERO,
        Vec2::new(0.0, -BLAST_LENGTH),
        colors::BLAST,
        BLAST_WIDTH,
    );
}

/// One small ship per remaining life, left to right
pub fn draw_life_counter(canvas: &mut impl Canvas, lives: u32) {
    let step = LIFE_COUNTER_PADDING * LIFE_COUNTER_SCALE;
    for i in 0..lives {
        let pos = Vec2::new(LIFE_COUNTER_X + i as f32 * step, LIFE_COUNTER_Y);
        draw_ship_at(canvas, pos, 0.0, LIFE_COUNTER_SCALE);
    }
}

pub fn draw_score(canvas: &mut impl Canvas, score: u64) {
    let transform = compose_transform(Vec2::new(SCORE_X, SCORE_Y), 0.0, SCORE_SCALE);
    canvas.draw_text(&transform, &score.to_string(), TextAlign::Left, colors::SCORE);
}

/// Large centred overlay text
pub fn draw_banner(canvas: &mut impl Canvas, text: &str) {
    let center = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0 - 10.0);
    let transform = compose_transform(center, 0.0, BANNER_SCALE);
    canvas.draw_text(&transform, text, TextAlign::Center, colors::OVERLAY_TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::LineBatch;

    #[test]
    fn test_asteroid_outline_is_closed() {
        for pair in ASTEROID_OUTLINE.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert_eq!(ASTEROID_OUTLINE[11].1, ASTEROID_OUTLINE[0].0);
    }

    #[test]
    fn test_ship_outline_fits_its_box() {
        for (from, to) in SHIP_OUTLINE {
            for [x, y] in [from, to] {
                assert!(x.abs() <= SHIP_HALF_EXTENT && y.abs() <= SHIP_HALF_EXTENT);
            }
        }
    }

    #[test]
    fn test_blast_dash_matches_tail() {
        let blast = Blast::new(Vec2::new(300.0, 300.0), 90.0);
        let mut batch = LineBatch::new();
        draw_blast(&mut batch, &blast);

        let end = batch.vertices()[1].position;
        let tail = blast.tail();
        assert!((end[0] - tail.x).abs() < 1e-3);
        assert!((end[1] - tail.y).abs() < 1e-3);
    }

    #[test]
    fn test_life_counter_spacing() {
        let mut batch = LineBatch::new();
        draw_life_counter(&mut batch, 3);
        assert_eq!(batch.segment_count(), 3 * SHIP_OUTLINE.len());

        // Nose vertex of each indicator
        let nose = |i: usize| batch.vertices()[i * 8 + 1].position;
        let step = LIFE_COUNTER_PADDING * LIFE_COUNTER_SCALE;
        assert!((nose(1)[0] - nose(0)[0] - step).abs() < 1e-3);
        assert!((nose(2)[0] - nose(1)[0] - step).abs() < 1e-3);
    }

    #[test]
    fn test_no_lives_draws_nothing() {
        let mut batch = LineBatch::new();
        draw_life_counter(&mut batch, 0);
        assert_eq!(batch.segment_count(), 0);
    }
}
