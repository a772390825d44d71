//! Vertex types and the recording canvas

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};

use super::{Canvas, TextAlign};

/// One end of a line segment, already in field coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub thickness: f32,
}

impl LineVertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4], thickness: f32) -> Self {
        Self {
            position: [x, y],
            color,
            thickness,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SHIP: [f32; 4] = [35.0 / 255.0, 122.0 / 255.0, 22.0 / 255.0, 1.0];
    pub const ASTEROID: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLAST: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SCORE: [f32; 4] = [238.0 / 255.0, 130.0 / 255.0, 177.0 / 255.0, 1.0];
    pub const OVERLAY_TEXT: [f32; 4] = [192.0 / 255.0, 57.0 / 255.0, 50.0 / 255.0, 1.0];
}

/// A text draw, resolved to a screen origin and uniform scale
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub origin: Vec2,
    pub scale: f32,
    pub align: TextAlign,
    pub color: [f32; 4],
}

/// Canvas that records a frame for a backend to upload later
///
/// Segments become vertex pairs, two per segment, in draw order.
#[derive(Debug, Clone, Default)]
pub struct LineBatch {
    vertices: Vec<LineVertex>,
    texts: Vec<TextCommand>,
}

impl LineBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.texts.clear();
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn texts(&self) -> &[TextCommand] {
        &self.texts
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Raw vertex bytes, ready for a GPU buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl Canvas for LineBatch {
    fn draw_segment(
        &mut self,
        transform: &Affine2,
        from: Vec2,
        to: Vec2,
        color: [f32; 4],
        thickness: f32,
    ) {
        for point in [from, to] {
            let p = transform.transform_point2(point);
            self.vertices.push(LineVertex::new(p.x, p.y, color, thickness));
        }
    }

    fn draw_text(&mut self, transform: &Affine2, text: &str, align: TextAlign, color: [f32; 4]) {
        self.texts.push(TextCommand {
            text: text.to_string(),
            origin: transform.translation,
            scale: transform.matrix2.x_axis.length(),
            align,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<LineVertex>(), 7 * 4);
    }

    #[test]
    fn test_segments_are_transformed() {
        let mut batch = LineBatch::new();
        let transform = Affine2::from_translation(Vec2::new(10.0, 20.0));
        batch.draw_segment(&transform, Vec2::ZERO, Vec2::new(1.0, 0.0), colors::BLAST, 1.5);

        assert_eq!(batch.segment_count(), 1);
        assert_eq!(batch.vertices()[0].position, [10.0, 20.0]);
        assert_eq!(batch.vertices()[1].position, [11.0, 20.0]);
        assert_eq!(batch.vertices()[1].thickness, 1.5);
        assert_eq!(batch.as_bytes().len(), 2 * std::mem::size_of::<LineVertex>());
    }

    #[test]
    fn test_text_keeps_origin_and_scale() {
        let mut batch = LineBatch::new();
        let transform = Affine2::from_scale_angle_translation(
            Vec2::splat(5.0),
            0.0,
            Vec2::new(5.0, 5.0),
        );
        batch.draw_text(&transform, "100", TextAlign::Left, colors::SCORE);

        let text = &batch.texts()[0];
        assert_eq!(text.text, "100");
        assert_eq!(text.origin, Vec2::new(5.0, 5.0));
        assert!((text.scale - 5.0).abs() < 1e-6);

        batch.clear();
        assert!(batch.texts().is_empty());
        assert_eq!(batch.segment_count(), 0);
    }
}
