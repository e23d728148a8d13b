//! Triangle-list back-end for [`Surface`]

use glam::{Affine2, Vec2};

use super::shapes;
use super::vertex::Vertex;
use super::{Color, Surface, TextAlign};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::Rect;

/// A text draw request, resolved to field coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
}

/// Collects one frame of draw calls as colored triangles plus text labels.
///
/// Clear it at the start of each frame; draw order is preserved, so later
/// calls composite over earlier ones.
#[derive(Debug, Default)]
pub struct MeshSurface {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<TextLabel>,
    transforms: Vec<Affine2>,
}

impl MeshSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's geometry, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
        if !self.transforms.is_empty() {
            log::warn!("{} unbalanced transform(s) at frame end", self.transforms.len());
            self.transforms.clear();
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Raw vertex data in field pixels, ready for a GPU buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertices mapped to normalized device coordinates for a viewport
    pub fn ndc_vertices(&self, viewport: (u32, u32)) -> Vec<Vertex> {
        self.vertices
            .iter()
            .map(|v| {
                let (x, y) = field_to_ndc(viewport, v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect()
    }

    fn current(&self) -> Affine2 {
        self.transforms.last().copied().unwrap_or(Affine2::IDENTITY)
    }

    fn push_vertices(&mut self, mut vertices: Vec<Vertex>, color: Color) {
        if color[3] <= 0.0 {
            return;
        }
        if !self.transforms.is_empty() {
            let transform = self.current();
            for v in &mut vertices {
                let p = transform.transform_point2(Vec2::from(v.position));
                v.position = p.to_array();
            }
        }
        self.vertices.extend(vertices);
    }
}

/// Convert field pixels (y down) to normalized device coordinates (y up),
/// letterboxing so the field keeps its aspect ratio inside the viewport.
pub fn field_to_ndc(viewport: (u32, u32), x: f32, y: f32) -> (f32, f32) {
    let (w, h) = viewport;
    let view_aspect = w.max(1) as f32 / h.max(1) as f32;
    let field_aspect = FIELD_WIDTH / FIELD_HEIGHT;

    let nx = x / FIELD_WIDTH * 2.0 - 1.0;
    let ny = 1.0 - y / FIELD_HEIGHT * 2.0;

    if view_aspect > field_aspect {
        // Wider than the field: pillarbox
        (nx * field_aspect / view_aspect, ny)
    } else {
        (nx, ny * view_aspect / field_aspect)
    }
}

impl Surface for MeshSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        self.push_vertices(shapes::rect(rect.min(), rect.size(), color), color);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        if rect.is_empty() || width <= 0.0 {
            return;
        }
        self.push_vertices(
            shapes::rect_outline(rect.min(), rect.size(), width, color),
            color,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let segments = shapes::segments_for_radius(radius);
        self.push_vertices(shapes::circle(center, radius, color, segments), color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if radius <= 0.0 || width <= 0.0 {
            return;
        }
        let segments = shapes::segments_for_radius(radius);
        let inner = (radius - width).max(0.0);
        self.push_vertices(
            shapes::ring(center, inner, radius, color, segments),
            color,
        );
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        let segments = shapes::segments_for_radius(radii.max_element());
        self.push_vertices(shapes::ellipse(center, radii, color, segments), color);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.push_vertices(shapes::polygon(points, color), color);
    }

    fn push_transform(&mut self, translation: Vec2, rotation: f32) {
        let local = Affine2::from_angle_translation(rotation, translation);
        let composed = self.current() * local;
        self.transforms.push(composed);
    }

    fn pop_transform(&mut self) {
        let popped = self.transforms.pop();
        debug_assert!(popped.is_some(), "pop_transform without push");
    }

    fn text(&mut self, label: &str, pos: Vec2, size: f32, color: Color, align: TextAlign) {
        let pos = self.current().transform_point2(pos);
        self.labels.push(TextLabel {
            text: label.to_string(),
            pos,
            size,
            color,
            align,
        });
    }
}
