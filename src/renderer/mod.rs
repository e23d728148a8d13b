//! Rendering module
//!
//! The simulation only talks to [`Surface`], an abstract 2D canvas. The
//! [`MeshSurface`] back-end tessellates draw calls into a `Pod` triangle list
//! that a host uploads to its own GPU surface.

pub mod mesh;
pub mod shapes;
pub mod vertex;

pub use mesh::{MeshSurface, TextLabel, field_to_ndc};
pub use vertex::{Vertex, colors};

use glam::Vec2;

use crate::sim::Rect;

/// Straight (non-premultiplied) RGBA, 0-1
pub type Color = [f32; 4];

/// Horizontal anchoring for text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Drawing capability handed to every `render` call.
///
/// Coordinates are field pixels. Alpha blending is expressed through the
/// color's alpha channel. Transforms nest: each `push_transform` composes
/// onto the current one until the matching `pop_transform`.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    /// Convex polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    /// Translate, then rotate (radians, clockwise on screen) subsequent draws
    fn push_transform(&mut self, translation: Vec2, rotation: f32);
    fn pop_transform(&mut self);
    /// Text is rasterised by the host; `pos` is the top edge anchored per `align`
    fn text(&mut self, label: &str, pos: Vec2, size: f32, color: Color, align: TextAlign);
}
