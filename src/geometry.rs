//! World-space and pixel-space vectors plus the primitive descriptors the
//! draw API consumes.
//!
//! World coordinates are floating-point simulation units; pixel coordinates
//! are integer framebuffer indices. The two spaces only meet in the
//! coordinate transform pipeline (`raster::to_pixel`), never by casting.

use crate::color::Color;

/// Two-component vector, generic over the coordinate scalar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vec2<T> {
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Floating-point world-space position
pub type WorldVec = Vec2<f32>;

/// Integer pixel-space position
pub type PixelVec = Vec2<i32>;

// ============================================================================
// Primitive Descriptors
// ============================================================================
// Pure value structs built per draw call and never retained. Vertices,
// centers and radii are world-space.

#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub start: WorldVec,
    pub end: WorldVec,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [WorldVec; 3],
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub center: WorldVec,
    pub radius: f32,
    pub color: Color,
}

/// Axis-aligned rectangle; `position` is the bottom-left corner in world
/// space, `width`/`height` extend toward +x/+y.
#[derive(Debug, Clone, Copy)]
pub struct Quad {
    pub position: WorldVec,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}
