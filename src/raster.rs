//! The rasterization pipeline: camera projection, scanline and incremental
//! primitive algorithms, and the per-frame draw API.
//!
//! Every public draw call takes a world-space descriptor, projects it
//! through the camera transform into pixel space, and scan-converts it into
//! clipped framebuffer writes. Transient arrays (the triangle filler's
//! per-edge x tables) come from the frame's scratch arena, never the heap.

use crate::arena::ScratchArena;
use crate::color::Color;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Circle, Line, PixelVec, Quad, Triangle, WorldVec};

/// World-space view state: `x`/`y` is the center of the view, `zoom` scales
/// world units to pixels.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

/// Everything one frame's draw calls need, rebuilt by the host each frame.
/// The rasterizer never stores this; it has no state across frames beyond
/// the framebuffer and arena the host owns.
pub struct RendererContext<'a> {
    pub framebuffer: &'a mut Framebuffer,
    pub arena: &'a ScratchArena,
    pub camera: Camera,
    pub meters_per_pixel: f32,
}

impl<'a> RendererContext<'a> {
    pub fn new(
        framebuffer: &'a mut Framebuffer,
        arena: &'a ScratchArena,
        camera: Camera,
        meters_per_pixel: f32,
    ) -> Self {
        Self {
            framebuffer,
            arena,
            camera,
            meters_per_pixel,
        }
    }
}

// ============================================================================
// Coordinate Transform Pipeline
// ============================================================================

/// Project a world-space point into pixel space. The framebuffer center is
/// the projection origin.
///
/// Floor is deliberate: pixel index d and continuous in-pixel position c
/// relate by c = d + 0.5, so flooring c recovers the containing pixel for
/// negative and positive coordinates alike (round or truncate would not).
#[inline]
pub fn to_pixel(ctx: &RendererContext, world: WorldVec) -> PixelVec {
    let half_w = ctx.framebuffer.width() as f32 * 0.5;
    let half_h = ctx.framebuffer.height() as f32 * 0.5;
    let x = (world.x - ctx.camera.x) * ctx.camera.zoom + half_w;
    let y = (world.y - ctx.camera.y) * ctx.camera.zoom + half_h;
    PixelVec::new(x.floor() as i32, y.floor() as i32)
}

/// Project a world-space length into a pixel-space length
#[inline]
pub fn to_pixel_radius(ctx: &RendererContext, radius: f32) -> i32 {
    (radius * ctx.meters_per_pixel).floor() as i32
}

// ============================================================================
// Draw API
// ============================================================================

pub fn fill_background(ctx: &mut RendererContext, color: Color) {
    ctx.framebuffer.clear(color.packed());
}

pub fn draw_line(ctx: &mut RendererContext, line: &Line) {
    let p0 = to_pixel(ctx, line.start);
    let p1 = to_pixel(ctx, line.end);
    line_pixels(ctx.framebuffer, p0, p1, line.color.packed());
}

pub fn draw_triangle_outline(ctx: &mut RendererContext, triangle: &Triangle) {
    let [v0, v1, v2] = transform_triangle(ctx, triangle);
    let packed = triangle.color.packed();
    line_pixels(ctx.framebuffer, v0, v1, packed);
    line_pixels(ctx.framebuffer, v1, v2, packed);
    line_pixels(ctx.framebuffer, v2, v0, packed);
}

pub fn draw_triangle_filled(ctx: &mut RendererContext, triangle: &Triangle) {
    let vertices = transform_triangle(ctx, triangle);
    let arena = ctx.arena;
    triangle_fill_pixels(ctx.framebuffer, arena, vertices, triangle.color.packed());
}

pub fn draw_circle_outline(ctx: &mut RendererContext, circle: &Circle) {
    let center = to_pixel(ctx, circle.center);
    let radius = to_pixel_radius(ctx, circle.radius);
    circle_outline_pixels(ctx.framebuffer, center, radius, circle.color.packed());
}

pub fn draw_circle_filled(ctx: &mut RendererContext, circle: &Circle) {
    let center = to_pixel(ctx, circle.center);
    let radius = to_pixel_radius(ctx, circle.radius);
    circle_fill_pixels(ctx.framebuffer, center, radius, circle.color.packed());
}

pub fn draw_quad_filled(ctx: &mut RendererContext, quad: &Quad) {
    let p0 = to_pixel(ctx, quad.position);
    let p1 = to_pixel(
        ctx,
        WorldVec::new(quad.position.x + quad.width, quad.position.y + quad.height),
    );

    // Normalize so the fill is orientation-safe whatever the camera signs
    let (x0, x1) = (p0.x.min(p1.x), p0.x.max(p1.x));
    let (y0, y1) = (p0.y.min(p1.y), p0.y.max(p1.y));

    let packed = quad.color.packed();
    for y in y0..=y1 {
        ctx.framebuffer.fill_span(x0, x1, y, packed);
    }
}

#[inline]
fn transform_triangle(ctx: &RendererContext, triangle: &Triangle) -> [PixelVec; 3] {
    [
        to_pixel(ctx, triangle.vertices[0]),
        to_pixel(ctx, triangle.vertices[1]),
        to_pixel(ctx, triangle.vertices[2]),
    ]
}

// ============================================================================
// Bresenham Lines
// ============================================================================

fn line_pixels(fb: &mut Framebuffer, p0: PixelVec, p1: PixelVec, packed: u32) {
    let dx_abs = (p1.x - p0.x).abs();
    let dy_abs = (p1.y - p0.y).abs();

    if dy_abs > dx_abs {
        line_steep(fb, p0, p1, packed);
    } else {
        line_shallow(fb, p0, p1, packed);
    }
}

/// Dominant axis is x: one pixel per column
fn line_shallow(fb: &mut Framebuffer, mut p0: PixelVec, mut p1: PixelVec, packed: u32) {
    // Walk in increasing x so output is identical for either endpoint order
    if p1.x < p0.x {
        std::mem::swap(&mut p0, &mut p1);
    }

    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let dy_abs = dy.abs();
    let y_step = if dy < 0 { -1 } else { 1 };

    let mut d = 2 * dy_abs - dx;
    let mut y = p0.y;

    for x in p0.x..=p1.x {
        fb.set_pixel(x, y, packed);

        if d > 0 {
            y += y_step;
            d += 2 * (dy_abs - dx);
        } else {
            d += 2 * dy_abs;
        }
    }
}

/// Dominant axis is y: transpose, walk x-major, write transposed
fn line_steep(fb: &mut Framebuffer, p0: PixelVec, p1: PixelVec, packed: u32) {
    let mut p0 = PixelVec::new(p0.y, p0.x);
    let mut p1 = PixelVec::new(p1.y, p1.x);

    if p1.x < p0.x {
        std::mem::swap(&mut p0, &mut p1);
    }

    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let dy_abs = dy.abs();
    let y_step = if dy < 0 { -1 } else { 1 };

    let mut d = 2 * dy_abs - dx;
    let mut y = p0.y;

    for x in p0.x..=p1.x {
        fb.set_pixel(y, x, packed);

        if d > 0 {
            y += y_step;
            d += 2 * (dy_abs - dx);
        } else {
            d += 2 * dy_abs;
        }
    }
}

// ============================================================================
// Midpoint Circles
// ============================================================================

fn circle_outline_pixels(fb: &mut Framebuffer, center: PixelVec, radius: i32, packed: u32) {
    if radius <= 0 {
        if radius == 0 {
            fb.set_pixel(center.x, center.y, packed);
        }
        return;
    }

    let mut x = 0;
    let mut y = radius;
    let mut d = 3 - 2 * radius;

    while y >= x {
        plot_octants(fb, center, x, y, packed);

        if d > 0 {
            y -= 1;
            d += 4 * (x - y) + 10;
        } else {
            d += 4 * x + 6;
        }
        x += 1;
    }
}

/// One computed (x, y) pair plots eight symmetric pixels around the center
#[inline]
fn plot_octants(fb: &mut Framebuffer, c: PixelVec, x: i32, y: i32, packed: u32) {
    fb.set_pixel(c.x + x, c.y + y, packed);
    fb.set_pixel(c.x - x, c.y + y, packed);
    fb.set_pixel(c.x + x, c.y - y, packed);
    fb.set_pixel(c.x - x, c.y - y, packed);
    fb.set_pixel(c.x + y, c.y + x, packed);
    fb.set_pixel(c.x - y, c.y + x, packed);
    fb.set_pixel(c.x + y, c.y - x, packed);
    fb.set_pixel(c.x - y, c.y - x, packed);
}

fn circle_fill_pixels(fb: &mut Framebuffer, center: PixelVec, radius: i32, packed: u32) {
    if radius <= 0 {
        if radius == 0 {
            fb.set_pixel(center.x, center.y, packed);
        }
        return;
    }

    // Chord math in i64: radius comes straight from to_pixel_radius and can
    // be large enough that its square wraps i32. The row range is clipped
    // up front, so a huge disc costs only its visible rows and |dy| never
    // exceeds the radius.
    let r = i64::from(radius);
    let cx = i64::from(center.x);
    let cy = i64::from(center.y);
    let width = i64::from(fb.width());

    let y_lo = (cy - r).max(0);
    let y_hi = (cy + r).min(i64::from(fb.height()) - 1);

    for y in y_lo..=y_hi {
        let dy = y - cy;
        let half_chord = ((r * r - dy * dy) as f64).sqrt() as i64;
        let lo = cx - half_chord;
        let hi = cx + half_chord;
        if hi < 0 || lo >= width {
            continue;
        }
        fb.fill_span(lo.max(0) as i32, hi.min(width - 1) as i32, y as i32, packed);
    }
}

// ============================================================================
// Scanline Triangle Fill
// ============================================================================

/// x along the edge p0 -> p1 at row `y`, truncating integer division like
/// the per-row pixel walk. A zero-height edge reports its start x, so no
/// division ever sees a zero y-delta. Requires `p0.y <= y <= p1.y`.
fn edge_x_at(p0: PixelVec, p1: PixelVec, y: i32) -> i32 {
    if p0.y == p1.y {
        return p0.x;
    }
    let dx = i64::from(p1.x) - i64::from(p0.x);
    let dy = i64::from(p1.y) - i64::from(p0.y);
    let rows = i64::from(y) - i64::from(p0.y);
    // Wide product: saturated projections can push dx * rows past i64
    let x = i64::from(p0.x) + (i128::from(dx) * i128::from(rows) / i128::from(dy)) as i64;
    x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn triangle_fill_pixels(
    fb: &mut Framebuffer,
    arena: &ScratchArena,
    mut v: [PixelVec; 3],
    packed: u32,
) {
    // Sort by ascending y with three comparisons
    if v[1].y < v[0].y {
        v.swap(0, 1);
    }
    if v[2].y < v[0].y {
        v.swap(0, 2);
    }
    if v[2].y < v[1].y {
        v.swap(1, 2);
    }
    let [v0, v1, v2] = v;

    // Zero-area fast path: all three vertices on one scanline
    if v0.y == v2.y {
        let min_x = v0.x.min(v1.x).min(v2.x);
        let max_x = v0.x.max(v1.x).max(v2.x);
        fb.fill_span(min_x, max_x, v0.y, packed);
        return;
    }

    // Only rows inside the framebuffer get table entries, so a mostly
    // off-screen triangle costs its visible height, not its full extent
    let y_lo = v0.y.max(0);
    let y_hi = v2.y.min(fb.height() - 1);
    if y_lo > y_hi {
        return;
    }
    let rows = (y_hi - y_lo + 1) as usize;

    // Long-edge table x02 and combined short-edge table x012: rows above
    // the middle vertex follow v0 -> v1, the rest follow v1 -> v2 (the
    // shared row belongs to the lower edge).
    let x02 = arena.alloc::<i32>(rows);
    let x012 = arena.alloc::<i32>(rows);
    for (i, y) in (y_lo..=y_hi).enumerate() {
        x02[i] = edge_x_at(v0, v2, y);
        x012[i] = if y < v1.y {
            edge_x_at(v0, v1, y)
        } else {
            edge_x_at(v1, v2, y)
        };
    }

    // The midpoint row decides which table bounds which side; edges between
    // y-sorted vertices are monotonic in y, so one comparison settles it.
    let mid = rows / 2;
    let (left, right) = if x02[mid] < x012[mid] {
        (&*x02, &*x012)
    } else {
        (&*x012, &*x02)
    };

    for (i, y) in (y_lo..=y_hi).enumerate() {
        fb.fill_span(left[i], right[i], y, packed);
    }
}
