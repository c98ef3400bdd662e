mod arena;
mod color;
mod config;
mod display;
mod framebuffer;
mod geometry;
mod raster;
mod simd;

use std::time::Instant;

use anyhow::Result;
use log::{info, warn};
use sdl2::keyboard::Keycode;

use arena::ScratchArena;
use color::Color;
use config::Config;
use display::{Display, InputEvent, RenderTarget};
use framebuffer::Framebuffer;
use geometry::{Circle, Line, Quad, Triangle, WorldVec};
use raster::{Camera, RendererContext};

const CONFIG_PATH: &str = "config.json";

/// Cap on a single frame's simulated time, so a long stall doesn't send the
/// accumulator into a catch-up spiral
const MAX_FRAME_TIME: f32 = 0.25;

/// World units mapped to one pixel's worth of screen at zoom 1
const PIXELS_PER_METER: f32 = 4.0;

/// Scratch capacity for one frame's transient rasterizer arrays
const SCRATCH_CAPACITY: usize = 1024 * 1024;

// ============================================================================
// Demo Simulation
// ============================================================================
// Host-local state driven at the fixed timestep; rendering interpolates
// between the two most recent states.

#[derive(Clone, Copy)]
struct DemoState {
    ship_angle: f32,
    orbit_angle: f32,
    pulse: f32,
}

impl DemoState {
    fn new() -> Self {
        Self {
            ship_angle: 0.0,
            orbit_angle: 0.0,
            pulse: 0.0,
        }
    }

    fn update(&mut self, dt: f32) {
        self.ship_angle += 0.9 * dt;
        self.orbit_angle += 0.4 * dt;
        self.pulse += 1.7 * dt;
    }

    fn lerp(prev: &DemoState, curr: &DemoState, alpha: f32) -> DemoState {
        let mix = |a: f32, b: f32| a + (b - a) * alpha;
        DemoState {
            ship_angle: mix(prev.ship_angle, curr.ship_angle),
            orbit_angle: mix(prev.orbit_angle, curr.orbit_angle),
            pulse: mix(prev.pulse, curr.pulse),
        }
    }
}

fn rotate(p: WorldVec, angle: f32) -> WorldVec {
    let (sin, cos) = angle.sin_cos();
    WorldVec::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

/// One frame's draw calls; exercises every rasterizer path
fn render_scene(ctx: &mut RendererContext, state: &DemoState) {
    raster::fill_background(ctx, Color::BLACK);

    // Ground slab along the bottom of the view
    raster::draw_quad_filled(
        ctx,
        &Quad {
            position: WorldVec::new(-120.0, 60.0),
            width: 240.0,
            height: 24.0,
            color: Color::OLIVE,
        },
    );

    // Orbit ring and the moon riding it
    let orbit_radius = 45.0;
    raster::draw_circle_outline(
        ctx,
        &Circle {
            center: WorldVec::new(0.0, 0.0),
            radius: orbit_radius,
            color: Color::GREY,
        },
    );

    let moon = WorldVec::new(
        orbit_radius * state.orbit_angle.cos(),
        orbit_radius * state.orbit_angle.sin(),
    );
    raster::draw_circle_filled(
        ctx,
        &Circle {
            center: moon,
            radius: 5.0 + state.pulse.sin(),
            color: Color::BLUE,
        },
    );

    // Rotating wireframe ship at the center, with a filled trailing fin
    let ship = [
        WorldVec::new(0.0, 12.0),
        WorldVec::new(-8.0, -8.0),
        WorldVec::new(8.0, -8.0),
    ];
    let hull = Triangle {
        vertices: [
            rotate(ship[0], state.ship_angle),
            rotate(ship[1], state.ship_angle),
            rotate(ship[2], state.ship_angle),
        ],
        color: Color::WHITE,
    };
    raster::draw_triangle_outline(ctx, &hull);

    let fin = Triangle {
        vertices: [
            rotate(WorldVec::new(-4.0, -8.0), state.ship_angle),
            rotate(WorldVec::new(4.0, -8.0), state.ship_angle),
            rotate(WorldVec::new(0.0, -14.0), state.ship_angle),
        ],
        color: Color::PURPLE,
    };
    raster::draw_triangle_filled(ctx, &fin);

    // Tether from hull nose to the moon
    raster::draw_line(
        ctx,
        &Line {
            start: hull.vertices[0],
            end: moon,
            color: Color::GREEN,
        },
    );
}

// ============================================================================
// Host
// ============================================================================

/// Apply command line overrides on top of the loaded config
fn parse_args(config: &mut Config) {
    let args: Vec<String> = std::env::args().collect();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => config.vsync = false,
            "--vsync" => config.vsync = true,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<i32>() {
                        config.resolution.width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<i32>() {
                        config.resolution.height = h;
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1920x1080)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<i32>(), parts[1].parse::<i32>()) {
                            config.resolution.width = w;
                            config.resolution.height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: astral [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --width W, -w W           Set window width");
                println!("  --height H, -h H          Set window height");
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)");
                println!("  --vsync / --no-vsync      Override vsync setting");
                println!("  --help                    Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut config = Config::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!("{e:#}; using defaults");
        let defaults = Config::default();
        if let Err(e) = defaults.save(CONFIG_PATH) {
            warn!("{e:#}");
        }
        defaults
    });
    parse_args(&mut config);

    let width = config.resolution.width;
    let height = config.resolution.height;
    info!(
        "astral {}x{} vsync={} target_fps={}",
        width, height, config.vsync, config.target_fps
    );

    let (mut display, texture_creator) =
        Display::with_options("astral", width, height, config.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, display.width(), display.height())?;
    let mut framebuffer = Framebuffer::with_size(display.width(), display.height());
    let mut scratch = ScratchArena::with_capacity(SCRATCH_CAPACITY);

    let fixed_timestep = 1.0 / config.target_fps;
    let mut accumulator = 0.0_f32;
    let mut previous = DemoState::new();
    let mut current = previous;

    let mut last_frame = Instant::now();
    let mut fps_window_start = last_frame;
    let mut frame_count = 0_u32;

    'main: loop {
        let now = Instant::now();
        let frame_time = (now - last_frame).as_secs_f32().min(MAX_FRAME_TIME);
        last_frame = now;

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::Resized(w, h) => {
                    framebuffer.resize(w, h);
                    target = RenderTarget::with_size(&texture_creator, w, h)?;
                    info!("resized to {w}x{h}");
                },
                InputEvent::KeyDown(_) => {},
            }
        }

        // Fixed-timestep simulation; render interpolates the leftover
        accumulator += frame_time;
        while accumulator >= fixed_timestep {
            previous = current;
            current.update(fixed_timestep);
            accumulator -= fixed_timestep;
        }
        let alpha = accumulator / fixed_timestep;
        let state = DemoState::lerp(&previous, &current, alpha);

        {
            let camera = Camera {
                x: 0.0,
                y: 0.0,
                zoom: PIXELS_PER_METER,
            };
            let mut ctx =
                RendererContext::new(&mut framebuffer, &scratch, camera, PIXELS_PER_METER);
            render_scene(&mut ctx, &state);
        }

        // All draw calls are done; scratch slices are dead, safe to rewind
        scratch.reset();

        display.present(&mut target, &framebuffer)?;

        frame_count += 1;
        let window = (now - fps_window_start).as_secs_f32();
        if window >= 1.0 {
            info!("fps: {:.1}", frame_count as f32 / window);
            frame_count = 0;
            fps_window_start = now;
        }
    }

    Ok(())
}
