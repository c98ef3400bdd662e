//! SDL2 window and texture presentation.
//!
//! The rasterizer knows nothing about windows; this module owns the SDL
//! plumbing that copies a finished framebuffer to the screen once per frame.

use anyhow::{anyhow, Result};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use crate::framebuffer::Framebuffer;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: i32,
    height: i32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    /// Window resized to the given pixel dimensions
    Resized(i32, i32),
}

impl Display {
    /// Create a window-backed display with configurable VSync
    pub fn with_options(
        title: &str,
        width: i32,
        height: i32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>)> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!("SDL init: {e}"))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!("SDL video: {e}"))?;

        let window = video_subsystem
            .window(title, width as u32, height as u32)
            .position_centered()
            .resizable()
            .build()?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build()?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context
            .event_pump()
            .map_err(|e| anyhow!("SDL event pump: {e}"))?;

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Upload the framebuffer's packed pixels and present them.
    /// Must only run after the frame's draw calls have all completed.
    pub fn present(&mut self, target: &mut RenderTarget, framebuffer: &Framebuffer) -> Result<()> {
        target
            .texture
            .update(None, framebuffer.as_bytes(), framebuffer.pitch())?;

        self.canvas
            .copy(&target.texture, None, None)
            .map_err(|e| anyhow!("canvas copy: {e}"))?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } => {
                    self.width = w;
                    self.height = h;
                    events.push(InputEvent::Resized(w, h));
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture matching the framebuffer's packed RGBA8888 layout
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: i32,
        height: i32,
    ) -> Result<Self> {
        let texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGBA8888,
            width as u32,
            height as u32,
        )?;
        Ok(Self { texture })
    }
}
