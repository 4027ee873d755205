use std::time::{Duration, Instant};

use log::{error, info, trace, warn};
use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::error::OsError;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::clock::{Clock, MonotonicClock};
use crate::graphics::Renderer2d;
use crate::pacing::FramePacer;
use crate::pixels_renderer::{PixelsRenderer2d, buffer_extent};
use crate::surface::SurfaceSize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] OsError),
    #[error("failed to create renderer: {0}")]
    Renderer(#[from] pixels::Error),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: bool,
    pub frame_budget: Duration,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    pub surface_size: SurfaceSize,
}

/// A game driven by `run_game`.
///
/// Each frame calls `update` once with the elapsed time since the previous frame,
/// then `render` once. Key events arrive between frames.
pub trait GameApp {
    type State;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn handle_key(&mut self, _state: &mut Self::State, _key: VirtualKeyCode, _pressed: bool) {}

    fn update(&mut self, state: &mut Self::State, now: Duration, dt: Duration);

    fn render(&mut self, state: &Self::State, now: Duration, renderer: &mut dyn Renderer2d);
}

fn create_window(
    config: &AppConfig,
    event_loop: &EventLoop<()>,
) -> Result<(Window, SurfaceSize), AppError> {
    let monitor_size = if config.clamp_to_monitor {
        event_loop.primary_monitor().map(|m| m.size())
    } else {
        None
    };
    let initial_size = match monitor_size {
        Some(monitor) => PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        ),
        None => config.desired_size,
    };
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(initial_size)
        .build(event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width, window_size.height);
    Ok((window, surface_size))
}

/// Opens a window and runs `game` until the window is closed.
///
/// Only returns on initialisation failure; a clean close exits the process with status 0.
pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), AppError> {
    let event_loop = EventLoop::new();
    let (window, surface_size) = create_window(&config, &event_loop)?;

    let extent = buffer_extent(surface_size);
    let surface_texture = SurfaceTexture::new(extent.width, extent.height, &window);
    let pixels = PixelsBuilder::new(extent.width, extent.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;
    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    let mut ctx = AppContext {
        window,
        renderer,
        surface_size,
    };
    info!(
        "window ready: {}x{} (frame budget {:?})",
        surface_size.width, surface_size.height, config.frame_budget
    );

    let clock = MonotonicClock::start();
    let pacer = FramePacer::new(config.frame_budget);
    let mut state = game.init_state(&mut ctx);
    let mut last_frame = clock.elapsed();
    let mut next_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                info!("close requested, exiting");
                *control_flow = ControlFlow::Exit;
            }
            WindowEvent::Resized(size) => {
                ctx.surface_size = SurfaceSize::new(size.width, size.height);
                if let Err(err) = ctx.renderer.resize(ctx.surface_size) {
                    warn!("resize failed: {err}");
                }
                ctx.window.request_redraw();
            }
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        virtual_keycode: Some(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                game.handle_key(&mut state, key, key_state == ElementState::Pressed);
            }
            _ => {}
        },
        Event::RedrawRequested(_) => {
            let frame_start = Instant::now();
            let now = clock.elapsed();
            let dt = now.saturating_sub(last_frame);
            last_frame = now;

            game.update(&mut state, now, dt);
            ctx.renderer.draw_frame(|gfx| game.render(&state, now, gfx));
            if let Err(err) = ctx.renderer.present() {
                error!("present failed: {err}");
            }

            next_frame = pacer.next_deadline(frame_start);
            let work = frame_start.elapsed();
            trace!("frame took {work:?}, waiting {:?}", pacer.remaining(work));
        }
        Event::MainEventsCleared => {
            if Instant::now() >= next_frame {
                ctx.window.request_redraw();
            }
        }
        Event::RedrawEventsCleared => {
            if !matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
                *control_flow = ControlFlow::WaitUntil(next_frame);
            }
        }
        _ => {}
    });
}
