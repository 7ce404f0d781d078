//! Tidekeeper - ride a raft on a sea that follows your breathing
//!
//! Hold the space bar and the waves grow; let go, wait, and they calm down.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use tidekeeper::cli::Args;
use tidekeeper::input::action_for_key;
use tidekeeper::rendering::{Lighting, RenderSystem};
use tidekeeper::scene::{FrameState, KeyOutcome, Scene};
use tidekeeper::shapes::{raft_mesh, MeshData};

const WINDOW_TITLE: &str = "Tidekeeper";

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    scene: Scene,
    raft: MeshData,

    // Time tracking
    start_time: Instant,
    shown_caption: String,
}

impl App {
    fn new(args: &Args) -> Self {
        let config = args.scene_config();
        let raft = raft_mesh(&config.raft);
        let scene = Scene::new(config, args.avatar_rig());

        Self {
            window: None,
            render_system: None,
            scene,
            raft,
            start_time: Instant::now(),
            shown_caption: String::new(),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let render_config = &self.scene.config().render;
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                render_config.window_width,
                render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let avatar = self
            .scene
            .avatar()
            .vertices()
            .zip(self.scene.avatar().indices());
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.scene.wave.grid,
            &self.raft,
            avatar,
            render_config.sky_color,
        ))
        .context("failed to initialise renderer")?;

        log::info!("Tidekeeper is running");
        log::info!("Space: raise the waves, WASD/arrows: move, E: wave at the robot");
        log::info!("[ / ]: fog density, Esc: quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init_window(event_loop) {
            log::error!("{:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let Some(action) = action_for_key(code) else {
                    return;
                };
                let now = self.start_time.elapsed();
                let pressed = state == ElementState::Pressed;
                if self.scene.handle_key(action, pressed, repeat, now) == KeyOutcome::Quit {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

impl App {
    /// Advance the scene and render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.start_time.elapsed();
        let frame = self.scene.update(now);
        self.update_title();

        let Some(render_system) = &mut self.render_system else {
            return;
        };

        upload_frame(render_system, &self.scene, &frame);

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }
    }

    /// Show the caption in the window title when it changes
    fn update_title(&mut self) {
        let caption = self.scene.caption();
        if caption == self.shown_caption {
            return;
        }
        if let Some(window) = &self.window {
            window.set_title(&format!("{WINDOW_TITLE} - {caption}"));
        }
        self.shown_caption = caption.to_string();
    }
}

/// Push this frame's vertices and uniforms to the GPU
fn upload_frame(render_system: &RenderSystem, scene: &Scene, frame: &FrameState) {
    let config = scene.config();
    let render_config = &config.render;
    let (view_proj, eye) = scene
        .camera()
        .create_view_proj_matrix(render_config, render_system.aspect_ratio());

    let lighting = Lighting {
        view_proj,
        eye,
        light_direction: Vec3::from_array(render_config.light_direction),
        light_intensity: frame.light_intensity,
        fog_color: render_config.sky_color,
        fog_density: frame.fog_density,
    };

    render_system.update_ocean_vertices(&scene.wave.grid.vertices);
    render_system.update_ocean_uniforms(&lighting.uniforms(
        glam::Mat4::IDENTITY,
        render_config.ocean_color,
        0.07,
    ));
    render_system.update_raft_uniforms(&lighting.uniforms(
        frame.raft.model_matrix(),
        render_config.raft_color,
        0.02,
    ));

    if frame.avatar_changed {
        if let Some(vertices) = scene.avatar().vertices() {
            render_system.update_avatar_vertices(vertices);
        }
    }
    render_system.update_avatar_uniforms(&lighting.uniforms(
        frame.avatar.scaled_model_matrix(config.rig.avatar_scale),
        render_config.avatar_color,
        0.3,
    ));
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Tidekeeper - initializing");

    let mut app = App::new(&args);
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;
    Ok(())
}
