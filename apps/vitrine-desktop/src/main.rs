use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use vitrine_camera::OrbitCamera;
use vitrine_render::UniformSink;
use vitrine_render_wgpu::RayMarchRenderer;
use vitrine_scene::{SceneConfig, VoxelGrid};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "vitrine-desktop", about = "Voxel raymarching viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Grid side length (power of two, at least 4)
    #[arg(long, default_value = "16")]
    grid_size: u32,

    /// Edge length of one voxel in world units
    #[arg(long, default_value = "1.0")]
    voxel_width: f32,
}

/// Application state: window, GPU handles, scene, and camera.
/// Everything the event handlers touch lives here; no globals.
struct VitrineApp {
    /// Host copy of the volume; taken and dropped after the one-time
    /// GPU upload in `resumed`.
    grid: Option<VoxelGrid>,
    camera: OrbitCamera,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<RayMarchRenderer>,
    // Input state
    keys_held: HashSet<KeyCode>,
    dragging: bool,
    last_cursor: (f32, f32),
    last_frame: Instant,
}

impl VitrineApp {
    fn new(grid: VoxelGrid, camera: OrbitCamera) -> Self {
        Self {
            grid: Some(grid),
            camera,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            keys_held: HashSet::new(),
            dragging: false,
            last_cursor: (0.0, 0.0),
            last_frame: Instant::now(),
        }
    }
}

impl ApplicationHandler for VitrineApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Vitrine")
            .with_inner_size(PhysicalSize::new(512u32, 512));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("vitrine_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // One-time scene setup: volume upload plus the initial
        // uniform publication from both components.
        let grid = self.grid.take().expect("grid present before first resume");
        let mut renderer = RayMarchRenderer::new(&device, &queue, surface_format, &grid);
        grid.publish_uniforms(renderer.uniforms_mut());
        self.camera.publish(renderer.uniforms_mut());
        renderer
            .uniforms_mut()
            .set_f32("screen_ratio", config.width as f32 / config.height.max(1) as f32);
        drop(grid);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.last_frame = Instant::now();

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.uniforms_mut().set_f32(
                            "screen_ratio",
                            config.width as f32 / config.height.max(1) as f32,
                        );
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if key_state == ElementState::Pressed {
                    self.keys_held.insert(key);
                } else {
                    self.keys_held.remove(&key);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.dragging = btn_state == ElementState::Pressed;
                if self.dragging {
                    let (x, y) = self.last_cursor;
                    self.camera.on_press_start(x, y);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.last_cursor = (x, y);
                if self.dragging {
                    if let Some(renderer) = &mut self.renderer {
                        self.camera.on_drag(x, y, renderer.uniforms_mut());
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32().min(0.1);
                self.last_frame = now;

                let (Some(surface), Some(device), Some(queue), Some(renderer)) = (
                    &self.surface,
                    &self.device,
                    &self.queue,
                    &mut self.renderer,
                ) else {
                    return;
                };

                self.camera.on_tick(
                    dt,
                    self.keys_held.contains(&KeyCode::KeyZ),
                    self.keys_held.contains(&KeyCode::KeyX),
                    renderer.uniforms_mut(),
                );

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                renderer.render(device, queue, &view);
                output.present();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = SceneConfig {
        voxel_count: cli.grid_size,
        voxel_width: cli.voxel_width,
        ..SceneConfig::default()
    };
    let grid = VoxelGrid::generate(&config).context("invalid scene configuration")?;
    tracing::trace!("voxel grid:\n{}", grid.dump());

    let camera = OrbitCamera::new(config.voxel_count, config.voxel_width);

    tracing::info!(
        grid_size = config.voxel_count,
        voxel_width = config.voxel_width,
        "vitrine-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = VitrineApp::new(grid, camera);
    event_loop.run_app(&mut app)?;

    Ok(())
}
