//! Surface, device and per-frame state for the running field

use crate::cli::Cli;
use crate::error::FieldError;
use glam::Vec2;
use particle_physics::CursorFollower;
use particle_renderer::FieldRenderer;
use particle_simulation::{FieldParams, ParticleField, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use winit::window::Window;

/// Frames kept for the rolling FPS average
const FRAME_WINDOW: usize = 100;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    renderer: FieldRenderer,
    field: ParticleField,
    scene: Scene,
    follower: Option<CursorFollower>,

    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, cli: &Cli) -> Result<Self, FieldError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(FieldError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            // One simulation step per displayed frame
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // The field works in logical pixels so its radii match on any display
        let renderer = FieldRenderer::new(&device, &config, window.scale_factor() as f32);
        log::info!("✓ Renderer initialized");

        let params = FieldParams::default().with_particle_count(cli.particles);
        let size = renderer.viewport().size();
        let field = match cli.seed {
            Some(seed) => {
                log::info!("Seeding field from {}", seed);
                ParticleField::with_rng(params, size.x, size.y, &mut StdRng::seed_from_u64(seed))
            }
            None => ParticleField::new(params, size.x, size.y),
        };
        log::info!("✓ Field initialized");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            field,
            scene: Scene::new(),
            follower: (!cli.no_follower).then(CursorFollower::new),
            frame_times: VecDeque::with_capacity(FRAME_WINDOW),
            last_frame_time: Instant::now(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer.resize(&self.config);
            self.resize_field();
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.renderer.set_scale_factor(scale_factor as f32);
        self.resize_field();
    }

    fn resize_field(&mut self) {
        let size = self.renderer.viewport().size();
        self.field.resize(size.x, size.y);
    }

    /// Reconfigure with the current size after the surface was lost or outdated
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Pointer position in physical pixels, as winit reports it
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        let pointer = self.renderer.viewport().to_logical(Vec2::new(x, y));
        self.field.set_pointer(pointer.x, pointer.y);
        if let Some(follower) = &mut self.follower {
            follower.set_target(pointer.x, pointer.y);
        }
    }

    /// The field keeps reacting to the last known position; only the follower hides
    pub fn pointer_left(&mut self) {
        if let Some(follower) = &mut self.follower {
            follower.hide();
        }
    }

    pub fn particle_count(&self) -> usize {
        self.field.particle_count()
    }

    /// Simulate and present one frame. Returns (fps, average frame time in ms).
    pub fn render(&mut self) -> Result<(f32, f32), wgpu::SurfaceError> {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FRAME_WINDOW {
            self.frame_times.pop_front();
        }

        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = if avg_frame_time > 0.0 {
            1000.0 / avg_frame_time
        } else {
            0.0
        };

        // Acquire first so a lost surface does not advance the field
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.field.frame(&mut self.scene);
        if let Some(follower) = &mut self.follower {
            follower.step();
            self.scene.push_follower(follower);
        }

        self.renderer
            .render(&self.device, &self.queue, &view, &self.scene);

        output.present();
        Ok((fps, avg_frame_time))
    }
}
