use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec3;
use glaze_envmap::EnvironmentMap;
use glaze_material::GlassMaterial;
use glaze_render_wgpu::{OrbitCamera, WgpuRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "glaze-desktop", about = "Glaze material viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Equirectangular environment image; procedural sky when omitted
    #[arg(long)]
    env: Option<PathBuf>,

    /// Material preset file used by the save/load buttons
    #[arg(long, default_value = "glaze-preset.json")]
    preset: PathBuf,
}

/// Application state.
struct AppState {
    material: GlassMaterial,
    environment: EnvironmentMap,
    camera: OrbitCamera,
    env_path: Option<PathBuf>,
    preset_path: PathBuf,
    show_panel: bool,
    orbiting: bool,
    reload_env: bool,
}

impl AppState {
    fn new(env_path: Option<PathBuf>, preset_path: PathBuf) -> Self {
        let environment = match &env_path {
            Some(path) => match EnvironmentMap::from_path(path) {
                Ok(map) => map,
                Err(e) => {
                    tracing::error!("failed to load environment {path:?}: {e}");
                    EnvironmentMap::sky_gradient(1024, 512)
                }
            },
            None => EnvironmentMap::sky_gradient(1024, 512),
        };

        Self {
            material: GlassMaterial::default(),
            environment,
            camera: OrbitCamera::default(),
            env_path,
            preset_path,
            show_panel: true,
            orbiting: false,
            reload_env: false,
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        match key {
            KeyCode::F1 => {
                self.show_panel = !self.show_panel;
            }
            KeyCode::KeyR => {
                self.material = GlassMaterial::default();
                tracing::info!("material reset to defaults");
            }
            _ => {}
        }
    }

    fn save_preset(&self) {
        if let Err(e) = self.material.save_preset(&self.preset_path) {
            tracing::error!("failed to save preset: {e}");
        }
    }

    fn load_preset(&mut self) {
        match GlassMaterial::load_preset(&self.preset_path) {
            Ok(material) => self.material = material,
            Err(e) => tracing::error!("failed to load preset: {e}"),
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }

        egui::SidePanel::left("material_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Glaze");
                ui.separator();
                ui.label(format!(
                    "Camera: yaw {:.0} pitch {:.0} dist {:.1}",
                    self.camera.yaw.to_degrees(),
                    self.camera.pitch.to_degrees(),
                    self.camera.distance
                ));
                ui.separator();

                ui.heading("Fresnel");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::DragValue::new(&mut self.material.fresnel_exponent)
                            .prefix("exp: ")
                            .range(0.1..=16.0)
                            .speed(0.1),
                    );
                    ui.add(
                        egui::DragValue::new(&mut self.material.fresnel_scale)
                            .prefix("scale: ")
                            .range(0.0..=8.0)
                            .speed(0.05),
                    );
                });

                ui.heading("Glow");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::DragValue::new(&mut self.material.glow_exponent)
                            .prefix("exp: ")
                            .range(0.1..=32.0)
                            .speed(0.1),
                    );
                    ui.add(
                        egui::DragValue::new(&mut self.material.glow_scale)
                            .prefix("scale: ")
                            .range(0.0..=200.0)
                            .speed(0.5),
                    );
                });
                let mut tint = self.material.glow_tint.to_array();
                ui.horizontal(|ui| {
                    ui.label("Tint:");
                    if ui.color_edit_button_rgb(&mut tint).changed() {
                        self.material.glow_tint = Vec3::from_array(tint);
                    }
                });

                ui.heading("Refraction");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::DragValue::new(&mut self.material.eta)
                            .prefix("eta: ")
                            .range(0.1..=2.0)
                            .speed(0.005),
                    );
                    ui.add(
                        egui::DragValue::new(&mut self.material.reflection_bias)
                            .prefix("bias: ")
                            .range(0.0..=1.0)
                            .speed(0.005),
                    );
                });

                ui.separator();
                if ui.button("Reset (R)").clicked() {
                    self.material = GlassMaterial::default();
                }
                ui.horizontal(|ui| {
                    if ui.button("Save Preset").clicked() {
                        self.save_preset();
                    }
                    if ui.button("Load Preset").clicked() {
                        self.load_preset();
                    }
                });
                if self.env_path.is_some() && ui.button("Reload Environment").clicked() {
                    self.reload_env = true;
                }

                ui.separator();
                ui.small("F1: panel | LMB drag: orbit | wheel: zoom");
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Glaze")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
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
                label: Some("glaze_device"),
                // The environment binds as filterable Rgba32Float.
                required_features: wgpu::Features::FLOAT32_FILTERABLE,
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

        self.state.camera.aspect = size.width as f32 / size.height.max(1) as f32;

        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            size.width,
            size.height,
            &self.state.environment,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

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
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

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
                    self.state.camera.aspect =
                        config.width as f32 / config.height.max(1) as f32;
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
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
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state.orbiting = btn_state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
                self.state.camera.zoom(scroll);
            }
            WindowEvent::RedrawRequested => {
                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

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

                if self.state.reload_env {
                    self.state.reload_env = false;
                    if let Some(path) = &self.state.env_path {
                        match EnvironmentMap::from_path(path) {
                            Ok(map) => {
                                if let Some(renderer) = &mut self.renderer {
                                    renderer.set_environment(device, queue, &map);
                                }
                                self.state.environment = map;
                            }
                            Err(e) => {
                                tracing::error!("failed to reload environment {path:?}: {e}");
                            }
                        }
                    }
                }

                if let Some(renderer) = &self.renderer {
                    renderer.render(
                        device,
                        queue,
                        &view,
                        &self.state.camera,
                        &self.state.material,
                    );
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                ..Default::default()
                            })
                            .forget_lifetime();
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.orbiting {
                self.state
                    .camera
                    .rotate(delta.0 as f32, delta.1 as f32);
            }
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

    tracing::info!("glaze-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(cli.env, cli.preset));
    event_loop.run_app(&mut app)?;

    Ok(())
}
