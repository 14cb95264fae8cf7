use anyhow::{Context as _, Result};
use clap::Parser;
use egui::Context as EguiContext;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use suitespace_clock::{ClockSample, TickTimer};
use suitespace_render_wgpu::SceneRenderer;
use suitespace_scene::{SuiteCamera, layout};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const TEXT_COLOR: egui::Color32 = egui::Color32::from_rgb(0xe5, 0xe5, 0xe5);
const ABOUT_COPY: &str = "Software driven asset management firm specializing in \
purpose built rentals, hotels, and senior housing.";
const CONTACT_EMAIL: &str = "contact@vevharcap.com";

#[derive(Parser)]
#[command(name = "suitespace-desktop", about = "Suitespace showcase application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,
}

/// Which page section is shown. A closed two-variant switch with no hidden
/// states: mutated only by the About and Back buttons, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewState {
    Home,
    About,
}

/// Clock mounted while the Home view is shown.
///
/// Holds the latest sample behind a mutex and the scoped timer refreshing it
/// once per second. Dropping the mount cancels the timer; no tick outlives
/// the view that owns it.
struct ClockMount {
    latest: Arc<Mutex<ClockSample>>,
    _timer: TickTimer,
}

impl ClockMount {
    fn new() -> Self {
        let latest = Arc::new(Mutex::new(ClockSample::now()));
        let shared = latest.clone();
        let timer = TickTimer::spawn(Duration::from_secs(1), move || {
            if let Ok(mut sample) = shared.lock() {
                *sample = ClockSample::now();
            }
        });
        Self {
            latest,
            _timer: timer,
        }
    }

    fn sample(&self) -> ClockSample {
        self.latest.lock().expect("clock mutex").clone()
    }
}

/// Page state: view selector, per-view clock mount, scene camera, and the
/// animation clock origin.
struct AppState {
    view: ViewState,
    clock: Option<ClockMount>,
    camera: SuiteCamera,
    scene_started: Instant,
}

impl AppState {
    fn new() -> Self {
        Self {
            view: ViewState::Home,
            clock: Some(ClockMount::new()),
            camera: SuiteCamera::default(),
            scene_started: Instant::now(),
        }
    }

    fn set_view(&mut self, view: ViewState) {
        if self.view == view {
            return;
        }
        self.view = view;
        match view {
            ViewState::Home => {
                // Remount the clock and restart the scene's elapsed time,
                // exactly as if the components were freshly created.
                self.clock = Some(ClockMount::new());
                self.scene_started = Instant::now();
            }
            ViewState::About => {
                // Releases the tick timer deterministically.
                self.clock = None;
            }
        }
        tracing::info!(?view, "view changed");
    }

    /// Seconds since the scene mounted. Monotonic, never paused; every frame
    /// derives its pose from this value rather than accumulating deltas.
    fn elapsed(&self) -> f32 {
        self.scene_started.elapsed().as_secs_f32()
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        match self.view {
            ViewState::Home => self.draw_home(ctx),
            ViewState::About => self.draw_about(ctx),
        }
    }

    fn draw_home(&mut self, ctx: &EguiContext) {
        let panel_frame = egui::Frame::NONE.inner_margin(egui::Margin::same(24));

        egui::TopBottomPanel::top("clock")
            .frame(panel_frame)
            .show_separator_line(false)
            .show(ctx, |ui| {
                if let Some(clock) = &self.clock {
                    let sample = clock.sample();
                    ui.vertical_centered(|ui| {
                        ui.label(
                            page_text(&format!(
                                "{} ET        {}",
                                sample.time_text, sample.date_text
                            ))
                            .monospace(),
                        );
                    });
                }
            });

        egui::TopBottomPanel::bottom("footer")
            .frame(panel_frame)
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    if ui.button(page_text("ABOUT")).clicked() {
                        self.set_view(ViewState::About);
                    }
                });
                ui.add_space(24.0);
                ui.columns(3, |cols| {
                    cols[0].with_layout(
                        egui::Layout::left_to_right(egui::Align::Min),
                        |ui| {
                            ui.label(page_text("TORONTO"));
                        },
                    );
                    cols[1].vertical_centered(|ui| {
                        ui.label(page_text("VEVHAR"));
                    });
                    cols[2].with_layout(
                        egui::Layout::right_to_left(egui::Align::Min),
                        |ui| {
                            ui.hyperlink_to(
                                page_text(&CONTACT_EMAIL.to_uppercase()),
                                format!("mailto:{CONTACT_EMAIL}"),
                            );
                        },
                    );
                });
            });

        // The scene shows through; the central panel paints nothing.
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |_ui| {});
    }

    fn draw_about(&mut self, ctx: &EguiContext) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.inner_margin(egui::Margin::same(48)))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    let top = (ui.available_height() / 2.0 - 60.0).max(0.0);
                    ui.add_space(top);
                    ui.set_max_width(560.0);
                    ui.label(page_text(ABOUT_COPY));
                    ui.add_space(48.0);
                    if ui.button(page_text("BACK")).clicked() {
                        self.set_view(ViewState::Home);
                    }
                });
            });
    }
}

fn page_text(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(12.0).color(TEXT_COLOR)
}

/// Everything tied to a live GPU device. Absent when acquisition failed, in
/// which case the page degrades to rendering nothing instead of crashing.
struct Gfx {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SceneRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gfx {
    fn new(
        window: Arc<Window>,
        egui_ctx: &EguiContext,
        camera: &mut SuiteCamera,
    ) -> Result<Self> {
        layout::validate(&layout::FLOOR_PLAN)?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("suitespace_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

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

        camera.set_aspect(size.width, size.height);

        let renderer = SceneRenderer::new(&device, surface_format, size.width, size.height);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>, camera: &mut SuiteCamera) {
        self.config.width = new_size.width.max(1);
        self.config.height = new_size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        camera.set_aspect(self.config.width, self.config.height);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }
}

struct PageApp {
    state: AppState,
    initial_size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    gfx: Option<Gfx>,
    egui_ctx: EguiContext,
}

impl PageApp {
    fn new(width: u32, height: u32) -> Self {
        Self {
            state: AppState::new(),
            initial_size: PhysicalSize::new(width, height),
            window: None,
            gfx: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn redraw(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let Some(gfx) = &mut self.gfx else {
            return;
        };

        let output = match gfx.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gfx.surface.configure(&gfx.device, &gfx.config);
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

        // The scene only exists on the Home view; About unmounts it.
        let scene_drawn = self.state.view == ViewState::Home;
        if scene_drawn {
            gfx.renderer.render(
                &gfx.device,
                &gfx.queue,
                &view,
                &self.state.camera,
                self.state.elapsed(),
            );
        }

        let raw_input = gfx.egui_winit.take_egui_input(window);
        let egui_ctx = self.egui_ctx.clone();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });

        gfx.egui_winit
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gfx.config.width, gfx.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gfx.egui_renderer
                .update_texture(&gfx.device, &gfx.queue, *id, image_delta);
        }
        let mut encoder = gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gfx.egui_renderer.update_buffers(
            &gfx.device,
            &gfx.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            // When the scene was skipped, this pass also clears to the page
            // background.
            let load = if scene_drawn {
                wgpu::LoadOp::Load
            } else {
                wgpu::LoadOp::Clear(wgpu::Color::BLACK)
            };
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gfx.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gfx.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gfx.egui_renderer.free_texture(id);
        }

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for PageApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Vevhar")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        match Gfx::new(window.clone(), &self.egui_ctx, &mut self.state.camera) {
            Ok(gfx) => self.gfx = Some(gfx),
            Err(e) => {
                tracing::warn!("rendering unavailable, page degrades to nothing: {e:#}");
            }
        }

        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(gfx), Some(window)) = (&mut self.gfx, &self.window) {
            let response = gfx.egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gfx) = &mut self.gfx {
                    gfx.resize(new_size, &mut self.state.camera);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
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

    tracing::info!("suitespace-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PageApp::new(cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_home_with_clock_mounted() {
        let state = AppState::new();
        assert_eq!(state.view, ViewState::Home);
        assert!(state.clock.is_some());
    }

    #[test]
    fn about_unmounts_clock_and_back_restores_home() {
        let mut state = AppState::new();
        for _ in 0..3 {
            state.set_view(ViewState::About);
            assert_eq!(state.view, ViewState::About);
            assert!(state.clock.is_none());
            state.set_view(ViewState::Home);
            assert_eq!(state.view, ViewState::Home);
            assert!(state.clock.is_some());
        }
    }

    #[test]
    fn setting_current_view_is_a_no_op() {
        let mut state = AppState::new();
        let started = state.scene_started;
        state.set_view(ViewState::Home);
        assert_eq!(state.scene_started, started);
        assert!(state.clock.is_some());
    }

    #[test]
    fn elapsed_is_monotonic() {
        let state = AppState::new();
        let a = state.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert!(state.elapsed() > a);
    }
}
