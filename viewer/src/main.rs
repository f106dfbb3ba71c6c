//! Unit-sphere viewer binary.
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

mod scene;

use std::time::Instant;

use anyhow::Context;
use orb::mesh;
use orb::transform::{aspect_matrix, view_projection, Spin};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

use scene::depth::create_depth_view;
use scene::mesh::GpuMesh;
use scene::pipeline::SphereRenderer;

const WINDOW_SIZE: (u32, u32) = (1280, 720);
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 39.0 / 255.0,
    g: 40.0 / 255.0,
    b: 34.0 / 255.0,
    a: 1.0,
};

struct GpuState<'w> {
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window).context("create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;

        // Line polygon mode backs the wireframe toggle; embedded-class
        // backends do not have it, so take it only when offered.
        let required_features = adapter.features() & wgpu::Features::POLYGON_MODE_LINE;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("device"),
                    required_features,
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("request device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self { _instance: instance, surface, device, queue, config })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }
}

/// Keyboard-driven state observed by the frame loop.
struct Controls {
    color_mode: i32,
    spin: Spin,
    wireframe: bool,
    cursor: (f64, f64),
}

impl Controls {
    fn new() -> Self {
        Self { color_mode: 3, spin: Spin::default(), wireframe: false, cursor: (0.0, 0.0) }
    }

    /// D key: 3 -> 1 -> 2 -> 3.
    fn cycle_color_mode(&mut self) -> i32 {
        self.color_mode = if self.color_mode == 3 { 1 } else { self.color_mode + 1 };
        self.color_mode
    }
}

fn print_help(wireframe_supported: bool) {
    println!("[help]");
    println!("- press ESC or 'q' to terminate the program");
    println!("- press F1 or 'h' to see help");
    if wireframe_supported {
        println!("- press 'w' to toggle wireframe");
    }
    println!("- press 'd' to toggle (tc.xy,0) > (tc.xxx) > (tc.yyy)");
    println!("- press 'r' to rotate the sphere");
    println!();
}

fn report_color_mode(mode: i32) {
    let source = match mode {
        1 => "xxx",
        2 => "yyy",
        _ => "xy,0",
    };
    println!("> using (texcoord.{source}) as color");
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("[error] {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("create event loop")?;
    let title = format!("orb viewer v{}", orb::version());
    let window_init = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1))
        .build(&event_loop)
        .context("create window")?;

    // Leak the window to obtain a 'static reference for the surface lifetime without unsafe.
    let window: &'static Window = Box::leak(Box::new(window_init));
    let mut gpu = pollster::block_on(GpuState::new(window))?;

    let sphere = mesh::tessellate(mesh::DEFAULT_TESS)?;
    log::info!(
        "tessellated sphere: factor={} vertices={} indices={}",
        sphere.tess,
        sphere.vertices.len(),
        sphere.indices.len()
    );
    let gpu_mesh = GpuMesh::upload(&gpu.device, &sphere)?;
    let renderer = SphereRenderer::new(&gpu.device, gpu.config.format);
    let mut depth_view = create_depth_view(&gpu.device, &gpu.config);

    let mut controls = Controls::new();
    print_help(renderer.supports_wireframe());

    let mut last_frame = Instant::now();

    event_loop
        .run(move |event, elwt| match event {
            Event::AboutToWait => window.request_redraw(),
            Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => {
                    gpu.resize(size);
                    depth_view = create_depth_view(&gpu.device, &gpu.config);
                    log::debug!("resized to {}x{}", gpu.config.width, gpu.config.height);
                }
                WindowEvent::KeyboardInput { event: key, .. } => {
                    if key.state != ElementState::Pressed || key.repeat {
                        return;
                    }
                    match key.physical_key {
                        PhysicalKey::Code(KeyCode::Escape | KeyCode::KeyQ) => elwt.exit(),
                        PhysicalKey::Code(KeyCode::F1 | KeyCode::KeyH) => {
                            print_help(renderer.supports_wireframe());
                        }
                        PhysicalKey::Code(KeyCode::KeyD) => {
                            report_color_mode(controls.cycle_color_mode());
                        }
                        PhysicalKey::Code(KeyCode::KeyR) => {
                            controls.spin.toggle();
                        }
                        PhysicalKey::Code(KeyCode::KeyW) => {
                            if renderer.supports_wireframe() {
                                controls.wireframe = !controls.wireframe;
                                let mode = if controls.wireframe { "wireframe" } else { "solid" };
                                println!("> using {mode} mode");
                            } else {
                                println!("> wireframe is unavailable on this adapter");
                            }
                        }
                        _ => {}
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    controls.cursor = (position.x, position.y);
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    println!(
                        "> left mouse button pressed at ({}, {})",
                        controls.cursor.0 as i32, controls.cursor.1 as i32
                    );
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let dt = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;
                    controls.spin.advance(dt);

                    renderer.update_uniforms(
                        &gpu.queue,
                        controls.color_mode,
                        aspect_matrix(gpu.config.width, gpu.config.height),
                        view_projection(),
                        controls.spin.model_matrix(),
                    );

                    let frame = match gpu.surface.get_current_texture() {
                        Ok(f) => f,
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu.resize(window.inner_size());
                            depth_view = create_depth_view(&gpu.device, &gpu.config);
                            return;
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("surface out of memory");
                            elwt.exit();
                            return;
                        }
                        Err(wgpu::SurfaceError::Timeout) => return,
                    };
                    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
                    let mut encoder = gpu
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("encoder"),
                        });

                    {
                        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                            label: Some("sphere pass"),
                            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                view: &view,
                                resolve_target: None,
                                ops: wgpu::Operations {
                                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                                    store: wgpu::StoreOp::Store,
                                },
                            })],
                            depth_stencil_attachment: Some(
                                wgpu::RenderPassDepthStencilAttachment {
                                    view: &depth_view,
                                    depth_ops: Some(wgpu::Operations {
                                        load: wgpu::LoadOp::Clear(1.0),
                                        store: wgpu::StoreOp::Discard,
                                    }),
                                    stencil_ops: None,
                                },
                            ),
                            occlusion_query_set: None,
                            timestamp_writes: None,
                        });
                        renderer.draw(&mut rpass, &gpu_mesh, controls.wireframe);
                    }

                    gpu.queue.submit(std::iter::once(encoder.finish()));
                    frame.present();
                }
                _ => {}
            },
            _ => {}
        })
        .context("run event loop")?;

    Ok(())
}
