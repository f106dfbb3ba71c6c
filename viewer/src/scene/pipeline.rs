use glam::Mat4;
use wgpu::util::DeviceExt;

use super::depth::DEPTH_FORMAT;
use super::mesh::GpuMesh;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    model: [[f32; 4]; 4],
    view_proj: [[f32; 4]; 4],
    aspect: [[f32; 4]; 4],
    color_mode: i32,
    _pad: [u32; 3],
}

/// Sphere render pass: fill and optional wireframe pipelines sharing one
/// uniform block.
pub struct SphereRenderer {
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: Option<wgpu::RenderPipeline>,
    bind_group: wgpu::BindGroup,
    uniform_buf: wgpu::Buffer,
}

impl SphereRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let globals_init = Globals {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            aspect: Mat4::IDENTITY.to_cols_array_2d(),
            color_mode: 3,
            _pad: [0; 3],
        };
        let uniform_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere uniforms"),
            contents: bytemuck::bytes_of(&globals_init),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sphere bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    min_binding_size: None,
                    has_dynamic_offset: false,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sphere bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });

        let vert = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sphere vert"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/sphere.vert.wgsl").into()),
        });

        let frag = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sphere frag"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/sphere.frag.wgsl").into()),
        });

        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sphere pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [GpuMesh::vertex_layout()];
        let build = |label: &str, polygon_mode: wgpu::PolygonMode| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pl),
                vertex: wgpu::VertexState {
                    module: &vert,
                    entry_point: "main",
                    buffers: &vertex_buffers,
                },
                fragment: Some(wgpu::FragmentState {
                    module: &frag,
                    entry_point: "main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
        };

        let fill_pipeline = build("sphere fill pipeline", wgpu::PolygonMode::Fill);
        // Polygon mode is pipeline state in wgpu; wireframe needs its own
        // pipeline, and only when the device has the feature.
        let line_pipeline = device
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE)
            .then(|| build("sphere line pipeline", wgpu::PolygonMode::Line));

        Self { fill_pipeline, line_pipeline, bind_group, uniform_buf }
    }

    /// Whether the device offers the line polygon mode.
    pub fn supports_wireframe(&self) -> bool {
        self.line_pipeline.is_some()
    }

    /// Write the per-frame uniform block.
    pub fn update_uniforms(
        &self,
        queue: &wgpu::Queue,
        color_mode: i32,
        aspect: Mat4,
        view_proj: Mat4,
        model: Mat4,
    ) {
        let globals = Globals {
            model: model.to_cols_array_2d(),
            view_proj: view_proj.to_cols_array_2d(),
            aspect: aspect.to_cols_array_2d(),
            color_mode,
            _pad: [0; 3],
        };
        queue.write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&globals));
    }

    /// Issue the indexed draw with the fill or wireframe pipeline.
    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, mesh: &'a GpuMesh, wireframe: bool) {
        let pipeline = match &self.line_pipeline {
            Some(line) if wireframe => line,
            _ => &self.fill_pipeline,
        };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, mesh.vertex_buf.slice(..));
        rpass.set_index_buffer(mesh.index_buf.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}
