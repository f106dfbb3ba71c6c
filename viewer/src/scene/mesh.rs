use orb::mesh::{SphereMesh, Vertex};
use wgpu::util::DeviceExt;

/// Device-side sphere mesh: static vertex/index buffers plus the draw count.
///
/// Rebuilding means constructing a new `GpuMesh` and dropping the old
/// handle; the buffers are released with it.
pub struct GpuMesh {
    pub vertex_buf: wgpu::Buffer,
    pub index_buf: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    /// Attribute layout matching `orb::mesh::Vertex`: position, normal, uv,
    /// interleaved in record order.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }

    /// Upload `mesh` as static geometry.
    pub fn upload(device: &wgpu::Device, mesh: &SphereMesh) -> anyhow::Result<Self> {
        anyhow::ensure!(!mesh.vertices.is_empty(), "sphere mesh has no vertices");

        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self { vertex_buf, index_buf, index_count: mesh.indices.len() as u32 })
    }
}
