use bytemuck::{Pod, Zeroable};
use shadelab_assets::{LoadedMesh, MeshVertex};
use std::ops::Range;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl From<&MeshVertex> for GpuVertex {
    fn from(v: &MeshVertex) -> Self {
        Self {
            position: v.position,
            normal: v.normal,
            uv: v.uv,
        }
    }
}

/// A mesh uploaded as a flat triangle list plus its point cloud.
pub struct GpuMesh {
    pub vertices: wgpu::Buffer,
    pub vertex_count: u32,
    pub points: wgpu::Buffer,
    pub point_count: u32,
    /// Vertex range and material slot of every draw call.
    pub draws: Vec<(Range<u32>, Option<usize>)>,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, mesh: &LoadedMesh) -> Self {
        let vertices: Vec<GpuVertex> = mesh.vertices.iter().map(GpuVertex::from).collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let point_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_point_buffer"),
            contents: bytemuck::cast_slice(&mesh.points),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let draws = mesh
            .ranges
            .iter()
            .map(|r| (r.first..r.first + r.count, r.material))
            .collect();
        Self {
            vertices: vertex_buffer,
            vertex_count: vertices.len() as u32,
            points: point_buffer,
            point_count: mesh.points.len() as u32,
            draws,
        }
    }
}

/// Unit quad in the XY plane facing +Z, two triangles, with texture-space UVs
/// (v = 0 at the top edge).
#[rustfmt::skip]
pub fn quad_vertices() -> [GpuVertex; 6] {
    let n = [0.0, 0.0, 1.0];
    let v = |x: f32, y: f32, u: f32, t: f32| {
        GpuVertex { position: [x, y, 0.0], normal: n, uv: [u, t] }
    };
    [
        v(-1.0, -1.0, 0.0, 1.0), v( 1.0, -1.0, 1.0, 1.0), v( 1.0,  1.0, 1.0, 0.0),
        v( 1.0,  1.0, 1.0, 0.0), v(-1.0,  1.0, 0.0, 0.0), v(-1.0, -1.0, 0.0, 1.0),
    ]
}

pub fn quad_buffer(device: &wgpu::Device) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("quad_vertex_buffer"),
        contents: bytemuck::cast_slice(&quad_vertices()),
        usage: wgpu::BufferUsages::VERTEX,
    })
}
