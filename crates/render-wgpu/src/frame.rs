use bytemuck::{Pod, Zeroable};
use shadelab_scene::PassMatrices;
use wgpu::util::DeviceExt;

/// Per-pass uniform block, bound at group 0 by every program.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub mvp: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub sky_inverse: [[f32; 4]; 4],
    pub light_view: [f32; 4],
    pub light_world: [f32; 4],
    pub eye: [f32; 4],
    /// Framebuffer width and height in pixels.
    pub viewport: [f32; 4],
    /// x: shading mode code.
    pub mode: [u32; 4],
}

impl FrameUniforms {
    pub fn new(pass: &PassMatrices, viewport: (u32, u32), shading: u32) -> Self {
        Self {
            mvp: pass.mvp.to_cols_array_2d(),
            model_view: pass.model_view.to_cols_array_2d(),
            normal: pass.normal.to_cols_array_2d(),
            model: pass.model.to_cols_array_2d(),
            sky_inverse: pass.sky_inverse.to_cols_array_2d(),
            light_view: pass.light_view.extend(1.0).to_array(),
            light_world: pass.light_world.extend(1.0).to_array(),
            eye: pass.eye.extend(1.0).to_array(),
            viewport: [viewport.0 as f32, viewport.1 as f32, 0.0, 0.0],
            mode: [shading, 0, 0, 0],
        }
    }
}

/// A uniform buffer and its group-0 bind group. Each pass owns one so
/// writes for different passes within a frame do not overwrite each other.
pub struct FrameBinding {
    buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl FrameBinding {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&FrameUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniforms));
    }
}
