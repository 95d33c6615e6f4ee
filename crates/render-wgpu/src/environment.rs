use crate::layouts::Layouts;
use crate::texture::{linear_sampler, upload_cube};
use shadelab_assets::CubeFaces;

/// The environment cube map and its bind group.
pub struct Environment {
    pub bind_group: wgpu::BindGroup,
}

impl Environment {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layouts: &Layouts,
        cube: &CubeFaces,
    ) -> Self {
        let texture = upload_cube(device, queue, cube);
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("environment_view"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = linear_sampler(
            device,
            wgpu::AddressMode::ClampToEdge,
            "environment_sampler",
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("environment_bind_group"),
            layout: &layouts.environment,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });
        tracing::info!("environment cube {}x{}", cube.size, cube.size);
        Self { bind_group }
    }
}
