use crate::layouts::Layouts;
use crate::programs::DEPTH_FORMAT;
use crate::texture::linear_sampler;

/// An offscreen color and depth pair that later passes sample from.
pub struct RenderTarget {
    pub color: wgpu::TextureView,
    pub depth: wgpu::TextureView,
    /// Color view and sampler, laid out for the quad and mirror programs.
    pub bind_group: wgpu::BindGroup,
    pub size: (u32, u32),
}

impl RenderTarget {
    pub fn new(
        device: &wgpu::Device,
        layouts: &Layouts,
        format: wgpu::TextureFormat,
        size: (u32, u32),
        label: &str,
    ) -> Self {
        let size = (size.0.max(1), size.1.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let color = texture.create_view(&Default::default());
        let sampler = linear_sampler(device, wgpu::AddressMode::ClampToEdge, label);
        let bind_group = layouts.texture_bind_group(device, &color, &sampler, label);
        Self {
            color,
            depth: depth_texture(device, size.0, size.1),
            bind_group,
            size,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.size.0 as f32 / self.size.1 as f32
    }
}

pub fn depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
