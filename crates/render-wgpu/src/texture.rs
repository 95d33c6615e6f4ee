use shadelab_assets::{CubeFaces, Rgba, RgbaImage, mip_chain, mip_level_count};

/// Upload an image with a full mip chain.
pub fn upload_2d(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &RgbaImage,
    format: wgpu::TextureFormat,
    label: &str,
) -> wgpu::Texture {
    let chain = mip_chain(image);
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        },
        mip_level_count: chain.len() as u32,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    for (level, mip) in chain.iter().enumerate() {
        write_level(queue, &texture, level as u32, 0, mip);
    }
    texture
}

/// Upload six faces as a cube texture, each with its own mip chain.
pub fn upload_cube(device: &wgpu::Device, queue: &wgpu::Queue, cube: &CubeFaces) -> wgpu::Texture {
    let chains: Vec<Vec<RgbaImage>> = cube.faces.iter().map(mip_chain).collect();
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("environment_cube"),
        size: wgpu::Extent3d {
            width: cube.size,
            height: cube.size,
            depth_or_array_layers: 6,
        },
        mip_level_count: mip_level_count(cube.size, cube.size),
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    for (layer, chain) in chains.iter().enumerate() {
        for (level, mip) in chain.iter().enumerate() {
            write_level(queue, &texture, level as u32, layer as u32, mip);
        }
    }
    texture
}

/// A 1x1 opaque white texture bound where a material has no map.
pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::Texture {
    let pixel = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
    upload_2d(
        device,
        queue,
        &pixel,
        wgpu::TextureFormat::Rgba8Unorm,
        "white_texture",
    )
}

fn write_level(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    level: u32,
    layer: u32,
    image: &RgbaImage,
) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: level,
            origin: wgpu::Origin3d {
                x: 0,
                y: 0,
                z: layer,
            },
            aspect: wgpu::TextureAspect::All,
        },
        image.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width()),
            rows_per_image: Some(image.height()),
        },
        wgpu::Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        },
    );
}

/// Trilinear, anisotropic sampler.
pub fn linear_sampler(
    device: &wgpu::Device,
    address_mode: wgpu::AddressMode,
    label: &str,
) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        anisotropy_clamp: 16,
        ..Default::default()
    })
}
