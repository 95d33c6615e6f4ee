use crate::layouts::Layouts;
use crate::texture;
use bytemuck::{Pod, Zeroable};
use shadelab_assets::{MaterialDesc, load_rgba};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use wgpu::util::DeviceExt;

/// Group-1 uniform block of the lit programs.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub ka: [f32; 4],
    pub kd: [f32; 4],
    pub ks: [f32; 4],
    pub tf: [f32; 4],
    /// Ns, Ni, illum.
    pub params: [f32; 4],
    /// Diffuse map bound, specular map bound.
    pub flags: [u32; 4],
}

impl MaterialUniforms {
    pub fn new(desc: &MaterialDesc, has_diffuse_map: bool, has_specular_map: bool) -> Self {
        Self {
            ka: desc.ka.extend(1.0).to_array(),
            kd: desc.kd.extend(1.0).to_array(),
            ks: desc.ks.extend(1.0).to_array(),
            tf: desc.tf.extend(1.0).to_array(),
            params: [desc.ns, desc.ni, desc.illum as f32, 0.0],
            flags: [has_diffuse_map as u32, has_specular_map as u32, 0, 0],
        }
    }
}

pub struct GpuMaterial {
    pub name: String,
    pub bind_group: wgpu::BindGroup,
}

/// Decoded-and-uploaded maps, keyed by path and color space so a file shared
/// between materials is uploaded once.
#[derive(Default)]
pub struct TextureCache {
    views: HashMap<(PathBuf, bool), Option<wgpu::TextureView>>,
}

impl TextureCache {
    /// Upload `path` once. Decode failures are logged and the map is left unbound.
    pub fn load(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, path: &Path, srgb: bool) {
        self.views
            .entry((path.to_path_buf(), srgb))
            .or_insert_with(|| match load_rgba(path) {
                Ok(image) => {
                    tracing::info!(
                        "texture {} ({}x{})",
                        path.display(),
                        image.width(),
                        image.height()
                    );
                    let format = if srgb {
                        wgpu::TextureFormat::Rgba8UnormSrgb
                    } else {
                        wgpu::TextureFormat::Rgba8Unorm
                    };
                    let label = path.display().to_string();
                    let texture = texture::upload_2d(device, queue, &image, format, &label);
                    Some(texture.create_view(&Default::default()))
                }
                Err(e) => {
                    tracing::error!("{e}; continuing without this map");
                    None
                }
            });
    }

    pub fn get(&self, path: &Path, srgb: bool) -> Option<&wgpu::TextureView> {
        self.views
            .get(&(path.to_path_buf(), srgb))
            .and_then(Option::as_ref)
    }
}

/// Shared state for building material bind groups.
pub struct MaterialFactory<'a> {
    pub layouts: &'a Layouts,
    pub white: &'a wgpu::TextureView,
    pub sampler: &'a wgpu::Sampler,
    pub cache: &'a TextureCache,
    /// Whether `map_Kd` and `map_Ks` are honored.
    pub use_maps: bool,
}

impl MaterialFactory<'_> {
    pub fn create(&self, device: &wgpu::Device, desc: &MaterialDesc) -> GpuMaterial {
        let map = |path: &Option<PathBuf>, srgb: bool| {
            path.as_deref()
                .filter(|_| self.use_maps)
                .and_then(|p| self.cache.get(p, srgb))
        };
        let diffuse = map(&desc.diffuse_map, true);
        let specular = map(&desc.specular_map, false);
        let uniforms = MaterialUniforms::new(desc, diffuse.is_some(), specular.is_some());
        let label = format!("material_{}", desc.name);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&label),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&label),
            layout: &self.layouts.material,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(diffuse.unwrap_or(self.white)),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(specular.unwrap_or(self.white)),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(self.sampler),
                },
            ],
        });
        GpuMaterial {
            name: desc.name.clone(),
            bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn layout_matches_wgsl_struct() {
        assert_eq!(std::mem::size_of::<MaterialUniforms>(), 6 * 16);
    }

    #[test]
    fn packs_mtl_values_and_map_flags() {
        let desc = MaterialDesc {
            ka: Vec3::splat(0.1),
            kd: Vec3::new(0.8, 0.2, 0.1),
            ns: 96.0,
            ni: 1.5,
            illum: 2,
            ..MaterialDesc::default()
        };
        let u = MaterialUniforms::new(&desc, true, false);
        assert_eq!(u.kd, [0.8, 0.2, 0.1, 1.0]);
        assert_eq!(u.params, [96.0, 1.5, 2.0, 0.0]);
        assert_eq!(u.flags, [1, 0, 0, 0]);
    }
}
