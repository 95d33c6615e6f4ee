use crate::RenderError;
use crate::environment::Environment;
use crate::frame::{FrameBinding, FrameUniforms};
use crate::layouts::Layouts;
use crate::material::{GpuMaterial, MaterialFactory, TextureCache};
use crate::mesh::{GpuMesh, quad_buffer};
use crate::programs::{Programs, ReloadReport};
use crate::shaders::{ShaderKind, ShaderLibrary, ShaderOrigin};
use crate::target::{RenderTarget, depth_texture};
use crate::texture;
use shadelab_assets::{CubeFaces, LoadedMesh, MaterialDesc};
use shadelab_scene::{Lens, PassMatrices, Project, SceneState};
use std::path::PathBuf;

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.08,
    b: 0.10,
    a: 1.0,
};
const TARGET_CLEAR: wgpu::Color = wgpu::Color {
    r: 0.25,
    g: 0.25,
    b: 0.30,
    a: 1.0,
};

pub const DEFAULT_TARGET_SIZE: u32 = 1024;

/// Startup choices that shape what the renderer allocates.
#[derive(Debug, Clone)]
pub struct RendererOptions {
    pub shader_dir: PathBuf,
    /// Edge length of the square render-to-texture target.
    pub target_size: u32,
    /// Required by the environment project, ignored by the others.
    pub environment: Option<CubeFaces>,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            shader_dir: PathBuf::from("shaders"),
            target_size: DEFAULT_TARGET_SIZE,
            environment: None,
        }
    }
}

/// Programs a project draws with.
pub fn programs_for(project: Project) -> &'static [ShaderKind] {
    match project {
        Project::PointCloud | Project::Transformations => &[ShaderKind::Points],
        Project::Shading | Project::Textures => &[ShaderKind::Mesh],
        Project::RenderToTexture => &[ShaderKind::Mesh, ShaderKind::Quad],
        Project::Environment => &[ShaderKind::Skybox, ShaderKind::Environment, ShaderKind::Mirror],
    }
}

/// Per-project resources beyond the mesh itself.
enum Stage {
    Points,
    Lit,
    RenderToTexture {
        target: RenderTarget,
    },
    Environment {
        reflection: RenderTarget,
        environment: Environment,
    },
}

/// Draws one project's frame from a [`SceneState`].
///
/// The renderer never mutates scene state; it only reads it once per frame.
pub struct SceneRenderer {
    project: Project,
    layouts: Layouts,
    library: ShaderLibrary,
    programs: Programs,
    surface_format: wgpu::TextureFormat,
    mesh: GpuMesh,
    materials: Vec<GpuMaterial>,
    fallback: GpuMaterial,
    quad: wgpu::Buffer,
    object_frame: FrameBinding,
    mirrored_frame: FrameBinding,
    plane_frame: FrameBinding,
    depth: wgpu::TextureView,
    size: (u32, u32),
    stage: Stage,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        size: (u32, u32),
        project: Project,
        mesh: &LoadedMesh,
        options: RendererOptions,
    ) -> Result<Self, RenderError> {
        let layouts = Layouts::new(device);
        let library = ShaderLibrary::new(&options.shader_dir);
        let programs = Programs::build(
            device,
            &layouts,
            surface_format,
            &library,
            programs_for(project),
        )?;

        let white = texture::white(device, queue).create_view(&Default::default());
        let sampler =
            texture::linear_sampler(device, wgpu::AddressMode::Repeat, "material_sampler");
        let use_maps = project.textures();
        let mut cache = TextureCache::default();
        if use_maps {
            for desc in &mesh.materials {
                if let Some(path) = &desc.diffuse_map {
                    cache.load(device, queue, path, true);
                }
                if let Some(path) = &desc.specular_map {
                    cache.load(device, queue, path, false);
                }
            }
        }
        let factory = MaterialFactory {
            layouts: &layouts,
            white: &white,
            sampler: &sampler,
            cache: &cache,
            use_maps,
        };
        let materials: Vec<GpuMaterial> = mesh
            .materials
            .iter()
            .map(|m| factory.create(device, m))
            .collect();
        let fallback = factory.create(device, &MaterialDesc::fallback());
        if project.lighting() {
            for m in &materials {
                tracing::debug!("material {}", m.name);
            }
        }

        let size = (size.0.max(1), size.1.max(1));
        let stage = match project {
            Project::PointCloud | Project::Transformations => Stage::Points,
            Project::Shading | Project::Textures => Stage::Lit,
            Project::RenderToTexture => {
                let edge = options.target_size.max(1);
                tracing::info!("render target {edge}x{edge}");
                Stage::RenderToTexture {
                    target: RenderTarget::new(
                        device,
                        &layouts,
                        surface_format,
                        (edge, edge),
                        "offscreen_target",
                    ),
                }
            }
            Project::Environment => {
                let cube = options.environment.ok_or(RenderError::MissingEnvironment)?;
                Stage::Environment {
                    reflection: RenderTarget::new(
                        device,
                        &layouts,
                        surface_format,
                        size,
                        "reflection_target",
                    ),
                    environment: Environment::new(device, queue, &layouts, &cube),
                }
            }
        };

        let mesh = GpuMesh::upload(device, mesh);
        tracing::debug!(
            "uploaded {} vertices, {} points, {} draw ranges",
            mesh.vertex_count,
            mesh.point_count,
            mesh.draws.len()
        );

        Ok(Self {
            project,
            object_frame: FrameBinding::new(device, &layouts.frame, "object_frame"),
            mirrored_frame: FrameBinding::new(device, &layouts.frame, "mirrored_frame"),
            plane_frame: FrameBinding::new(device, &layouts.frame, "plane_frame"),
            layouts,
            library,
            programs,
            surface_format,
            mesh,
            materials,
            fallback,
            quad: quad_buffer(device),
            depth: depth_texture(device, size.0, size.1),
            size,
            stage,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.size = (width.max(1), height.max(1));
        self.depth = depth_texture(device, self.size.0, self.size.1);
        if let Stage::Environment { reflection, .. } = &mut self.stage {
            *reflection = RenderTarget::new(
                device,
                &self.layouts,
                self.surface_format,
                self.size,
                "reflection_target",
            );
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn project(&self) -> Project {
        self.project
    }

    /// Rebuild all programs from the shader directory. Programs that fail keep
    /// running the previous version.
    pub fn reload_shaders(&mut self, device: &wgpu::Device) -> ReloadReport {
        tracing::info!("reloading shaders from {}", self.library.dir().display());
        self.programs.reload(device, &self.layouts, &self.library)
    }

    pub fn shader_origins(&self) -> Vec<(ShaderKind, ShaderOrigin)> {
        self.programs.origins().map(|(k, o)| (k, o.clone())).collect()
    }

    /// Render one frame into `view`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &SceneState,
    ) -> Result<(), RenderError> {
        let aspect = Lens::aspect(self.size.0, self.size.1);
        let shading = scene.shading.code();
        let frame = |pass: &PassMatrices, size| FrameUniforms::new(pass, size, shading);
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        match &self.stage {
            Stage::Points => {
                self.object_frame
                    .write(queue, &frame(&scene.object_pass(aspect), self.size));
                let points = self.pipeline(ShaderKind::Points)?;
                let mut pass = begin_pass(&mut encoder, "points_pass", view, &self.depth, CLEAR);
                pass.set_pipeline(points);
                pass.set_bind_group(0, &self.object_frame.bind_group, &[]);
                pass.set_vertex_buffer(0, self.mesh.points.slice(..));
                pass.draw(0..self.mesh.point_count, 0..1);
            }
            Stage::Lit => {
                self.object_frame
                    .write(queue, &frame(&scene.object_pass(aspect), self.size));
                let lit = self.pipeline(ShaderKind::Mesh)?;
                let mut pass = begin_pass(&mut encoder, "mesh_pass", view, &self.depth, CLEAR);
                pass.set_pipeline(lit);
                self.draw_mesh(&mut pass, &self.object_frame);
            }
            Stage::RenderToTexture { target } => {
                let lit = self.pipeline(ShaderKind::Mesh)?;
                let quad = self.pipeline(ShaderKind::Quad)?;
                self.object_frame.write(
                    queue,
                    &frame(&scene.object_pass(target.aspect()), target.size),
                );
                self.plane_frame
                    .write(queue, &frame(&scene.plane_pass(aspect), self.size));
                {
                    let mut pass = begin_pass(
                        &mut encoder,
                        "offscreen_pass",
                        &target.color,
                        &target.depth,
                        TARGET_CLEAR,
                    );
                    pass.set_pipeline(lit);
                    self.draw_mesh(&mut pass, &self.object_frame);
                }
                let mut pass = begin_pass(&mut encoder, "quad_pass", view, &self.depth, CLEAR);
                pass.set_pipeline(quad);
                pass.set_bind_group(0, &self.plane_frame.bind_group, &[]);
                pass.set_bind_group(1, &target.bind_group, &[]);
                pass.set_vertex_buffer(0, self.quad.slice(..));
                pass.draw(0..6, 0..1);
            }
            Stage::Environment {
                reflection,
                environment,
            } => {
                let skybox = self.pipeline(ShaderKind::Skybox)?;
                let reflective = self.pipeline(ShaderKind::Environment)?;
                let mirror = self.pipeline(ShaderKind::Mirror)?;
                self.mirrored_frame
                    .write(queue, &frame(&scene.mirrored_pass(aspect), self.size));
                self.object_frame
                    .write(queue, &frame(&scene.object_pass(aspect), self.size));
                self.plane_frame
                    .write(queue, &frame(&scene.mirror_plane_pass(aspect), self.size));

                // The scene as seen from below the mirror plane.
                {
                    let mut pass = begin_pass(
                        &mut encoder,
                        "reflection_pass",
                        &reflection.color,
                        &reflection.depth,
                        CLEAR,
                    );
                    self.draw_environment(
                        &mut pass,
                        skybox,
                        reflective,
                        environment,
                        &self.mirrored_frame,
                    );
                }
                let mut pass =
                    begin_pass(&mut encoder, "environment_pass", view, &self.depth, CLEAR);
                self.draw_environment(
                    &mut pass,
                    skybox,
                    reflective,
                    environment,
                    &self.object_frame,
                );
                pass.set_pipeline(mirror);
                pass.set_bind_group(0, &self.plane_frame.bind_group, &[]);
                pass.set_bind_group(1, &reflection.bind_group, &[]);
                pass.set_vertex_buffer(0, self.quad.slice(..));
                pass.draw(0..6, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn pipeline(&self, kind: ShaderKind) -> Result<&wgpu::RenderPipeline, RenderError> {
        self.programs
            .get(kind)
            .ok_or(RenderError::MissingProgram(kind.name()))
    }

    /// Draw every range with its material bound at group 1. The pipeline must already be set.
    fn draw_mesh(&self, pass: &mut wgpu::RenderPass<'_>, frame: &FrameBinding) {
        pass.set_bind_group(0, &frame.bind_group, &[]);
        pass.set_vertex_buffer(0, self.mesh.vertices.slice(..));
        for (range, material) in &self.mesh.draws {
            let material = material
                .and_then(|i| self.materials.get(i))
                .unwrap_or(&self.fallback);
            pass.set_bind_group(1, &material.bind_group, &[]);
            pass.draw(range.clone(), 0..1);
        }
    }

    fn draw_environment(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        skybox: &wgpu::RenderPipeline,
        reflective: &wgpu::RenderPipeline,
        environment: &Environment,
        frame: &FrameBinding,
    ) {
        pass.set_pipeline(skybox);
        pass.set_bind_group(0, &frame.bind_group, &[]);
        pass.set_bind_group(1, &environment.bind_group, &[]);
        pass.draw(0..3, 0..1);

        pass.set_pipeline(reflective);
        pass.set_bind_group(2, &environment.bind_group, &[]);
        self.draw_mesh(pass, frame);
    }
}

fn begin_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    label: &str,
    color: &wgpu::TextureView,
    depth: &wgpu::TextureView,
    clear: wgpu::Color,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_project_has_programs() {
        for project in Project::ALL {
            assert!(!programs_for(project).is_empty());
        }
    }

    #[test]
    fn point_projects_only_draw_points() {
        assert_eq!(programs_for(Project::PointCloud), &[ShaderKind::Points]);
        assert_eq!(
            programs_for(Project::Transformations),
            &[ShaderKind::Points]
        );
    }

    #[test]
    fn later_projects_add_programs() {
        let rtt = programs_for(Project::RenderToTexture);
        assert!(rtt.contains(&ShaderKind::Quad));
        let env = programs_for(Project::Environment);
        assert!(env.contains(&ShaderKind::Skybox));
        assert!(env.contains(&ShaderKind::Mirror));
    }

    #[test]
    fn default_options() {
        let options = RendererOptions::default();
        assert_eq!(options.target_size, 1024);
        assert_eq!(options.shader_dir, PathBuf::from("shaders"));
        assert!(options.environment.is_none());
    }
}
