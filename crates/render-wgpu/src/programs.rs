use crate::RenderError;
use crate::layouts::Layouts;
use crate::mesh::GpuVertex;
use crate::shaders::{ShaderKind, ShaderLibrary, ShaderOrigin};
use std::collections::BTreeMap;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x2,
];

/// A compiled pipeline and where its source came from.
pub struct Program {
    pub pipeline: wgpu::RenderPipeline,
    pub origin: ShaderOrigin,
}

/// The pipelines one project draws with.
pub struct Programs {
    format: wgpu::TextureFormat,
    programs: BTreeMap<ShaderKind, Program>,
}

/// Outcome of a live reload.
#[derive(Debug, Default)]
pub struct ReloadReport {
    pub rebuilt: Vec<ShaderKind>,
    pub failed: Vec<(ShaderKind, String)>,
}

impl Programs {
    /// Build every program in `kinds`; the first failure is returned.
    pub fn build(
        device: &wgpu::Device,
        layouts: &Layouts,
        format: wgpu::TextureFormat,
        library: &ShaderLibrary,
        kinds: &[ShaderKind],
    ) -> Result<Self, RenderError> {
        let mut programs = BTreeMap::new();
        for &kind in kinds {
            let program = build_program(device, layouts, format, library, kind)?;
            tracing::info!("program {}: {}", kind.name(), program.origin);
            programs.insert(kind, program);
        }
        Ok(Self { format, programs })
    }

    /// Re-read and rebuild every program. A program that fails keeps its previous pipeline.
    pub fn reload(
        &mut self,
        device: &wgpu::Device,
        layouts: &Layouts,
        library: &ShaderLibrary,
    ) -> ReloadReport {
        let mut report = ReloadReport::default();
        let kinds: Vec<ShaderKind> = self.programs.keys().copied().collect();
        for kind in kinds {
            match build_program(device, layouts, self.format, library, kind) {
                Ok(program) => {
                    tracing::info!("reloaded {}: {}", kind.name(), program.origin);
                    self.programs.insert(kind, program);
                    report.rebuilt.push(kind);
                }
                Err(e) => {
                    tracing::error!("{e}; keeping previous {} program", kind.name());
                    report.failed.push((kind, e.to_string()));
                }
            }
        }
        report
    }

    pub fn get(&self, kind: ShaderKind) -> Option<&wgpu::RenderPipeline> {
        self.programs.get(&kind).map(|p| &p.pipeline)
    }

    pub fn origins(&self) -> impl Iterator<Item = (ShaderKind, &ShaderOrigin)> {
        self.programs.iter().map(|(kind, p)| (*kind, &p.origin))
    }
}

/// Fixed-function state that differs between programs.
struct ProgramState<'a> {
    bind_groups: Vec<&'a wgpu::BindGroupLayout>,
    vertex: Option<wgpu::VertexBufferLayout<'static>>,
    topology: wgpu::PrimitiveTopology,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

impl<'a> ProgramState<'a> {
    fn for_kind(kind: ShaderKind, layouts: &'a Layouts) -> Self {
        let mesh_vertex = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRIBUTES,
        };
        let lit = Self {
            bind_groups: vec![&layouts.frame, &layouts.material],
            vertex: Some(mesh_vertex),
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
        };
        match kind {
            ShaderKind::Points => Self {
                bind_groups: vec![&layouts.frame],
                vertex: Some(wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &POINT_ATTRIBUTES,
                }),
                topology: wgpu::PrimitiveTopology::PointList,
                ..lit
            },
            ShaderKind::Mesh => lit,
            ShaderKind::Quad | ShaderKind::Mirror => Self {
                bind_groups: vec![&layouts.frame, &layouts.texture],
                ..lit
            },
            ShaderKind::Skybox => Self {
                bind_groups: vec![&layouts.frame, &layouts.environment],
                vertex: None,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
                ..lit
            },
            ShaderKind::Environment => Self {
                bind_groups: vec![&layouts.frame, &layouts.material, &layouts.environment],
                ..lit
            },
        }
    }
}

/// Compile one program inside a validation error scope so bad WGSL becomes an error value.
fn build_program(
    device: &wgpu::Device,
    layouts: &Layouts,
    format: wgpu::TextureFormat,
    library: &ShaderLibrary,
    kind: ShaderKind,
) -> Result<Program, RenderError> {
    let source = library.load(kind);
    let state = ProgramState::for_kind(kind, layouts);
    let label = format!("{}_pipeline", kind.name());

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(kind.name()),
        source: wgpu::ShaderSource::Wgsl(source.text.clone()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&label),
        bind_group_layouts: &state.bind_groups,
        push_constant_ranges: &[],
    });
    let buffers: &[wgpu::VertexBufferLayout] = match &state.vertex {
        Some(vertex) => std::slice::from_ref(vertex),
        None => &[],
    };
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: state.topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: state.depth_write,
            depth_compare: state.depth_compare,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(RenderError::Shader {
            name: kind.name(),
            origin: source.origin,
            message: error.to_string(),
        });
    }
    Ok(Program {
        pipeline,
        origin: source.origin,
    })
}
