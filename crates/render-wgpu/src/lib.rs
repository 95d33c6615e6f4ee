//! wgpu render backend for the shadelab projects.
//!
//! Draws points, Blinn-Phong meshes, a render-to-texture quad, and a
//! cube-mapped scene with a planar mirror. Shader programs are read from a
//! directory at startup and on request, with embedded copies as fallback.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - A failed shader reload keeps the previous working pipeline.
//! - Every pass in a frame writes its own uniform buffer.

mod environment;
mod frame;
mod layouts;
mod material;
mod mesh;
mod programs;
mod renderer;
mod shaders;
mod target;
mod texture;

pub use frame::FrameUniforms;
pub use material::MaterialUniforms;
pub use mesh::GpuVertex;
pub use programs::{DEPTH_FORMAT, ReloadReport};
pub use renderer::{DEFAULT_TARGET_SIZE, RendererOptions, SceneRenderer, programs_for};
pub use shaders::{ShaderKind, ShaderLibrary, ShaderOrigin, ShaderSource};

/// Errors from the render backend.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("shader {name} ({origin}) failed to build: {message}")]
    Shader {
        name: &'static str,
        origin: ShaderOrigin,
        message: String,
    },
    #[error("no {0} program was built for this project")]
    MissingProgram(&'static str),
    #[error("the environment project needs a cube map")]
    MissingEnvironment,
}

pub fn crate_info() -> &'static str {
    "shadelab-render-wgpu v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }

    #[test]
    fn shader_error_names_program_and_origin() {
        let err = RenderError::Shader {
            name: "mesh",
            origin: ShaderOrigin::Embedded,
            message: "expected ';'".into(),
        };
        assert_eq!(
            err.to_string(),
            "shader mesh (embedded) failed to build: expected ';'"
        );
    }
}
