//! Scene state for the shadelab projects: orbit camera, orbiting light,
//! projection and shading modes, and the matrices every render pass needs.
//!
//! # Invariants
//! - Pure math: nothing here touches the GPU or the window.
//! - Camera pitch stays within +/-1.55 rad and distance within [0.5, 5].
//! - The light lives in world space; the mesh transform never moves it.

mod camera;
mod project;
mod state;

pub use camera::{
    Lens, OrbitCamera, OrbitLight, Projection, MAX_DISTANCE, MIN_DISTANCE, PITCH_LIMIT,
    ROTATE_SPEED, ZOOM_SPEED,
};
pub use project::{Project, ShadingMode};
pub use state::{ObjectFit, PassMatrices, SceneState, TARGET_SIZE};

pub fn crate_info() -> &'static str {
    "shadelab-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
