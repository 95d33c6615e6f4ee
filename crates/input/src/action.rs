use shadelab_scene::ShadingMode;

/// A high-level action produced from raw mouse and keyboard input.
///
/// The app consumes actions, never raw events, so every project shares the
/// same mapping rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Rotate the object camera by a drag delta in pixels.
    OrbitCamera { dx: f32, dy: f32 },
    /// Move the object camera closer or further by a vertical drag delta in pixels.
    ZoomCamera(f32),
    /// Rotate the light around the scene.
    OrbitLight { dx: f32, dy: f32 },
    /// Rotate the camera looking at the render-target quad.
    OrbitPlane { dx: f32, dy: f32 },
    /// Zoom the camera looking at the render-target quad.
    ZoomPlane(f32),
    /// Switch between perspective and orthographic projection.
    ToggleProjection,
    /// Select which shading terms are displayed.
    SetShading(ShadingMode),
    /// Rebuild shader programs from disk.
    ReloadShaders,
    /// Show or hide the on-screen overlay.
    ToggleHud,
    /// Close the window.
    Quit,
}
