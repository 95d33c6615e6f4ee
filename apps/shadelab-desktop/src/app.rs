use shadelab_assets::{LoadedMesh, MeshStats};
use shadelab_input::{Action, Button, InputMap, Key, Modifiers};
use shadelab_scene::{ObjectFit, Project, SceneState};
use std::path::PathBuf;

/// Work the GPU side has to do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ReloadShaders,
    Quit,
}

/// Everything about a running project that is not a GPU resource.
pub struct AppState {
    pub scene: SceneState,
    pub input: InputMap,
    pub mesh_path: PathBuf,
    pub stats: MeshStats,
    pub show_hud: bool,
    /// Result of the last shader reload, shown in the HUD.
    pub reload_status: Option<String>,
    cursor: Option<(f64, f64)>,
}

impl AppState {
    pub fn new(project: Project, mesh_path: PathBuf, mesh: &LoadedMesh) -> Self {
        let fit = ObjectFit::from_bounds(mesh.bounds.min, mesh.bounds.max);
        Self {
            scene: SceneState::new(project, fit),
            input: InputMap::new(project),
            mesh_path,
            stats: mesh.stats(),
            show_hud: true,
            reload_status: None,
            cursor: None,
        }
    }

    pub fn project(&self) -> Project {
        self.scene.project
    }

    pub fn key_pressed(&mut self, key: Key) -> Effect {
        match self.input.key_pressed(key) {
            Some(action) => self.apply(action),
            None => Effect::None,
        }
    }

    pub fn button(&mut self, button: Button, pressed: bool) {
        self.input.button(button, pressed, self.cursor);
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
        for action in self.input.cursor_moved(x, y) {
            self.apply(action);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = None;
        self.input.cursor_left();
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);
    }

    /// Apply one action to the scene and report what is left for the GPU side.
    pub fn apply(&mut self, action: Action) -> Effect {
        let scene = &mut self.scene;
        match action {
            Action::OrbitCamera { dx, dy } => scene.camera.orbit(dx, dy),
            Action::ZoomCamera(dy) => scene.camera.zoom(dy),
            Action::OrbitLight { dx, dy } => scene.light.orbit(dx, dy),
            Action::OrbitPlane { dx, dy } => scene.plane_camera.orbit(dx, dy),
            Action::ZoomPlane(dy) => scene.plane_camera.zoom(dy),
            Action::ToggleProjection => {
                scene.projection = scene.projection.toggled();
                tracing::info!("projection: {}", scene.projection.label());
            }
            Action::SetShading(mode) => {
                if scene.shading != mode {
                    scene.shading = mode;
                    tracing::info!("shading: {}", mode.label());
                }
            }
            Action::ToggleHud => self.show_hud = !self.show_hud,
            Action::ReloadShaders => return Effect::ReloadShaders,
            Action::Quit => return Effect::Quit,
        }
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use shadelab_assets::{Aabb, DrawRange, MaterialDesc};
    use shadelab_scene::{Projection, ShadingMode};

    fn mesh() -> LoadedMesh {
        LoadedMesh {
            vertices: Vec::new(),
            ranges: vec![DrawRange {
                first: 0,
                count: 0,
                material: None,
            }],
            points: vec![[-1.0, 0.0, -1.0], [1.0, 2.0, 1.0]],
            materials: vec![MaterialDesc::default()],
            bounds: Aabb {
                min: Vec3::new(-1.0, 0.0, -1.0),
                max: Vec3::new(1.0, 2.0, 1.0),
            },
            has_normals: false,
            has_uvs: false,
        }
    }

    fn state(project: Project) -> AppState {
        AppState::new(project, PathBuf::from("m.obj"), &mesh())
    }

    #[test]
    fn starts_fitted_with_hud_visible() {
        let app = state(Project::Shading);
        assert_eq!(app.scene.fit.center, Vec3::new(0.0, 1.0, 0.0));
        assert!(app.show_hud);
        assert_eq!(app.stats.material_count, 1);
    }

    #[test]
    fn keys_change_modes() {
        let mut app = state(Project::Textures);
        assert_eq!(app.key_pressed(Key::P), Effect::None);
        assert_eq!(app.scene.projection, Projection::Orthographic);
        app.key_pressed(Key::N);
        assert_eq!(app.scene.shading, ShadingMode::Normal);
        app.key_pressed(Key::F1);
        assert!(!app.show_hud);
        assert_eq!(app.key_pressed(Key::F6), Effect::ReloadShaders);
        assert_eq!(app.key_pressed(Key::Escape), Effect::Quit);
    }

    #[test]
    fn drag_orbits_camera() {
        let mut app = state(Project::Transformations);
        let before = app.scene.camera;
        app.cursor_moved(100.0, 100.0);
        app.button(Button::Left, true);
        app.cursor_moved(140.0, 100.0);
        app.button(Button::Left, false);
        assert!(app.scene.camera.yaw > before.yaw);
        assert_eq!(app.scene.camera.pitch, before.pitch);
    }

    #[test]
    fn ctrl_drag_moves_light_not_camera() {
        let mut app = state(Project::Shading);
        let camera = app.scene.camera;
        let light = app.scene.light;
        app.set_modifiers(Modifiers {
            ctrl: true,
            alt: false,
        });
        app.cursor_moved(0.0, 0.0);
        app.button(Button::Left, true);
        app.cursor_moved(10.0, 0.0);
        assert_eq!(app.scene.camera, camera);
        assert_ne!(app.scene.light, light);
    }

    #[test]
    fn plane_zoom_leaves_object_camera() {
        let mut app = state(Project::RenderToTexture);
        let distance = app.scene.camera.distance;
        let plane = app.scene.plane_camera.distance;
        app.apply(Action::ZoomPlane(20.0));
        assert_eq!(app.scene.camera.distance, distance);
        assert!(app.scene.plane_camera.distance > plane);
    }

    #[test]
    fn point_cloud_is_static() {
        let mut app = state(Project::PointCloud);
        let camera = app.scene.camera;
        app.cursor_moved(0.0, 0.0);
        app.button(Button::Left, true);
        app.cursor_moved(50.0, 50.0);
        assert_eq!(app.scene.camera, camera);
        assert_eq!(app.key_pressed(Key::P), Effect::None);
        assert_eq!(app.scene.projection, Projection::Perspective);
    }
}
