use crate::action::Action;
use shadelab_scene::{Project, ShadingMode};

/// Keys the projects react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    F1,
    F6,
    P,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    N,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

/// Turns raw button, cursor and key events into [`Action`]s for one project.
#[derive(Debug, Clone)]
pub struct InputMap {
    project: Project,
    left_down: bool,
    right_down: bool,
    modifiers: Modifiers,
    last_cursor: Option<(f64, f64)>,
}

impl InputMap {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            left_down: false,
            right_down: false,
            modifiers: Modifiers::default(),
            last_cursor: None,
        }
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn is_dragging(&self) -> bool {
        self.left_down || self.right_down
    }

    /// Pressing a button anchors the drag at the current cursor position.
    pub fn button(&mut self, button: Button, pressed: bool, cursor: Option<(f64, f64)>) {
        match button {
            Button::Left => self.left_down = pressed,
            Button::Right => self.right_down = pressed,
        }
        if pressed && cursor.is_some() {
            self.last_cursor = cursor;
        }
    }

    /// The cursor left the window; the next move starts a fresh delta.
    pub fn cursor_left(&mut self) {
        self.last_cursor = None;
    }

    /// Track the cursor and produce drag actions for held buttons.
    pub fn cursor_moved(&mut self, x: f64, y: f64) -> Vec<Action> {
        let previous = self.last_cursor.replace((x, y));
        let Some((px, py)) = previous else {
            return Vec::new();
        };
        if !self.project.camera_input() {
            return Vec::new();
        }
        let dx = (x - px) as f32;
        let dy = (y - py) as f32;
        let plane = self.project.plane_camera() && self.modifiers.alt;

        let mut actions = Vec::new();
        if self.left_down {
            actions.push(if self.modifiers.ctrl && self.project.lighting() {
                Action::OrbitLight { dx, dy }
            } else if plane {
                Action::OrbitPlane { dx, dy }
            } else {
                Action::OrbitCamera { dx, dy }
            });
        }
        if self.right_down {
            actions.push(if plane {
                Action::ZoomPlane(dy)
            } else {
                Action::ZoomCamera(dy)
            });
        }
        actions
    }

    /// Map a key press to an action, if this project reacts to it.
    pub fn key_pressed(&self, key: Key) -> Option<Action> {
        let lighting = self.project.lighting();
        match key {
            Key::Escape => Some(Action::Quit),
            Key::F6 => Some(Action::ReloadShaders),
            Key::F1 => Some(Action::ToggleHud),
            Key::P if self.project.projection_toggle() => Some(Action::ToggleProjection),
            Key::Digit0 if lighting => Some(Action::SetShading(ShadingMode::Full)),
            Key::Digit1 if lighting => Some(Action::SetShading(ShadingMode::Ambient)),
            Key::Digit2 if lighting => Some(Action::SetShading(ShadingMode::Diffuse)),
            Key::Digit3 if lighting => Some(Action::SetShading(ShadingMode::Specular)),
            Key::N if lighting => Some(Action::SetShading(ShadingMode::Normal)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(map: &mut InputMap, button: Button, from: (f64, f64), to: (f64, f64)) -> Vec<Action> {
        map.cursor_moved(from.0, from.1);
        map.button(button, true, Some(from));
        let actions = map.cursor_moved(to.0, to.1);
        map.button(button, false, Some(to));
        actions
    }

    #[test]
    fn left_drag_orbits_camera() {
        let mut map = InputMap::new(Project::Shading);
        let actions = drag(&mut map, Button::Left, (10.0, 10.0), (15.0, 7.0));
        assert_eq!(actions, vec![Action::OrbitCamera { dx: 5.0, dy: -3.0 }]);
    }

    #[test]
    fn ctrl_left_drag_orbits_light() {
        let mut map = InputMap::new(Project::Shading);
        map.set_modifiers(Modifiers {
            ctrl: true,
            alt: false,
        });
        let actions = drag(&mut map, Button::Left, (0.0, 0.0), (4.0, 4.0));
        assert_eq!(actions, vec![Action::OrbitLight { dx: 4.0, dy: 4.0 }]);
    }

    #[test]
    fn ctrl_is_ignored_without_lighting() {
        let mut map = InputMap::new(Project::Transformations);
        map.set_modifiers(Modifiers {
            ctrl: true,
            alt: false,
        });
        let actions = drag(&mut map, Button::Left, (0.0, 0.0), (4.0, 0.0));
        assert_eq!(actions, vec![Action::OrbitCamera { dx: 4.0, dy: 0.0 }]);
    }

    #[test]
    fn right_drag_zooms_on_vertical_motion() {
        let mut map = InputMap::new(Project::Transformations);
        let actions = drag(&mut map, Button::Right, (0.0, 0.0), (50.0, 8.0));
        assert_eq!(actions, vec![Action::ZoomCamera(8.0)]);
    }

    #[test]
    fn alt_routes_to_plane_camera_only_for_render_target() {
        let alt = Modifiers {
            ctrl: false,
            alt: true,
        };
        let mut map = InputMap::new(Project::RenderToTexture);
        map.set_modifiers(alt);
        assert_eq!(
            drag(&mut map, Button::Left, (0.0, 0.0), (2.0, 1.0)),
            vec![Action::OrbitPlane { dx: 2.0, dy: 1.0 }]
        );
        assert_eq!(
            drag(&mut map, Button::Right, (0.0, 0.0), (2.0, 1.0)),
            vec![Action::ZoomPlane(1.0)]
        );

        let mut map = InputMap::new(Project::Textures);
        map.set_modifiers(alt);
        assert_eq!(
            drag(&mut map, Button::Left, (0.0, 0.0), (2.0, 1.0)),
            vec![Action::OrbitCamera { dx: 2.0, dy: 1.0 }]
        );
    }

    #[test]
    fn moves_without_buttons_only_track() {
        let mut map = InputMap::new(Project::Shading);
        assert!(map.cursor_moved(1.0, 1.0).is_empty());
        assert!(map.cursor_moved(5.0, 5.0).is_empty());
        assert!(!map.is_dragging());
    }

    #[test]
    fn press_reanchors_cursor() {
        let mut map = InputMap::new(Project::Shading);
        map.cursor_moved(0.0, 0.0);
        map.button(Button::Left, true, Some((100.0, 100.0)));
        assert_eq!(
            map.cursor_moved(101.0, 100.0),
            vec![Action::OrbitCamera { dx: 1.0, dy: 0.0 }]
        );
    }

    #[test]
    fn point_cloud_ignores_drags() {
        let mut map = InputMap::new(Project::PointCloud);
        let actions = drag(&mut map, Button::Left, (0.0, 0.0), (9.0, 9.0));
        assert!(actions.is_empty());
        assert_eq!(map.key_pressed(Key::P), None);
        assert_eq!(map.key_pressed(Key::Escape), Some(Action::Quit));
        assert_eq!(map.key_pressed(Key::F6), Some(Action::ReloadShaders));
    }

    #[test]
    fn shading_keys_need_lighting() {
        let map = InputMap::new(Project::Transformations);
        assert_eq!(map.key_pressed(Key::Digit1), None);
        assert_eq!(map.key_pressed(Key::P), Some(Action::ToggleProjection));

        let map = InputMap::new(Project::Textures);
        assert_eq!(
            map.key_pressed(Key::Digit0),
            Some(Action::SetShading(ShadingMode::Full))
        );
        assert_eq!(
            map.key_pressed(Key::Digit3),
            Some(Action::SetShading(ShadingMode::Specular))
        );
        assert_eq!(
            map.key_pressed(Key::N),
            Some(Action::SetShading(ShadingMode::Normal))
        );
    }

    #[test]
    fn leaving_the_window_resets_the_anchor() {
        let mut map = InputMap::new(Project::Shading);
        map.cursor_moved(0.0, 0.0);
        map.button(Button::Left, true, None);
        map.cursor_left();
        assert!(map.cursor_moved(50.0, 50.0).is_empty());
        assert_eq!(
            map.cursor_moved(51.0, 50.0),
            vec![Action::OrbitCamera { dx: 1.0, dy: 0.0 }]
        );
    }
}
