use crate::app::AppState;
use egui::Context as EguiContext;

impl AppState {
    pub fn draw_ui(&self, ctx: &EguiContext, shaders: &[(String, String)]) {
        if !self.show_hud {
            return;
        }
        let project = self.project();
        let scene = &self.scene;

        egui::SidePanel::left("hud")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading(project.title());
                ui.label(self.mesh_path.display().to_string());
                ui.separator();

                ui.label(format!(
                    "Vertices: {}  Faces: {}",
                    self.stats.vertex_count, self.stats.face_count
                ));
                ui.label(format!(
                    "Materials: {}  Ranges: {}",
                    self.stats.material_count, self.stats.range_count
                ));
                let fit = &scene.fit;
                ui.label(format!(
                    "Center: ({:.3}, {:.3}, {:.3})  Scale: {:.3}",
                    fit.center.x, fit.center.y, fit.center.z, fit.scale
                ));
                ui.separator();

                if project.projection_toggle() {
                    ui.label(format!("Projection: {}", scene.projection.label()));
                }
                if project.lighting() {
                    ui.label(format!("Shading: {}", scene.shading.label()));
                }
                let cam = &scene.camera;
                ui.label(format!(
                    "Camera: yaw {:.2}  pitch {:.2}  dist {:.2}",
                    cam.yaw, cam.pitch, cam.distance
                ));
                if project.lighting() {
                    let light = scene.light.position();
                    ui.label(format!(
                        "Light: ({:.2}, {:.2}, {:.2})",
                        light.x, light.y, light.z
                    ));
                }
                if project.plane_camera() {
                    let plane = &scene.plane_camera;
                    ui.label(format!(
                        "Plane camera: yaw {:.2}  pitch {:.2}  dist {:.2}",
                        plane.yaw, plane.pitch, plane.distance
                    ));
                }
                ui.separator();

                ui.heading("Shaders");
                for (name, origin) in shaders {
                    ui.label(format!("{name}: {origin}"));
                }
                if let Some(status) = &self.reload_status {
                    ui.label(status);
                }
                ui.separator();

                for line in controls(project) {
                    ui.small(line);
                }
            });
    }
}

/// Control help for a project, one line per binding.
pub fn controls(project: shadelab_scene::Project) -> Vec<&'static str> {
    let mut lines = Vec::new();
    if project.camera_input() {
        lines.push("LMB drag: orbit camera");
        lines.push("RMB drag: zoom");
    }
    if project.lighting() {
        lines.push("Ctrl + LMB drag: move light");
    }
    if project.plane_camera() {
        lines.push("Alt + LMB / RMB drag: plane camera");
    }
    if project.projection_toggle() {
        lines.push("P: perspective / orthographic");
    }
    if project.lighting() {
        lines.push("0 full, 1 ambient, 2 diffuse, 3 specular, N normals");
    }
    lines.push("F6: reload shaders");
    lines.push("F1: toggle HUD | Esc: quit");
    lines
}
