use crate::camera::{Lens, OrbitCamera, OrbitLight, Projection};
use crate::project::{Project, ShadingMode};
use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Size the longest side of the mesh is scaled to.
pub const TARGET_SIZE: f32 = 2.0;

/// Centers a mesh at the origin and scales its longest side to [`TARGET_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectFit {
    pub center: Vec3,
    pub scale: f32,
    /// Unscaled bounding box size.
    pub extent: Vec3,
}

impl Default for ObjectFit {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            scale: 1.0,
            extent: Vec3::ZERO,
        }
    }
}

impl ObjectFit {
    pub fn from_bounds(min: Vec3, max: Vec3) -> Self {
        let extent = max - min;
        let max_extent = extent.max_element();
        let scale = if max_extent > 1e-8 {
            TARGET_SIZE / max_extent
        } else {
            1.0
        };
        Self {
            center: (min + max) * 0.5,
            scale,
            extent,
        }
    }

    pub fn max_extent(&self) -> f32 {
        self.extent.max_element()
    }

    /// M = S(scale) * T(-center)
    pub fn model(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale)) * Mat4::from_translation(-self.center)
    }

    /// Starting camera distance for a fitted mesh.
    pub fn initial_distance(&self) -> f32 {
        let diagonal = self.extent.length() * self.scale;
        (diagonal * 0.1).max(2.0)
    }

    /// Height of the bottom of the fitted mesh, where the mirror plane sits.
    pub fn floor_height(&self) -> f32 {
        -0.5 * self.extent.y * self.scale
    }
}

/// Everything one render pass needs from the scene, already composed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassMatrices {
    pub mvp: Mat4,
    pub model_view: Mat4,
    /// Inverse-transpose of `model_view`.
    pub normal: Mat4,
    pub model: Mat4,
    /// Maps clip-space far-plane points to world directions, ignoring camera translation.
    pub sky_inverse: Mat4,
    pub light_view: Vec3,
    pub light_world: Vec3,
    pub eye: Vec3,
}

impl PassMatrices {
    fn compose(
        projection: Mat4,
        sky_projection: Mat4,
        view: Mat4,
        model: Mat4,
        light: Vec3,
    ) -> Self {
        let model_view = view * model;
        let rotation = Mat4::from_mat3(Mat3::from_mat4(view));
        Self {
            mvp: projection * model_view,
            model_view,
            normal: model_view.inverse().transpose(),
            model,
            sky_inverse: (sky_projection * rotation).inverse(),
            light_view: view.transform_point3(light),
            light_world: light,
            eye: view.inverse().transform_point3(Vec3::ZERO),
        }
    }
}

/// Interactive state of one running project.
///
/// Only input actions mutate it; the renderer reads it once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub project: Project,
    pub projection: Projection,
    pub shading: ShadingMode,
    /// Camera around the mesh.
    pub camera: OrbitCamera,
    /// Camera around the textured quad in the render-to-texture project.
    pub plane_camera: OrbitCamera,
    pub light: OrbitLight,
    pub fit: ObjectFit,
    pub lens: Lens,
}

impl SceneState {
    pub fn new(project: Project, fit: ObjectFit) -> Self {
        Self {
            project,
            projection: Projection::default(),
            shading: ShadingMode::default(),
            camera: OrbitCamera::at_distance(fit.initial_distance()),
            plane_camera: OrbitCamera::at_distance(2.5),
            light: OrbitLight::default(),
            fit,
            lens: Lens::default(),
        }
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.lens
            .projection(self.projection, aspect, self.camera.distance)
    }

    pub fn mvp(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.model_view()
    }

    pub fn model_view(&self) -> Mat4 {
        self.camera.view_matrix() * self.fit.model()
    }

    pub fn normal_matrix(&self) -> Mat4 {
        self.model_view().inverse().transpose()
    }

    /// Light position in view space. The light is fixed in the world, not attached to the mesh.
    pub fn light_position_view(&self) -> Vec3 {
        self.camera
            .view_matrix()
            .transform_point3(self.light.position())
    }

    /// Height of the mirror plane under the mesh.
    pub fn mirror_height(&self) -> f32 {
        self.fit.floor_height()
    }

    /// Reflection across the plane y = mirror height.
    pub fn mirror_matrix(&self) -> Mat4 {
        let h = self.mirror_height();
        Mat4::from_translation(Vec3::new(0.0, 2.0 * h, 0.0))
            * Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0))
    }

    /// Mirror plane transform: a unit quad in XY laid flat and sized to the scene.
    pub fn mirror_plane_model(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.mirror_height(), 0.0))
            * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2)
            * Mat4::from_scale(Vec3::splat(3.0))
    }

    /// The mesh seen through the object camera.
    pub fn object_pass(&self, aspect: f32) -> PassMatrices {
        PassMatrices::compose(
            self.projection_matrix(aspect),
            self.lens.perspective(aspect),
            self.camera.view_matrix(),
            self.fit.model(),
            self.light.position(),
        )
    }

    /// The mesh seen through the object camera after reflection in the mirror plane.
    pub fn mirrored_pass(&self, aspect: f32) -> PassMatrices {
        // `model` and `light_world` stay in the real world; `eye` becomes the
        // virtual eye below the plane.
        PassMatrices::compose(
            self.projection_matrix(aspect),
            self.lens.perspective(aspect),
            self.camera.view_matrix() * self.mirror_matrix(),
            self.fit.model(),
            self.light.position(),
        )
    }

    /// The mirror plane itself, seen through the object camera.
    pub fn mirror_plane_pass(&self, aspect: f32) -> PassMatrices {
        PassMatrices::compose(
            self.projection_matrix(aspect),
            self.lens.perspective(aspect),
            self.camera.view_matrix(),
            self.mirror_plane_model(),
            self.light.position(),
        )
    }

    /// The quad showing the render target, seen through the plane camera.
    pub fn plane_pass(&self, aspect: f32) -> PassMatrices {
        let projection = self
            .lens
            .projection(self.projection, aspect, self.plane_camera.distance);
        PassMatrices::compose(
            projection,
            self.lens.perspective(aspect),
            self.plane_camera.view_matrix(),
            Mat4::IDENTITY,
            self.light.position(),
        )
    }
}
