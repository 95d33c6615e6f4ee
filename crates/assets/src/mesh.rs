use crate::AssetError;
use crate::material::MaterialDesc;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

/// One corner of a flattened triangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// A contiguous run of vertices drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRange {
    pub first: u32,
    pub count: u32,
    /// Index into [`LoadedMesh::materials`], or `None` for the fallback material.
    pub material: Option<usize>,
}

/// A triangle mesh flattened for non-indexed drawing, three vertices per face.
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub vertices: Vec<MeshVertex>,
    pub ranges: Vec<DrawRange>,
    /// Every distinct position of the source mesh, for point-cloud display.
    pub points: Vec<[f32; 3]>,
    pub materials: Vec<MaterialDesc>,
    pub bounds: Aabb,
    pub has_normals: bool,
    pub has_uvs: bool,
}

/// Summary printed at startup and by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub face_count: usize,
    pub bounds: Aabb,
    pub material_count: usize,
    pub range_count: usize,
    pub has_normals: bool,
    pub has_uvs: bool,
}

impl LoadedMesh {
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertex_count: self.points.len(),
            face_count: self.face_count(),
            bounds: self.bounds,
            material_count: self.materials.len(),
            range_count: self.ranges.len(),
            has_normals: self.has_normals,
            has_uvs: self.has_uvs,
        }
    }

    /// Material for a range, falling back when the range has none.
    pub fn material_for(&self, range: &DrawRange) -> MaterialDesc {
        range
            .material
            .and_then(|i| self.materials.get(i))
            .cloned()
            .unwrap_or_else(MaterialDesc::fallback)
    }
}

/// Load an OBJ file and its MTL library.
///
/// Faces are triangulated. A model without a normal stream gets area-weighted
/// vertex normals; in a file that has normals, a corner with no `vn` reference
/// takes the filler normal the OBJ reader assigns (the previous corner's).
/// Missing texture coordinates become (0, 0).
pub fn load_obj(path: impl AsRef<Path>) -> Result<LoadedMesh, AssetError> {
    let path = path.as_ref();
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    };
    let (models, materials) = tobj::load_obj(path, &options).map_err(|source| AssetError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let materials = match materials {
        Ok(materials) => materials
            .iter()
            .map(|m| MaterialDesc::from_mtl(m, path))
            .collect(),
        Err(e) => {
            tracing::warn!("no usable material library for {}: {e}", path.display());
            Vec::new()
        }
    };

    let mut vertices = Vec::new();
    let mut ranges = Vec::new();
    let mut points = Vec::new();
    let mut seen = HashSet::new();
    let mut has_normals = false;
    let mut has_uvs = false;

    for model in &models {
        let mesh = &model.mesh;
        // Each model carries its own copy of the positions it uses.
        for p in mesh.positions.chunks_exact(3) {
            if seen.insert([p[0].to_bits(), p[1].to_bits(), p[2].to_bits()]) {
                points.push([p[0], p[1], p[2]]);
            }
        }

        let face_count = mesh.indices.len() / 3;
        if face_count == 0 {
            continue;
        }

        let file_normals =
            !mesh.normals.is_empty() && mesh.normal_indices.len() == mesh.indices.len();
        let file_uvs =
            !mesh.texcoords.is_empty() && mesh.texcoord_indices.len() == mesh.indices.len();
        has_normals |= file_normals;
        has_uvs |= file_uvs;

        let smooth = if file_normals {
            Vec::new()
        } else {
            smooth_normals(&mesh.positions, &mesh.indices)
        };

        let first = vertices.len() as u32;
        for (corner, &vi) in mesh.indices.iter().take(face_count * 3).enumerate() {
            let vi = vi as usize;
            let position = [
                mesh.positions[3 * vi],
                mesh.positions[3 * vi + 1],
                mesh.positions[3 * vi + 2],
            ];
            let normal = if file_normals {
                let ni = mesh.normal_indices[corner] as usize;
                mesh.normals
                    .get(3 * ni..3 * ni + 3)
                    .map(|n| [n[0], n[1], n[2]])
                    .unwrap_or([0.0, 1.0, 0.0])
            } else {
                smooth[vi]
            };
            let uv = if file_uvs {
                let ti = mesh.texcoord_indices[corner] as usize;
                mesh.texcoords
                    .get(2 * ti..2 * ti + 2)
                    .map(|t| [t[0], t[1]])
                    .unwrap_or([0.0, 0.0])
            } else {
                [0.0, 0.0]
            };
            vertices.push(MeshVertex {
                position,
                normal,
                uv,
            });
        }

        ranges.push(DrawRange {
            first,
            count: (face_count * 3) as u32,
            material: mesh.material_id.filter(|&i| i < materials.len()),
        });
    }

    let bounds = Aabb::from_points(points.iter().map(|p| Vec3::from_array(*p)))
        .ok_or_else(|| AssetError::EmptyMesh(path.to_path_buf()))?;

    tracing::debug!(
        "loaded {}: {} models, {} faces, {} materials",
        path.display(),
        models.len(),
        vertices.len() / 3,
        materials.len()
    );

    Ok(LoadedMesh {
        vertices,
        ranges,
        points,
        materials,
        bounds,
        has_normals,
        has_uvs,
    })
}

/// Area-weighted per-position normals. Positions touched by no face get +Y.
fn smooth_normals(positions: &[f32], indices: &[u32]) -> Vec<[f32; 3]> {
    let at = |i: u32| {
        let i = i as usize * 3;
        Vec3::new(positions[i], positions[i + 1], positions[i + 2])
    };
    let mut sums = vec![Vec3::ZERO; positions.len() / 3];
    for tri in indices.chunks_exact(3) {
        // Unnormalised cross product weights each face by twice its area.
        let face = (at(tri[1]) - at(tri[0])).cross(at(tri[2]) - at(tri[0]));
        for &i in tri {
            sums[i as usize] += face;
        }
    }
    sums.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QUAD_OBJ: &str = "\
v 0 0 0
v 2 0 0
v 2 1 0
v 0 1 0
f 1 2 3 4
";

    const TEXTURED_OBJ: &str = "\
mtllib scene.mtl
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 4
vt 0 0
vt 1 0
vt 1 1
vn 0 0 1
o first
usemtl red
f 1/1/1 2/2/1 3/3/1
o second
usemtl blue
f 1/1/1 3/3/1 4/1/1
";

    const SCENE_MTL: &str = "\
newmtl red
Kd 1 0 0
Ks 0.5 0.5 0.5
Ns 32
map_Kd textures/red.png

newmtl blue
Kd 0 0 1
";

    #[test]
    fn quad_is_triangulated_with_computed_normals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        fs::write(&path, QUAD_OBJ).unwrap();

        let mesh = load_obj(&path).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.points.len(), 4);
        assert!(!mesh.has_normals);
        assert!(!mesh.has_uvs);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
            assert_eq!(v.uv, [0.0, 0.0]);
        }
        assert_eq!(mesh.bounds.min, Vec3::ZERO);
        assert_eq!(mesh.bounds.max, Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(mesh.ranges.len(), 1);
        assert_eq!(mesh.ranges[0].material, None);
    }

    #[test]
    fn models_become_material_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.obj");
        fs::write(&path, TEXTURED_OBJ).unwrap();
        fs::write(dir.path().join("scene.mtl"), SCENE_MTL).unwrap();

        let mesh = load_obj(&path).unwrap();
        assert!(mesh.has_normals);
        assert!(mesh.has_uvs);
        assert_eq!(mesh.materials.len(), 2);
        assert_eq!(mesh.ranges.len(), 2);
        assert_eq!(mesh.ranges[0].first, 0);
        assert_eq!(mesh.ranges[1].first, 3);
        assert_eq!(mesh.ranges[1].count, 3);

        let red = mesh.material_for(&mesh.ranges[0]);
        assert_eq!(red.name, "red");
        assert_eq!(red.kd, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(red.ns, 32.0);
        assert_eq!(
            red.diffuse_map.as_deref(),
            Some(dir.path().join("textures/red.png").as_path())
        );
        let blue = mesh.material_for(&mesh.ranges[1]);
        assert_eq!(blue.name, "blue");
        assert!(blue.diffuse_map.is_none());

        assert_eq!(mesh.vertices[1].uv, [1.0, 0.0]);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.bounds.max.z, 4.0);
        assert_eq!(mesh.points.len(), 4);
    }

    #[test]
    fn positions_shared_between_objects_count_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seam.obj");
        fs::write(
            &path,
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\no a\nf 1 2 3\no b\nf 1 3 4\n",
        )
        .unwrap();

        let mesh = load_obj(&path).unwrap();
        assert_eq!(mesh.ranges.len(), 2);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.points.len(), 4);
        assert_eq!(mesh.stats().vertex_count, 4);
    }

    #[test]
    fn faces_without_normal_refs_reuse_the_file_normal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.obj");
        fs::write(
            &path,
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\nf 1 3 4\n",
        )
        .unwrap();

        let mesh = load_obj(&path).unwrap();
        assert!(mesh.has_normals);
        assert_eq!(mesh.vertices.len(), 6);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn missing_material_library_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.obj");
        fs::write(&path, TEXTURED_OBJ).unwrap();

        let mesh = load_obj(&path).unwrap();
        assert!(mesh.materials.is_empty());
        assert!(mesh.ranges.iter().all(|r| r.material.is_none()));
        let m = mesh.material_for(&mesh.ranges[0]);
        assert_eq!(m, MaterialDesc::fallback());
    }

    #[test]
    fn empty_obj_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.obj");
        fs::write(&path, "# nothing here\n").unwrap();
        assert!(matches!(load_obj(&path), Err(AssetError::EmptyMesh(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_obj(dir.path().join("nope.obj")).unwrap_err();
        assert!(matches!(err, AssetError::Obj { .. }));
        assert!(err.to_string().contains("nope.obj"));
    }

    #[test]
    fn smooth_normals_average_adjacent_faces() {
        // Two faces meeting at a right angle along the shared edge 0-1.
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, //
        ];
        let indices = [0, 1, 2, 0, 3, 1];
        let normals = smooth_normals(&positions, &indices);
        let shared = Vec3::from_array(normals[0]);
        let expected = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert!((shared - expected).length() < 1e-5);
        assert_eq!(normals[2], [0.0, 0.0, 1.0]);
        assert_eq!(normals[3], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn aabb_of_nothing_is_none() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
        let b = Aabb::from_points([Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 2.0, 0.0)]).unwrap();
        assert_eq!(b.center(), Vec3::new(0.0, 0.0, 1.5));
        assert_eq!(b.extent(), Vec3::new(2.0, 4.0, 3.0));
    }
}
