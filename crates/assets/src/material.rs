use crate::texture::resolve_texture_path;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Surface parameters read from an MTL `newmtl` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub name: String,
    pub ka: Vec3,
    pub kd: Vec3,
    pub ks: Vec3,
    /// Transmission filter.
    pub tf: Vec3,
    /// Specular exponent.
    pub ns: f32,
    /// Index of refraction.
    pub ni: f32,
    pub illum: u32,
    /// `map_Kd`, resolved against the OBJ's directory.
    pub diffuse_map: Option<PathBuf>,
    /// `map_Ks`, resolved against the OBJ's directory.
    pub specular_map: Option<PathBuf>,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            name: String::new(),
            ka: Vec3::ZERO,
            kd: Vec3::ONE,
            ks: Vec3::ZERO,
            tf: Vec3::ZERO,
            ns: 0.0,
            ni: 1.0,
            illum: 2,
            diffuse_map: None,
            specular_map: None,
        }
    }
}

impl MaterialDesc {
    /// Used for meshes without a material library, so every shading term shows up.
    pub fn fallback() -> Self {
        Self {
            name: "fallback".into(),
            ka: Vec3::splat(0.1),
            kd: Vec3::splat(0.8),
            ks: Vec3::splat(0.5),
            ns: 64.0,
            ..Self::default()
        }
    }

    pub fn from_mtl(mtl: &tobj::Material, obj_path: &Path) -> Self {
        let defaults = Self::default();
        let vec3 = |v: Option<[f32; 3]>, d: Vec3| v.map(Vec3::from_array).unwrap_or(d);
        let map = |name: &Option<String>| {
            name.as_deref()
                .and_then(|rel| resolve_texture_path(obj_path, rel))
        };
        Self {
            name: mtl.name.clone(),
            ka: vec3(mtl.ambient, defaults.ka),
            kd: vec3(mtl.diffuse, defaults.kd),
            ks: vec3(mtl.specular, defaults.ks),
            tf: mtl
                .unknown_param
                .get("Tf")
                .and_then(|s| parse_vec3(s))
                .unwrap_or(defaults.tf),
            ns: mtl.shininess.unwrap_or(defaults.ns),
            ni: mtl.optical_density.unwrap_or(defaults.ni),
            illum: mtl
                .illumination_model
                .map(u32::from)
                .unwrap_or(defaults.illum),
            diffuse_map: map(&mtl.diffuse_texture),
            specular_map: map(&mtl.specular_texture),
        }
    }
}

/// Parse "r g b" or a single value applied to all three channels.
fn parse_vec3(s: &str) -> Option<Vec3> {
    let values: Vec<f32> = s
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        [v] => Some(Vec3::splat(*v)),
        [r, g, b, ..] => Some(Vec3::new(*r, *g, *b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_mtl_conventions() {
        let m = MaterialDesc::default();
        assert_eq!(m.kd, Vec3::ONE);
        assert_eq!(m.ni, 1.0);
        assert_eq!(m.illum, 2);
    }

    #[test]
    fn fallback_has_visible_specular() {
        let m = MaterialDesc::fallback();
        assert!(m.ks.x > 0.0);
        assert!(m.ns > 1.0);
        assert!(m.diffuse_map.is_none());
    }

    #[test]
    fn from_mtl_reads_fields_and_resolves_maps() {
        let mut mtl = tobj::Material {
            name: "brick".into(),
            diffuse: Some([0.5, 0.25, 0.125]),
            shininess: Some(20.0),
            illumination_model: Some(1),
            diffuse_texture: Some("tex/brick.png".into()),
            specular_texture: Some(String::new()),
            ..Default::default()
        };
        mtl.unknown_param.insert("Tf".into(), "0.1 0.2 0.3".into());

        let m = MaterialDesc::from_mtl(&mtl, Path::new("assets/wall.obj"));
        assert_eq!(m.name, "brick");
        assert_eq!(m.kd, Vec3::new(0.5, 0.25, 0.125));
        assert_eq!(m.ka, Vec3::ZERO);
        assert_eq!(m.ns, 20.0);
        assert_eq!(m.illum, 1);
        assert_eq!(m.tf, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(
            m.diffuse_map.as_deref(),
            Some(Path::new("assets/tex/brick.png"))
        );
        assert!(m.specular_map.is_none());
    }

    #[test]
    fn parse_vec3_accepts_scalar_and_triplet() {
        assert_eq!(parse_vec3("0.5"), Some(Vec3::splat(0.5)));
        assert_eq!(parse_vec3("1 2 3"), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(parse_vec3("1 2"), None);
        assert_eq!(parse_vec3("spectral foo.rfl"), None);
    }
}
