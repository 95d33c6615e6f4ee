use crate::AssetError;
use crate::texture::load_rgba;
use glam::Vec3;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Face file suffixes in GPU layer order: +X, -X, +Y, -Y, +Z, -Z.
pub const FACE_NAMES: [&str; 6] = ["posx", "negx", "posy", "negy", "posz", "negz"];

/// Six square faces of equal size, in GPU layer order.
#[derive(Debug, Clone)]
pub struct CubeFaces {
    pub size: u32,
    pub faces: [RgbaImage; 6],
}

impl CubeFaces {
    /// Load `cubemap_<face>.png` for every face from a directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let mut faces = Vec::with_capacity(6);
        let mut size = None;
        for name in FACE_NAMES {
            let path = dir.join(format!("cubemap_{name}.png"));
            let face = load_rgba(&path)?;
            let expected = *size.get_or_insert(face.width());
            if face.width() != expected || face.height() != expected {
                return Err(AssetError::CubemapFace {
                    path,
                    width: face.width(),
                    height: face.height(),
                    expected,
                });
            }
            tracing::debug!("cubemap face {name}: {}", path.display());
            faces.push(face);
        }
        let faces: [RgbaImage; 6] = faces
            .try_into()
            .map_err(|_| AssetError::CubemapIncomplete(dir.to_path_buf()))?;
        Ok(Self {
            size: size.unwrap_or(0),
            faces,
        })
    }

    /// Procedural sky over a dark ground, for runs without a cubemap directory.
    pub fn gradient(size: u32) -> Self {
        let size = size.max(1);
        let faces = std::array::from_fn(|face| {
            RgbaImage::from_fn(size, size, |x, y| {
                let s = 2.0 * (x as f32 + 0.5) / size as f32 - 1.0;
                let t = 2.0 * (y as f32 + 0.5) / size as f32 - 1.0;
                sky_color(face_direction(face, s, t))
            })
        });
        Self { size, faces }
    }
}

/// Direction through texel (s, t) in [-1, 1] of a face, following the usual cube-map face table.
pub fn face_direction(face: usize, s: f32, t: f32) -> Vec3 {
    let d = match face {
        0 => Vec3::new(1.0, -t, -s),
        1 => Vec3::new(-1.0, -t, s),
        2 => Vec3::new(s, 1.0, t),
        3 => Vec3::new(s, -1.0, -t),
        4 => Vec3::new(s, -t, 1.0),
        _ => Vec3::new(-s, -t, -1.0),
    };
    d.normalize()
}

fn sky_color(dir: Vec3) -> Rgba<u8> {
    let horizon = Vec3::new(0.85, 0.88, 0.92);
    let zenith = Vec3::new(0.22, 0.42, 0.78);
    let ground = Vec3::new(0.18, 0.16, 0.14);
    let c = if dir.y >= 0.0 {
        horizon.lerp(zenith, dir.y.powf(0.6))
    } else {
        horizon.lerp(ground, (-dir.y).powf(0.4))
    };
    let c = (c * 255.0).round();
    Rgba([c.x as u8, c.y as u8, c.z as u8, 255])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_faces(dir: &Path, size_of: impl Fn(usize) -> (u32, u32)) {
        for (i, name) in FACE_NAMES.iter().enumerate() {
            let (w, h) = size_of(i);
            RgbaImage::from_pixel(w, h, Rgba([i as u8 * 40, 0, 0, 255]))
                .save(dir.join(format!("cubemap_{name}.png")))
                .unwrap();
        }
    }

    #[test]
    fn loads_six_faces_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_faces(dir.path(), |_| (4, 4));
        let cube = CubeFaces::load_dir(dir.path()).unwrap();
        assert_eq!(cube.size, 4);
        for (i, face) in cube.faces.iter().enumerate() {
            assert_eq!(face.get_pixel(0, 0)[0], i as u8 * 40);
        }
    }

    #[test]
    fn mismatched_face_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_faces(dir.path(), |i| if i == 3 { (4, 2) } else { (4, 4) });
        let err = CubeFaces::load_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            AssetError::CubemapFace {
                width: 4,
                height: 2,
                expected: 4,
                ..
            }
        ));
    }

    #[test]
    fn missing_face_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_faces(dir.path(), |_| (2, 2));
        std::fs::remove_file(dir.path().join("cubemap_negz.png")).unwrap();
        assert!(matches!(
            CubeFaces::load_dir(dir.path()),
            Err(AssetError::Image { .. })
        ));
    }

    #[test]
    fn face_centers_point_along_axes() {
        assert_eq!(face_direction(0, 0.0, 0.0), Vec3::X);
        assert_eq!(face_direction(1, 0.0, 0.0), -Vec3::X);
        assert_eq!(face_direction(2, 0.0, 0.0), Vec3::Y);
        assert_eq!(face_direction(3, 0.0, 0.0), -Vec3::Y);
        assert_eq!(face_direction(4, 0.0, 0.0), Vec3::Z);
        assert_eq!(face_direction(5, 0.0, 0.0), -Vec3::Z);
    }

    #[test]
    fn gradient_sky_is_blue_above_and_dark_below() {
        let cube = CubeFaces::gradient(8);
        assert_eq!(cube.size, 8);
        let up = cube.faces[2].get_pixel(4, 4);
        let down = cube.faces[3].get_pixel(4, 4);
        assert!(up[2] > up[0]);
        assert!(down[0] < 80 && down[1] < 80 && down[2] < 80);
    }
}
