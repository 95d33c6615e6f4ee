use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// One shader program per rendering technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShaderKind {
    Points,
    Mesh,
    Quad,
    Skybox,
    Environment,
    Mirror,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 6] = [
        ShaderKind::Points,
        ShaderKind::Mesh,
        ShaderKind::Quad,
        ShaderKind::Skybox,
        ShaderKind::Environment,
        ShaderKind::Mirror,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShaderKind::Points => "points",
            ShaderKind::Mesh => "mesh",
            ShaderKind::Quad => "quad",
            ShaderKind::Skybox => "skybox",
            ShaderKind::Environment => "environment",
            ShaderKind::Mirror => "mirror",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.wgsl", self.name())
    }

    /// Copy compiled into the binary, used when no file overrides it.
    pub fn embedded(self) -> &'static str {
        match self {
            ShaderKind::Points => include_str!("../../../shaders/points.wgsl"),
            ShaderKind::Mesh => include_str!("../../../shaders/mesh.wgsl"),
            ShaderKind::Quad => include_str!("../../../shaders/quad.wgsl"),
            ShaderKind::Skybox => include_str!("../../../shaders/skybox.wgsl"),
            ShaderKind::Environment => include_str!("../../../shaders/environment.wgsl"),
            ShaderKind::Mirror => include_str!("../../../shaders/mirror.wgsl"),
        }
    }
}

/// Where a shader's text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderOrigin {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for ShaderOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderOrigin::File(path) => write!(f, "{}", path.display()),
            ShaderOrigin::Embedded => f.write_str("embedded"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub kind: ShaderKind,
    pub text: Cow<'static, str>,
    pub origin: ShaderOrigin,
}

/// Reads WGSL from a directory, falling back to the embedded copies.
///
/// Files are re-read on every [`ShaderLibrary::load`], which is what makes
/// live reloading work.
#[derive(Debug, Clone)]
pub struct ShaderLibrary {
    dir: PathBuf,
}

impl ShaderLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, kind: ShaderKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    pub fn load(&self, kind: ShaderKind) -> ShaderSource {
        let path = self.path(kind);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!("shader {}: {}", kind.name(), path.display());
                ShaderSource {
                    kind,
                    text: Cow::Owned(text),
                    origin: ShaderOrigin::File(path),
                }
            }
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    tracing::debug!(
                        "shader {}: embedded ({} not found)",
                        kind.name(),
                        path.display()
                    );
                } else {
                    tracing::warn!(
                        "shader {}: cannot read {}: {e}; using embedded",
                        kind.name(),
                        path.display()
                    );
                }
                ShaderSource {
                    kind,
                    text: Cow::Borrowed(kind.embedded()),
                    origin: ShaderOrigin::Embedded,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_shaders_have_entry_points() {
        for kind in ShaderKind::ALL {
            let src = kind.embedded();
            assert!(src.contains("fn vs_main"), "{} lacks vs_main", kind.name());
            assert!(src.contains("fn fs_main"), "{} lacks fs_main", kind.name());
            assert!(src.contains("var<uniform> frame: Frame"));
        }
    }

    #[test]
    fn embedded_shaders_validate_against_uniform_layouts() {
        use crate::frame::FrameUniforms;
        use crate::material::MaterialUniforms;
        use naga::valid::{Capabilities, ValidationFlags, Validator};

        for kind in ShaderKind::ALL {
            let src = kind.embedded();
            let module = naga::front::wgsl::parse_str(src)
                .unwrap_or_else(|e| panic!("{}: {}", kind.name(), e.emit_to_string(src)));
            Validator::new(ValidationFlags::all(), Capabilities::all())
                .validate(&module)
                .unwrap_or_else(|e| panic!("{}: {e:?}", kind.name()));

            let mut saw_frame = false;
            for (_, var) in module.global_variables.iter() {
                let ty = &module.types[var.ty];
                let size = ty.inner.size(module.to_ctx()) as usize;
                match ty.name.as_deref() {
                    Some("Frame") => {
                        saw_frame = true;
                        assert_eq!(size, size_of::<FrameUniforms>(), "{}", kind.name());
                    }
                    Some("Material") => {
                        assert_eq!(size, size_of::<MaterialUniforms>(), "{}", kind.name());
                    }
                    _ => {}
                }
            }
            assert!(saw_frame, "{} has no Frame uniform", kind.name());
        }
    }

    #[test]
    fn missing_directory_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let library = ShaderLibrary::new(dir.path().join("nope"));
        let source = library.load(ShaderKind::Mesh);
        assert_eq!(source.origin, ShaderOrigin::Embedded);
        assert_eq!(source.text, ShaderKind::Mesh.embedded());
    }

    #[test]
    fn file_overrides_embedded_and_is_reread() {
        let dir = tempfile::tempdir().unwrap();
        let library = ShaderLibrary::new(dir.path());
        let path = dir.path().join("points.wgsl");

        std::fs::write(&path, "// first").unwrap();
        let first = library.load(ShaderKind::Points);
        assert_eq!(first.origin, ShaderOrigin::File(path.clone()));
        assert_eq!(first.text, "// first");

        std::fs::write(&path, "// second").unwrap();
        assert_eq!(library.load(ShaderKind::Points).text, "// second");

        // Other programs are unaffected.
        let other = library.load(ShaderKind::Quad);
        assert_eq!(other.origin, ShaderOrigin::Embedded);
    }

    #[test]
    fn origin_display() {
        assert_eq!(ShaderOrigin::Embedded.to_string(), "embedded");
        assert_eq!(
            ShaderOrigin::File(PathBuf::from("shaders/mesh.wgsl")).to_string(),
            "shaders/mesh.wgsl"
        );
    }
}
