use serde::{Deserialize, Serialize};

/// The incremental demos, in teaching order. Each one builds on the previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Project {
    PointCloud,
    Transformations,
    Shading,
    Textures,
    RenderToTexture,
    Environment,
}

impl Project {
    pub const ALL: [Project; 6] = [
        Project::PointCloud,
        Project::Transformations,
        Project::Shading,
        Project::Textures,
        Project::RenderToTexture,
        Project::Environment,
    ];

    pub fn number(self) -> u8 {
        match self {
            Self::PointCloud => 1,
            Self::Transformations => 2,
            Self::Shading => 3,
            Self::Textures => 4,
            Self::RenderToTexture => 5,
            Self::Environment => 6,
        }
    }

    /// Window title.
    pub fn title(self) -> &'static str {
        match self {
            Self::PointCloud => "Project 1 - Point Cloud",
            Self::Transformations => "Project 2 - Transformations",
            Self::Shading => "Project 3 - Shading",
            Self::Textures => "Project 4 - Textures",
            Self::RenderToTexture => "Project 5 - Render to Texture",
            Self::Environment => "Project 6 - Environment Mapping",
        }
    }

    /// Name of the executable that runs this project.
    pub fn binary(self) -> &'static str {
        match self {
            Self::PointCloud => "project1-points",
            Self::Transformations => "project2-transform",
            Self::Shading => "project3-shading",
            Self::Textures => "project4-textures",
            Self::RenderToTexture => "project5-render-target",
            Self::Environment => "project6-environment",
        }
    }

    pub fn from_binary(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.binary() == name)
    }

    pub fn draws_points(self) -> bool {
        matches!(self, Self::PointCloud | Self::Transformations)
    }

    pub fn camera_input(self) -> bool {
        self != Self::PointCloud
    }

    pub fn projection_toggle(self) -> bool {
        self != Self::PointCloud
    }

    pub fn lighting(self) -> bool {
        !self.draws_points()
    }

    pub fn textures(self) -> bool {
        matches!(
            self,
            Self::Textures | Self::RenderToTexture | Self::Environment
        )
    }

    pub fn plane_camera(self) -> bool {
        self == Self::RenderToTexture
    }

    pub fn environment(self) -> bool {
        self == Self::Environment
    }
}

/// Which Blinn-Phong terms reach the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadingMode {
    #[default]
    Full,
    Ambient,
    Diffuse,
    Specular,
    /// View-space normal mapped to color.
    Normal,
}

impl ShadingMode {
    /// Value uploaded to the shader.
    pub fn code(self) -> u32 {
        match self {
            Self::Full => 0,
            Self::Ambient => 1,
            Self::Diffuse => 2,
            Self::Specular => 3,
            Self::Normal => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "full (ambient+diffuse+specular)",
            Self::Ambient => "ambient",
            Self::Diffuse => "diffuse",
            Self::Specular => "specular",
            Self::Normal => "normal-as-color",
        }
    }
}
