use clap::{CommandFactory, FromArgMatches, Parser};
use shadelab_render_wgpu::DEFAULT_TARGET_SIZE;
use shadelab_scene::Project;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command line shared by every project executable.
#[derive(Debug, Parser)]
pub struct Cli {
    /// OBJ mesh to display
    pub mesh: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory holding <program>.wgsl overrides
    #[arg(long, default_value = "shaders")]
    pub shader_dir: PathBuf,

    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Edge length of the offscreen target (render-to-texture project)
    #[arg(long, default_value_t = DEFAULT_TARGET_SIZE)]
    pub target_size: u32,

    /// Directory with cubemap_{posx,negx,posy,negy,posz,negz}.png (environment project)
    #[arg(long)]
    pub cubemap: Option<PathBuf>,
}

impl Cli {
    /// Parse the process arguments, naming the command after the project's executable.
    pub fn parse_for(project: Project) -> Result<Self, clap::Error> {
        Self::parse_from_for(project, std::env::args_os())
    }

    pub fn parse_from_for<I, T>(project: Project, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command()
            .name(project.binary())
            .about(project.title())
            .try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }
}

pub fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from_for(Project::Shading, ["project3-shading", "bunny.obj"]).unwrap();
        assert_eq!(cli.mesh, PathBuf::from("bunny.obj"));
        assert!(!cli.verbose);
        assert_eq!(cli.shader_dir, PathBuf::from("shaders"));
        assert_eq!((cli.width, cli.height), (1280, 720));
        assert_eq!(cli.target_size, 1024);
        assert!(cli.cubemap.is_none());
    }

    #[test]
    fn overrides() {
        let cli = Cli::parse_from_for(
            Project::Environment,
            [
                "project6-environment",
                "-v",
                "--cubemap",
                "sky",
                "--width",
                "800",
                "--shader-dir",
                "glsl",
                "teapot.obj",
            ],
        )
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.cubemap, Some(PathBuf::from("sky")));
        assert_eq!(cli.width, 800);
        assert_eq!(cli.shader_dir, PathBuf::from("glsl"));
    }

    #[test]
    fn mesh_is_required() {
        let err = Cli::parse_from_for(Project::PointCloud, ["project1-points"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
