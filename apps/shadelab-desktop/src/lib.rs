//! Windowed shell shared by the project executables.
//!
//! Each `project*` binary calls [`run`] with its [`Project`]; everything else
//! (argument parsing, mesh loading, window and GPU setup, input, HUD) lives here.

mod app;
mod cli;
mod gpu;
mod hud;
mod keys;

pub use app::{AppState, Effect};
pub use cli::Cli;

use anyhow::{Context, Result};
use gpu::{GpuApp, Setup};
use shadelab_assets::{CubeFaces, LoadedMesh, load_obj};
use shadelab_render_wgpu::RendererOptions;
use shadelab_scene::{ObjectFit, Project};
use std::path::Path;
use winit::event_loop::{ControlFlow, EventLoop};

/// Edge length of the procedural sky used when no cubemap directory is given.
const GRADIENT_SKY_SIZE: u32 = 256;

pub fn run(project: Project) -> Result<()> {
    let cli = Cli::parse_for(project).unwrap_or_else(|e| e.exit());
    cli::init_logging(cli.verbose);
    tracing::info!("{} starting", project.binary());

    let mesh = load_obj(&cli.mesh).with_context(|| format!("loading mesh {}", cli.mesh.display()))?;
    log_mesh(&cli.mesh, &mesh);

    let environment = if project.environment() {
        Some(load_environment(cli.cubemap.as_deref())?)
    } else {
        None
    };

    let state = AppState::new(project, cli.mesh.clone(), &mesh);
    let setup = Setup {
        mesh,
        options: RendererOptions {
            shader_dir: cli.shader_dir,
            target_size: cli.target_size,
            environment,
        },
        size: (cli.width, cli.height),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = GpuApp::new(state, setup);
    event_loop.run_app(&mut app)?;
    app.finish()
}

fn log_mesh(path: &Path, mesh: &LoadedMesh) {
    let b = mesh.bounds;
    let fit = ObjectFit::from_bounds(b.min, b.max);
    tracing::info!(
        "{}: NV={} NF={} AABB=({:.3}, {:.3}, {:.3})..({:.3}, {:.3}, {:.3})",
        path.display(),
        mesh.points.len(),
        mesh.face_count(),
        b.min.x,
        b.min.y,
        b.min.z,
        b.max.x,
        b.max.y,
        b.max.z
    );
    tracing::info!(
        "center=({:.3}, {:.3}, {:.3}) scale={:.4} materials={}",
        fit.center.x,
        fit.center.y,
        fit.center.z,
        fit.scale,
        mesh.materials.len()
    );
}

fn load_environment(dir: Option<&Path>) -> Result<CubeFaces> {
    match dir {
        Some(dir) => {
            let cube = CubeFaces::load_dir(dir)
                .with_context(|| format!("loading cubemap from {}", dir.display()))?;
            tracing::info!("cubemap {} ({}x{})", dir.display(), cube.size, cube.size);
            Ok(cube)
        }
        None => {
            tracing::info!("no --cubemap given; using a procedural sky");
            Ok(CubeFaces::gradient(GRADIENT_SKY_SIZE))
        }
    }
}
