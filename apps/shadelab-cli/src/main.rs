use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use shadelab_assets::{LoadedMesh, MeshStats, load_obj};
use shadelab_render_wgpu::{ShaderKind, ShaderLibrary, ShaderOrigin, programs_for};
use shadelab_scene::{ObjectFit, Project};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shadelab-cli", about = "Inspect meshes and shaders without opening a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print mesh statistics, fit, and material texture resolution
    Info {
        /// OBJ file to inspect
        mesh: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Report whether each program would load from disk or use its embedded copy
    Shaders {
        /// Directory holding <program>.wgsl overrides
        #[arg(long, default_value = "shaders")]
        dir: PathBuf,
    },
    /// List the project executables
    Projects,
}

#[derive(Debug, Serialize)]
struct MeshReport {
    path: PathBuf,
    stats: MeshStats,
    fit: ObjectFit,
    materials: Vec<MaterialReport>,
}

#[derive(Debug, Serialize)]
struct MaterialReport {
    name: String,
    diffuse_map: Option<MapReport>,
    specular_map: Option<MapReport>,
}

#[derive(Debug, Serialize)]
struct MapReport {
    path: PathBuf,
    exists: bool,
}

impl MapReport {
    fn new(path: &Option<PathBuf>) -> Option<Self> {
        path.as_ref().map(|p| Self {
            path: p.clone(),
            exists: p.is_file(),
        })
    }
}

fn mesh_report(path: PathBuf, mesh: &LoadedMesh) -> MeshReport {
    MeshReport {
        fit: ObjectFit::from_bounds(mesh.bounds.min, mesh.bounds.max),
        stats: mesh.stats(),
        materials: mesh
            .materials
            .iter()
            .map(|m| MaterialReport {
                name: m.name.clone(),
                diffuse_map: MapReport::new(&m.diffuse_map),
                specular_map: MapReport::new(&m.specular_map),
            })
            .collect(),
        path,
    }
}

fn print_report(report: &MeshReport) {
    let s = &report.stats;
    let b = s.bounds;
    println!("{}", report.path.display());
    println!("  vertices: {}  faces: {}", s.vertex_count, s.face_count);
    println!(
        "  normals: {}  uvs: {}  ranges: {}",
        if s.has_normals { "file" } else { "computed" },
        s.has_uvs,
        s.range_count
    );
    println!(
        "  aabb: ({:.4}, {:.4}, {:.4})..({:.4}, {:.4}, {:.4})",
        b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
    );
    let fit = &report.fit;
    println!(
        "  center: ({:.4}, {:.4}, {:.4})  scale: {:.4}  max extent: {:.4}",
        fit.center.x,
        fit.center.y,
        fit.center.z,
        fit.scale,
        fit.max_extent()
    );
    println!("  materials: {}", s.material_count);
    for m in &report.materials {
        println!("    {}", m.name);
        for (label, map) in [("map_Kd", &m.diffuse_map), ("map_Ks", &m.specular_map)] {
            if let Some(map) = map {
                let status = if map.exists { "ok" } else { "missing" };
                println!("      {label}: {} [{status}]", map.path.display());
            }
        }
    }
}

/// Program name, origin, and which projects use it.
fn shader_rows(library: &ShaderLibrary) -> Vec<(ShaderKind, ShaderOrigin, Vec<u8>)> {
    ShaderKind::ALL
        .into_iter()
        .map(|kind| {
            let origin = library.load(kind).origin;
            let projects = Project::ALL
                .into_iter()
                .filter(|p| programs_for(*p).contains(&kind))
                .map(Project::number)
                .collect();
            (kind, origin, projects)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info { mesh, json } => {
            let loaded = load_obj(&mesh).with_context(|| format!("loading {}", mesh.display()))?;
            tracing::debug!(
                "{}: {} ranges, {} materials",
                mesh.display(),
                loaded.ranges.len(),
                loaded.materials.len()
            );
            let report = mesh_report(mesh, &loaded);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Shaders { dir } => {
            let library = ShaderLibrary::new(dir);
            println!("shader dir: {}", library.dir().display());
            for (kind, origin, projects) in shader_rows(&library) {
                let projects: Vec<String> = projects.iter().map(u8::to_string).collect();
                println!(
                    "  {:<12} {:<30} projects {}",
                    kind.name(),
                    origin.to_string(),
                    projects.join(",")
                );
            }
        }
        Commands::Projects => {
            for project in Project::ALL {
                println!("{:<24} {}", project.binary(), project.title());
            }
        }
    }

    Ok(())
}
