use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use shadelab_scene::Project;
use std::path::PathBuf;
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for shadelab")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Run one project executable in release mode
    Run {
        /// Project number (1-6)
        project: u8,
        /// OBJ mesh to display
        mesh: PathBuf,
        /// Extra arguments passed to the project
        #[arg(last = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            fmt()?;
            clippy()?;
            test()?;
            doc()?;
        }
        Commands::Fmt => fmt()?,
        Commands::Clippy => clippy()?,
        Commands::Test => test()?,
        Commands::Doc => doc()?,
        Commands::Build => cargo("build", &["build", "--workspace"])?,
        Commands::Run {
            project,
            mesh,
            args,
        } => run(project, mesh, args)?,
    }

    Ok(())
}

fn fmt() -> Result<()> {
    cargo("fmt --check", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn run(number: u8, mesh: PathBuf, extra: Vec<String>) -> Result<()> {
    let Some(project) = project_by_number(number) else {
        bail!("no project {number}; expected 1-{}", Project::ALL.len());
    };
    let mesh = mesh.to_string_lossy().into_owned();
    let mut args = vec![
        "run",
        "--release",
        "-p",
        "shadelab-desktop",
        "--bin",
        project.binary(),
        "--",
        mesh.as_str(),
    ];
    args.extend(extra.iter().map(String::as_str));
    cargo(project.binary(), &args)
}

fn project_by_number(number: u8) -> Option<Project> {
    Project::ALL.into_iter().find(|p| p.number() == number)
}

fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {label}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("cargo {label} failed");
    }
    Ok(())
}
