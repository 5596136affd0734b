//! Workspace build tasks, run with `cargo xtask <command>`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask", about = "Build tasks for the glint workspace")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the options panel bundle with trunk.
    BuildUi {
        /// Build without optimizations.
        #[arg(long)]
        debug: bool,
    },
    /// Build the panel, then run the native demo.
    Run {
        /// Preset name or options TOML path passed to the demo.
        preset: Option<String>,
    },
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn run(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .status()
        .with_context(|| format!("failed to spawn {cmd:?}"))?;
    if !status.success() {
        bail!("{cmd:?} exited with {status}");
    }
    Ok(())
}

fn build_ui(debug: bool) -> Result<()> {
    let ui_dir = workspace_root().join("crates/glint-ui");
    let mut cmd = Command::new("trunk");
    let _ = cmd.arg("build").current_dir(&ui_dir);
    if !debug {
        let _ = cmd.arg("--release");
    }
    run(&mut cmd).context("is trunk installed? (`cargo install trunk`)")
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Task::BuildUi { debug } => build_ui(debug),
        Task::Run { preset } => {
            build_ui(false)?;
            let mut cmd = Command::new(env!("CARGO"));
            let _ = cmd
                .args(["run", "--release", "--bin", "glint", "--"])
                .current_dir(workspace_root());
            if let Some(preset) = preset {
                let _ = cmd.arg(preset);
            }
            run(&mut cmd)
        }
    }
}
