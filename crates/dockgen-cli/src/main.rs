mod commands;
mod manifest;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dockgen", about = "Generate Docker artifacts from declaration metadata")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a program manifest and generate Docker artifacts next to the compiled artifact
    Generate {
        /// Program manifest (TOML, or JSON with a .json extension)
        manifest: PathBuf,
        /// Compiled program the image is built around
        #[arg(long)]
        artifact: PathBuf,
        /// Directory holding dockgen.toml and relative CopyFiles sources
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
    /// Print the Dockerfile a manifest would produce, without writing anything
    Render {
        /// Program manifest (TOML, or JSON with a .json extension)
        manifest: PathBuf,
        /// File name of the compiled artifact inside the image
        #[arg(long, default_value = "app")]
        artifact_name: String,
        /// Directory holding dockgen.toml
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
    /// Remove the generated Docker directory for a compiled artifact
    Clean {
        /// Compiled program whose Docker directory should be removed
        #[arg(long)]
        artifact: PathBuf,
        /// Directory holding dockgen.toml
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            manifest,
            artifact,
            project_dir,
        } => commands::generate(&manifest, &artifact, &project_dir).await?,
        Commands::Render {
            manifest,
            artifact_name,
            project_dir,
        } => commands::render(&manifest, &artifact_name, &project_dir).await?,
        Commands::Clean {
            artifact,
            project_dir,
        } => commands::clean(&artifact, &project_dir).await?,
    }

    Ok(())
}
