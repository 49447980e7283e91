//! Workspace tasks: `cargo xtask <command>`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use echarts_host::options::Options;

#[derive(Parser)]
#[command(name = "xtask", about = "echarts-host build tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download echarts.min.js into the bundled page assets.
    FetchEcharts {
        /// ECharts release to fetch from jsDelivr.
        #[arg(long, default_value = "5")]
        version: String,
        /// Overwrite an existing bundled copy.
        #[arg(long)]
        force: bool,
    },
    /// Write the JSON Schema of the options file.
    ConfigSchema {
        #[arg(long, default_value = "assets/options.schema.json")]
        out: PathBuf,
    },
    /// Write a TOML file holding the default options.
    DefaultConfig {
        #[arg(long, default_value = "echarts-host.toml")]
        out: PathBuf,
    },
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn fetch_echarts(version: &str, force: bool) -> Result<()> {
    let target = workspace_root().join("assets/web/echarts.min.js");
    if target.exists() && !force {
        let existing = fs::read_to_string(&target).unwrap_or_default();
        if !existing.starts_with("console.error") {
            eprintln!("{} exists, pass --force to replace", target.display());
            return Ok(());
        }
    }

    let url = format!(
        "https://cdn.jsdelivr.net/npm/echarts@{version}/dist/echarts.min.js"
    );
    eprintln!("fetching {url}");
    let body = ureq::get(&url)
        .call()
        .with_context(|| format!("request to {url} failed"))?
        .into_body()
        .read_to_string()
        .context("failed to read echarts.min.js")?;
    if !body.contains("echarts") {
        bail!("{url} did not return the echarts library");
    }

    fs::write(&target, body)
        .with_context(|| format!("failed to write {}", target.display()))?;
    eprintln!("wrote {}", target.display());
    Ok(())
}

fn config_schema(out: &Path) -> Result<()> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())?;
    let path = workspace_root().join(out);
    fs::write(&path, schema + "\n")
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn default_config(out: &Path) -> Result<()> {
    let path = workspace_root().join(out);
    Options::default()
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::FetchEcharts { version, force } => {
            fetch_echarts(&version, force)
        }
        Command::ConfigSchema { out } => config_schema(&out),
        Command::DefaultConfig { out } => default_config(&out),
    }
}
