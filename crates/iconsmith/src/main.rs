use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use iconsmith::{Generator, GeneratorConfig, logging};
use tracing::info;

/// iconsmith - placeholder icons for web apps
#[derive(Parser, Debug)]
#[command(name = "iconsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file replacing the built-in app table, sizes or fonts
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the app output directories are relative to [default: current directory]
    #[arg(short, long)]
    output_root: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    println!("PWA Icon Generator");
    println!("{}", "=".repeat(40));

    let mut generator = Generator::new(config);
    if let Some(root) = cli.output_root {
        generator = generator.output_root(root);
    }
    let report = generator.run().context("icon generation failed")?;

    info!(files = report.files.len(), font = %report.font, "done");
    Ok(())
}
