//! tumor-network - render tumor/gene correlation CSVs as an interactive graph
//!
//! `render` builds the HTML page and opens it; `open` reopens an existing one.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tumor_network::browser;
use tumor_network::cli::{Cli, Command, OpenArgs, RenderArgs};
use tumor_network::config::VisualConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Command::Render(args) => run_render(&cli, args),
        Command::Open(args) => run_open(&cli, args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "tumor_network=info",
        1 => "tumor_network=debug",
        _ => "tumor_network=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_render(cli: &Cli, args: &RenderArgs) -> anyhow::Result<()> {
    let config = VisualConfig::resolve(cli.config.as_deref(), &args.overrides())
        .context("failed to resolve visualization settings")?;

    let report = tumor_network::render(&config).context("failed to render visualization")?;
    report.summary.log();
    for (path, reason) in &report.skipped {
        eprintln!("Skipped {}: {}", path.display(), reason);
    }

    print!("{}", report.summary);
    println!("Visualization saved to {}", report.output_path.display());

    if !args.no_open {
        browser::open_in_browser(&report.output_path);
    }
    Ok(())
}

fn run_open(cli: &Cli, args: &OpenArgs) -> anyhow::Result<()> {
    let path = match &args.file {
        Some(file) => file.clone(),
        None => VisualConfig::resolve(cli.config.as_deref(), &args.overrides())
            .context("failed to resolve visualization settings")?
            .output_path(),
    };
    browser::open_existing(&path)?;
    Ok(())
}
