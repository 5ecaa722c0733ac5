use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod services;
mod store;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Load failures are absorbed into an empty catalog; the emptiness
    // check below is the startup gate.
    let catalog = match store::Catalog::load(Path::new(&cli.source)) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(source = %cli.source, error = %e, "catalog load failed");
            store::Catalog::default()
        }
    };
    if catalog.is_empty() {
        anyhow::bail!("no items loaded from {}", cli.source);
    }

    match &cli.command {
        Some(command) => commands::handle_catalog_command(cli.json, command, &catalog),
        None => {
            let stdin = std::io::stdin();
            commands::run_menu(&catalog, &mut stdin.lock(), &mut std::io::stdout())
        }
    }
}
