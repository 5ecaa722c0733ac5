use crate::cli::Commands;
use crate::domain::models::JsonOut;
use crate::services::output::print_out;
use crate::services::render;
use crate::store::Catalog;

pub fn handle_catalog_command(
    json: bool,
    command: &Commands,
    catalog: &Catalog,
) -> anyhow::Result<()> {
    match command {
        Commands::List { filter } => {
            let items: Vec<_> = catalog.list(filter.as_deref()).collect();
            print_out(json, &items, |e| {
                format!("{}\t{}\t{}\t{}", e.id, e.title, e.kind, e.topic)
            })?;
        }
        Commands::Search { query } => {
            let items: Vec<_> = catalog.search(query).collect();
            print_out(json, &items, |e| {
                format!("{}\t{}\t{}\t{}", e.id, e.title, e.authors, e.topic)
            })?;
        }
        Commands::Show { id } => {
            let (entry, free_download) = catalog.get(id)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: entry
                    })?
                );
            } else {
                render::detail(&mut std::io::stdout(), entry, free_download)?;
            }
        }
        Commands::Types => {
            let types = catalog.types();
            print_out(json, &types, |t| t.to_string())?;
        }
        Commands::Topics => {
            let topics = catalog.topics();
            print_out(json, &topics, |t| t.to_string())?;
        }
    }
    Ok(())
}
