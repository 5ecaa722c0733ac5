use clap::{Parser, Subcommand};

pub const DEFAULT_SOURCE: &str = "data/library.csv";

#[derive(Parser, Debug)]
#[command(name = "librarium", version, about = "Personal library catalog browser")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_SOURCE,
        help = "Catalog spreadsheet (.csv or .xlsx)"
    )]
    pub source: String,
    /// With no subcommand the interactive menu starts.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the inventory, optionally filtered by type
    List { filter: Option<String> },
    /// Search title, authors, topic and subtitle
    Search { query: String },
    /// Show one item by id
    Show { id: String },
    /// List distinct type values
    Types,
    /// List distinct topic values
    Topics,
}
