use clap::Subcommand;
use std::path::PathBuf;

pub mod index;
pub mod resolve;

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and apply overrides for every part in a catalog
    Resolve {
        /// Catalog directory (texture_rules, icon_rules, parts, ...)
        dir: PathBuf,

        /// Print the scan report and updated parts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how the rule catalogs are bucketed
    Index {
        /// Catalog directory
        dir: PathBuf,
    },
}

impl Commands {
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::Resolve { dir, json } => resolve::execute(&dir, json),
            Commands::Index { dir } => index::execute(&dir),
        }
    }
}
