use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
pub struct Cli {
    /// Path to the server launch configuration (YAML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root containing the MineCode sources. Defaults to the current directory.
    #[arg(short, long)]
    root: Option<PathBuf>,
}

impl Cli {
    /// Parses command line arguments
    pub fn init_supervisor_cli() -> Self {
        Self::parse()
    }

    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone()
    }

    pub fn root(&self) -> Option<PathBuf> {
        self.root.clone()
    }
}
