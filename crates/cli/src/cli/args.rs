pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "zoonav")]
#[command(about = "Browse and edit znode data over the tree store gateway")]
pub struct Args {
    /// Gateway URL (defaults to the configured remote)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the zoonav config directory (defaults to ~/.zoonav)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
