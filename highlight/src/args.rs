use std::path::PathBuf;

use clap::Parser;

/// HighlightReader API server
#[derive(Debug, Parser)]
#[command(name = "highlight", about = "Text to speech with word-level timestamps")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "highlight.toml", env = "HIGHLIGHT_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "HIGHLIGHT_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
