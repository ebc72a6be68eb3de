//! Command-line argument definitions for the c4view CLI.
//!
//! [`Args`] holds the options shared by every subcommand (configuration file,
//! backend override and logging verbosity); [`Command`] selects between
//! rendering a single view and running the viewer server.

use clap::{ArgGroup, Parser, Subcommand};

use c4view::model::ViewKind;

/// Command-line arguments for the c4view diagram viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Base URL of the C4 backend, overriding the configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one view to an SVG file
    Render(RenderArgs),
    /// Serve the viewer over HTTP
    Serve(ServeArgs),
}

/// A view is rendered either from a saved payload or straight from the backend.
#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "kind"])))]
pub struct RenderArgs {
    /// Path to a view payload (JSON) as served by the backend
    #[arg(short, long)]
    pub input: Option<String>,

    /// Kind of the view to fetch (landscape, context, container, component)
    #[arg(long, requires = "id")]
    pub kind: Option<ViewKind>,

    /// Id of the view to fetch
    #[arg(long, requires = "kind")]
    pub id: Option<String>,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,
}
