use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::ops::search::SortKey;

#[derive(Parser)]
#[command(name = "zt", about = concat!("ztouch v", env!("CARGO_PKG_VERSION"), " - launch your projects"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep the library and UI state in this directory
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG wins
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects
    List(ListArgs),
    /// List the tag catalog
    Tags,
    /// Add a local folder as a project
    Add(AddArgs),
    /// Add a remote link as a project
    Link(LinkArgs),
    /// Open a project's folder or link
    Open(OpenArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only projects whose name or a tag contains this text
    #[arg(short, long)]
    pub search: Option<String>,
    /// Sort key
    #[arg(long, value_enum, default_value_t = SortArg::Order)]
    pub sort: SortArg,
    /// Descending order
    #[arg(long)]
    pub desc: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Order,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::Order => SortKey::Order,
        }
    }
}

#[derive(Args)]
pub struct AddArgs {
    /// Folder to add (default: current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct LinkArgs {
    /// URL to add
    pub url: String,
}

#[derive(Args)]
pub struct OpenArgs {
    /// Project id or name (case-insensitive)
    pub project: String,
}
