use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wuapi",
    about = "Materialize Windows Update Agent category trees from automation fixtures",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with materialization options
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Record each child's parent id
    #[arg(long, global = true)]
    pub link_parents: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Materialize the single category at the fixture root
    Category(FixtureArgs),
    /// Materialize the category collection at the fixture root
    Categories(FixtureArgs),
    /// Print the name path from the root down to one category
    Path(PathArgs),
}

#[derive(Args)]
pub struct FixtureArgs {
    /// JSON object graph to read from
    pub fixture: PathBuf,
}

#[derive(Args)]
pub struct PathArgs {
    pub fixture: PathBuf,
    pub category_id: String,
    /// The fixture root is a category collection rather than one category
    #[arg(long)]
    pub collection: bool,
}
