use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tramites_search::ServiceKind;

#[derive(Parser)]
#[command(
    name = "tramites",
    about = "Search and filter the municipal trámites and OPA catalogue",
    version,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Portal configuration file (.yaml or .json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Pick which subcommand to use
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the comparison and search forms of a text
    Normalize(NormalizeArgs),
    /// Search a catalogue of service records
    Search(SearchArgs),
    /// Work with advanced filter files
    #[command(subcommand)]
    Filter(FilterCommands),
    /// List filterable fields and their operators
    Fields,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Text to normalize
    pub text: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Tramite,
    Opa,
}

impl From<KindArg> for ServiceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Tramite => ServiceKind::Tramite,
            KindArg::Opa => ServiceKind::Opa,
        }
    }
}

#[derive(Args)]
pub struct SearchArgs {
    /// JSON file holding an array of service records
    #[arg(long)]
    pub records: PathBuf,

    /// Free-text query, accents optional
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,

    /// Tolerate small typos
    #[arg(long, conflicts_with = "whole_word")]
    pub fuzzy: bool,

    /// Match the query as a whole word
    #[arg(long)]
    pub whole_word: bool,

    /// Keep punctuation when comparing
    #[arg(long)]
    pub case_sensitive: bool,

    /// Only trámites or only OPAs
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Field equality filter, e.g. --eq dependencia_id=3 (repeatable)
    #[arg(long = "eq", value_name = "FIELD=VALUE")]
    pub equals: Vec<String>,

    /// Advanced filter file: an exported document or a bare filter group
    #[arg(long)]
    pub filter: Option<PathBuf>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Page size; 0 shows every match
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print the result page as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum FilterCommands {
    /// Check a filter file and report problems
    Validate(FilterFileArgs),
    /// Write a filter as a dated export document
    Export(FilterExportArgs),
}

#[derive(Args)]
pub struct FilterFileArgs {
    /// Filter file: an exported document or a bare filter group
    pub file: PathBuf,
}

#[derive(Args)]
pub struct FilterExportArgs {
    /// Filter file: an exported document or a bare filter group
    pub file: PathBuf,

    /// Directory to write the export into
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
