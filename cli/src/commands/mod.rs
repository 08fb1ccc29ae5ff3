mod fields;
mod filter;
mod normalize;
mod search;

use crate::argparse::Commands;
pub use fields::handle_fields_command;
pub use filter::handle_filter_command;
pub use normalize::handle_normalize_command;
pub use search::handle_search_command;
use tramites_search::PortalConfig;

pub fn handle_command(command: Commands, config: &PortalConfig) -> anyhow::Result<()> {
    match command {
        Commands::Normalize(args) => handle_normalize_command(args),
        Commands::Search(args) => handle_search_command(args, config),
        Commands::Filter(args) => handle_filter_command(args, config),
        Commands::Fields => handle_fields_command(config),
    }
}
