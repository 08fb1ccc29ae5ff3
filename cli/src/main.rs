mod argparse;
mod commands;
mod utils;

use argparse::parse_args;
use tramites_search::PortalConfig;

fn main() -> anyhow::Result<()> {
    let cli = parse_args();
    utils::init_logger(cli.verbose);

    let config = match &cli.config {
        Some(path) => PortalConfig::load(path)?,
        None => PortalConfig::default(),
    };

    commands::handle_command(cli.command, &config)
}
