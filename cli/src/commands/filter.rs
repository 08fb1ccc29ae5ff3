use crate::argparse::FilterCommands;
use chrono::Utc;
use tramites_cli::input::load_filter_group;
use tramites_cli::CliError;
use tramites_search::{validate_against_fields, validate_filter_group, FilterExport, PortalConfig};

pub fn handle_filter_command(command: FilterCommands, config: &PortalConfig) -> anyhow::Result<()> {
    match command {
        FilterCommands::Validate(args) => {
            let group = load_filter_group(&args.file)?;
            let mut problems = validate_filter_group(&group, config.max_nesting_depth);
            problems.extend(validate_against_fields(&group, &config.fields));
            if problems.is_empty() {
                println!(
                    "{}: OK ({} conditions, depth {})",
                    args.file.display(),
                    group.condition_count(),
                    group.nesting_depth()
                );
                return Ok(());
            }
            for problem in &problems {
                println!("{}: {}", args.file.display(), problem);
            }
            Err(CliError::ValidationFailed(problems.len()).into())
        }
        FilterCommands::Export(args) => {
            let group = load_filter_group(&args.file)?;
            let path = FilterExport::new(group, Utc::now()).write_to_dir(&args.out_dir)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
