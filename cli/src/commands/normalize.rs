use crate::argparse::NormalizeArgs;
use tabular::{Row, Table};
use tramites_search::{normalize_for_search, normalize_text};

pub fn handle_normalize_command(args: NormalizeArgs) -> anyhow::Result<()> {
    let mut table = Table::new("{:<}  {:<}")
        .with_row(Row::from_cells(["Form", "Text"].iter().cloned()));
    table.add_row(Row::new().with_cell("input").with_cell(&args.text));
    table.add_row(
        Row::new()
            .with_cell("compare")
            .with_cell(normalize_text(args.text.as_str())),
    );
    table.add_row(
        Row::new()
            .with_cell("search")
            .with_cell(normalize_for_search(args.text.as_str())),
    );
    print!("{}", table);
    Ok(())
}
