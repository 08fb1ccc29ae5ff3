use tabular::{Row, Table};
use tramites_search::PortalConfig;

pub fn handle_fields_command(config: &PortalConfig) -> anyhow::Result<()> {
    let mut table = Table::new("{:<}  {:<}  {:<}  {:<}").with_row(Row::from_cells(
        ["Field", "Label", "Type", "Operators"].iter().cloned(),
    ));
    for field in &config.fields {
        let operators = field
            .operators()
            .iter()
            .map(|op| op.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(
            Row::new()
                .with_cell(&field.name)
                .with_cell(&field.label)
                .with_cell(field.data_type.to_string())
                .with_cell(operators),
        );
    }
    print!("{}", table);
    Ok(())
}
