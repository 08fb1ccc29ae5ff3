use crate::argparse::SearchArgs;
use log::{debug, info, warn};
use serde_json::Value;
use tabular::{Row, Table};
use tramites_cli::input::{load_filter_group, load_records, parse_equality_filter};
use tramites_search::coerce::to_display_string;
use tramites_search::{
    search_services, validate_filter_group, PortalConfig, SearchOptions, SearchPage,
    ServiceKind, ServiceRecord, UnifiedSearch,
};

pub fn handle_search_command(args: SearchArgs, config: &PortalConfig) -> anyhow::Result<()> {
    let records = load_records(&args.records)?;
    info!(
        "Loaded {} records from {}",
        records.len(),
        args.records.display()
    );

    let mut request = UnifiedSearch::from_config(args.query.as_str(), config).with_options(
        SearchOptions {
            case_sensitive: args.case_sensitive,
            whole_word: args.whole_word,
            fuzzy: args.fuzzy,
            fuzzy_tolerance: config.fuzzy_tolerance,
        },
    );
    if let Some(kind) = args.kind {
        request = request.with_kind(ServiceKind::from(kind));
    }
    for arg in &args.equals {
        let (field, value) = parse_equality_filter(arg)?;
        request = request.with_filter(field, value);
    }
    if let Some(path) = &args.filter {
        let group = load_filter_group(path)?;
        for problem in validate_filter_group(&group, config.max_nesting_depth) {
            warn!("{}: {}", path.display(), problem);
        }
        request = request.with_advanced(group);
    }
    request.page = args.page;
    if let Some(page_size) = args.page_size {
        request.page_size = page_size;
    }
    debug!("Search request: {:?}", request);

    let page = search_services(&records, &request);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page(&page);
    }
    Ok(())
}

fn cell(record: &ServiceRecord, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => "-".to_string(),
        Some(value) => to_display_string(value),
    }
}

fn print_page(page: &SearchPage) {
    let mut table = Table::new("{:<}  {:<}  {:<}  {:<}  {:>}")
        .with_row(Row::from_cells(
            ["Code", "Kind", "Name", "Dependency", "Value"].iter().cloned(),
        ));
    for record in &page.items {
        let kind = ServiceKind::of(record).map_or("-", |kind| kind.label());
        table.add_row(
            Row::new()
                .with_cell(cell(record, "codigo_unico"))
                .with_cell(kind)
                .with_cell(cell(record, "nombre"))
                .with_cell(cell(record, "dependencia"))
                .with_cell(cell(record, "valor")),
        );
    }
    print!("{}", table);
    println!(
        "Page {} of {}: {} matches ({} trámites, {} OPAs)",
        page.page, page.total_pages, page.total, page.tramites, page.opas
    );
}
