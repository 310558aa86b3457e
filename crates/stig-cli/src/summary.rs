use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use stig_cli::types::GenerateResult;
use stig_ingest::ValidationReport;
use stig_model::Checklist;
use stig_standards::{CatalogReport, EMBEDDED_CATALOG_NOTE};

pub fn print_generate_summary(result: &GenerateResult) {
    println!("Checklist: {}", result.checklist_title);
    println!("CCI catalog: {} ({} CCIs mapped)", result.catalog, result.mapped_ccis);
    println!("Output: {}", result.output.display());
    if result.embedded_catalog {
        println!("Note: {EMBEDDED_CATALOG_NOTE}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("STIG"),
        header_cell("Title"),
        header_cell("Rules"),
        header_cell("Resolved"),
        header_cell("Unknown"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_rules = 0usize;
    let mut total_resolved = 0usize;
    for stig in &result.stigs {
        total_rules += stig.rules;
        total_resolved += stig.resolved;
        table.add_row(vec![
            Cell::new(&stig.stig_id).fg(Color::Cyan),
            Cell::new(&stig.display_name),
            Cell::new(stig.rules),
            Cell::new(stig.resolved),
            count_cell(stig.unknown, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rules).add_attribute(Attribute::Bold),
        Cell::new(total_resolved).add_attribute(Attribute::Bold),
        count_cell(result.unknown_count(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_validation(path: &Path, checklist: &Checklist, report: &ValidationReport) {
    if report.is_valid() {
        println!("{}: valid", path.display());
        println!("Title: {}", checklist.title);
        println!("ID: {}", checklist.id);
        println!("STIGs: {}", checklist.stigs.len());
        println!("Rules: {}", checklist.rule_count());
        return;
    }
    eprintln!(
        "{}: {} validation error(s)",
        path.display(),
        report.error_count()
    );
    for error in &report.errors {
        eprintln!("- {error}");
    }
}

pub fn print_catalog_report(report: &CatalogReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    let counts = &report.counts;
    let rows: Vec<(&str, String)> = vec![
        ("Source", report.source.clone()),
        ("Version", or_dash(report.metadata.version.as_deref())),
        ("Publish date", or_dash(report.metadata.publish_date.as_deref())),
        ("Items", counts.items.to_string()),
        ("Mapped", counts.mapped.to_string()),
        ("Skipped", counts.skipped().to_string()),
        ("  no NIST reference", counts.no_preferred_reference.to_string()),
        ("  unmatched index", counts.unmatched_index.to_string()),
        ("  invalid token", counts.invalid_token.to_string()),
        ("  missing id", counts.missing_id.to_string()),
        ("Duplicate ids", counts.duplicate_ids.to_string()),
        ("SHA-256", report.sha256.clone()),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }
    println!("{table}");
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
