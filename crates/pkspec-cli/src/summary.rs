//! Terminal tables for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pkspec_cli::workflow::CatalogListing;
use pkspec_core::{IssueSeverity, PreflightReport, render_form};
use pkspec_model::{
    LabelFormData, MarkingMethod, MarkingPosition, PackagingSpecification, label_or_other,
};

pub fn print_catalogs(listings: &[CatalogListing]) {
    for listing in listings {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Code"), header_cell("Label")]);
        apply_table_style(&mut table);
        for (code, label) in &listing.entries {
            table.add_row(vec![Cell::new(code).fg(Color::Blue), Cell::new(label)]);
        }
        println!("{}", listing.name);
        println!("{table}");
    }
}

pub fn print_report(report: &PreflightReport) {
    if report.is_clean() {
        println!("Pre-flight: no issues");
        return;
    }
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by_key(|issue| severity_rank(issue.severity));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Target"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            issue
                .target
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&issue.message),
        ]);
    }
    println!(
        "Pre-flight: {} blocking, {} to confirm",
        report.blocking_count(),
        report.confirm_count()
    );
    println!("{table}");
}

pub fn print_preview(specification: &PackagingSpecification) {
    let mut markings = Table::new();
    markings.set_header(vec![
        header_cell("#"),
        header_cell("Target"),
        header_cell("Method"),
        header_cell("Position"),
        header_cell("Marking"),
    ]);
    apply_table_style(&mut markings);
    align_column(&mut markings, 0, CellAlignment::Right);
    for (index, form) in specification.marking_forms.iter().enumerate() {
        let lines = render_form(form);
        let target = if form.is_first_component {
            Cell::new(&form.target_name).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&form.target_name)
        };
        markings.add_row(vec![
            Cell::new(index + 1),
            target,
            Cell::new(label_or_other(
                form.method,
                MarkingMethod::Other,
                form.method_other.as_deref(),
            )),
            Cell::new(label_or_other(
                form.position,
                MarkingPosition::Other,
                form.position_other.as_deref(),
            )),
            if lines.is_empty() {
                dim_cell("(착인 없음)")
            } else {
                Cell::new(lines.join("\n"))
            },
        ]);
    }
    println!("Marking");
    println!("{markings}");

    let mut labels = Table::new();
    labels.set_header(vec![
        header_cell("#"),
        header_cell("Material"),
        header_cell("Format"),
        header_cell("Items"),
    ]);
    apply_table_style(&mut labels);
    align_column(&mut labels, 0, CellAlignment::Right);
    for (index, form) in specification.label_forms.iter().enumerate() {
        labels.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&form.packaging_material_name),
            form.format_type
                .map_or_else(|| dim_cell("미선택"), |format| Cell::new(format.label())),
            label_items_cell(form),
        ]);
    }
    println!("Labels");
    println!("{labels}");
}

fn label_items_cell(form: &LabelFormData) -> Cell {
    let items = form
        .custom_label_items
        .as_ref()
        .filter(|_| form.is_custom())
        .map(|items| items.display_items())
        .unwrap_or_default();
    if items.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(items.join(", "))
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Blocking => 0,
        IssueSeverity::Confirm => 1,
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Blocking => Cell::new("BLOCK")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Confirm => Cell::new("CONFIRM").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
