use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::ObjectSummary;

pub fn summary_table(summaries: &[ObjectSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Object"),
        header_cell("Records"),
        header_cell("Active"),
        header_cell("Modified"),
        header_cell("Field paths"),
        header_cell("Property paths"),
    ]);
    apply_table_style(&mut table);
    for column in 1..6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    let mut total_records = 0usize;
    let mut total_modified = 0usize;
    for summary in summaries {
        total_records += summary.records;
        total_modified += summary.modified;
        table.add_row(vec![
            Cell::new(&summary.object_name).add_attribute(Attribute::Bold),
            Cell::new(summary.records),
            Cell::new(summary.active),
            count_cell(summary.modified, Color::Yellow),
            Cell::new(summary.field_paths),
            Cell::new(summary.property_paths),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(total_modified, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

pub fn print_summary(summaries: &[ObjectSummary]) {
    println!("{}", summary_table(summaries));
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
