use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use slate_map::{MappingEngine, MappingSummary};
use slate_model::{ConfidenceLevel, EntitySchema, FieldDescriptor, MappingResult};
use slate_standards::SchemaRegistry;

pub fn entities_table(registry: &SchemaRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Label"),
        header_cell("Fields"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for schema in registry.iter() {
        table.add_row(vec![
            Cell::new(schema.key()).add_attribute(Attribute::Bold),
            Cell::new(schema.label()),
            Cell::new(schema.fields().len()),
            Cell::new(schema.required_fields().count()),
        ]);
    }
    table
}

pub fn fields_table(schema: &EntitySchema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Label"),
        header_cell("Kind"),
        header_cell("Required"),
        header_cell("Default"),
        header_cell("Options / Aliases"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for field in schema.fields() {
        table.add_row(vec![
            Cell::new(&field.key).add_attribute(Attribute::Bold),
            Cell::new(&field.label),
            Cell::new(field.kind),
            if field.required {
                Cell::new("yes").fg(Color::Yellow)
            } else {
                dim_cell("-")
            },
            field
                .default_value
                .as_ref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(options_text(field)),
        ]);
    }
    table
}

pub fn mapping_table(result: &MappingResult, engine: &MappingEngine) -> Table {
    let thresholds = engine.thresholds();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Confidence"),
        header_cell("Match"),
        header_cell("Closest field"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for mapping in result.mappings() {
        let level = mapping
            .is_mapped()
            .then(|| thresholds.categorize(mapping.confidence))
            .flatten();
        table.add_row(vec![
            Cell::new(mapping.column_index),
            Cell::new(&mapping.column_header),
            match &mapping.mapped_field {
                Some(key) => Cell::new(key).fg(Color::Green),
                None => dim_cell(slate_model::UNMAPPED),
            },
            if mapping.is_mapped() {
                Cell::new(format!("{:.2}", mapping.confidence))
            } else {
                dim_cell("-")
            },
            level_cell(level),
            if mapping.is_mapped() {
                dim_cell("")
            } else {
                closest_cell(engine, &mapping.column_header)
            },
        ]);
    }
    table
}

pub fn print_mapping(result: &MappingResult, summary: &MappingSummary, engine: &MappingEngine) {
    println!("{}", mapping_table(result, engine));
    println!(
        "Mapped {}/{} fields ({}/{} required), {} column(s) unmapped",
        summary.mapped_fields,
        summary.total_fields,
        summary.required_mapped,
        summary.required_total,
        summary.unmapped_columns
    );
    if let (Some(min), Some(mean)) = (result.min_confidence(), result.mean_confidence()) {
        let levels = result.count_by_level(&engine.thresholds());
        let count = |level: ConfidenceLevel| levels.get(&level).copied().unwrap_or(0);
        println!(
            "Confidence: min {min:.2}, mean {mean:.2} ({} exact, {} strong, {} weak)",
            count(ConfidenceLevel::Exact),
            count(ConfidenceLevel::Strong),
            count(ConfidenceLevel::Weak)
        );
    }
    if !result.unmapped_fields().is_empty() {
        println!("Unmapped fields: {}", field_list(result.unmapped_fields()));
    }
    if !result.missing_required().is_empty() {
        println!("Missing required: {}", field_list(result.missing_required()));
    }
}

/// Best-scoring field for an unmapped column, including fields other columns hold.
fn closest_cell(engine: &MappingEngine, header: &str) -> Cell {
    match engine.rank_fields(header).first() {
        Some(best) => dim_cell(format!("{} ({:.2})", best.field_key, best.score)),
        None => dim_cell("-"),
    }
}

fn options_text(field: &FieldDescriptor) -> String {
    if field.enum_values.is_empty() {
        field.aliases.join(", ")
    } else {
        field.enum_values.join(" | ")
    }
}

fn field_list(fields: &[FieldDescriptor]) -> String {
    fields
        .iter()
        .map(|field| field.key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
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

fn level_cell(level: Option<ConfidenceLevel>) -> Cell {
    match level {
        Some(ConfidenceLevel::Exact) => Cell::new("exact").fg(Color::Green),
        Some(ConfidenceLevel::Strong) => Cell::new("strong").fg(Color::Cyan),
        Some(ConfidenceLevel::Weak) => Cell::new("weak").fg(Color::Yellow),
        None => dim_cell("-"),
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
