//! Row conversion and type coercion.
//!
//! Coercion is total: every kind has a fallback for malformed input, so one
//! bad cell never aborts a batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use slate_model::{ColumnMapping, ConvertedRecord, FieldDescriptor, FieldKind, FieldValue};
use tracing::{debug, warn};

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];
const LIST_SEPARATORS: [char; 2] = [',', ';'];
const TRUE_TOKENS: [&str; 7] = ["true", "yes", "1", "y", "x", "✓", "✔"];

/// What an enum cell becomes when it matches no declared value and the field has no default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumFallback {
    /// Use the first declared enum value.
    #[default]
    FirstDeclared,
    /// Keep the trimmed cell text.
    Raw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    #[serde(default)]
    pub enum_fallback: EnumFallback,
}

/// Converts raw rows into records with the default options.
///
/// See [`convert_rows_with`].
pub fn convert_rows<R, S>(
    rows: &[R],
    mappings: &[ColumnMapping],
    fields: &[FieldDescriptor],
) -> Vec<ConvertedRecord>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    convert_rows_with(rows, mappings, fields, &ConversionOptions::default())
}

/// Converts raw rows into one record per row.
///
/// For each field in declaration order: an unmapped field takes its default
/// or is left out of the record; a mapped field reads its column (a short row
/// reads as empty) and coerces the trimmed cell per the field kind. The
/// mapping does not need to be valid.
pub fn convert_rows_with<R, S>(
    rows: &[R],
    mappings: &[ColumnMapping],
    fields: &[FieldDescriptor],
    options: &ConversionOptions,
) -> Vec<ConvertedRecord>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let plan = conversion_plan(mappings, fields);
    let records: Vec<ConvertedRecord> = rows
        .iter()
        .map(|row| convert_row(row.as_ref(), &plan, options))
        .collect();
    debug!(
        rows = records.len(),
        fields = fields.len(),
        mapped_fields = plan.iter().filter(|(_, column)| column.is_some()).count(),
        "rows converted"
    );
    records
}

/// Converts one candidate record given as field key to raw text.
///
/// Used for records that arrive already keyed by field (for example from an
/// extraction pipeline) rather than as spreadsheet rows. Keys that are not
/// fields are ignored; absent fields behave like unmapped columns.
pub fn convert_named_cells(
    cells: &BTreeMap<String, String>,
    fields: &[FieldDescriptor],
    options: &ConversionOptions,
) -> ConvertedRecord {
    let mut record = ConvertedRecord::new();
    for field in fields {
        match cells.get(&field.key) {
            Some(raw) => {
                record.insert(field.key.clone(), coerce_cell(raw, field, options));
            }
            None => {
                if let Some(default) = field.default_for_kind() {
                    record.insert(field.key.clone(), default.clone());
                }
            }
        }
    }
    record
}

/// Required fields that a converted record lacks.
///
/// A field counts as lacking when its key is absent, or its value is empty
/// text or an empty list.
pub fn validate_record<'a>(
    record: &ConvertedRecord,
    fields: &'a [FieldDescriptor],
) -> Vec<&'a FieldDescriptor> {
    fields
        .iter()
        .filter(|field| field.required)
        .filter(|field| match record.get(&field.key) {
            None => true,
            Some(FieldValue::Text(text)) => text.is_empty(),
            Some(FieldValue::TextList(values)) => values.is_empty(),
            Some(FieldValue::NumberList(values)) => values.is_empty(),
            Some(FieldValue::Number(_) | FieldValue::Boolean(_)) => false,
        })
        .collect()
}

/// Coerces one raw cell according to the field kind.
pub fn coerce_cell(raw: &str, field: &FieldDescriptor, options: &ConversionOptions) -> FieldValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return field
            .default_for_kind()
            .cloned()
            .unwrap_or_else(|| FieldValue::zero(field.kind));
    }
    match field.kind {
        FieldKind::Text | FieldKind::Date => FieldValue::Text(trimmed.to_string()),
        FieldKind::Number => parse_number(trimmed)
            .map(FieldValue::Number)
            .or_else(|| field.default_for_kind().cloned())
            .unwrap_or(FieldValue::Number(0.0)),
        FieldKind::Boolean => FieldValue::Boolean(parse_boolean(trimmed)),
        FieldKind::Enum => FieldValue::Text(resolve_enum(trimmed, field, options)),
        FieldKind::TextList => FieldValue::TextList(
            split_list(trimmed).map(str::to_string).collect(),
        ),
        FieldKind::NumberList => {
            FieldValue::NumberList(split_list(trimmed).filter_map(parse_list_number).collect())
        }
    }
}

/// Parses a number after removing currency symbols, thousands separators, and whitespace.
///
/// The remainder must be a complete float literal: `12abc` and `1.2.3` fail.
/// Non-finite results (`inf`, `NaN`) count as failures.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !CURRENCY_SYMBOLS.contains(ch) && *ch != ',' && !ch.is_whitespace())
        .collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// One number-list piece, parsed as-is. Nothing is stripped, so `12 14` fails.
fn parse_list_number(piece: &str) -> Option<f64> {
    piece.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn parse_boolean(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    TRUE_TOKENS.contains(&lowered.as_str())
}

/// Resolves an enum cell: exact (case-insensitive), then substring either
/// way, then the field default, then the configured fallback.
pub fn resolve_enum(value: &str, field: &FieldDescriptor, options: &ConversionOptions) -> String {
    let lowered = value.to_lowercase();
    let options_lowered: Vec<(String, &String)> = field
        .enum_values
        .iter()
        .map(|option| (option.to_lowercase(), option))
        .collect();

    if let Some((_, exact)) = options_lowered.iter().find(|(lower, _)| *lower == lowered) {
        return (*exact).clone();
    }
    if let Some((_, partial)) = options_lowered.iter().find(|(lower, _)| {
        !lower.is_empty() && (lowered.contains(lower.as_str()) || lower.contains(&lowered))
    }) {
        return (*partial).clone();
    }
    if let Some(FieldValue::Text(default)) = field.default_for_kind() {
        return default.clone();
    }
    if options.enum_fallback == EnumFallback::FirstDeclared
        && let Some(first) = field.enum_values.first()
    {
        warn!(
            field = %field.key,
            fallback = %first,
            "unrecognized enum value mapped to first declared option"
        );
        return first.clone();
    }
    value.to_string()
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(LIST_SEPARATORS)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}

fn conversion_plan<'a>(
    mappings: &[ColumnMapping],
    fields: &'a [FieldDescriptor],
) -> Vec<(&'a FieldDescriptor, Option<usize>)> {
    fields
        .iter()
        .map(|field| {
            let column = mappings
                .iter()
                .find(|mapping| mapping.mapped_field.as_deref() == Some(field.key.as_str()))
                .map(|mapping| mapping.column_index);
            if column.is_none()
                && field.default_value.is_some()
                && field.default_for_kind().is_none()
            {
                warn!(field = %field.key, kind = %field.kind, "ignoring default of the wrong shape");
            }
            (field, column)
        })
        .collect()
}

fn convert_row<S: AsRef<str>>(
    row: &[S],
    plan: &[(&FieldDescriptor, Option<usize>)],
    options: &ConversionOptions,
) -> ConvertedRecord {
    let mut record = ConvertedRecord::new();
    for (field, column) in plan {
        match column {
            Some(index) => {
                let raw = row.get(*index).map_or("", AsRef::as_ref);
                record.insert(field.key.clone(), coerce_cell(raw, field, options));
            }
            None => {
                if let Some(default) = field.default_for_kind() {
                    record.insert(field.key.clone(), default.clone());
                }
            }
        }
    }
    record
}
