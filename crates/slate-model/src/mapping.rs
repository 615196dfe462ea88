//! Column mapping types shared by the mapping engine and its callers.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::FieldDescriptor;

/// Text used for an unmapped column wherever a mapping is rendered or parsed as a string.
pub const UNMAPPED: &str = "none";

/// Thresholds used by two-pass auto-mapping.
///
/// - At or above `lock_in`: the column claims its field in the first pass.
/// - At or above `minimum`: accepted in the second pass for leftover columns.
/// - Below `minimum`: the column stays unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchThresholds {
    pub lock_in: f64,
    pub minimum: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            lock_in: 0.8,
            minimum: 0.5,
        }
    }
}

impl MatchThresholds {
    /// Creates thresholds, rejecting values outside `[0, 1]` or a minimum above the lock-in.
    pub fn new(lock_in: f64, minimum: f64) -> Result<Self> {
        let in_range = |value: f64| (0.0..=1.0).contains(&value);
        if !in_range(lock_in) || !in_range(minimum) {
            return Err(ModelError::InvalidThresholds(format!(
                "lock_in {lock_in} and minimum {minimum} must lie in [0, 1]"
            )));
        }
        if minimum > lock_in {
            return Err(ModelError::InvalidThresholds(format!(
                "minimum {minimum} exceeds lock_in {lock_in}"
            )));
        }
        Ok(Self { lock_in, minimum })
    }

    /// Categorizes a confidence score. Returns `None` below the minimum.
    pub fn categorize(&self, confidence: f64) -> Option<ConfidenceLevel> {
        if confidence >= 1.0 {
            Some(ConfidenceLevel::Exact)
        } else if confidence >= self.lock_in {
            Some(ConfidenceLevel::Strong)
        } else if confidence >= self.minimum {
            Some(ConfidenceLevel::Weak)
        } else {
            None
        }
    }
}

/// Confidence categories for reviewing a proposed mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// Accepted only in the second pass; worth a look before import.
    Weak,
    /// Cleared the lock-in threshold without being an exact match.
    Strong,
    /// Exact header match or an explicit user assignment.
    Exact,
}

impl ConfidenceLevel {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Exact => "exact match",
            Self::Strong => "strong match - likely correct",
            Self::Weak => "weak match - should review",
        }
    }
}

/// The working association for one source column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Zero-based position in the source table.
    pub column_index: usize,
    /// Literal header text.
    pub column_header: String,
    /// Key of the field this column feeds.
    pub mapped_field: Option<String>,
    /// Match strength in `[0, 1]`; 0 when unmapped.
    pub confidence: f64,
}

impl ColumnMapping {
    pub fn unmapped(column_index: usize, column_header: impl Into<String>) -> Self {
        Self {
            column_index,
            column_header: column_header.into(),
            mapped_field: None,
            confidence: 0.0,
        }
    }

    /// Creates a mapped column. Confidence is clamped to `[0, 1]`.
    pub fn mapped(
        column_index: usize,
        column_header: impl Into<String>,
        field_key: impl Into<String>,
        confidence: f64,
    ) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            column_index,
            column_header: column_header.into(),
            mapped_field: Some(field_key.into()),
            confidence,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped_field.is_some()
    }

    /// The mapped field key, or [`UNMAPPED`].
    pub fn field_or_none(&self) -> &str {
        self.mapped_field.as_deref().unwrap_or(UNMAPPED)
    }

    #[must_use]
    pub fn demoted(&self) -> Self {
        Self::unmapped(self.column_index, self.column_header.clone())
    }
}

/// A snapshot of one full mapping attempt.
///
/// Only [`MappingResult::from_mappings`] builds one, so the unmapped and
/// missing-required lists and the validity flag always agree with the
/// column mappings they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingResult {
    mappings: Vec<ColumnMapping>,
    unmapped_fields: Vec<FieldDescriptor>,
    missing_required: Vec<FieldDescriptor>,
    is_valid: bool,
}

impl MappingResult {
    /// Derives a result from per-column mappings.
    ///
    /// Mappings that name a field not present in `fields` are demoted, and if
    /// two columns name the same field only the first keeps it.
    pub fn from_mappings(mappings: Vec<ColumnMapping>, fields: &[FieldDescriptor]) -> Self {
        let known: BTreeSet<&str> = fields.iter().map(|field| field.key.as_str()).collect();
        let mut claimed: BTreeSet<String> = BTreeSet::new();
        let mappings: Vec<ColumnMapping> = mappings
            .into_iter()
            .map(|mapping| match mapping.mapped_field.as_deref() {
                Some(key) if known.contains(key) && !claimed.contains(key) => {
                    claimed.insert(key.to_string());
                    mapping
                }
                Some(_) => mapping.demoted(),
                None => mapping,
            })
            .collect();

        let unmapped_fields: Vec<FieldDescriptor> = fields
            .iter()
            .filter(|field| !claimed.contains(&field.key))
            .cloned()
            .collect();
        let missing_required: Vec<FieldDescriptor> = unmapped_fields
            .iter()
            .filter(|field| field.required)
            .cloned()
            .collect();
        let is_valid = missing_required.is_empty();

        Self {
            mappings,
            unmapped_fields,
            missing_required,
            is_valid,
        }
    }

    /// One mapping per source column, in source order.
    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    /// Fields no column claims.
    pub fn unmapped_fields(&self) -> &[FieldDescriptor] {
        &self.unmapped_fields
    }

    /// Required fields no column claims.
    pub fn missing_required(&self) -> &[FieldDescriptor] {
        &self.missing_required
    }

    /// True iff every required field is claimed by some column.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn mapping(&self, column_index: usize) -> Option<&ColumnMapping> {
        self.mappings.get(column_index)
    }

    /// The column that currently feeds `field_key`, if any.
    pub fn column_for_field(&self, field_key: &str) -> Option<&ColumnMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.mapped_field.as_deref() == Some(field_key))
    }

    pub fn mapped_count(&self) -> usize {
        self.mappings.iter().filter(|m| m.is_mapped()).count()
    }

    /// Counts mapped columns per confidence level.
    pub fn count_by_level(&self, thresholds: &MatchThresholds) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for mapping in self.mappings.iter().filter(|m| m.is_mapped()) {
            if let Some(level) = thresholds.categorize(mapping.confidence) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Lowest confidence among mapped columns.
    pub fn min_confidence(&self) -> Option<f64> {
        self.mappings
            .iter()
            .filter(|m| m.is_mapped())
            .map(|m| m.confidence)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Mean confidence among mapped columns.
    pub fn mean_confidence(&self) -> Option<f64> {
        let mapped: Vec<f64> = self
            .mappings
            .iter()
            .filter(|m| m.is_mapped())
            .map(|m| m.confidence)
            .collect();
        if mapped.is_empty() {
            return None;
        }
        Some(mapped.iter().sum::<f64>() / mapped.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::text("notes", "Notes"),
        ]
    }

    #[test]
    fn duplicate_claims_keep_first_column() {
        let result = MappingResult::from_mappings(
            vec![
                ColumnMapping::mapped(0, "Name", "name", 1.0),
                ColumnMapping::mapped(1, "Full Name", "name", 0.9),
            ],
            &fields(),
        );
        assert_eq!(result.mappings()[0].mapped_field.as_deref(), Some("name"));
        assert_eq!(result.mappings()[1].mapped_field, None);
        assert_eq!(result.mappings()[1].confidence, 0.0);
        assert!(result.is_valid());
    }

    #[test]
    fn unknown_field_keys_are_demoted() {
        let result =
            MappingResult::from_mappings(vec![ColumnMapping::mapped(0, "X", "bogus", 1.0)], &fields());
        assert!(!result.mappings()[0].is_mapped());
        assert_eq!(result.missing_required().len(), 1);
        assert!(!result.is_valid());
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(ColumnMapping::mapped(0, "a", "b", 1.7).confidence, 1.0);
        assert_eq!(ColumnMapping::mapped(0, "a", "b", -0.2).confidence, 0.0);
        assert_eq!(ColumnMapping::mapped(0, "a", "b", f64::NAN).confidence, 0.0);
    }

    #[test]
    fn thresholds_reject_inverted_bounds() {
        assert!(MatchThresholds::new(0.5, 0.8).is_err());
        assert!(MatchThresholds::new(1.2, 0.5).is_err());
        assert!(MatchThresholds::new(0.9, 0.6).is_ok());
    }

    #[test]
    fn categorize_levels() {
        let thresholds = MatchThresholds::default();
        assert_eq!(thresholds.categorize(1.0), Some(ConfidenceLevel::Exact));
        assert_eq!(thresholds.categorize(0.85), Some(ConfidenceLevel::Strong));
        assert_eq!(thresholds.categorize(0.68), Some(ConfidenceLevel::Weak));
        assert_eq!(thresholds.categorize(0.2), None);
    }
}
