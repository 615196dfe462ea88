//! Mapping engine implementation.

use std::cmp::Ordering;

use serde::Serialize;
use slate_model::{ColumnMapping, FieldDescriptor, MappingResult, MatchThresholds};
use tracing::{debug, trace};

use crate::error::MappingError;
use crate::normalize::{field_variants, normalize};
use crate::score::{MatchKind, best_variant};

/// Engine for mapping source columns to entity fields.
///
/// Field variants are computed once at construction; every call is a pure
/// function of its arguments, so one engine can serve many tables and threads.
///
/// # Example
///
/// ```
/// use slate_map::MappingEngine;
/// use slate_model::FieldDescriptor;
///
/// let engine = MappingEngine::new(vec![
///     FieldDescriptor::text("actorName", "Actor Name").required(),
///     FieldDescriptor::number_list("scenes", "Scenes").with_aliases(["scene numbers"]),
/// ]);
/// let result = engine.suggest(&["Actor Name", "Scene #s"]);
/// assert!(result.is_valid());
/// assert_eq!(result.mappings()[1].mapped_field.as_deref(), Some("scenes"));
/// ```
#[derive(Debug, Clone)]
pub struct MappingEngine {
    fields: Vec<FieldDescriptor>,
    variants: Vec<Vec<String>>,
    thresholds: MatchThresholds,
}

/// How well one header matches one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldScore {
    pub field_key: String,
    pub score: f64,
    /// The normalized field variant that produced the score.
    pub variant: String,
    pub kind: MatchKind,
}

impl MappingEngine {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        let variants = fields.iter().map(field_variants).collect();
        Self {
            fields,
            variants,
            thresholds: MatchThresholds::default(),
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: MatchThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn thresholds(&self) -> MatchThresholds {
        self.thresholds
    }

    /// Proposes a mapping for the given headers.
    ///
    /// Two passes. The first only accepts matches at or above the lock-in
    /// threshold and claims them strongest first, so an exact header keeps its
    /// field even when an earlier column matches it less well; equal scores go
    /// to the leftmost column. The second walks the remaining columns left to
    /// right and offers them the remaining fields at the minimum threshold.
    /// A field is claimed by at most one column.
    pub fn suggest<S: AsRef<str>>(&self, headers: &[S]) -> MappingResult {
        let normalized: Vec<String> = headers.iter().map(|h| normalize(h.as_ref())).collect();
        let mut claimed = vec![false; self.fields.len()];
        let mut assigned: Vec<Option<(usize, f64)>> = vec![None; headers.len()];

        while let Some((column, field_idx, score)) =
            self.strongest_lock_in(&normalized, &assigned, &claimed)
        {
            claimed[field_idx] = true;
            assigned[column] = Some((field_idx, score));
            trace!(
                column,
                header = %normalized[column],
                field = %self.fields[field_idx].key,
                score,
                "locked in"
            );
        }

        for (column, header) in normalized.iter().enumerate() {
            if assigned[column].is_some() {
                continue;
            }
            match self.best_unclaimed(header, &claimed) {
                Some((field_idx, score)) if score >= self.thresholds.minimum => {
                    claimed[field_idx] = true;
                    assigned[column] = Some((field_idx, score));
                    trace!(
                        column,
                        header = %header,
                        field = %self.fields[field_idx].key,
                        score,
                        "matched"
                    );
                }
                _ => trace!(column, header = %header, "left unmapped"),
            }
        }

        let mappings = headers
            .iter()
            .zip(assigned)
            .enumerate()
            .map(|(column, (header, assignment))| match assignment {
                Some((field_idx, score)) => ColumnMapping::mapped(
                    column,
                    header.as_ref(),
                    self.fields[field_idx].key.clone(),
                    score,
                ),
                None => ColumnMapping::unmapped(column, header.as_ref()),
            })
            .collect();
        let result = MappingResult::from_mappings(mappings, &self.fields);
        debug!(
            columns = headers.len(),
            mapped = result.mapped_count(),
            missing_required = result.missing_required().len(),
            valid = result.is_valid(),
            "auto-mapping complete"
        );
        result
    }

    /// Reassigns one column; see [`apply_override`].
    pub fn assign(
        &self,
        previous: &MappingResult,
        column_index: usize,
        field_key: Option<&str>,
    ) -> Result<MappingResult, MappingError> {
        apply_override(previous, column_index, field_key, &self.fields)
    }

    /// Scores a header against every field, best first.
    ///
    /// Fields that do not match at all are left out. Useful for showing
    /// alternatives next to a proposed mapping.
    pub fn rank_fields(&self, header: &str) -> Vec<FieldScore> {
        let header = normalize(header);
        let mut scores: Vec<FieldScore> = self
            .fields
            .iter()
            .zip(&self.variants)
            .filter_map(|(field, variants)| {
                let (variant, similarity) = best_variant(&header, variants)?;
                (similarity.score > 0.0).then(|| FieldScore {
                    field_key: field.key.clone(),
                    score: similarity.score,
                    variant: variant.to_string(),
                    kind: similarity.kind,
                })
            })
            .collect();
        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scores
    }

    /// Highest-scoring unassigned column whose best unclaimed field reaches
    /// the lock-in threshold, as `(column, field, score)`.
    fn strongest_lock_in(
        &self,
        normalized: &[String],
        assigned: &[Option<(usize, f64)>],
        claimed: &[bool],
    ) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for (column, header) in normalized.iter().enumerate() {
            if assigned[column].is_some() {
                continue;
            }
            if let Some((field_idx, score)) = self.best_unclaimed(header, claimed)
                && score >= self.thresholds.lock_in
                && best.is_none_or(|(_, _, top)| score > top)
            {
                best = Some((column, field_idx, score));
            }
        }
        best
    }

    /// Best field not yet claimed; the earliest declared field wins a tie.
    fn best_unclaimed(&self, header: &str, claimed: &[bool]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, variants) in self.variants.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            let Some((_, similarity)) = best_variant(header, variants) else {
                continue;
            };
            if similarity.score > 0.0 && best.is_none_or(|(_, score)| similarity.score > score) {
                best = Some((idx, similarity.score));
            }
        }
        best
    }
}

/// Proposes a mapping with the default thresholds.
pub fn auto_map<S: AsRef<str>>(headers: &[S], fields: &[FieldDescriptor]) -> MappingResult {
    MappingEngine::new(fields.to_vec()).suggest(headers)
}

/// Returns a new result with `column_index` assigned to `field_key`, or unmapped for `None`.
///
/// A chosen field gets confidence 1.0. Any other column that held the same
/// field is demoted to unmapped, so the newest assignment wins. Summary lists
/// and validity are recomputed; `previous` is left untouched.
pub fn apply_override(
    previous: &MappingResult,
    column_index: usize,
    field_key: Option<&str>,
    fields: &[FieldDescriptor],
) -> Result<MappingResult, MappingError> {
    let columns = previous.mappings().len();
    if !previous
        .mappings()
        .iter()
        .any(|mapping| mapping.column_index == column_index)
    {
        return Err(MappingError::ColumnOutOfRange {
            index: column_index,
            columns,
        });
    }
    if let Some(key) = field_key
        && !fields.iter().any(|field| field.key == key)
    {
        return Err(MappingError::UnknownField {
            key: key.to_string(),
        });
    }

    let mappings: Vec<ColumnMapping> = previous
        .mappings()
        .iter()
        .map(|mapping| {
            if mapping.column_index == column_index {
                match field_key {
                    Some(key) => ColumnMapping::mapped(
                        column_index,
                        mapping.column_header.clone(),
                        key,
                        1.0,
                    ),
                    None => mapping.demoted(),
                }
            } else if field_key.is_some() && mapping.mapped_field.as_deref() == field_key {
                debug!(
                    column = mapping.column_index,
                    field = %mapping.field_or_none(),
                    "demoting previous claimant"
                );
                mapping.demoted()
            } else {
                mapping.clone()
            }
        })
        .collect();

    Ok(MappingResult::from_mappings(mappings, fields))
}
