//! Interactive mapping state with undo and redo.

use serde::Serialize;
use slate_model::{ConvertedRecord, MappingResult};
use tracing::debug;

use crate::convert::{ConversionOptions, convert_rows_with};
use crate::engine::MappingEngine;
use crate::error::MappingError;

/// Counts shown next to a mapping under review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    pub total_fields: usize,
    pub mapped_fields: usize,
    pub required_total: usize,
    pub required_mapped: usize,
    pub unmapped_columns: usize,
}

/// A table being mapped to one entity.
///
/// Every change pushes a new [`MappingResult`] snapshot; earlier snapshots
/// are kept for [`MappingSession::undo`]. A change after an undo discards
/// the redo history.
#[derive(Debug, Clone)]
pub struct MappingSession {
    engine: MappingEngine,
    headers: Vec<String>,
    history: Vec<MappingResult>,
    cursor: usize,
    options: ConversionOptions,
}

impl MappingSession {
    /// Starts a session from the engine's suggestion for `headers`.
    pub fn new<S: AsRef<str>>(engine: MappingEngine, headers: &[S]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let initial = engine.suggest(&headers);
        Self {
            engine,
            headers,
            history: vec![initial],
            cursor: 0,
            options: ConversionOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn engine(&self) -> &MappingEngine {
        &self.engine
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn current(&self) -> &MappingResult {
        &self.history[self.cursor]
    }

    /// Maps a column to a field, demoting whichever column held it before.
    pub fn assign(&mut self, column_index: usize, field_key: &str) -> Result<(), MappingError> {
        let next = self
            .engine
            .assign(self.current(), column_index, Some(field_key))?;
        self.push(next);
        Ok(())
    }

    /// Leaves a column unmapped.
    pub fn clear(&mut self, column_index: usize) -> Result<(), MappingError> {
        let next = self.engine.assign(self.current(), column_index, None)?;
        self.push(next);
        Ok(())
    }

    /// Returns to the engine's suggestion, keeping the history.
    pub fn reset(&mut self) {
        let initial = self.engine.suggest(&self.headers);
        self.push(initial);
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, "redo");
        true
    }

    pub fn summary(&self) -> MappingSummary {
        let current = self.current();
        let fields = self.engine.fields();
        let required_total = fields.iter().filter(|f| f.required).count();
        MappingSummary {
            total_fields: fields.len(),
            mapped_fields: current.mapped_count(),
            required_total,
            required_mapped: required_total - current.missing_required().len(),
            unmapped_columns: current.mappings().len() - current.mapped_count(),
        }
    }

    /// Converts rows with the current mapping.
    pub fn convert<R, S>(&self, rows: &[R]) -> Vec<ConvertedRecord>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        convert_rows_with(
            rows,
            self.current().mappings(),
            self.engine.fields(),
            &self.options,
        )
    }

    fn push(&mut self, result: MappingResult) {
        self.history.truncate(self.cursor + 1);
        self.history.push(result);
        self.cursor = self.history.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use slate_model::FieldDescriptor;

    use super::*;

    fn session() -> MappingSession {
        let engine = MappingEngine::new(vec![
            FieldDescriptor::text("actorName", "Actor Name").required(),
            FieldDescriptor::text("agent", "Agent"),
        ]);
        MappingSession::new(engine, &["Actor Name", "Agent Name", "Notes"])
    }

    #[test]
    fn undo_and_redo_walk_history() {
        let mut session = session();
        assert!(!session.can_undo());
        session.assign(2, "actorName").unwrap();
        assert_eq!(session.current().mapping(0).unwrap().mapped_field, None);
        assert!(session.current().is_valid());

        assert!(session.undo());
        assert_eq!(
            session.current().mapping(0).unwrap().mapped_field.as_deref(),
            Some("actorName")
        );
        assert!(session.redo());
        assert_eq!(
            session.current().mapping(2).unwrap().mapped_field.as_deref(),
            Some("actorName")
        );
        assert!(!session.redo());
    }

    #[test]
    fn new_change_drops_redo_history() {
        let mut session = session();
        session.clear(0).unwrap();
        session.undo();
        session.clear(1).unwrap();
        assert!(!session.can_redo());
        assert_eq!(
            session.current().mapping(0).unwrap().mapped_field.as_deref(),
            Some("actorName")
        );
    }

    #[test]
    fn summary_counts() {
        let mut session = session();
        assert_eq!(
            session.summary(),
            MappingSummary {
                total_fields: 2,
                mapped_fields: 2,
                required_total: 1,
                required_mapped: 1,
                unmapped_columns: 1,
            }
        );
        session.clear(0).unwrap();
        let summary = session.summary();
        assert_eq!(summary.required_mapped, 0);
        assert_eq!(summary.unmapped_columns, 2);
    }

    #[test]
    fn reset_is_undoable() {
        let mut session = session();
        session.clear(0).unwrap();
        session.reset();
        assert!(session.current().is_valid());
        assert!(session.undo());
        assert!(!session.current().is_valid());
    }

    #[test]
    fn failed_change_leaves_history_alone() {
        let mut session = session();
        assert!(session.assign(9, "agent").is_err());
        assert!(!session.can_undo());
    }
}
