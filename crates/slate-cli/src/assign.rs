//! `--assign COL=FIELD` overrides.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use slate_map::{MappingSession, closest_field, normalize};
use slate_model::UNMAPPED;
use tracing::info;

/// Column named on the command line, by zero-based index or by header text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Index(usize),
    Header(String),
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(index) => write!(f, "#{index}"),
            ColumnRef::Header(header) => write!(f, "{header:?}"),
        }
    }
}

/// One manual override. A `field` of `None` leaves the column unmapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAssignment {
    pub column: ColumnRef,
    pub field: Option<String>,
}

impl FromStr for ColumnAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, field) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected COL=FIELD, got {s:?}"))?;
        let column = column.trim();
        let field = field.trim();
        if column.is_empty() {
            return Err(format!("missing column in {s:?}"));
        }
        if field.is_empty() {
            return Err(format!("missing field in {s:?} (use {UNMAPPED} to unmap)"));
        }
        let column = match column.parse::<usize>() {
            Ok(index) => ColumnRef::Index(index),
            Err(_) => ColumnRef::Header(column.to_string()),
        };
        let field = (!field.eq_ignore_ascii_case(UNMAPPED)).then(|| field.to_string());
        Ok(Self { column, field })
    }
}

/// Finds the column a reference points at.
///
/// Headers match exactly first, then after normalization.
pub fn resolve_column(column: &ColumnRef, headers: &[String]) -> Result<usize> {
    match column {
        ColumnRef::Index(index) if *index < headers.len() => Ok(*index),
        ColumnRef::Index(index) => bail!(
            "column {index} is out of range (sheet has {} columns)",
            headers.len()
        ),
        ColumnRef::Header(name) => headers
            .iter()
            .position(|header| header == name)
            .or_else(|| {
                let wanted = normalize(name);
                headers.iter().position(|header| normalize(header) == wanted)
            })
            .ok_or_else(|| anyhow!("no column named {name:?}")),
    }
}

/// Applies overrides to a session in order.
pub fn apply_assignments(
    session: &mut MappingSession,
    assignments: &[ColumnAssignment],
) -> Result<()> {
    for assignment in assignments {
        let column = resolve_column(&assignment.column, session.headers())?;
        match &assignment.field {
            Some(key) => {
                if !session.engine().fields().iter().any(|field| &field.key == key) {
                    return Err(unknown_field(key, session));
                }
                session.assign(column, key)?;
                info!(column, field = %key, "column assigned");
            }
            None => {
                session.clear(column)?;
                info!(column, "column unmapped");
            }
        }
    }
    Ok(())
}

fn unknown_field(key: &str, session: &MappingSession) -> anyhow::Error {
    match closest_field(key, session.engine().fields()) {
        Some(hint) => anyhow!("unknown field {key:?} (did you mean {:?}?)", hint.key),
        None => anyhow!("unknown field {key:?}"),
    }
}
