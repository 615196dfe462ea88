use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};

/// Value kind of an entity field. Determines how raw cells are coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    /// Kept as text; calendar validation is left to the caller.
    Date,
    Enum,
    TextList,
    NumberList,
}

impl FieldKind {
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Text,
        FieldKind::Number,
        FieldKind::Boolean,
        FieldKind::Date,
        FieldKind::Enum,
        FieldKind::TextList,
        FieldKind::NumberList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Enum => "enum",
            FieldKind::TextList => "text-list",
            FieldKind::NumberList => "number-list",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = ModelError;

    /// Accepts the canonical kebab-case names plus snake_case and camelCase spellings.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "text" | "string" => Ok(FieldKind::Text),
            "number" => Ok(FieldKind::Number),
            "boolean" | "bool" => Ok(FieldKind::Boolean),
            "date" => Ok(FieldKind::Date),
            "enum" => Ok(FieldKind::Enum),
            "textlist" => Ok(FieldKind::TextList),
            "numberlist" => Ok(FieldKind::NumberList),
            _ => Err(ModelError::UnknownFieldKind(s.to_string())),
        }
    }
}

/// A typed field value produced by coercion.
///
/// Text, date, and enum fields all produce [`FieldValue::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    TextList(Vec<String>),
    NumberList(Vec<f64>),
}

impl FieldValue {
    /// The value a mapped field takes when its cell is empty and no default exists.
    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::Date | FieldKind::Enum => FieldValue::Text(String::new()),
            FieldKind::Number => FieldValue::Number(0.0),
            FieldKind::Boolean => FieldValue::Boolean(false),
            FieldKind::TextList => FieldValue::TextList(Vec::new()),
            FieldKind::NumberList => FieldValue::NumberList(Vec::new()),
        }
    }

    /// Returns true if this value has the runtime shape produced for `kind`.
    pub fn matches_kind(&self, kind: FieldKind) -> bool {
        match self {
            FieldValue::Text(_) => {
                matches!(kind, FieldKind::Text | FieldKind::Date | FieldKind::Enum)
            }
            FieldValue::Number(_) => kind == FieldKind::Number,
            FieldValue::Boolean(_) => kind == FieldKind::Boolean,
            FieldValue::TextList(_) => kind == FieldKind::TextList,
            FieldValue::NumberList(_) => kind == FieldKind::NumberList,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Boolean(value) => write!(f, "{value}"),
            FieldValue::TextList(values) => f.write_str(&values.join(", ")),
            FieldValue::NumberList(values) => {
                let joined: Vec<String> = values.iter().map(f64::to_string).collect();
                f.write_str(&joined.join(", "))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::TextList(values)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(values: Vec<f64>) -> Self {
        FieldValue::NumberList(values)
    }
}

/// Describes one attribute of a target entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable identifier, unique within an entity.
    pub key: String,
    /// Human-readable name, also used as a matching candidate.
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Permitted values in declaration order; empty unless `kind` is [`FieldKind::Enum`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    /// Alternate phrasings accepted as exact or fuzzy matches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            enum_values: Vec::new(),
            default_value: None,
            aliases: Vec::new(),
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Boolean)
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Date)
    }

    pub fn enumeration<I, S>(key: impl Into<String>, label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(key, label, FieldKind::Enum);
        field.enum_values = values.into_iter().map(Into::into).collect();
        field
    }

    pub fn text_list(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::TextList)
    }

    pub fn number_list(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::NumberList)
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Checks the descriptor on its own: enum values only on enum fields (and
    /// never empty there), and a default whose shape matches the kind.
    ///
    /// An enum default that is not one of the declared values is accepted.
    pub fn validate(&self) -> Result<()> {
        if self.kind == FieldKind::Enum {
            if self.enum_values.is_empty() {
                return Err(ModelError::MissingEnumValues {
                    key: self.key.clone(),
                });
            }
        } else if !self.enum_values.is_empty() {
            return Err(ModelError::UnexpectedEnumValues {
                key: self.key.clone(),
                kind: self.kind,
            });
        }
        if let Some(default) = &self.default_value
            && !default.matches_kind(self.kind)
        {
            return Err(ModelError::DefaultKindMismatch {
                key: self.key.clone(),
                kind: self.kind,
            });
        }
        Ok(())
    }

    /// The declared default, provided its shape fits the field kind.
    pub fn default_for_kind(&self) -> Option<&FieldValue> {
        self.default_value
            .as_ref()
            .filter(|value| value.matches_kind(self.kind))
    }

    /// Returns true if `value` is one of the declared enum values (case-insensitive).
    pub fn allows(&self, value: &str) -> bool {
        self.enum_values
            .iter()
            .any(|option| option.to_lowercase() == value.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_loose_spellings() {
        assert_eq!("text-list".parse::<FieldKind>().unwrap(), FieldKind::TextList);
        assert_eq!("number_list".parse::<FieldKind>().unwrap(), FieldKind::NumberList);
        assert_eq!("numberList".parse::<FieldKind>().unwrap(), FieldKind::NumberList);
        assert_eq!(" Boolean ".parse::<FieldKind>().unwrap(), FieldKind::Boolean);
        assert!("currency".parse::<FieldKind>().is_err());
    }

    #[test]
    fn zero_values_match_their_kind() {
        for kind in FieldKind::ALL {
            assert!(FieldValue::zero(kind).matches_kind(kind), "{kind}");
        }
    }

    #[test]
    fn enum_without_values_is_rejected() {
        let field = FieldDescriptor::enumeration("status", "Status", Vec::<String>::new());
        assert_eq!(
            field.validate(),
            Err(ModelError::MissingEnumValues {
                key: "status".to_string()
            })
        );
    }

    #[test]
    fn default_outside_enumeration_is_tolerated() {
        let field =
            FieldDescriptor::enumeration("status", "Status", ["Open", "Closed"]).with_default("TBD");
        assert!(field.validate().is_ok());
        assert!(!field.allows("TBD"));
    }

    #[test]
    fn mismatched_default_is_ignored_for_coercion() {
        let field = FieldDescriptor {
            default_value: Some(FieldValue::Text("ten".to_string())),
            ..FieldDescriptor::number("count", "Count")
        };
        assert!(field.validate().is_err());
        assert!(field.default_for_kind().is_none());
    }
}
