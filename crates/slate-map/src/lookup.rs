//! "Did you mean" lookup for field keys typed by a user.

use rapidfuzz::distance::jaro_winkler;
use slate_model::FieldDescriptor;

use crate::normalize::{field_variants, normalize};

/// Minimum Jaro-Winkler similarity for a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// The field whose key, label, or alias is closest to `query`.
///
/// Returns `None` when nothing reaches the suggestion threshold. The earlier
/// declared field wins a tie.
pub fn closest_field<'a>(query: &str, fields: &'a [FieldDescriptor]) -> Option<&'a FieldDescriptor> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }
    let mut best: Option<(&FieldDescriptor, f64)> = None;
    for field in fields {
        let score = field_variants(field)
            .iter()
            .map(|variant| jaro_winkler::similarity(query.chars(), variant.chars()))
            .fold(0.0, f64::max);
        if score >= SUGGESTION_THRESHOLD && best.is_none_or(|(_, current)| score > current) {
            best = Some((field, score));
        }
    }
    best.map(|(field, _)| field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_near_miss() {
        let fields = vec![
            FieldDescriptor::text("actorName", "Actor Name"),
            FieldDescriptor::text("agent", "Agent"),
        ];
        let hit = closest_field("actorname", &fields).map(|f| f.key.as_str());
        assert_eq!(hit, Some("actorName"));
        let hit = closest_field("agnet", &fields).map(|f| f.key.as_str());
        assert_eq!(hit, Some("agent"));
        assert!(closest_field("budget", &fields).is_none());
        assert!(closest_field("", &fields).is_none());
    }
}
