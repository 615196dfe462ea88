//! Canonical text forms used when comparing headers with field names.

use slate_model::FieldDescriptor;

/// Lowercases, turns `_ - . # / \` and whitespace runs into single spaces, and trims.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .replace(['_', '-', '.', '#', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits camelCase and acronym boundaries with spaces, then lowercases.
///
/// `vfxShotStatus` becomes `vfx shot status`; `HTMLExport` becomes `html export`.
pub fn split_compound_words(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut split = String::with_capacity(raw.len() + 4);
    for (idx, &ch) in chars.iter().enumerate() {
        if idx > 0 && ch.is_ascii_uppercase() {
            let prev = chars[idx - 1];
            let next_is_lower = chars.get(idx + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase() || (prev.is_ascii_uppercase() && next_is_lower) {
                split.push(' ');
            }
        }
        split.push(ch);
    }
    split.to_lowercase()
}

/// Comparison variants for a field: split key, raw key, label, then aliases.
///
/// Every variant is normalized; empty and repeated variants are dropped.
pub fn field_variants(field: &FieldDescriptor) -> Vec<String> {
    let candidates = [
        normalize(&split_compound_words(&field.key)),
        normalize(&field.key),
        normalize(&field.label),
    ]
    .into_iter()
    .chain(field.aliases.iter().map(|alias| normalize(alias)));

    let mut variants: Vec<String> = Vec::new();
    for candidate in candidates {
        if !candidate.is_empty() && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize("  Scene #s "), "scene s");
        assert_eq!(normalize("Est._Cost"), "est cost");
        assert_eq!(normalize("Call\\Wrap/Time"), "call wrap time");
        assert_eq!(normalize("Day\t\tNumber"), "day number");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn split_compound_handles_camel_and_acronyms() {
        assert_eq!(split_compound_words("vfxShotStatus"), "vfx shot status");
        assert_eq!(split_compound_words("actorName"), "actor name");
        assert_eq!(split_compound_words("HTMLExport"), "html export");
        assert_eq!(split_compound_words("sceneID"), "scene id");
        assert_eq!(split_compound_words("notes"), "notes");
    }

    #[test]
    fn variants_are_deduplicated_in_order() {
        let field = FieldDescriptor::text("email", "Email")
            .with_aliases(["E-mail", "email", "  "]);
        assert_eq!(field_variants(&field), vec!["email", "e mail"]);

        let field = FieldDescriptor::text("characterName", "Character Name");
        assert_eq!(
            field_variants(&field),
            vec!["character name", "charactername"]
        );
    }
}
