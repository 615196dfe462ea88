use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::sample::Index;
use slate_map::{ConversionOptions, EnumFallback, apply_override, auto_map, coerce_cell};
use slate_model::{FieldDescriptor, FieldKind, FieldValue};
use slate_standards::load_default_registry;

const HEADER_POOL: &[&str] = &[
    "Actor Name",
    "Actor",
    "Character",
    "Character Name",
    "Char",
    "Email",
    "E-mail",
    "Phone",
    "Scene #s",
    "Scenes",
    "Status",
    "Agent",
    "Notes",
    "",
];

fn cast_fields() -> Vec<FieldDescriptor> {
    load_default_registry()
        .expect("builtin registry")
        .fields("castMember")
        .expect("castMember entity")
        .to_vec()
}

fn headers() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(HEADER_POOL).prop_map(str::to_string),
            "[A-Za-z #_.-]{0,16}",
        ],
        0..10,
    )
}

fn kind() -> impl Strategy<Value = FieldKind> {
    prop::sample::select(FieldKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn each_field_claimed_at_most_once(headers in headers()) {
        let fields = cast_fields();
        let result = auto_map(&headers, &fields);
        prop_assert_eq!(result.mappings().len(), headers.len());

        let mut seen = BTreeSet::new();
        for mapping in result.mappings() {
            if let Some(key) = &mapping.mapped_field {
                prop_assert!(seen.insert(key.clone()), "{} claimed twice", key);
                prop_assert!(fields.iter().any(|f| &f.key == key));
                prop_assert!(mapping.confidence >= 0.5 && mapping.confidence <= 1.0);
            } else {
                prop_assert_eq!(mapping.confidence, 0.0);
            }
        }
    }

    #[test]
    fn validity_matches_required_coverage(headers in headers()) {
        let fields = cast_fields();
        let result = auto_map(&headers, &fields);
        let mapped: BTreeSet<&str> = result
            .mappings()
            .iter()
            .filter_map(|m| m.mapped_field.as_deref())
            .collect();
        let covered = fields
            .iter()
            .filter(|f| f.required)
            .all(|f| mapped.contains(f.key.as_str()));
        prop_assert_eq!(result.is_valid(), covered);
        prop_assert_eq!(result.is_valid(), result.missing_required().is_empty());
    }

    #[test]
    fn override_leaves_single_claimant(
        headers in headers().prop_filter("needs a column", |h| !h.is_empty()),
        column in any::<Index>(),
        field in any::<Index>(),
    ) {
        let fields = cast_fields();
        let result = auto_map(&headers, &fields);
        let column = column.index(headers.len());
        let key = fields[field.index(fields.len())].key.clone();

        let changed = apply_override(&result, column, Some(key.as_str()), &fields).unwrap();
        let claimants: Vec<usize> = changed
            .mappings()
            .iter()
            .filter(|m| m.mapped_field.as_deref() == Some(key.as_str()))
            .map(|m| m.column_index)
            .collect();
        prop_assert_eq!(claimants, vec![column]);
        prop_assert_eq!(changed.mappings()[column].confidence, 1.0);

        for (before, after) in result.mappings().iter().zip(changed.mappings()) {
            if before.column_index != column && before.mapped_field.as_deref() != Some(key.as_str()) {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn coercion_is_total(raw in any::<String>(), kind in kind(), raw_fallback in any::<bool>()) {
        let field = match kind {
            FieldKind::Enum => FieldDescriptor::enumeration("status", "Status", ["Open", "Closed"]),
            other => FieldDescriptor::new("value", "Value", other),
        };
        let options = ConversionOptions {
            enum_fallback: if raw_fallback { EnumFallback::Raw } else { EnumFallback::FirstDeclared },
        };
        let value = coerce_cell(&raw, &field, &options);
        prop_assert!(value.matches_kind(kind));
        match value {
            FieldValue::Number(n) => prop_assert!(n.is_finite()),
            FieldValue::NumberList(values) => prop_assert!(values.iter().all(|n| n.is_finite())),
            _ => {}
        }
    }
}
