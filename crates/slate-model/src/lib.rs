pub mod error;
pub mod field;
pub mod mapping;
pub mod record;
pub mod schema;

pub use error::{ModelError, Result};
pub use field::{FieldDescriptor, FieldKind, FieldValue};
pub use mapping::{ColumnMapping, ConfidenceLevel, MappingResult, MatchThresholds, UNMAPPED};
pub use record::ConvertedRecord;
pub use schema::EntitySchema;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_result_counts() {
        let fields = vec![
            FieldDescriptor::text("actorName", "Actor Name").required(),
            FieldDescriptor::text("email", "Email"),
            FieldDescriptor::number_list("scenes", "Scenes"),
        ];
        let result = MappingResult::from_mappings(
            vec![
                ColumnMapping::mapped(0, "Actor Name", "actorName", 1.0),
                ColumnMapping::unmapped(1, "Character"),
                ColumnMapping::mapped(2, "Scene #s", "scenes", 0.5),
            ],
            &fields,
        );
        assert_eq!(result.mapped_count(), 2);
        assert_eq!(result.unmapped_fields().len(), 1);
        assert_eq!(result.unmapped_fields()[0].key, "email");
        assert!(result.is_valid());

        let levels = result.count_by_level(&MatchThresholds::default());
        assert_eq!(levels.get(&ConfidenceLevel::Exact), Some(&1));
        assert_eq!(levels.get(&ConfidenceLevel::Weak), Some(&1));
        assert_eq!(result.min_confidence(), Some(0.5));
        assert_eq!(result.mean_confidence(), Some(0.75));
    }

    #[test]
    fn record_serializes_as_plain_object() {
        let record: ConvertedRecord = [
            ("scenes", FieldValue::NumberList(vec![1.0, 3.0, 5.0])),
            ("status", FieldValue::Text("Pending".to_string())),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&record).expect("serialize record");
        assert_eq!(json, r#"{"scenes":[1.0,3.0,5.0],"status":"Pending"}"#);
    }
}
