use serde_json::json;

use crate::generator::{
  converter::relations::RelationExtractor,
  document::SchemaDocument,
  metrics::{GenerationStats, GenerationWarning},
};

#[test]
fn test_referenced_relationships_block() {
  let document = SchemaDocument::new(json!({
    "components": {
      "schemas": {
        "PostRelationships": {
          "properties": {
            "categories": {
              "properties": {
                "data": {
                  "type": "array",
                  "items": { "$ref": "#/components/schemas/CategoryIdentifier" }
                }
              }
            }
          }
        },
        "CategoryIdentifier": {
          "properties": { "type": { "type": "string", "default": "blog-categories" } }
        }
      }
    }
  }));
  let schema = json!({ "properties": { "relationships": { "$ref": "#/components/schemas/PostRelationships" } } });

  let mut stats = GenerationStats::default();
  let relations = RelationExtractor::new(&document).extract("Post", &schema, &mut stats);

  assert_eq!(relations.len(), 1);
  assert!(relations[0].is_to_many);
  assert_eq!(relations[0].related_model_name, "BlogCategory");
  assert!(stats.warnings.is_empty());
}

#[test]
fn test_polymorphic_relation_is_skipped() {
  let document = SchemaDocument::new(json!({}));
  let schema = json!({
    "properties": {
      "relationships": {
        "properties": {
          "subject": {
            "properties": {
              "data": { "anyOf": [{ "$ref": "#/components/schemas/A" }, { "$ref": "#/components/schemas/B" }] }
            }
          }
        }
      }
    }
  });

  let mut stats = GenerationStats::default();
  let relations = RelationExtractor::new(&document).extract("Comment", &schema, &mut stats);

  assert!(relations.is_empty());
  assert_eq!(
    stats.warnings,
    [GenerationWarning::UnresolvedRelation {
      model: "Comment".to_string(),
      relation: "subject".to_string(),
    }]
  );
}

#[test]
fn test_dangling_relationships_reference() {
  let document = SchemaDocument::new(json!({}));
  let schema = json!({ "properties": { "relationships": { "$ref": "#/components/schemas/Nope" } } });

  let mut stats = GenerationStats::default();
  let relations = RelationExtractor::new(&document).extract("Post", &schema, &mut stats);

  assert!(relations.is_empty());
  assert!(matches!(&stats.warnings[..], [GenerationWarning::UnresolvedReference { .. }]));
}

#[test]
fn test_schema_without_relationships() {
  let document = SchemaDocument::new(json!({}));
  let mut stats = GenerationStats::default();
  let relations = RelationExtractor::new(&document).extract("Tag", &json!({ "properties": {} }), &mut stats);

  assert!(relations.is_empty());
  assert!(stats.warnings.is_empty());
}
