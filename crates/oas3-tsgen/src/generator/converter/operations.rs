use std::collections::HashSet;

use serde_json::Value;

use super::response_shape::ResponseShapeClassifier;
use crate::generator::{
  ast::{OperationDescriptor, ResponseShape},
  document::{SchemaDocument, operation_modules},
  errors::GenerationError,
  metrics::{GenerationStats, GenerationWarning},
};

/// Characters an operation id can't carry, since it becomes an object key in the output.
const INVALID_ID_CHARS: [char; 2] = [':', '.'];

/// Collects the operations tagged with one module into an ordered operation map.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OperationMapBuilder<'a> {
  document: &'a SchemaDocument,
  classifier: ResponseShapeClassifier<'a>,
}

impl<'a> OperationMapBuilder<'a> {
  pub(crate) fn new(document: &'a SchemaDocument) -> Self {
    Self {
      document,
      classifier: ResponseShapeClassifier::new(document),
    }
  }

  /// Operations of `module` in document order; an empty module accepts every operation.
  pub(crate) fn build(&self, module: &str, stats: &mut GenerationStats) -> Vec<OperationDescriptor> {
    let mut seen = HashSet::new();
    let mut operations = vec![];

    for (path, method, operation) in self.document.operations() {
      let method = method.to_uppercase();

      if !module.is_empty() && !is_tagged(operation, module) {
        stats.record_warning(GenerationWarning::OperationNotInModule {
          method,
          path: path.to_string(),
          module: module.to_string(),
        });
        continue;
      }

      let operation_id = operation.get("operationId").and_then(Value::as_str).unwrap_or_default();
      if operation_id.is_empty() || operation_id.contains(INVALID_ID_CHARS) {
        stats.record_warning(GenerationWarning::InvalidOperationId {
          method,
          path: path.to_string(),
          operation_id: operation_id.to_string(),
        });
        continue;
      }

      if !seen.insert(operation_id) {
        stats.record_warning(GenerationWarning::DuplicateOperationId {
          operation_id: operation_id.to_string(),
          module: module.to_string(),
        });
        continue;
      }

      let response_shape = self.response_shape(operation, stats);
      let response_shape = if response_shape == ResponseShape::Unknown {
        stats.record_warning(GenerationWarning::UnknownResponseShape {
          operation_id: operation_id.to_string(),
          method: method.clone(),
          path: path.to_string(),
        });
        ResponseShape::Collection
      } else {
        response_shape
      };

      operations.push(
        OperationDescriptor::builder()
          .operation_id(operation_id)
          .path(path)
          .http_method(method)
          .response_shape(response_shape)
          .build(),
      );
    }

    stats.record_operations(&operations);
    operations
  }

  /// Only the first declared response is classified.
  fn response_shape(&self, operation: &Value, stats: &mut GenerationStats) -> ResponseShape {
    let Some(response) = operation
      .get("responses")
      .and_then(Value::as_object)
      .and_then(|responses| responses.values().next())
    else {
      return ResponseShape::Unknown;
    };

    match self.classifier.classify(response) {
      Ok(shape) => shape,
      Err(GenerationError::UnresolvedReference { pointer }) => {
        stats.record_warning(GenerationWarning::UnresolvedReference { pointer });
        ResponseShape::Unknown
      }
      Err(_) => ResponseShape::Unknown,
    }
  }
}

fn is_tagged(operation: &Value, module: &str) -> bool {
  operation_modules(operation).any(|tagged| tagged == module)
}
