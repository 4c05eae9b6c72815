use strum::Display;

use super::ast::{ModelDescriptor, OperationDescriptor};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub models_generated: usize,
  pub properties_generated: usize,
  pub relations_generated: usize,
  pub enums_generated: usize,
  pub operations_mapped: usize,
  pub modules_processed: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_model(&mut self, model: &ModelDescriptor) {
    self.models_generated += 1;
    self.properties_generated += model.properties.len();
    self.relations_generated += model.relations.len();
    self.enums_generated += model.enums.len();
  }

  pub fn record_operations(&mut self, operations: &[OperationDescriptor]) {
    self.operations_mapped += operations.len();
  }

  pub fn record_module(&mut self) {
    self.modules_processed += 1;
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn skipped_count(&self) -> usize {
    self.warnings.iter().filter(|warning| warning.is_skipped_item()).count()
  }
}

/// Recoverable conditions; the affected entity or operation is left out and the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Schema '{schema}' does not match the model filter")]
  FilteredOut { schema: String },
  #[strum(to_string = "Model '{schema}' missing 'x-module' property")]
  MissingModule { schema: String },
  #[strum(to_string = "Model '{schema}' belongs to module '{module}', which was not requested")]
  ModuleNotRequested { schema: String, module: String },
  #[strum(to_string = "Model '{schema}' missing type or type default value")]
  MissingTypeDiscriminator { schema: String },
  #[strum(to_string = "Model '{schema}' resolves to name '{name}', already generated for module '{module}'")]
  DuplicateModel {
    schema: String,
    name: String,
    module: String,
  },
  #[strum(to_string = "Model '{model}': relation '{relation}' has no resolvable type")]
  UnresolvedRelation { model: String, relation: String },
  #[strum(to_string = "Can't resolve ref '{pointer}'")]
  UnresolvedReference { pointer: String },
  #[strum(to_string = "Operation '{method} {path}' is not tagged with module '{module}'")]
  OperationNotInModule {
    method: String,
    path: String,
    module: String,
  },
  #[strum(to_string = "Operation id missing or wrong format: '{method} {path}', id '{operation_id}'")]
  InvalidOperationId {
    method: String,
    path: String,
    operation_id: String,
  },
  #[strum(to_string = "Operation id '{operation_id}' already mapped for module '{module}'")]
  DuplicateOperationId { operation_id: String, module: String },
  #[strum(to_string = "Can't resolve response type for '{operation_id}': '{method} {path}', using collection")]
  UnknownResponseShape {
    operation_id: String,
    method: String,
    path: String,
  },
}

impl GenerationWarning {
  /// Warnings that drop an entity the user likely expected; the rest only show in verbose mode.
  pub fn is_skipped_item(&self) -> bool {
    matches!(
      self,
      Self::MissingModule { .. }
        | Self::MissingTypeDiscriminator { .. }
        | Self::DuplicateModel { .. }
        | Self::UnresolvedRelation { .. }
        | Self::InvalidOperationId { .. }
        | Self::DuplicateOperationId { .. }
    )
  }
}
