use super::{GeneratedFile, WritePolicy, file_stem, stub::render};
use crate::{
  config::{ArtifactKind, Config, StubKind},
  generator::{
    ast::OperationDescriptor,
    naming::{to_symbol_name, to_type_name},
  },
};

/// Renders one module's operation map.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OperationMapEmitter<'a> {
  config: &'a Config,
}

impl<'a> OperationMapEmitter<'a> {
  pub(crate) fn new(config: &'a Config) -> Self {
    Self { config }
  }

  /// The map is named after its file, e.g. `UsersOperationsMap.ts` exports `usersOperationsMap`.
  pub(crate) fn emit(&self, module: &str, operations: &[OperationDescriptor]) -> anyhow::Result<GeneratedFile> {
    let file_name = self.config.operation_map_filename(&to_type_name(module))?;
    let map_name = to_symbol_name(file_stem(&file_name));

    let stubs = self.config.stubs();
    let items: String = operations
      .iter()
      .map(|operation| {
        let response_type = operation.response_shape.to_string();
        render(
          stubs.get(StubKind::OperationMapItem),
          &[
            ("{operationId}", operation.operation_id.as_str()),
            ("{url}", operation.path.as_str()),
            ("{method}", operation.http_method.as_str()),
            ("{responseType}", response_type.as_str()),
          ],
        )
      })
      .collect();

    let contents = render(
      stubs.get(StubKind::OperationMap),
      &[
        ("{mapName}", map_name.as_str()),
        ("{module}", module),
        ("{operationMapItems}", items.as_str()),
      ],
    );

    Ok(GeneratedFile {
      kind: ArtifactKind::OperationMaps,
      path: format!("{}{file_name}", self.config.output_structure(ArtifactKind::OperationMaps)?).into(),
      contents,
      policy: WritePolicy::Overwrite,
    })
  }
}
