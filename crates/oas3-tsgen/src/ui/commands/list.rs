use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;
use serde_json::Value;

use crate::{
  generator::{
    converter::response_shape::ResponseShapeClassifier,
    document::{SchemaDocument, operation_modules},
  },
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::SpecLoader,
};

const MISSING: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
struct OperationRow {
  operation_id: String,
  method: String,
  path: String,
  modules: String,
  shape: String,
}

fn operation_rows(document: &SchemaDocument) -> Vec<OperationRow> {
  let classifier = ResponseShapeClassifier::new(document);

  document
    .operations()
    .map(|(path, method, operation)| {
      let shape = operation
        .get("responses")
        .and_then(Value::as_object)
        .and_then(|responses| responses.values().next())
        .and_then(|response| classifier.classify(response).ok())
        .map_or_else(|| MISSING.to_string(), |shape| shape.to_string());

      OperationRow {
        operation_id: operation
          .get("operationId")
          .and_then(Value::as_str)
          .unwrap_or(MISSING)
          .to_string(),
        method: method.to_uppercase(),
        path: path.to_string(),
        modules: operation_modules(operation).join(", "),
        shape,
      }
    })
    .sorted_by(|a, b| a.operation_id.cmp(&b.operation_id))
    .collect()
}

pub async fn list_operations(input: &str, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.parse()?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in ["OPERATION ID", "METHOD", "PATH", "MODULES", "SHAPE"] {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for operation in operation_rows(&document) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(operation.operation_id)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(operation.method)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(operation.path).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(operation.modules).fg(IntoComfyColor::into(colors.info())));
    row.add_cell(Cell::new(operation.shape).fg(IntoComfyColor::into(colors.info())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
