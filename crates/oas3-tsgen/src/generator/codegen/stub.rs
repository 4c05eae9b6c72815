//! Literal token substitution over stub templates.

/// Substitutes `{token}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so a value like `/users/{id}` survives intact. Braces that
/// don't open a known token are copied through.
pub(crate) fn render(template: &str, replacements: &[(&str, &str)]) -> String {
  let mut output = String::with_capacity(template.len());
  let mut rest = template;

  while let Some(start) = rest.find('{') {
    output.push_str(&rest[..start]);
    let candidate = &rest[start..];

    match replacements
      .iter()
      .filter(|(token, _)| candidate.starts_with(token))
      .max_by_key(|(token, _)| token.len())
    {
      Some((token, value)) => {
        output.push_str(value);
        rest = &candidate[token.len()..];
      }
      None => {
        output.push('{');
        rest = &candidate[1..];
      }
    }
  }

  output.push_str(rest);
  output
}
