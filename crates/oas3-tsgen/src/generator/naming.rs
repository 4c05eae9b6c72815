use inflections::Inflect;

/// Plural suffixes and their singular replacements, longest match first.
const SINGULAR_SUFFIXES: [(&str, &str); 3] = [("ies", "y"), ("es", ""), ("s", "")];

/// Strips a plural suffix by longest-match priority; words without one are returned unchanged.
pub(crate) fn singularize(word: &str) -> String {
  SINGULAR_SUFFIXES
    .iter()
    .find_map(|(suffix, replacement)| {
      word
        .strip_suffix(suffix)
        .filter(|stem| !stem.is_empty())
        .map(|stem| format!("{stem}{replacement}"))
    })
    .unwrap_or_else(|| word.to_string())
}

/// Model name for a wire-level type value, e.g. `blog-categories` → `BlogCategory`.
pub(crate) fn related_model_name(type_value: &str) -> String {
  singularize(type_value).to_pascal_case()
}

/// `user-profiles` → `UserProfiles`, `author_profile` → `AuthorProfile`.
pub(crate) fn to_type_name(value: &str) -> String {
  value.to_pascal_case()
}

/// Symbol an index uses for a file, e.g. `UsersOperationsMap` → `usersOperationsMap`.
pub(crate) fn to_symbol_name(file_stem: &str) -> String {
  file_stem.to_camel_case()
}

/// Label for an enum value: underscores become spaces and the first letter is capitalized.
pub(crate) fn enum_value_title(value: &str) -> String {
  let spaced = value.replace('_', " ");
  let mut chars = spaced.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
