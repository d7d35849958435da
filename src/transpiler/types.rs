use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered (pattern, replacement) table. The first pattern that matches a
/// type token wins; every match of that pattern inside the token is
/// replaced.
static TYPE_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\bint(?:eger)?\b", "number"),
        (r"\b(?:float|double)\b", "number"),
        (r"^\\.+", "any"),
        (r"\barray\b", "any[]"),
        (r"\bmixed\b", "any"),
        (r"\bbool(?:ean)?\b", "boolean"),
    ]
    .into_iter()
    .map(|(pattern, target)| (Regex::new(pattern).unwrap(), target))
    .collect()
});

/// Translates a PHP type token into its TypeScript counterpart.
///
/// Nullability markers are dropped before lookup. Unknown tokens (class
/// names, `string`, `void`, ...) pass through unchanged.
pub fn convert_type(source_type: &str) -> String {
    let bare = source_type.replace('?', "");

    TYPE_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(&bare))
        .map(|(pattern, target)| pattern.replace_all(&bare, *target).into_owned())
        .unwrap_or(bare)
}
