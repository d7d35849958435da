
use crate::model::{AccessorSet, Extraction, PropertySignature};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// Structural rules over raw PHP text. Each one is applied on its own and a
// miss simply yields an empty result.

static CLASS_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[a-z ]*?class\s+([A-Za-z0-9_-]+)").unwrap());

static EXTENDS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bclass\s+[A-Za-z0-9_-]+\s+extends\s+([A-Za-z0-9_-]+(?:\s*,\s*[A-Za-z0-9_-]+)*)")
        .unwrap()
});

// `<visibility> <type> <name>[ = <default>];`, at most one tab of indentation
static PROPERTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\t? *[a-z]+ ([^ ]+ [$A-Za-z0-9_-]+)(?: =[^;]+)?;").unwrap()
});

static ACCESSOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r" function ((?:get|is|has)[$A-Za-z0-9_-]+|toArray)\(").unwrap()
});

/// Runs every extraction rule over `source`.
///
/// The suffix is appended to the class name and to each extended name.
/// Properties are returned ungated; see [`crate::transpiler::codegen`] for
/// the accessor policy.
pub fn extract_source(source: &str, suffix: &str) -> Extraction {
    let mut extraction = Extraction::default();

    if let Some(name) = extract_class_name(source) {
        extraction.class.set_name(name, suffix);
    }

    for parent in extract_extends(source) {
        extraction.class.add_extends(parent, suffix);
    }

    extraction.properties = extract_properties(source);
    extraction.accessors = extract_accessors(source);

    debug!(
        "Extracted class '{}' (extends: {:?}, {} properties, {} accessors)",
        extraction.class.name,
        extraction.class.extends,
        extraction.properties.len(),
        extraction.accessors.len()
    );

    extraction
}

pub fn extract_class_name(source: &str) -> Option<&str> {
    CLASS_NAME_RE
        .captures(source)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Superclass names in declaration order, whitespace trimmed.
pub fn extract_extends(source: &str) -> Vec<&str> {
    match EXTENDS_RE.captures(source).and_then(|cap| cap.get(1)) {
        Some(list) => list
            .as_str()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect(),
        None => Vec::new(),
    }
}

/// Every typed property declaration, in order of appearance.
pub fn extract_properties(source: &str) -> Vec<PropertySignature> {
    PROPERTY_RE
        .captures_iter(source)
        .filter_map(|cap| {
            let pair = cap.get(1)?.as_str();
            let (source_type, name) = pair.split_once(' ')?;
            Some(PropertySignature::new(source_type, name))
        })
        .collect()
}

/// Names of `get*`, `is*` and `has*` methods, plus `toArray` when declared.
pub fn extract_accessors(source: &str) -> AccessorSet {
    ACCESSOR_RE
        .captures_iter(source)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}
