use serde::Serialize;
use std::collections::HashSet;

/// Intermediate record of one conversion run.
///
/// `name` and `extends` are filled by the extractor, `properties` by the
/// accessor-gating step. Only gated, fully rendered lines ever land in
/// `properties`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedClass {
    pub name: String,
    pub extends: Vec<String>,
    pub properties: Vec<String>,
}

impl ParsedClass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: &str, suffix: &str) {
        self.name = format!("{}{}", name, suffix);
    }

    pub fn add_extends(&mut self, parent: &str, suffix: &str) {
        self.extends.push(format!("{}{}", parent, suffix));
    }

    pub fn add_property(&mut self, line: String) {
        self.properties.push(line);
    }
}

/// A raw `<type> <name>` pair scraped from a property declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySignature {
    /// Type token as written in source, including any `?` marker.
    pub source_type: String,
    /// Property name without the `$` sigil.
    pub name: String,
}

impl PropertySignature {
    pub fn new(source_type: &str, name: &str) -> Self {
        Self {
            source_type: source_type.to_string(),
            name: name.trim_start_matches('$').to_string(),
        }
    }

    /// Type token with nullability markers removed.
    pub fn bare_type(&self) -> String {
        self.source_type.replace('?', "")
    }

    /// Property name with its first character uppercased, as used in
    /// accessor names (`name` -> `Name`).
    pub fn capitalized_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Method names collected for membership testing only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessorSet {
    methods: HashSet<String>,
}

impl AccessorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, method: &str) {
        self.methods.insert(method.to_string());
    }

    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// True when `get<Cap>`, `has<Cap>` or `is<Cap>` is present for the
    /// given property.
    pub fn exposes(&self, property: &PropertySignature) -> bool {
        let capitalized = property.capitalized_name();
        ["get", "has", "is"]
            .iter()
            .any(|prefix| self.contains(&format!("{}{}", prefix, capitalized)))
    }
}

impl<'a> FromIterator<&'a str> for AccessorSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = AccessorSet::new();
        for method in iter {
            set.insert(method);
        }
        set
    }
}

/// Everything the extractor scraped from one source unit.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub class: ParsedClass,
    pub properties: Vec<PropertySignature>,
    pub accessors: AccessorSet,
}
