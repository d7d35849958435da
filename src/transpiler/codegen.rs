use crate::config::{CollectionPolicy, ConverterConfig};
use crate::model::{Extraction, ParsedClass, PropertySignature};
use crate::transpiler::errors::Result;
use crate::transpiler::types::convert_type;
use log::debug;
use tera::{Context, Tera};

/// Method whose presence marks a class as a collection.
pub const COLLECTION_METHOD: &str = "toArray";
pub const COLLECTION_PROPERTY: &str = "collection: any;";

const INTERFACE_TEMPLATE: &str = concat!(
    "/* Generated automatically by {{ banner }} */\n",
    "\n",
    "interface{% if name %} {{ name }}{% endif %}",
    "{% if extends %} extends {{ extends | join(sep=\", \") }}{% endif %} {\n",
    "{% for property in properties %}\t{{ property }}\n{% endfor %}",
    "}\n",
);

/// Turns an [`Extraction`] into TypeScript interface text.
pub struct InterfaceGenerator {
    banner: String,
    collection_policy: CollectionPolicy,
}

impl InterfaceGenerator {
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            banner: config.banner.clone(),
            collection_policy: config.collection_policy,
        }
    }

    pub fn generate(&self, extraction: Extraction) -> Result<String> {
        let class = self.build_class(extraction);
        self.render(&class)
    }

    /// Applies accessor gating and collection augmentation, producing the
    /// final property list.
    pub fn build_class(&self, extraction: Extraction) -> ParsedClass {
        let Extraction {
            mut class,
            properties,
            accessors,
        } = extraction;

        let is_collection = accessors.contains(COLLECTION_METHOD);

        for property in &properties {
            if accessors.exposes(property) {
                class.add_property(render_property(property));
            } else {
                debug!("Dropping '{}': no accessor found", property.name);
            }

            if is_collection && self.collection_policy == CollectionPolicy::PerProperty {
                class.add_property(COLLECTION_PROPERTY.to_string());
            }
        }

        if is_collection
            && self.collection_policy == CollectionPolicy::Once
            && !properties.is_empty()
        {
            class.add_property(COLLECTION_PROPERTY.to_string());
        }

        class
    }

    pub fn render(&self, class: &ParsedClass) -> Result<String> {
        let mut context = Context::new();
        context.insert("banner", &self.banner);
        context.insert("name", &class.name);
        context.insert("extends", &class.extends);
        context.insert("properties", &class.properties);

        Ok(Tera::one_off(INTERFACE_TEMPLATE, &context, false)?)
    }
}

/// `name: type;` with the type mapped to TypeScript.
pub fn render_property(property: &PropertySignature) -> String {
    format!("{}: {};", property.name, convert_type(&property.bare_type()))
}
