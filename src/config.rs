use std::env;

pub const DEFAULT_BANNER: &str = "php2ts";

pub const ENV_SUFFIX: &str = "PHP2TS_SUFFIX";
pub const ENV_BANNER: &str = "PHP2TS_BANNER";
pub const ENV_LEGACY_COLLECTION: &str = "PHP2TS_LEGACY_COLLECTION";

/// How the synthetic `collection: any;` line is added for classes that
/// declare `toArray()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionPolicy {
    /// At most one line per class, after the gated properties.
    #[default]
    Once,
    /// One line per declared property, interleaved with the gated ones.
    /// Legacy output kept for compatibility with older generated files.
    PerProperty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Appended to the interface name and to every extended name.
    pub suffix: String,
    /// Tool identity written into the generated header comment.
    pub banner: String,
    pub collection_policy: CollectionPolicy,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            suffix: String::new(),
            banner: DEFAULT_BANNER.to_string(),
            collection_policy: CollectionPolicy::default(),
        }
    }
}

impl ConverterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(suffix) = lookup(ENV_SUFFIX) {
            config.suffix = suffix;
        }
        if let Some(banner) = lookup(ENV_BANNER).filter(|b| !b.trim().is_empty()) {
            config.banner = banner;
        }
        if lookup(ENV_LEGACY_COLLECTION).is_some_and(|v| is_truthy(&v)) {
            config.collection_policy = CollectionPolicy::PerProperty;
        }

        config
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    pub fn with_collection_policy(mut self, policy: CollectionPolicy) -> Self {
        self.collection_policy = policy;
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
