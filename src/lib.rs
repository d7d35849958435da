pub mod cli;
pub mod config;
pub mod model;
pub mod transpiler;

// Re-export commonly used types
pub use config::{CollectionPolicy, ConverterConfig};
pub use model::{Extraction, ParsedClass};
pub use transpiler::{InterfaceConverter, convert_type, extract_source, transpile};
