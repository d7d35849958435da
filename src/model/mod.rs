pub mod class;

pub use class::{AccessorSet, Extraction, ParsedClass, PropertySignature};
