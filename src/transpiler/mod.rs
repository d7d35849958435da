pub mod codegen;
pub mod errors;
pub mod extractor;
pub mod sink;
pub mod types;

pub use codegen::InterfaceGenerator;
pub use errors::{ConvertError, Result};
pub use extractor::extract_source;
pub use sink::{DeclarationSink, FileSink};
pub use types::convert_type;

use crate::config::ConverterConfig;
use crate::model::ParsedClass;
use log::{debug, error, warn};
use std::fs;
use std::path::Path;

/// Convenience function to turn PHP source directly into a TypeScript
/// interface declaration.
pub fn transpile(source: &str, config: &ConverterConfig) -> Result<String> {
    InterfaceConverter::new(config.clone()).convert_source(source)
}

/// One conversion pipeline: extract, gate, render, write.
///
/// Holds no state between runs; a single converter can be reused for any
/// number of files.
pub struct InterfaceConverter<S: DeclarationSink = FileSink> {
    config: ConverterConfig,
    sink: S,
}

impl InterfaceConverter<FileSink> {
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_sink(config, FileSink)
    }
}

impl<S: DeclarationSink> InterfaceConverter<S> {
    pub fn with_sink(config: ConverterConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Extracts and gates without rendering.
    pub fn parse(&self, source: &str) -> ParsedClass {
        let extraction = extract_source(source, &self.config.suffix);
        InterfaceGenerator::new(&self.config).build_class(extraction)
    }

    pub fn convert_source(&self, source: &str) -> Result<String> {
        let extraction = extract_source(source, &self.config.suffix);
        InterfaceGenerator::new(&self.config).generate(extraction)
    }

    pub fn convert_file(&self, input: &Path) -> Result<String> {
        let source = fs::read_to_string(input).map_err(|source| ConvertError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        self.convert_source(&source)
    }

    /// Reads `input`, falling back to empty text when it cannot be read.
    pub fn read_source(&self, input: &Path) -> String {
        fs::read_to_string(input).unwrap_or_else(|e| {
            warn!("Could not read '{}': {}", input.display(), e);
            String::new()
        })
    }

    /// Converts `input` and writes the declaration to `output`.
    ///
    /// An unreadable input is converted as empty text. Only a failed write
    /// (or render) is an error.
    pub fn try_run(&self, input: &Path, output: &Path) -> Result<()> {
        let source = self.read_source(input);
        self.write_declaration(&source, output)
    }

    /// Same as [`Self::try_run`], reduced to the status line for the caller.
    pub fn run(&self, input: &Path, output: &Path) -> String {
        match self.try_run(input, output) {
            Ok(()) => success_status(output, &self.config.suffix),
            Err(e) => {
                error!("{}", e);
                failure_status(output)
            }
        }
    }

    fn write_declaration(&self, source: &str, output: &Path) -> Result<()> {
        let declaration = self.convert_source(source)?;
        debug!(
            "Writing {} bytes to {}",
            declaration.len(),
            output.display()
        );

        self.sink
            .write(output, &declaration)
            .map_err(|source| ConvertError::Write {
                path: output.to_path_buf(),
                source,
            })
    }
}

pub fn success_status(output: &Path, suffix: &str) -> String {
    format!("{}{} created", output.display(), suffix)
}

pub fn failure_status(output: &Path) -> String {
    format!("OOPS: could not create {}", output.display())
}
