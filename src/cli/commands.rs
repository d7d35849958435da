use crate::cli::args::{Cli, Commands, GenerateOptions};
use crate::config::{CollectionPolicy, ConverterConfig};
use crate::transpiler::{InterfaceConverter, failure_status, success_status};
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    debug!("php2ts v{}", env!("CARGO_PKG_VERSION"));

    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Convert {
            input,
            output,
            options,
            stdout,
            dump_parsed,
        } => convert_command(
            &input,
            output.as_deref(),
            &options,
            stdout,
            dump_parsed,
            &mut out,
        ),
        Commands::Batch {
            input_dir,
            output_dir,
            options,
            extension,
        } => batch_command(&input_dir, &output_dir, &options, &extension, &mut out).map(|_| ()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // RUST_LOG still wins over the flag
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Environment config with command-line overrides on top.
pub fn build_config(options: &GenerateOptions) -> ConverterConfig {
    let mut config = ConverterConfig::from_env();

    if let Some(suffix) = &options.suffix {
        config.suffix = suffix.clone();
    }
    if let Some(banner) = &options.banner {
        config.banner = banner.clone();
    }
    if options.legacy_collection {
        config.collection_policy = CollectionPolicy::PerProperty;
    }

    config
}

/// `<stem><suffix>.<extension>` inside `dir`.
pub fn default_output_path(input: &Path, dir: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.join(format!("{}{}.{}", stem, suffix, extension))
}

fn convert_command(
    input: &Path,
    output: Option<&Path>,
    options: &GenerateOptions,
    stdout: bool,
    dump_parsed: bool,
    out: &mut impl Write,
) -> Result<()> {
    let config = build_config(options);
    let converter = InterfaceConverter::new(config);

    if dump_parsed || stdout {
        let source = converter.read_source(input);

        if dump_parsed {
            let parsed = converter.parse(&source);
            writeln!(out, "{}", serde_json::to_string_pretty(&parsed)?)?;
        }
        if stdout {
            write!(out, "{}", converter.convert_source(&source)?)?;
            return Ok(());
        }
        if output.is_none() {
            return Ok(());
        }
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let dir = input.parent().unwrap_or_else(|| Path::new("."));
            default_output_path(input, dir, &converter.config().suffix, "ts")
        }
    };

    info!("Converting {} -> {}", input.display(), output.display());
    writeln!(out, "{}", converter.run(input, &output))?;

    Ok(())
}

/// Outcome counts of one `batch` invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
    /// Inputs whose output path was already taken by an earlier file.
    pub skipped: usize,
}

fn batch_command(
    input_dir: &Path,
    output_dir: &Path,
    options: &GenerateOptions,
    extension: &str,
    out: &mut impl Write,
) -> Result<BatchSummary> {
    if !input_dir.is_dir() {
        return Err(anyhow!("Not a directory: {}", input_dir.display()));
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let config = build_config(options);
    let converter = InterfaceConverter::new(config);
    let inputs = collect_php_files(input_dir);

    info!(
        "Converting {} PHP files from {}",
        inputs.len(),
        input_dir.display()
    );

    let mut summary = BatchSummary::default();
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for input in &inputs {
        let output = default_output_path(input, output_dir, &converter.config().suffix, extension);

        if !claimed.insert(output.clone()) {
            warn!(
                "Skipping {}: {} is already generated from another file",
                input.display(),
                output.display()
            );
            summary.skipped += 1;
            continue;
        }

        let status = match converter.try_run(input, &output) {
            Ok(()) => {
                summary.converted += 1;
                success_status(&output, &converter.config().suffix)
            }
            Err(e) => {
                error!("{}", e);
                summary.failed += 1;
                failure_status(&output)
            }
        };
        writeln!(out, "{}", status)?;
    }

    if summary.failed > 0 || summary.skipped > 0 {
        warn!(
            "{} of {} declarations not written ({} failed, {} skipped)",
            summary.failed + summary.skipped,
            inputs.len(),
            summary.failed,
            summary.skipped
        );
    } else {
        info!("Generated {} declarations in {}", summary.converted, output_dir.display());
    }

    Ok(summary)
}

/// Every `*.php` file under `dir`, sorted by path.
pub fn collect_php_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "php"))
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_output_path_appends_suffix() {
        let path = default_output_path(
            Path::new("src/Entity/User.php"),
            Path::new("out"),
            "Dto",
            "ts",
        );
        assert_eq!(path, PathBuf::from("out/UserDto.ts"));
    }

    #[test]
    fn test_build_config_cli_overrides() {
        let options = GenerateOptions {
            suffix: Some("Model".to_string()),
            banner: Some("acme".to_string()),
            legacy_collection: true,
        };

        let config = build_config(&options);
        assert_eq!(config.suffix, "Model");
        assert_eq!(config.banner, "acme");
        assert_eq!(config.collection_policy, CollectionPolicy::PerProperty);
    }

    #[test]
    fn test_collect_php_files_recurses_and_filters() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("Entity");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("B.php"), "").unwrap();
        fs::write(nested.join("A.php"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_php_files(dir.path());
        assert_eq!(files, vec![dir.path().join("B.php"), nested.join("A.php")]);
    }

    fn write_user(path: &Path, property: &str) {
        let accessor = {
            let mut chars = property.chars();
            let first = chars.next().unwrap().to_uppercase().collect::<String>();
            format!("get{}{}", first, chars.as_str())
        };
        let source = format!(
            "<?php\nclass User\n{{\n    private string ${};\n    public function {}(): string {{}}\n}}\n",
            property, accessor
        );
        fs::write(path, source).unwrap();
    }

    fn output_text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_convert_writes_beside_input_by_default() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("User.php");
        write_user(&input, "name");

        let options = GenerateOptions {
            suffix: Some("Dto".to_string()),
            ..Default::default()
        };
        let mut out = Vec::new();
        convert_command(&input, None, &options, false, false, &mut out)?;

        let expected = dir.path().join("UserDto.ts");
        assert!(fs::read_to_string(&expected)?.contains("interface UserDto {\n\tname: string;\n}\n"));
        assert_eq!(output_text(out), format!("{}Dto created\n", expected.display()));

        Ok(())
    }

    #[test]
    fn test_convert_stdout_writes_no_file() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("User.php");
        write_user(&input, "name");

        let mut out = Vec::new();
        convert_command(&input, None, &GenerateOptions::default(), true, false, &mut out)?;

        let printed = output_text(out);
        assert!(printed.starts_with("/* Generated automatically by "));
        assert!(printed.ends_with("interface User {\n\tname: string;\n}\n"));
        assert!(!dir.path().join("User.ts").exists());

        Ok(())
    }

    #[test]
    fn test_convert_stdout_with_missing_input_prints_empty_interface() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("Missing.php");

        let mut out = Vec::new();
        convert_command(&input, None, &GenerateOptions::default(), true, false, &mut out)?;

        assert!(output_text(out).ends_with("interface {\n}\n"));

        Ok(())
    }

    #[test]
    fn test_dump_parsed_alone_prints_json_only() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("User.php");
        write_user(&input, "name");

        let mut out = Vec::new();
        convert_command(&input, None, &GenerateOptions::default(), false, true, &mut out)?;

        let parsed: serde_json::Value = serde_json::from_str(&output_text(out))?;
        assert_eq!(parsed["name"], "User");
        assert_eq!(parsed["properties"][0], "name: string;");
        assert!(!dir.path().join("User.ts").exists());

        Ok(())
    }

    #[test]
    fn test_dump_parsed_with_output_also_writes() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("User.php");
        let output = dir.path().join("out.ts");
        write_user(&input, "name");

        let mut out = Vec::new();
        convert_command(
            &input,
            Some(&output),
            &GenerateOptions::default(),
            false,
            true,
            &mut out,
        )?;

        let printed = output_text(out);
        assert!(printed.contains("\"name\": \"User\""));
        assert!(printed.ends_with(&format!("{} created\n", output.display())));
        assert!(fs::read_to_string(&output)?.contains("interface User {"));

        Ok(())
    }

    #[test]
    fn test_batch_skips_colliding_outputs_and_counts_failures() -> Result<()> {
        let dir = tempdir()?;
        let src = dir.path().join("src");
        let out_dir = dir.path().join("out");
        fs::create_dir_all(src.join("A"))?;
        fs::create_dir_all(src.join("B"))?;
        write_user(&src.join("A").join("User.php"), "alpha");
        write_user(&src.join("B").join("User.php"), "beta");
        write_user(&src.join("Order.php"), "total");

        // a directory in the way makes the Order.ts write fail
        fs::create_dir_all(out_dir.join("Order.ts"))?;

        let mut out = Vec::new();
        let summary = batch_command(&src, &out_dir, &GenerateOptions::default(), "ts", &mut out)?;

        assert_eq!(
            summary,
            BatchSummary {
                converted: 1,
                failed: 1,
                skipped: 1,
            }
        );

        let user = fs::read_to_string(out_dir.join("User.ts"))?;
        assert!(user.contains("alpha: string;"));
        assert!(!user.contains("beta"));

        let printed = output_text(out);
        assert_eq!(printed.lines().count(), 2);
        assert!(printed.contains(&format!("{} created", out_dir.join("User.ts").display())));
        assert!(printed.contains(&format!(
            "OOPS: could not create {}",
            out_dir.join("Order.ts").display()
        )));

        Ok(())
    }

    #[test]
    fn test_batch_rejects_missing_directory() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let result = batch_command(
            &dir.path().join("nope"),
            &dir.path().join("out"),
            &GenerateOptions::default(),
            "ts",
            &mut out,
        );

        assert!(result.is_err());
    }
}
