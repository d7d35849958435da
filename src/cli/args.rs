use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "php2ts",
    about = "Generate TypeScript interface declarations from PHP classes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every conversion command
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Suffix appended to the interface name and every extended name
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Tool identity written into the generated header comment
    #[arg(long)]
    pub banner: Option<String>,

    /// Emit `collection: any;` once per declared property (legacy output)
    #[arg(long)]
    pub legacy_collection: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single PHP class file
    Convert {
        /// Input PHP file containing one class
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (default: <FILE stem><suffix>.ts next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: GenerateOptions,

        /// Print the declaration instead of writing it
        #[arg(long)]
        stdout: bool,

        /// Print the parsed class as JSON for debugging
        #[arg(long)]
        dump_parsed: bool,
    },

    /// Convert every PHP file under a directory
    Batch {
        /// Directory to scan recursively for .php files
        #[arg(value_name = "DIR")]
        input_dir: PathBuf,

        /// Directory receiving the generated declarations
        #[arg(short, long, default_value = "./generated")]
        output_dir: PathBuf,

        #[command(flatten)]
        options: GenerateOptions,

        /// Extension of the generated files
        #[arg(short, long, default_value = "ts")]
        extension: String,
    },
}
