// Wed Jan 15 2026 - Alex

use crate::config::FormatVersion;
use crate::output::OutputTarget;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sc3k-demangle")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Builds a C++ interface declaration from a SimCity 3000 Linux symbol list", long_about = None)]
pub struct Args {
    /// Symbol list, one mangled name per line
    pub input: PathBuf,

    /// Destination header. Defaults to overwriting INPUT.
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub format: Option<FormatVersion>,

    /// JSON file overriding the naming conventions
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the declaration instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    #[arg(short, long)]
    pub quiet: bool,

    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.exists() {
            return Err(format!("Input file does not exist: {:?}", self.input));
        }
        if !self.input.is_file() {
            return Err(format!("Input is not a file: {:?}", self.input));
        }
        if let Some(ref config) = self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {:?}", config));
            }
        }
        Ok(())
    }

    pub fn target(&self) -> OutputTarget {
        if self.stdout {
            OutputTarget::Stdout
        } else {
            OutputTarget::resolve(&self.input, self.output.as_deref())
        }
    }
}
