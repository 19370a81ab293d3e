// Wed Jan 15 2026 - Alex

use super::args::Args;
use crate::config::Config;
use crate::engine::{Pipeline, PipelineOutput};
use crate::output::{OutputTarget, OutputWriter};
use crate::utils::LoggingUtils;
use anyhow::Context;
use colored::Colorize;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args);

        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = self.load_config(&args)?;
        let pipeline = Pipeline::with_config(config).context("Invalid configuration")?;

        let output = pipeline
            .run_file(&args.input)
            .with_context(|| format!("Failed to process {}", args.input.display()))?;

        let target = args.target();
        OutputWriter::write(&output.declaration, &target).with_context(|| match target.path() {
            Some(path) => format!("Failed to write {}", path.display()),
            None => "Failed to write to stdout".to_string(),
        })?;

        if !args.quiet && target != OutputTarget::Stdout {
            self.print_summary(&output, &target);
        }

        Ok(())
    }

    fn setup_logging(&self, args: &Args) {
        if args.no_color {
            colored::control::set_override(false);
        }
        let level = LoggingUtils::level_from_str(&args.log_level);
        LoggingUtils::init_logger(level, !args.no_color);
    }

    fn load_config(&self, args: &Args) -> anyhow::Result<Config> {
        let mut config = match args.config {
            Some(ref path) => Config::load(path)
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(format) = args.format {
            config = config.with_format_version(format);
        }

        log::debug!("Using {} input format", config.format_version.as_str());
        Ok(config)
    }

    fn print_summary(&self, output: &PipelineOutput, target: &OutputTarget) {
        let declaration = &output.declaration;
        let stats = &output.stats;

        let class = declaration.class_name().unwrap_or("<unqualified>");
        if let Some(ref header) = declaration.header {
            println!("{} {}", "[+]".green(), header.to_string().cyan());
        }
        println!("  Lines read: {}", stats.lines_read);
        println!("  Members: {}", stats.members_emitted.to_string().green());
        if stats.members_suppressed > 0 {
            println!("  Suppressed: {}", stats.members_suppressed.to_string().yellow());
        }
        if let Some(path) = target.path() {
            println!("{} {} written to {}", "[+]".green(), class, path.display());
        }
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
