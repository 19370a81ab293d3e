// Wed Jan 15 2026 - Alex

use colored::Colorize;
use std::error::Error;

const MAX_CAUSE_DEPTH: usize = 10;

pub struct ErrorDisplay {
    show_cause_chain: bool,
    color_enabled: bool,
}

impl ErrorDisplay {
    pub fn new() -> Self {
        Self {
            show_cause_chain: true,
            color_enabled: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.color_enabled = false;
        self
    }

    pub fn without_cause_chain(mut self) -> Self {
        self.show_cause_chain = false;
        self
    }

    pub fn format<E: Error>(&self, error: &E) -> String {
        let causes = std::iter::successors(error.source(), |&cause| cause.source()).map(|c| c.to_string());
        self.render(&error.to_string(), causes)
    }

    /// Formats an `anyhow` error, walking the context chain it carries.
    pub fn format_report(&self, error: &anyhow::Error) -> String {
        let causes = error.chain().skip(1).map(|c| c.to_string());
        self.render(&error.to_string(), causes)
    }

    pub fn print_report(&self, error: &anyhow::Error) {
        eprint!("{}", self.format_report(error));
    }

    fn render<I: Iterator<Item = String>>(&self, message: &str, causes: I) -> String {
        let mut output = String::new();

        let header = if self.color_enabled {
            "Error:".red().bold().to_string()
        } else {
            "Error:".to_string()
        };
        output.push_str(&format!("{} {}\n", header, message));

        if !self.show_cause_chain {
            return output;
        }

        let prefix = if self.color_enabled {
            format!("  {} ", "→".yellow())
        } else {
            "  -> ".to_string()
        };

        for (depth, cause) in causes.enumerate() {
            if depth == MAX_CAUSE_DEPTH {
                output.push_str("  ... (cause chain truncated)\n");
                break;
            }
            output.push_str(&format!("{}Caused by: {}\n", prefix, cause));
        }

        output
    }
}

impl Default for ErrorDisplay {
    fn default() -> Self {
        Self::new()
    }
}
