// Tue Jan 20 2026 - Alex

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Input format revision of the symbol list.
///
/// `Legacy` files are passed through line by line. `Extended` files may
/// contain blank separator lines and `virtual <ret> <name>(...)` prototypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormatVersion {
    Legacy,
    #[default]
    Extended,
}

impl FormatVersion {
    pub fn skips_blank_lines(self) -> bool {
        matches!(self, FormatVersion::Extended)
    }

    pub fn accepts_virtual_prototypes(self) -> bool {
        matches!(self, FormatVersion::Extended)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatVersion::Legacy => "legacy",
            FormatVersion::Extended => "extended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format_version: FormatVersion,
    pub base_interface: String,
    pub base_interface_header: String,
    pub unknown_interface_method: String,
    pub reserved_prefix: String,
    pub interface_prefix: String,
    pub class_prefix: String,
    pub class_interface_prefix: String,
    pub member_indent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format_version: FormatVersion::default(),
            base_interface: "cIGZUnknown".to_string(),
            base_interface_header: "cIGZUnknown.h".to_string(),
            unknown_interface_method: "QueryInterface(uint32_t, void**)".to_string(),
            reserved_prefix: "cRZ".to_string(),
            interface_prefix: "cIGZ".to_string(),
            class_prefix: "c".to_string(),
            class_interface_prefix: "cI".to_string(),
            member_indent: "    ".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        let config: Config = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_format_version(mut self, format_version: FormatVersion) -> Self {
        self.format_version = format_version;
        self
    }

    pub fn with_base_interface(mut self, name: &str, header: &str) -> Self {
        self.base_interface = name.to_string();
        self.base_interface_header = header.to_string();
        self
    }

    pub fn with_prefix_rewrite(mut self, reserved: &str, interface: &str) -> Self {
        self.reserved_prefix = reserved.to_string();
        self.interface_prefix = interface.to_string();
        self
    }

    /// Fallback rewrite for class names without the reserved prefix.
    pub fn with_class_prefix_rewrite(mut self, class: &str, interface: &str) -> Self {
        self.class_prefix = class.to_string();
        self.class_interface_prefix = interface.to_string();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_interface.trim().is_empty() {
            return Err("base_interface must not be empty".to_string());
        }
        if self.base_interface_header.trim().is_empty() {
            return Err("base_interface_header must not be empty".to_string());
        }
        if self.unknown_interface_method.is_empty() || !self.unknown_interface_method.contains('(') {
            return Err("unknown_interface_method must be a normalized member signature".to_string());
        }
        if self.reserved_prefix.is_empty() {
            return Err("reserved_prefix must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.format_version, FormatVersion::Extended);
        assert_eq!(config.base_interface, "cIGZUnknown");
    }

    #[test]
    fn test_format_version_switches() {
        assert!(FormatVersion::Extended.skips_blank_lines());
        assert!(FormatVersion::Extended.accepts_virtual_prototypes());
        assert!(!FormatVersion::Legacy.skips_blank_lines());
        assert!(!FormatVersion::Legacy.accepts_virtual_prototypes());
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "format_version": "legacy", "base_interface": "cIBase" }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.format_version, FormatVersion::Legacy);
        assert_eq!(config.base_interface, "cIBase");
        assert_eq!(config.base_interface_header, "cIGZUnknown.h");
    }

    #[test]
    fn test_validate_rejects_empty_base() {
        let config = Config::new().with_base_interface("", "x.h");
        assert!(config.validate().is_err());
    }
}
