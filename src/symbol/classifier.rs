// Tue Jan 20 2026 - Alex

use super::error::{SymbolError, SymbolResult};
use crate::config::FormatVersion;

pub const THUNK_PREFIX: &str = "__thunk_";
pub const VIRTUAL_PROTOTYPE_PREFIX: &str = "virtual ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine<'a> {
    Blank,
    Thunk { thunk_id: &'a str, identifier: &'a str },
    VirtualPrototype { return_type: &'a str, identifier: &'a str },
    Plain(&'a str),
}

impl<'a> ClassifiedLine<'a> {
    pub fn identifier(&self) -> Option<&'a str> {
        match self {
            ClassifiedLine::Blank => None,
            ClassifiedLine::Thunk { identifier, .. } => Some(*identifier),
            ClassifiedLine::VirtualPrototype { identifier, .. } => Some(*identifier),
            ClassifiedLine::Plain(identifier) => Some(*identifier),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedLine::Blank => "blank",
            ClassifiedLine::Thunk { .. } => "thunk",
            ClassifiedLine::VirtualPrototype { .. } => "virtual",
            ClassifiedLine::Plain(_) => "plain",
        }
    }
}

/// Splits a raw symbol-list line into the mangled identifier to demangle.
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier {
    format: FormatVersion,
}

impl LineClassifier {
    pub fn new(format: FormatVersion) -> Self {
        Self { format }
    }

    pub fn format(&self) -> FormatVersion {
        self.format
    }

    pub fn classify<'a>(&self, line: &'a str) -> SymbolResult<ClassifiedLine<'a>> {
        if line.is_empty() && self.format.skips_blank_lines() {
            return Ok(ClassifiedLine::Blank);
        }

        if line.starts_with(THUNK_PREFIX) {
            return Self::strip_thunk(line);
        }

        if self.format.accepts_virtual_prototypes() && line.starts_with(VIRTUAL_PROTOTYPE_PREFIX) {
            return Self::strip_virtual_prototype(line);
        }

        Ok(ClassifiedLine::Plain(line))
    }

    // __thunk_<id>_<mangled name>
    fn strip_thunk(line: &str) -> SymbolResult<ClassifiedLine<'_>> {
        let search_from = THUNK_PREFIX.len() + 1;
        let end = line
            .get(search_from..)
            .and_then(|rest| rest.find('_'))
            .map(|offset| search_from + offset)
            .ok_or_else(|| {
                SymbolError::MalformedInput(format!(
                    "Failed to find the end of the thunk prefix in `{}`",
                    line
                ))
            })?;

        Ok(ClassifiedLine::Thunk {
            thunk_id: &line[THUNK_PREFIX.len()..end],
            identifier: &line[end + 1..],
        })
    }

    // virtual <return type> <mangled name>(<parameters>)
    fn strip_virtual_prototype(line: &str) -> SymbolResult<ClassifiedLine<'_>> {
        let search_from = VIRTUAL_PROTOTYPE_PREFIX.len() + 1;
        let return_type_end = line
            .get(search_from..)
            .and_then(|rest| rest.find(' '))
            .map(|offset| search_from + offset)
            .ok_or_else(|| {
                SymbolError::MalformedInput(format!(
                    "Failed to find the end of the virtual function return type in `{}`",
                    line
                ))
            })?;

        let name_start = return_type_end + 1;
        let name_end = line[name_start..]
            .find('(')
            .map(|offset| name_start + offset)
            .ok_or_else(|| {
                SymbolError::MalformedInput(format!(
                    "Failed to find the parameter list of the virtual function prototype `{}`",
                    line
                ))
            })?;

        Ok(ClassifiedLine::VirtualPrototype {
            return_type: &line[VIRTUAL_PROTOTYPE_PREFIX.len()..return_type_end],
            identifier: &line[name_start..name_end],
        })
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(FormatVersion::default())
    }
}
