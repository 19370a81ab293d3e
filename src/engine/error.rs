// Tue Jan 20 2026 - Alex

use crate::symbol::SymbolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Line {line}")]
    Symbol {
        line: usize,
        #[source]
        source: SymbolError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    pub fn at_line(line: usize, source: SymbolError) -> Self {
        EngineError::Symbol { line, source }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            EngineError::Symbol { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
