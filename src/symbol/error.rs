// Tue Jan 20 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Demangling failed for `{symbol}`: {reason}")]
    DemangleFailed { symbol: String, reason: String },
    #[error("Demangler returned an empty signature for `{0}`")]
    EmptySignature(String),
}

impl SymbolError {
    pub fn demangle_failed(symbol: &str, reason: impl Into<String>) -> Self {
        SymbolError::DemangleFailed {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}

pub type SymbolResult<T> = Result<T, SymbolError>;
