// Tue Jan 15 2026 - Alex

pub mod config;
pub mod symbol;
pub mod structure;
pub mod engine;
pub mod output;
pub mod ui;
pub mod utils;

pub use config::{Config, FormatVersion};
pub use symbol::{Demangler, GnuV2Demangler, LineClassifier, TypeNormalizer};
pub use structure::{InterfaceAssembler, InterfaceDeclaration};
pub use engine::{EngineError, Pipeline};
pub use output::{OutputTarget, OutputWriter};
