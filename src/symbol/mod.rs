// Tue Jan 20 2026 - Alex

pub mod classifier;
pub mod demangle;
pub mod error;
pub mod normalize;

pub use classifier::{ClassifiedLine, LineClassifier};
pub use demangle::{DemangleOptions, Demangler, GnuV2Demangler};
pub use error::{SymbolError, SymbolResult};
pub use normalize::{TypeNormalizer, PARAMETER_SUBSTITUTIONS};
