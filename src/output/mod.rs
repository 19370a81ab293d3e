// Tue Jan 20 2026 - Alex

pub mod writer;

pub use writer::{write_atomically, OutputError, OutputTarget, OutputWriter};
