// Tue Jan 20 2026 - Alex

pub mod error;
pub mod pipeline;

pub use error::{EngineError, EngineResult};
pub use pipeline::{Pipeline, PipelineOutput, PipelineStats};
