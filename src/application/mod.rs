//! Application layer - orchestrates the generation pipeline

pub mod generate;
pub mod traits;

pub use generate::{GenerateServerRequest, GenerateServerUseCase, GenerationSummary, generate};
pub use traits::OutputService;
