pub mod audio;
pub mod batch;
pub mod config;
pub mod error;
pub mod script;
pub mod services;
pub mod synth;

// Re-export the pipeline entry points for convenient access
pub use batch::{BatchOrchestrator, BatchResult};
pub use script::Cue;
pub use synth::{compose, ComposeOptions, SpeechGenerator};
