//! Hot-phrase matching and memory construction.

pub mod actions;
pub mod engine;

pub use engine::{Extraction, ExtractionEngine};
