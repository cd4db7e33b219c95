#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod extraction;
mod pipeline;
pub mod search;
pub mod storage;

pub use extraction::engine::{Extraction, ExtractionEngine};
pub use pipeline::{IngestPipeline, IngestReport, Stats};
pub use search::MemoryQuery;
pub use storage::{JsonStore, default_rules};
