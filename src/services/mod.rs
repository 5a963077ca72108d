// src/services/mod.rs
pub mod analyzer;
pub mod generation;
pub mod image_processor;

pub use analyzer::{ContentAnalyzer, SketchAnalyzer};
pub use generation::GenerationClient;
pub use image_processor::ImageProcessor;
