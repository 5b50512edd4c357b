//! Resume input: file type detection, text extraction and reading

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::{InputManager, ResumeDocument};
