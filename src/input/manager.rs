//! Resume document reader with per-path caching

use crate::error::{Result, SkillGapError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    normalize_whitespace, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Text pulled from a resume file, ready for skill extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeDocument {
    pub path: PathBuf,
    pub file_type: FileType,
    pub text: String,
}

impl ResumeDocument {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

pub struct InputManager {
    cache: HashMap<PathBuf, ResumeDocument>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn read_resume(&mut self, path: &Path) -> Result<ResumeDocument> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                debug!("Using cached resume text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(SkillGapError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path);
        info!("Reading {} resume: {}", file_type, path.display());

        let raw = match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await?,
            FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => MarkdownExtractor.extract(path).await?,
            FileType::Unknown => {
                return Err(SkillGapError::UnsupportedFormat(format!(
                    "{} (expected one of: {})",
                    path.display(),
                    FileType::SUPPORTED_EXTENSIONS.join(", ")
                )));
            }
        };

        let text = normalize_whitespace(&raw)?;
        if text.is_empty() {
            return Err(SkillGapError::TextExtraction(format!(
                "No text found in {}",
                path.display()
            )));
        }

        let document = ResumeDocument {
            path: path.to_path_buf(),
            file_type,
            text,
        };
        debug!("Read {} words from {}", document.word_count(), path.display());

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), document.clone());
        }
        Ok(document)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
