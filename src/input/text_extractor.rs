//! Plain-text extraction from resume files

use crate::error::{Result, SkillGapError};
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            SkillGapError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

/// Keeps the words of a Markdown resume and drops the markup. Link targets
/// and image URLs are not part of the text.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(Self::to_plain_text(&markdown))
    }
}

impl MarkdownExtractor {
    pub fn to_plain_text(markdown: &str) -> String {
        let mut text = String::with_capacity(markdown.len());

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak | Event::Rule => text.push('\n'),
                Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => text.push('\n'),
                Event::End(Tag::TableCell) => text.push(' '),
                _ => {}
            }
        }

        text
    }
}

/// Trim lines and collapse runs of blank lines.
pub fn normalize_whitespace(text: &str) -> Result<String> {
    let blank_runs = Regex::new(r"\n{3,}")
        .map_err(|e| SkillGapError::TextExtraction(format!("Invalid whitespace pattern: {}", e)))?;

    let trimmed: Vec<&str> = text.lines().map(str::trim).collect();
    let joined = trimmed.join("\n");
    Ok(blank_runs.replace_all(joined.trim(), "\n\n").into_owned())
}
