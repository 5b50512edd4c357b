//! Keyword-based skill extraction from resume or profile text

use crate::capabilities::SkillExtractor;
use crate::catalog::taxonomy::SkillNormalizer;
use crate::catalog::SkillId;
use crate::error::{Result, SkillGapError};
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::collections::BTreeSet;
use unicode_segmentation::UnicodeSegmentation;

/// Spellings the taxonomy scan misses because of punctuation or spacing.
const VARIANT_PATTERNS: &[(&str, &str)] = &[
    (r"\breact\.?js\b", "react"),
    (r"\bvue\.?js\b", "vue"),
    (r"\bangular\.?js\b", "angular"),
    (r"\bnode\.?js\b", "node.js"),
    (r"\bnext\.?js\b", "next.js"),
    (r"\bci\s*/\s*cd\b", "ci/cd"),
    (r"\bmachine\s+learning\b", "machine learning"),
    (r"\bdeep\s+learning\b", "deep learning"),
    (r"\brest(?:ful)?\s*apis?\b", "rest api"),
    (r"\bdata\s+analysis\b", "data analysis"),
    (r"\bdata\s+visualization\b", "data visualization"),
    (r"\bproblem[\s-]+solving\b", "problem solving"),
    (r"\bunit\s+testing\b", "unit testing"),
];

/// Short aliases are too ambiguous in prose ("cv", "ml", "ts") to count as
/// mentions on their own.
const MIN_ALIAS_TOKEN_LEN: usize = 3;

/// Scans text for taxonomy skills with Aho-Corasick, then for known variant
/// spellings and alias tokens.
pub struct KeywordExtractor {
    matcher: AhoCorasick,
    patterns: Vec<String>,
    variants: Vec<(Regex, String)>,
    normalizer: SkillNormalizer,
}

impl KeywordExtractor {
    pub fn new(normalizer: &SkillNormalizer) -> Result<Self> {
        let mut patterns: Vec<String> = normalizer.taxonomy().map(str::to_string).collect();
        patterns.sort();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| SkillGapError::TextExtraction(format!("Failed to build skill matcher: {}", e)))?;

        let variants = VARIANT_PATTERNS
            .iter()
            .map(|(pattern, skill)| {
                Regex::new(pattern)
                    .map(|re| (re, skill.to_string()))
                    .map_err(|e| SkillGapError::TextExtraction(format!("Invalid variant pattern {}: {}", pattern, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            matcher,
            patterns,
            variants,
            normalizer: normalizer.clone(),
        })
    }

    fn is_boundary(c: Option<char>) -> bool {
        match c {
            None => true,
            Some(c) => !(c.is_alphanumeric() || c == '+' || c == '#'),
        }
    }

    fn scan_taxonomy(&self, text: &str, found: &mut BTreeSet<String>) {
        for mat in self.matcher.find_iter(text) {
            let before = text[..mat.start()].chars().next_back();
            let after = text[mat.end()..].chars().next();
            // "node.js." at the end of a sentence is still a mention
            let after = if after == Some('.') {
                text[mat.end() + 1..].chars().next().filter(|c| c.is_alphanumeric())
            } else {
                after
            };

            if Self::is_boundary(before) && Self::is_boundary(after) {
                found.insert(self.patterns[mat.pattern().as_usize()].clone());
            }
        }
    }

    fn scan_variants(&self, text: &str, found: &mut BTreeSet<String>) {
        for (pattern, skill) in &self.variants {
            if pattern.is_match(text) {
                found.insert(skill.clone());
            }
        }
    }

    fn scan_aliases(&self, text: &str, found: &mut BTreeSet<String>) {
        for word in text.unicode_words() {
            if word.chars().count() < MIN_ALIAS_TOKEN_LEN {
                continue;
            }
            if let Some(target) = self.normalizer.alias_target(word) {
                found.insert(target.to_string());
            }
        }
    }
}

impl SkillExtractor for KeywordExtractor {
    fn extract(&self, text: &str) -> Vec<SkillId> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let mut found = BTreeSet::new();

        self.scan_taxonomy(&lowered, &mut found);
        self.scan_variants(&lowered, &mut found);
        self.scan_aliases(&lowered, &mut found);

        found
            .into_iter()
            .map(|skill| self.normalizer.normalize(&skill))
            .collect()
    }
}
