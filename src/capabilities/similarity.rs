//! Skill similarity backends used by the matcher

use crate::capabilities::models::load_json_artifact;
use crate::capabilities::SkillSimilarity;
use crate::catalog::taxonomy::SkillNormalizer;
use crate::catalog::SkillId;
use crate::error::{Result, SkillGapError};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use strsim::normalized_levenshtein;

/// Spelling-level similarity over the taxonomy. Catches "scikit learn" vs
/// "scikit-learn" and "nodejs" vs "node.js"; a token whose compact form is
/// not a taxonomy skill is unknown and scores 0.0.
#[derive(Debug, Clone)]
pub struct LexicalSimilarity {
    vocabulary: HashSet<String>,
}

impl LexicalSimilarity {
    pub fn new(normalizer: &SkillNormalizer) -> Self {
        Self {
            vocabulary: normalizer.taxonomy().map(Self::compact).collect(),
        }
    }

    fn compact(skill: &str) -> String {
        skill
            .chars()
            .filter(|c| !(c.is_whitespace() || matches!(c, '.' | '-' | '_')))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl SkillSimilarity for LexicalSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        let (a, b) = (Self::compact(a), Self::compact(b));
        if !self.vocabulary.contains(&a) || !self.vocabulary.contains(&b) {
            return 0.0;
        }
        normalized_levenshtein(&a, &b).clamp(0.0, 1.0)
    }
}

/// Cosine similarity over precomputed skill embeddings.
#[derive(Debug, Clone)]
pub struct EmbeddingSimilarity {
    vectors: HashMap<SkillId, Vec<f32>>,
}

impl EmbeddingSimilarity {
    /// Keys are normalized, so alias keys land on their canonical skill. When
    /// two keys collide, the one already in canonical form wins, then the
    /// lexicographically smallest.
    pub fn new(vectors: HashMap<String, Vec<f32>>, normalizer: &SkillNormalizer) -> Result<Self> {
        let mut dims = vectors.values().map(Vec::len);
        if let Some(first) = dims.next() {
            if first == 0 || dims.any(|d| d != first) {
                return Err(SkillGapError::Artifact(
                    "skill embeddings must share one non-zero dimension".to_string(),
                ));
            }
        }

        let mut normalized: HashMap<SkillId, Vec<f32>> = HashMap::with_capacity(vectors.len());
        for (raw, vector) in vectors.into_iter().collect::<BTreeMap<_, _>>() {
            let skill = normalizer.normalize(&raw);
            if skill.as_str().is_empty() {
                continue;
            }
            let canonical_key = raw == skill.as_str();
            match normalized.entry(skill) {
                Entry::Vacant(slot) => {
                    slot.insert(vector);
                }
                Entry::Occupied(mut slot) if canonical_key => {
                    slot.insert(vector);
                }
                Entry::Occupied(_) => {}
            }
        }
        Ok(Self { vectors: normalized })
    }

    /// Load `{ "skill": [f32, ...], ... }`. `Ok(None)` when the file is absent.
    pub fn load(path: &Path, normalizer: &SkillNormalizer) -> Result<Option<Self>> {
        match load_json_artifact::<HashMap<String, Vec<f32>>>(path)? {
            Some(vectors) => Self::new(vectors, normalizer).map(Some),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn cosine(a: &[f32], b: &[f32]) -> f64 {
        let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
        let norm_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
        let norm_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
        dot / (norm_a * norm_b + 1e-8)
    }
}

impl SkillSimilarity for EmbeddingSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        match (self.vectors.get(a), self.vectors.get(b)) {
            (Some(va), Some(vb)) => Self::cosine(va, vb).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}
