//! File-backed learned models: readiness classifier, gap scorer, recommender

use crate::capabilities::{GapScorer, ReadinessClassifier, ResourceRecommender};
use crate::catalog::resources::LearningResource;
use crate::catalog::taxonomy::SkillNormalizer;
use crate::catalog::SkillId;
use crate::error::{Result, SkillGapError};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Number of features the readiness classifier expects.
pub const READINESS_FEATURES: usize = 2;

/// Number of features the gap scorer expects.
pub const GAP_FEATURES: usize = 9;

/// Read a JSON artifact. A missing file is `Ok(None)`; a file that exists but
/// does not parse is an error.
pub fn load_json_artifact<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        debug!("Artifact not found: {}", path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)
        .map_err(|e| SkillGapError::Artifact(format!("Failed to parse {}: {}", path.display(), e)))?;
    Ok(Some(value))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinearWeights {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearWeights {
    fn checked(self, expected: usize, name: &str) -> Result<Self> {
        if self.weights.len() != expected || !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(SkillGapError::Artifact(format!(
                "{} needs {} finite weights and a finite bias, got {} weights",
                name,
                expected,
                self.weights.len()
            )));
        }
        Ok(self)
    }

    fn apply(&self, features: &[f64]) -> Option<f64> {
        if features.len() != self.weights.len() || features.iter().any(|f| !f.is_finite()) {
            return None;
        }
        Some(self.weights.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + self.bias)
    }
}

/// Logistic regression over `[weighted_score, experience_years]`.
#[derive(Debug, Clone)]
pub struct LogisticReadinessModel {
    params: LinearWeights,
}

impl LogisticReadinessModel {
    pub fn new(weights: [f64; READINESS_FEATURES], bias: f64) -> Self {
        Self {
            params: LinearWeights {
                weights: weights.to_vec(),
                bias,
            },
        }
    }

    /// Load `{ "weights": [w_score, w_experience], "bias": b }`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        load_json_artifact::<LinearWeights>(path)?
            .map(|params| params.checked(READINESS_FEATURES, "readiness model"))
            .transpose()
            .map(|params| params.map(|params| Self { params }))
    }
}

impl ReadinessClassifier for LogisticReadinessModel {
    fn classify(&self, features: &[f64]) -> Option<(f64, f64)> {
        let logit = self.params.apply(features)?;
        let p_ready = 1.0 / (1.0 + (-logit).exp());
        Some((1.0 - p_ready, p_ready))
    }
}

/// Linear priority model over the nine gap features.
#[derive(Debug, Clone)]
pub struct LinearGapScorer {
    params: LinearWeights,
}

impl LinearGapScorer {
    pub fn new(weights: [f64; GAP_FEATURES], bias: f64) -> Self {
        Self {
            params: LinearWeights {
                weights: weights.to_vec(),
                bias,
            },
        }
    }

    /// Load `{ "weights": [9 floats], "bias": b }`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        load_json_artifact::<LinearWeights>(path)?
            .map(|params| params.checked(GAP_FEATURES, "gap ranker"))
            .transpose()
            .map(|params| params.map(|params| Self { params }))
    }
}

impl GapScorer for LinearGapScorer {
    fn score(&self, features: &[f64]) -> Option<f64> {
        self.params.apply(features)
    }
}

/// Precomputed skill -> resource rankings.
#[derive(Debug, Clone, Default)]
pub struct TableRecommender {
    by_skill: HashMap<SkillId, Vec<LearningResource>>,
}

impl TableRecommender {
    /// Keys are normalized; lists under aliases of one skill are merged in
    /// key order before ranking.
    pub fn new(table: HashMap<String, Vec<LearningResource>>, normalizer: &SkillNormalizer) -> Self {
        let mut by_skill: HashMap<SkillId, Vec<LearningResource>> = HashMap::new();
        for (raw, resources) in table.into_iter().collect::<BTreeMap<_, _>>() {
            let skill = normalizer.normalize(&raw);
            if !skill.as_str().is_empty() {
                by_skill.entry(skill).or_default().extend(resources);
            }
        }
        for resources in by_skill.values_mut() {
            // stable: equal relevance keeps the artifact's order
            resources.sort_by(|a, b| {
                let (a, b) = (a.relevance.unwrap_or(0.0), b.relevance.unwrap_or(0.0));
                b.total_cmp(&a)
            });
        }
        Self { by_skill }
    }

    /// Load `{ "skill": [resource, ...], ... }`.
    pub fn load(path: &Path, normalizer: &SkillNormalizer) -> Result<Option<Self>> {
        Ok(load_json_artifact::<HashMap<String, Vec<LearningResource>>>(path)?
            .map(|table| Self::new(table, normalizer)))
    }
}

impl ResourceRecommender for TableRecommender {
    fn recommend(&self, skill: &str) -> Vec<LearningResource> {
        self.by_skill.get(skill).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::resources::ResourceType;
    use std::io::Write;

    #[test]
    fn test_logistic_readiness_probabilities_sum_to_one() {
        let model = LogisticReadinessModel::new([4.0, 0.5], -3.0);
        let (not_ready, ready) = model.classify(&[0.9, 3.0]).unwrap();

        assert!((not_ready + ready - 1.0).abs() < 1e-12);
        assert!(ready > 0.5);
    }

    #[test]
    fn test_wrong_feature_length_is_rejected() {
        let model = LogisticReadinessModel::new([1.0, 1.0], 0.0);
        assert!(model.classify(&[0.5]).is_none());
        assert!(model.classify(&[0.5, f64::NAN]).is_none());

        let scorer = LinearGapScorer::new([1.0; GAP_FEATURES], 0.0);
        assert!(scorer.score(&[1.0; 8]).is_none());
        assert_eq!(scorer.score(&[1.0; GAP_FEATURES]), Some(9.0));
    }

    #[test]
    fn test_load_gap_scorer_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"weights": [0.1, 0.9, 0.0, -0.2, 2.0, 1.0, 0.0, 0.0, 0.5], "bias": 0.3}}"#).unwrap();

        let scorer = LinearGapScorer::load(file.path()).unwrap().unwrap();
        let score = scorer.score(&[3.0, 5.0, 20.0, 1.0, 1.0, 0.0, 2.0, 4.0, 1.0]).unwrap();
        assert!((score - (0.3 + 4.5 - 0.2 + 2.0 + 0.5 + 0.3)).abs() < 1e-9);
    }

    #[test]
    fn test_load_rejects_wrong_weight_count() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"weights": [0.1, 0.9, 0.3], "bias": 0.0}}"#).unwrap();

        assert!(matches!(
            LogisticReadinessModel::load(file.path()),
            Err(SkillGapError::Artifact(_))
        ));
    }

    #[test]
    fn test_table_recommender_orders_by_relevance() {
        let resource = |title: &str, relevance: f64| LearningResource {
            title: title.to_string(),
            resource_type: ResourceType::Course,
            provider: None,
            url: format!("https://example.com/{}", title),
            difficulty: "beginner".to_string(),
            duration_hours: 5.0,
            relevance: Some(relevance),
        };
        let table = HashMap::from([(
            "Docker".to_string(),
            vec![resource("a", 0.2), resource("b", 0.9), resource("c", 0.2)],
        )]);
        let recommender = TableRecommender::new(table, &SkillNormalizer::new());

        let titles: Vec<String> = recommender.recommend("docker").into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["b", "a", "c"]);
        assert!(recommender.recommend("rust").is_empty());
    }

    #[test]
    fn test_table_recommender_resolves_alias_keys() {
        let resource = |title: &str| LearningResource {
            title: title.to_string(),
            resource_type: ResourceType::Video,
            provider: None,
            url: format!("https://example.com/{}", title),
            difficulty: "beginner".to_string(),
            duration_hours: 2.0,
            relevance: None,
        };
        let table = HashMap::from([
            ("k8s".to_string(), vec![resource("pods")]),
            ("kubernetes".to_string(), vec![resource("helm")]),
            ("postgres".to_string(), vec![resource("indexes")]),
        ]);
        let recommender = TableRecommender::new(table, &SkillNormalizer::new());

        let titles: Vec<String> = recommender.recommend("kubernetes").into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["pods", "helm"]);
        assert_eq!(recommender.recommend("postgresql").len(), 1);
    }
}
