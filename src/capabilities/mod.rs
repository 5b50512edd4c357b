//! Pluggable analysis capabilities
//!
//! Every learned component the engine can use sits behind one of these traits
//! and is held in a [`Capability`]. Whether a capability is present is decided
//! once, when the registry is built; call sites branch on the variant instead
//! of trying the model and recovering from failure.
//!
//! Implementations signal a malformed input (for example a feature vector of
//! the wrong length) by returning `None`, which callers treat exactly like an
//! absent capability for that one call.

pub mod extractor;
pub mod models;
pub mod similarity;

use crate::catalog::resources::LearningResource;
use crate::catalog::SkillId;

/// Free text -> skills mentioned in it.
pub trait SkillExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<SkillId>;
}

/// Similarity between two canonical skills in `[0, 1]`.
pub trait SkillSimilarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Binary readiness classifier over `[weighted_score, experience_years]`.
/// Returns `(p_not_ready, p_ready)`.
pub trait ReadinessClassifier: Send + Sync {
    fn classify(&self, features: &[f64]) -> Option<(f64, f64)>;
}

/// Learning-priority score for one missing skill's feature vector. Higher
/// means learn sooner.
pub trait GapScorer: Send + Sync {
    fn score(&self, features: &[f64]) -> Option<f64>;
}

/// Ordered learning resources for a skill; may be empty.
pub trait ResourceRecommender: Send + Sync {
    fn recommend(&self, skill: &str) -> Vec<LearningResource>;
}

/// A collaborator that is either loaded or not.
#[derive(Debug, Clone)]
pub enum Capability<T> {
    Present(T),
    Absent,
}

impl<T> Capability<T> {
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Capability::Present(inner) => Some(inner),
            Capability::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Capability::Present(_))
    }

    pub fn status(&self) -> &'static str {
        if self.is_present() {
            "present"
        } else {
            "absent"
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => Capability::Present(inner),
            None => Capability::Absent,
        }
    }
}
