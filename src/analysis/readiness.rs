//! Readiness label, probability and explanation factors

use crate::analysis::types::ReadinessLabel;
use crate::capabilities::ReadinessClassifier;
use log::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessAssessment {
    pub label: ReadinessLabel,
    pub score: f64,
    pub factors: Vec<String>,
}

pub struct ReadinessScorer<'a> {
    classifier: Option<&'a dyn ReadinessClassifier>,
}

impl<'a> ReadinessScorer<'a> {
    pub fn new(classifier: Option<&'a dyn ReadinessClassifier>) -> Self {
        Self { classifier }
    }

    pub fn assess(&self, weighted_score: f64, experience_years: f64, core_coverage: f64) -> ReadinessAssessment {
        let score = self.probability(weighted_score, experience_years);
        ReadinessAssessment {
            label: ReadinessLabel::from_probability(score),
            score,
            factors: explain(weighted_score, experience_years, core_coverage),
        }
    }

    fn probability(&self, weighted_score: f64, experience_years: f64) -> f64 {
        if let Some(classifier) = self.classifier {
            match classifier.classify(&[weighted_score, experience_years]) {
                Some((_, p_ready)) if p_ready.is_finite() => return p_ready.clamp(0.0, 1.0),
                _ => warn!("Readiness classifier gave no usable probability, using linear estimate"),
            }
        }
        fallback_probability(weighted_score, experience_years)
    }
}

pub fn fallback_probability(weighted_score: f64, experience_years: f64) -> f64 {
    (0.5 * weighted_score + 0.05 * experience_years).clamp(0.0, 1.0)
}

/// Always exactly three factors: core coverage, experience, overall profile.
pub fn explain(weighted_score: f64, experience_years: f64, core_coverage: f64) -> Vec<String> {
    let coverage = if core_coverage >= 0.8 {
        format!("Strong core skill coverage ({})", percent(core_coverage))
    } else if core_coverage >= 0.5 {
        format!("Moderate core skill coverage ({})", percent(core_coverage))
    } else {
        format!(
            "Low core skill coverage ({}) - focus on core skills first",
            percent(core_coverage)
        )
    };

    let experience = if experience_years >= 3.0 {
        format!("Good experience level ({:.1} years)", experience_years)
    } else if experience_years >= 1.0 {
        format!("Some experience ({:.1} years)", experience_years)
    } else {
        "Limited experience - consider internships or projects".to_string()
    };

    let profile = if weighted_score >= 0.7 {
        "Overall skill profile is strong"
    } else if weighted_score >= 0.4 {
        "Skill profile needs improvement in key areas"
    } else {
        "Significant skill gaps need to be addressed"
    };

    vec![coverage, experience, profile.to_string()]
}

fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::models::LogisticReadinessModel;

    #[test]
    fn test_fallback_probability() {
        assert!((fallback_probability(0.8, 2.0) - 0.5).abs() < 1e-12);
        assert_eq!(fallback_probability(1.0, 30.0), 1.0);
        assert_eq!(fallback_probability(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_assess_without_classifier() {
        let assessment = ReadinessScorer::new(None).assess(1.0, 6.0, 1.0);
        assert_eq!(assessment.label, ReadinessLabel::IndustryReady);
        assert!((assessment.score - 0.8).abs() < 1e-12);
        assert_eq!(assessment.factors.len(), 3);
    }

    #[test]
    fn test_assess_with_classifier() {
        let model = LogisticReadinessModel::new([0.0, 0.0], 0.0);
        let assessment = ReadinessScorer::new(Some(&model)).assess(0.9, 4.0, 1.0);
        assert!((assessment.score - 0.5).abs() < 1e-12);
        assert_eq!(assessment.label, ReadinessLabel::NeedsUpskilling);
    }

    #[test]
    fn test_explanation_wording() {
        let factors = explain(0.5, 1.5, 2.0 / 3.0);
        assert_eq!(
            factors,
            vec![
                "Moderate core skill coverage (67%)",
                "Some experience (1.5 years)",
                "Skill profile needs improvement in key areas",
            ]
        );

        let factors = explain(0.1, 0.0, 0.2);
        assert_eq!(factors[0], "Low core skill coverage (20%) - focus on core skills first");
        assert_eq!(factors[1], "Limited experience - consider internships or projects");
        assert_eq!(factors[2], "Significant skill gaps need to be addressed");
    }
}
