//! Request and result records for one skill-gap analysis

use crate::catalog::resources::LearningResource;
use crate::catalog::roles::Level;
use crate::catalog::{SkillId, Tier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target role for role-based analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleTarget {
    pub role_id: String,
    pub level: Level,
}

/// Everything the engine needs for one analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Skills the candidate lists explicitly, in any spelling.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Free text (resume, profile) to extract further skills from.
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub role: Option<RoleTarget>,
    /// Required skills for role-less analysis; ignored when the role resolves.
    #[serde(default)]
    pub target_skills: Vec<String>,
    #[serde(default)]
    pub experience_years: f64,
}

impl AnalysisRequest {
    pub fn new<S: Into<String>>(skills: impl IntoIterator<Item = S>) -> Self {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role_id: impl Into<String>, level: Level) -> Self {
        self.role = Some(RoleTarget {
            role_id: role_id.into(),
            level,
        });
        self
    }

    pub fn with_target_skills<S: Into<String>>(mut self, skills: impl IntoIterator<Item = S>) -> Self {
        self.target_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_resume_text(mut self, text: impl Into<String>) -> Self {
        self.resume_text = Some(text.into());
        self
    }

    pub fn with_experience(mut self, years: f64) -> Self {
        self.experience_years = years;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessLabel {
    #[serde(rename = "Industry Ready")]
    IndustryReady,
    #[serde(rename = "Almost Ready")]
    AlmostReady,
    #[serde(rename = "Needs Upskilling")]
    NeedsUpskilling,
}

impl ReadinessLabel {
    pub fn from_probability(p: f64) -> Self {
        if p >= 0.80 {
            ReadinessLabel::IndustryReady
        } else if p >= 0.60 {
            ReadinessLabel::AlmostReady
        } else {
            ReadinessLabel::NeedsUpskilling
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReadinessLabel::IndustryReady => "Industry Ready",
            ReadinessLabel::AlmostReady => "Almost Ready",
            ReadinessLabel::NeedsUpskilling => "Needs Upskilling",
        }
    }
}

impl fmt::Display for ReadinessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A required skill the candidate does not cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: SkillId,
    pub tier: Tier,
    pub weight: f64,
    /// 1-based learning priority; dense within one list.
    pub rank: usize,
    /// Only set when the learned gap scorer produced the ranking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapWeek {
    pub week: usize,
    pub skills: Vec<SkillId>,
    pub estimated_hours: f64,
    pub focus: SkillId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Learned,
    Curated,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecommendation {
    pub skill: SkillId,
    pub resources: Vec<LearningResource>,
    pub source: RecommendationSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysis {
    pub matched_skills: Vec<SkillId>,
    pub matched_core: Vec<SkillId>,
    pub matched_secondary: Vec<SkillId>,
    pub matched_bonus: Vec<SkillId>,
    pub missing_skills: Vec<SkillGap>,
    pub match_percentage: f64,
    pub weighted_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessExplanation {
    pub core_coverage: f64,
    pub secondary_coverage: f64,
    pub bonus_coverage: f64,
    pub experience_factor: f64,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub readiness_label: ReadinessLabel,
    pub readiness_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_level: Option<Level>,
    pub skill_analysis: SkillAnalysis,
    pub explanation: ReadinessExplanation,
    pub missing_skills: Vec<SkillGap>,
    pub recommendations: Vec<SkillRecommendation>,
    pub roadmap: Vec<RoadmapWeek>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_skills: Option<Vec<SkillId>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_thresholds() {
        assert_eq!(ReadinessLabel::from_probability(0.81), ReadinessLabel::IndustryReady);
        assert_eq!(ReadinessLabel::from_probability(0.80), ReadinessLabel::IndustryReady);
        assert_eq!(ReadinessLabel::from_probability(0.65), ReadinessLabel::AlmostReady);
        assert_eq!(ReadinessLabel::from_probability(0.60), ReadinessLabel::AlmostReady);
        assert_eq!(ReadinessLabel::from_probability(0.10), ReadinessLabel::NeedsUpskilling);
    }

    #[test]
    fn test_label_serializes_as_display_text() {
        let json = serde_json::to_string(&ReadinessLabel::AlmostReady).unwrap();
        assert_eq!(json, "\"Almost Ready\"");
    }

    #[test]
    fn test_request_builder() {
        let request = AnalysisRequest::new(["html", "css"])
            .with_role("frontend_developer", Level::Junior)
            .with_experience(1.5);

        assert_eq!(request.skills, vec!["html", "css"]);
        assert_eq!(request.role.unwrap().level, Level::Junior);
        assert_eq!(request.experience_years, 1.5);
    }
}
