//! Report structures wrapping one analysis result for presentation

use crate::analysis::types::{AnalysisRequest, AnalysisResult, ReadinessLabel};
use crate::catalog::roles::Level;
use crate::catalog::Tier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many missing skills the summary calls out by name.
const SUMMARY_GAP_COUNT: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    pub result: AnalysisResult,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Readiness probability as a percentage (0-100)
    pub readiness_percentage: u8,
    pub weighted_score_percentage: u8,
    pub verdict: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub ranking: RankingMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMethod {
    Learned,
    Prerequisites,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub processing_time_ms: u64,
    pub input: InputSummary,
}

/// What the analysis was run on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_file: Option<String>,
    pub explicit_skills: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    pub target_skills: usize,
    pub experience_years: f64,
}

impl InputSummary {
    pub fn from_request(request: &AnalysisRequest, resume_file: Option<String>) -> Self {
        Self {
            resume_file,
            explicit_skills: request.skills.len(),
            role_id: request.role.as_ref().map(|r| r.role_id.clone()),
            level: request.role.as_ref().map(|r| r.level),
            target_skills: request.target_skills.len(),
            experience_years: request.experience_years,
        }
    }
}

impl AnalysisReport {
    pub fn new(result: AnalysisResult, input: InputSummary, processing_time_ms: u64) -> Self {
        let summary = Self::create_summary(&result);
        Self {
            summary,
            result,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                processing_time_ms,
                input,
            },
        }
    }

    /// Role title, or a description of the role-less target.
    pub fn target_description(&self) -> String {
        match (&self.result.role_title, self.result.role_level) {
            (Some(title), Some(level)) => format!("{} ({})", title, level),
            (Some(title), None) => title.clone(),
            _ => format!("{} target skills", self.metadata.input.target_skills),
        }
    }

    fn create_summary(result: &AnalysisResult) -> ReportSummary {
        let verdict = match result.readiness_label {
            ReadinessLabel::IndustryReady => "Ready to apply for this role",
            ReadinessLabel::AlmostReady => "Close - a few targeted skills away",
            ReadinessLabel::NeedsUpskilling => "Build the core skills before applying",
        }
        .to_string();

        let mut strengths = Vec::new();
        let analysis = &result.skill_analysis;
        if !analysis.matched_core.is_empty() {
            strengths.push(format!("Core skills in place: {}", join(&analysis.matched_core)));
        }
        let extras: Vec<_> = analysis
            .matched_secondary
            .iter()
            .chain(&analysis.matched_bonus)
            .cloned()
            .collect();
        if !extras.is_empty() {
            strengths.push(format!("Also covers: {}", join(&extras)));
        }

        let mut improvement_areas = Vec::new();
        let core_gaps: Vec<_> = result
            .missing_skills
            .iter()
            .filter(|gap| gap.tier == Tier::Core)
            .take(SUMMARY_GAP_COUNT)
            .map(|gap| gap.skill.clone())
            .collect();
        if !core_gaps.is_empty() {
            improvement_areas.push(format!("Missing core skills: {}", join(&core_gaps)));
        }
        if let Some(first) = result.roadmap.first() {
            improvement_areas.push(format!(
                "Start with {} (~{:.0}h in week 1)",
                first.focus, first.estimated_hours
            ));
        }

        let ranking = if result.missing_skills.iter().any(|gap| gap.ml_score.is_some()) {
            RankingMethod::Learned
        } else {
            RankingMethod::Prerequisites
        };

        ReportSummary {
            readiness_percentage: to_percentage(result.readiness_score),
            weighted_score_percentage: to_percentage(result.skill_analysis.weighted_score),
            verdict,
            strengths,
            improvement_areas,
            ranking,
        }
    }
}

fn to_percentage(ratio: f64) -> u8 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisEngine, AnalysisOptions};
    use crate::registry::Registry;

    #[test]
    fn test_report_summary() {
        let registry = Registry::builtin();
        let request = AnalysisRequest::new(["html", "css"])
            .with_role("frontend_developer", Level::Intern)
            .with_experience(0.5);
        let result = AnalysisEngine::new(&registry, AnalysisOptions::default()).analyze(&request);

        let report = AnalysisReport::new(result, InputSummary::from_request(&request, None), 3);

        assert_eq!(report.summary.ranking, RankingMethod::Prerequisites);
        assert!(report.summary.strengths[0].contains("html, css"));
        assert_eq!(report.summary.improvement_areas[0], "Missing core skills: javascript");
        assert_eq!(report.target_description(), "Frontend Developer (intern)");
        assert_eq!(report.metadata.input.explicit_skills, 2);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(to_percentage(0.666), 67);
        assert_eq!(to_percentage(1.4), 100);
        assert_eq!(to_percentage(-0.1), 0);
    }
}
