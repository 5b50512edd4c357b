//! End-to-end analysis: match, rank, score, plan, recommend

use crate::analysis::matcher::{CandidateSkills, Requirements, SkillMatcher};
use crate::analysis::prioritizer::{CandidateProfile, GapPrioritizer, RankingPolicy};
use crate::analysis::readiness::ReadinessScorer;
use crate::analysis::recommendations::RecommendationComposer;
use crate::analysis::roadmap::RoadmapBuilder;
use crate::analysis::types::{AnalysisRequest, AnalysisResult, ReadinessExplanation, SkillAnalysis};
use crate::catalog::roles::RoleLevelRequirement;
use crate::catalog::SkillId;
use crate::config::AnalysisConfig;
use crate::registry::Registry;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Experience at which the explanation's experience factor saturates.
const EXPERIENCE_SATURATION_YEARS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    pub roadmap_weeks: usize,
    pub max_resources_per_skill: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            roadmap_weeks: 4,
            max_resources_per_skill: 2,
        }
    }
}

impl From<&AnalysisConfig> for AnalysisOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            roadmap_weeks: config.roadmap_weeks,
            max_resources_per_skill: config.max_resources_per_skill,
        }
    }
}

/// Runs one request against a shared [`Registry`]. Never fails: every
/// missing capability has a deterministic fallback.
pub struct AnalysisEngine<'a> {
    registry: &'a Registry,
    options: AnalysisOptions,
}

impl<'a> AnalysisEngine<'a> {
    pub fn new(registry: &'a Registry, options: AnalysisOptions) -> Self {
        Self { registry, options }
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let registry = self.registry;
        let normalizer = registry.normalizer();
        let experience_years = sanitize_experience(request.experience_years);

        let explicit = normalizer.normalize_all(&request.skills);
        let extracted = self.extract(request);
        let candidates = merge_skills(explicit, extracted.as_deref().unwrap_or_default());
        debug!("Candidate skills ({}): {:?}", candidates.len(), candidates);
        let candidates = CandidateSkills::new(candidates);

        let role = self.resolve_role(request);
        let requirements = match role {
            Some(role) => Requirements::from_role(role),
            None => Requirements::legacy(normalizer.normalize_all(&request.target_skills)),
        };

        let outcome = SkillMatcher::new(registry.similarity()).match_requirements(&requirements, &candidates);
        let weighted_score = outcome.weighted_score();
        let match_percentage = outcome.match_percentage();
        let missing = outcome.missing_with_tier();

        let profile = CandidateProfile {
            skills: &candidates,
            experience_years,
        };
        let (ranked, policy) =
            GapPrioritizer::new(registry.graph(), normalizer, registry.gap_scorer()).rank(&missing, &profile);

        let assessment = ReadinessScorer::new(registry.readiness_classifier()).assess(
            weighted_score,
            experience_years,
            outcome.core.coverage(),
        );

        // roadmap and resources always follow prerequisite order
        let learning_order: Vec<SkillId> = match policy {
            RankingPolicy::Dependency => ranked.iter().map(|gap| gap.skill.clone()).collect(),
            RankingPolicy::Learned => {
                let skills: Vec<SkillId> = missing.iter().map(|(skill, _)| skill.clone()).collect();
                registry.graph().topological_order(&skills)
            }
        };

        let roadmap = RoadmapBuilder::new(normalizer, self.options.roadmap_weeks).build(&learning_order);
        let recommendations = RecommendationComposer::new(
            registry.recommender(),
            registry.curated(),
            self.options.max_resources_per_skill,
        )
        .compose(&learning_order);

        info!(
            "Analysis complete: {} ({:.2}), {} matched, {} missing, {:?} ranking",
            assessment.label,
            assessment.score,
            outcome.matched_skills().len(),
            ranked.len(),
            policy
        );

        AnalysisResult {
            readiness_label: assessment.label,
            readiness_score: assessment.score,
            role_title: role.map(|r| r.title.clone()),
            role_level: role.map(|r| r.level),
            skill_analysis: SkillAnalysis {
                matched_skills: outcome.matched_skills(),
                matched_core: outcome.core.matched.clone(),
                matched_secondary: outcome.secondary.matched.clone(),
                matched_bonus: outcome.bonus.matched.clone(),
                missing_skills: ranked.clone(),
                match_percentage,
                weighted_score,
            },
            explanation: ReadinessExplanation {
                core_coverage: outcome.core.coverage(),
                secondary_coverage: outcome.secondary.coverage(),
                bonus_coverage: outcome.bonus.coverage(),
                experience_factor: (experience_years / EXPERIENCE_SATURATION_YEARS).min(1.0),
                factors: assessment.factors,
            },
            missing_skills: ranked,
            recommendations,
            roadmap,
            extracted_skills: extracted,
        }
    }

    fn extract(&self, request: &AnalysisRequest) -> Option<Vec<SkillId>> {
        let text = request.resume_text.as_deref()?;
        match self.registry.extractor() {
            Some(extractor) => {
                let raw = extractor.extract(text);
                let skills = self.registry.normalizer().normalize_all(&raw);
                debug!("Extracted {} skills from {} chars of text", skills.len(), text.len());
                Some(skills)
            }
            None => {
                warn!("Resume text given but no skill extractor is loaded; ignoring it");
                None
            }
        }
    }

    fn resolve_role(&self, request: &AnalysisRequest) -> Option<&'a RoleLevelRequirement> {
        let target = request.role.as_ref()?;
        let role = self.registry.roles().resolve(&target.role_id, target.level);
        if role.is_none() {
            warn!(
                "No requirements for role {} at level {}, analysing against target skills only",
                target.role_id, target.level
            );
        }
        role
    }
}

fn sanitize_experience(years: f64) -> f64 {
    if years.is_finite() {
        years.max(0.0)
    } else {
        0.0
    }
}

/// Explicit skills first, then extracted ones not already present.
fn merge_skills(explicit: Vec<SkillId>, extracted: &[SkillId]) -> Vec<SkillId> {
    let mut seen: HashSet<SkillId> = explicit.iter().cloned().collect();
    let mut merged = explicit;
    merged.extend(extracted.iter().filter(|s| seen.insert((*s).clone())).cloned());
    merged
}
