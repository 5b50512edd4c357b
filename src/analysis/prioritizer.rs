//! Learning-priority ranking of missing skills

use crate::analysis::matcher::CandidateSkills;
use crate::analysis::types::SkillGap;
use crate::capabilities::models::GAP_FEATURES;
use crate::capabilities::GapScorer;
use crate::catalog::dependencies::DependencyGraph;
use crate::catalog::taxonomy::SkillNormalizer;
use crate::catalog::{SkillId, Tier};
use log::{debug, warn};
use std::collections::HashMap;

/// Which policy produced a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingPolicy {
    Learned,
    Dependency,
}

/// What the gap features need to know about the candidate.
pub struct CandidateProfile<'a> {
    pub skills: &'a CandidateSkills,
    pub experience_years: f64,
}

pub struct GapPrioritizer<'a> {
    graph: &'a DependencyGraph,
    normalizer: &'a SkillNormalizer,
    scorer: Option<&'a dyn GapScorer>,
}

impl<'a> GapPrioritizer<'a> {
    pub fn new(graph: &'a DependencyGraph, normalizer: &'a SkillNormalizer, scorer: Option<&'a dyn GapScorer>) -> Self {
        Self {
            graph,
            normalizer,
            scorer,
        }
    }

    /// Rank missing skills. Uses the gap scorer when one is loaded and accepts
    /// every feature vector; otherwise falls back to prerequisite order.
    pub fn rank(&self, missing: &[(SkillId, Tier)], profile: &CandidateProfile<'_>) -> (Vec<SkillGap>, RankingPolicy) {
        if let Some(scorer) = self.scorer {
            match self.score_all(scorer, missing, profile) {
                Some(scores) => return (Self::rank_by_score(missing, &scores), RankingPolicy::Learned),
                None => warn!("Gap scorer rejected a feature vector, using prerequisite order"),
            }
        }
        (self.rank_by_dependencies(missing), RankingPolicy::Dependency)
    }

    /// `[difficulty, market_demand, learning_hours, prerequisite_count, is_core,
    /// is_secondary, experience_years, skill_count, has_all_prerequisites]`
    pub fn features(&self, skill: &SkillId, tier: Tier, profile: &CandidateProfile<'_>) -> [f64; GAP_FEATURES] {
        let meta = self.normalizer.metadata(skill.as_str());
        let prerequisites = self.graph.prerequisites(skill.as_str());
        let has_all = prerequisites.iter().all(|p| profile.skills.contains(p.as_str()));

        [
            meta.difficulty,
            meta.market_demand,
            meta.learning_hours,
            prerequisites.len() as f64,
            flag(tier == Tier::Core),
            flag(tier == Tier::Secondary),
            profile.experience_years,
            profile.skills.len() as f64,
            flag(has_all),
        ]
    }

    fn score_all(&self, scorer: &dyn GapScorer, missing: &[(SkillId, Tier)], profile: &CandidateProfile<'_>) -> Option<Vec<f64>> {
        missing
            .iter()
            .map(|(skill, tier)| {
                let score = scorer.score(&self.features(skill, *tier, profile))?;
                score.is_finite().then_some(score)
            })
            .collect()
    }

    fn rank_by_score(missing: &[(SkillId, Tier)], scores: &[f64]) -> Vec<SkillGap> {
        let mut indexed: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));

        indexed
            .into_iter()
            .enumerate()
            .map(|(position, (idx, score))| {
                let (skill, tier) = &missing[idx];
                gap(skill.clone(), *tier, position + 1, Some(score))
            })
            .collect()
    }

    fn rank_by_dependencies(&self, missing: &[(SkillId, Tier)]) -> Vec<SkillGap> {
        let tiers: HashMap<&SkillId, Tier> = missing.iter().map(|(skill, tier)| (skill, *tier)).collect();
        let skills: Vec<SkillId> = missing.iter().map(|(skill, _)| skill.clone()).collect();
        let order = self.graph.topological_order(&skills);
        debug!("Prerequisite order for {} missing skills: {:?}", order.len(), order);

        order
            .into_iter()
            .enumerate()
            .map(|(position, skill)| {
                let tier = tiers.get(&skill).copied().unwrap_or(Tier::Core);
                gap(skill, tier, position + 1, None)
            })
            .collect()
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn gap(skill: SkillId, tier: Tier, rank: usize, ml_score: Option<f64>) -> SkillGap {
    SkillGap {
        skill,
        tier,
        weight: tier.weight(),
        rank,
        ml_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::models::LinearGapScorer;

    fn id(name: &str) -> SkillId {
        SkillId::canonical(name)
    }

    fn fixture() -> (DependencyGraph, SkillNormalizer) {
        let normalizer = SkillNormalizer::new();
        (DependencyGraph::builtin(&normalizer), normalizer)
    }

    fn missing() -> Vec<(SkillId, Tier)> {
        vec![
            (id("react"), Tier::Core),
            (id("html"), Tier::Core),
            (id("css"), Tier::Secondary),
        ]
    }

    fn assert_dense(gaps: &[SkillGap]) {
        let mut ranks: Vec<usize> = gaps.iter().map(|g| g.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=gaps.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_fallback_follows_prerequisites() {
        let (graph, normalizer) = fixture();
        let candidates = CandidateSkills::default();
        let profile = CandidateProfile {
            skills: &candidates,
            experience_years: 0.0,
        };

        let (gaps, policy) = GapPrioritizer::new(&graph, &normalizer, None).rank(&missing(), &profile);

        assert_eq!(policy, RankingPolicy::Dependency);
        let order: Vec<&str> = gaps.iter().map(|g| g.skill.as_str()).collect();
        assert_eq!(order, vec!["css", "html", "react"]);
        assert_dense(&gaps);
        assert!(gaps.iter().all(|g| g.ml_score.is_none()));
        assert_eq!(gaps[0].tier, Tier::Secondary);
        assert_eq!(gaps[0].weight, 0.6);
    }

    #[test]
    fn test_learned_policy_sorts_by_score() {
        let (graph, normalizer) = fixture();
        let candidates = CandidateSkills::default();
        let profile = CandidateProfile {
            skills: &candidates,
            experience_years: 1.0,
        };
        // score = prerequisite_count
        let mut weights = [0.0; GAP_FEATURES];
        weights[3] = 1.0;
        let scorer = LinearGapScorer::new(weights, 0.0);

        let (gaps, policy) = GapPrioritizer::new(&graph, &normalizer, Some(&scorer)).rank(&missing(), &profile);

        assert_eq!(policy, RankingPolicy::Learned);
        assert_eq!(gaps[0].skill, "react");
        assert_eq!(gaps[0].ml_score, Some(3.0));
        // html and css tie on zero prerequisites; input order is kept
        assert_eq!(gaps[1].skill, "html");
        assert_eq!(gaps[2].skill, "css");
        assert_dense(&gaps);
    }

    #[test]
    fn test_rejected_vector_falls_back_for_whole_list() {
        struct Picky;
        impl GapScorer for Picky {
            fn score(&self, features: &[f64]) -> Option<f64> {
                // rejects skills with prerequisites
                (features[3] == 0.0).then_some(1.0)
            }
        }

        let (graph, normalizer) = fixture();
        let candidates = CandidateSkills::default();
        let profile = CandidateProfile {
            skills: &candidates,
            experience_years: 0.0,
        };

        let (gaps, policy) = GapPrioritizer::new(&graph, &normalizer, Some(&Picky)).rank(&missing(), &profile);

        assert_eq!(policy, RankingPolicy::Dependency);
        assert!(gaps.iter().all(|g| g.ml_score.is_none()));
        assert_eq!(gaps[2].skill, "react");
    }

    #[test]
    fn test_feature_vector() {
        let (graph, normalizer) = fixture();
        let candidates = CandidateSkills::new(vec![id("html"), id("css"), id("git")]);
        let profile = CandidateProfile {
            skills: &candidates,
            experience_years: 2.5,
        };
        let prioritizer = GapPrioritizer::new(&graph, &normalizer, None);

        let features = prioritizer.features(&id("react"), Tier::Core, &profile);
        let meta = normalizer.metadata("react");
        assert_eq!(features[0], meta.difficulty);
        assert_eq!(features[2], meta.learning_hours);
        assert_eq!(features[3], graph.prerequisites("react").len() as f64);
        assert_eq!(&features[4..], &[1.0, 0.0, 2.5, 3.0, 0.0]);

        let unknown = prioritizer.features(&id("cobol"), Tier::Bonus, &profile);
        assert_eq!(&unknown[..6], &[3.0, 3.0, 20.0, 0.0, 0.0, 0.0]);
        assert_eq!(unknown[8], 1.0);
    }

    #[test]
    fn test_empty_missing_set() {
        let (graph, normalizer) = fixture();
        let candidates = CandidateSkills::default();
        let profile = CandidateProfile {
            skills: &candidates,
            experience_years: 0.0,
        };
        let (gaps, _) = GapPrioritizer::new(&graph, &normalizer, None).rank(&[], &profile);
        assert!(gaps.is_empty());
    }
}
