//! Coverage matching between candidate skills and tiered requirements

use crate::capabilities::SkillSimilarity;
use crate::catalog::roles::RoleLevelRequirement;
use crate::catalog::{SkillId, Tier};
use std::collections::HashSet;

/// Fixed similarity above which a non-identical candidate skill covers a requirement.
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Normalized candidate skills: a set for membership, a list for stable iteration.
#[derive(Debug, Clone, Default)]
pub struct CandidateSkills {
    ordered: Vec<SkillId>,
    set: HashSet<SkillId>,
}

impl CandidateSkills {
    pub fn new(skills: Vec<SkillId>) -> Self {
        let mut set = HashSet::with_capacity(skills.len());
        let ordered = skills.into_iter().filter(|s| set.insert(s.clone())).collect();
        Self { ordered, set }
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.set.contains(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillId> {
        self.ordered.iter()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Required skills split by tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Requirements {
    pub core: Vec<SkillId>,
    pub secondary: Vec<SkillId>,
    pub bonus: Vec<SkillId>,
}

impl Requirements {
    pub fn from_role(role: &RoleLevelRequirement) -> Self {
        Self {
            core: role.core.clone(),
            secondary: role.secondary.clone(),
            bonus: role.bonus.clone(),
        }
    }

    /// Role-less mode: every explicit target skill counts as core.
    pub fn legacy(targets: Vec<SkillId>) -> Self {
        Self {
            core: targets,
            ..Self::default()
        }
    }

    pub fn tier(&self, tier: Tier) -> &[SkillId] {
        match tier {
            Tier::Core => &self.core,
            Tier::Secondary => &self.secondary,
            Tier::Bonus => &self.bonus,
        }
    }

    pub fn len(&self) -> usize {
        self.core.len() + self.secondary.len() + self.bonus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierMatch {
    pub matched: Vec<SkillId>,
    pub missing: Vec<SkillId>,
}

impl TierMatch {
    /// Share of the tier that is covered; an empty tier counts as fully covered.
    pub fn coverage(&self) -> f64 {
        let total = self.matched.len() + self.missing.len();
        if total == 0 {
            1.0
        } else {
            self.matched.len() as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    pub core: TierMatch,
    pub secondary: TierMatch,
    pub bonus: TierMatch,
}

impl MatchOutcome {
    pub fn tier(&self, tier: Tier) -> &TierMatch {
        match tier {
            Tier::Core => &self.core,
            Tier::Secondary => &self.secondary,
            Tier::Bonus => &self.bonus,
        }
    }

    /// Tier-weighted share of requirements covered; 1.0 when nothing is required.
    pub fn weighted_score(&self) -> f64 {
        let (matched, total) = Tier::ALL.iter().fold((0.0, 0.0), |(matched, total), tier| {
            let m = self.tier(*tier);
            let w = tier.weight();
            (
                matched + m.matched.len() as f64 * w,
                total + (m.matched.len() + m.missing.len()) as f64 * w,
            )
        });
        if total > 0.0 {
            (matched / total).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Unweighted share of requirements covered; 1.0 when nothing is required.
    pub fn match_percentage(&self) -> f64 {
        let matched: usize = Tier::ALL.iter().map(|t| self.tier(*t).matched.len()).sum();
        let missing: usize = Tier::ALL.iter().map(|t| self.tier(*t).missing.len()).sum();
        if matched + missing == 0 {
            1.0
        } else {
            matched as f64 / (matched + missing) as f64
        }
    }

    pub fn matched_skills(&self) -> Vec<SkillId> {
        Tier::ALL
            .iter()
            .flat_map(|t| self.tier(*t).matched.iter().cloned())
            .collect()
    }

    /// Missing skills with their tier, core first. A skill listed in more
    /// than one tier appears once, under its highest tier.
    pub fn missing_with_tier(&self) -> Vec<(SkillId, Tier)> {
        let mut seen = HashSet::new();
        Tier::ALL
            .iter()
            .flat_map(|t| self.tier(*t).missing.iter().map(move |s| (s.clone(), *t)))
            .filter(|(skill, _)| seen.insert(skill.clone()))
            .collect()
    }
}

/// Decides, requirement by requirement, whether the candidate covers it.
///
/// Each requirement is judged on its own: one candidate skill may cover
/// several requirements.
pub struct SkillMatcher<'a> {
    similarity: Option<&'a dyn SkillSimilarity>,
}

impl<'a> SkillMatcher<'a> {
    pub fn new(similarity: Option<&'a dyn SkillSimilarity>) -> Self {
        Self { similarity }
    }

    pub fn covers(&self, required: &SkillId, candidates: &CandidateSkills) -> bool {
        if candidates.contains(required.as_str()) {
            return true;
        }

        match self.similarity {
            Some(similarity) => {
                let best = candidates
                    .iter()
                    .map(|candidate| similarity.similarity(required.as_str(), candidate.as_str()))
                    .fold(0.0_f64, f64::max);
                best > SIMILARITY_THRESHOLD
            }
            None => false,
        }
    }

    pub fn match_requirements(&self, requirements: &Requirements, candidates: &CandidateSkills) -> MatchOutcome {
        let split = |skills: &[SkillId]| {
            let (matched, missing) = skills
                .iter()
                .cloned()
                .partition(|skill| self.covers(skill, candidates));
            TierMatch { matched, missing }
        };

        MatchOutcome {
            core: split(&requirements.core),
            secondary: split(&requirements.secondary),
            bonus: split(&requirements.bonus),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::similarity::LexicalSimilarity;
    use crate::catalog::taxonomy::SkillNormalizer;

    fn ids(names: &[&str]) -> Vec<SkillId> {
        names.iter().map(|n| SkillId::canonical(*n)).collect()
    }

    fn candidates(names: &[&str]) -> CandidateSkills {
        CandidateSkills::new(ids(names))
    }

    #[test]
    fn test_core_coverage_example() {
        let requirements = Requirements {
            core: ids(&["html", "css", "javascript"]),
            ..Requirements::default()
        };
        let outcome = SkillMatcher::new(None).match_requirements(&requirements, &candidates(&["html", "css"]));

        assert_eq!(outcome.core.matched, ids(&["html", "css"]));
        assert_eq!(outcome.core.missing, ids(&["javascript"]));
        assert!((outcome.core.coverage() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_requirements_are_fully_covered() {
        let outcome = SkillMatcher::new(None).match_requirements(&Requirements::default(), &candidates(&[]));

        assert_eq!(outcome.core.coverage(), 1.0);
        assert_eq!(outcome.weighted_score(), 1.0);
        assert_eq!(outcome.match_percentage(), 1.0);
    }

    #[test]
    fn test_weighted_score_uses_tier_weights() {
        let requirements = Requirements {
            core: ids(&["python"]),
            secondary: ids(&["git"]),
            bonus: ids(&["docker"]),
        };
        let outcome = SkillMatcher::new(None).match_requirements(&requirements, &candidates(&["python", "docker"]));

        // (1.0 + 0.3) / (1.0 + 0.6 + 0.3)
        assert!((outcome.weighted_score() - 1.3 / 1.9).abs() < 1e-12);
        assert!((outcome.match_percentage() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(outcome.missing_with_tier(), vec![(SkillId::canonical("git"), Tier::Secondary)]);
    }

    #[test]
    fn test_similarity_covers_near_spellings() {
        let lexical = LexicalSimilarity::new(&SkillNormalizer::new());
        let matcher = SkillMatcher::new(Some(&lexical));
        let pool = candidates(&["scikit learn", "java"]);

        assert!(matcher.covers(&SkillId::canonical("scikit-learn"), &pool));
        assert!(!matcher.covers(&SkillId::canonical("javascript"), &pool));
    }

    #[test]
    fn test_misspelled_candidate_does_not_cover() {
        let lexical = LexicalSimilarity::new(&SkillNormalizer::new());
        let matcher = SkillMatcher::new(Some(&lexical));
        let pool = candidates(&["kubernets", "dockers"]);

        assert!(!matcher.covers(&SkillId::canonical("kubernetes"), &pool));
        assert!(!matcher.covers(&SkillId::canonical("docker"), &pool));
    }

    #[test]
    fn test_one_candidate_may_cover_several_requirements() {
        struct Everything;
        impl SkillSimilarity for Everything {
            fn similarity(&self, _: &str, _: &str) -> f64 {
                0.9
            }
        }

        let requirements = Requirements {
            core: ids(&["react", "vue"]),
            ..Requirements::default()
        };
        let outcome = SkillMatcher::new(Some(&Everything)).match_requirements(&requirements, &candidates(&["angular"]));
        assert_eq!(outcome.core.matched, ids(&["react", "vue"]));
    }

    #[test]
    fn test_threshold_is_strict() {
        struct Exactly;
        impl SkillSimilarity for Exactly {
            fn similarity(&self, _: &str, _: &str) -> f64 {
                SIMILARITY_THRESHOLD
            }
        }

        let matcher = SkillMatcher::new(Some(&Exactly));
        assert!(!matcher.covers(&SkillId::canonical("react"), &candidates(&["preact"])));
    }

    #[test]
    fn test_duplicate_across_tiers_reported_once() {
        let outcome = MatchOutcome {
            core: TierMatch { matched: vec![], missing: ids(&["git"]) },
            secondary: TierMatch { matched: vec![], missing: ids(&["git", "sql"]) },
            bonus: TierMatch::default(),
        };
        let missing = outcome.missing_with_tier();
        assert_eq!(missing.len(), 2);
        assert_eq!(missing[0], (SkillId::canonical("git"), Tier::Core));
    }
}
