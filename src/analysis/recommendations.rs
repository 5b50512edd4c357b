//! Learning resources for each missing skill

use crate::analysis::types::{RecommendationSource, SkillRecommendation};
use crate::capabilities::ResourceRecommender;
use crate::catalog::resources::{generic_search_resource, CuratedResources, LearningResource};
use crate::catalog::SkillId;
use std::collections::HashSet;

pub struct RecommendationComposer<'a> {
    recommender: Option<&'a dyn ResourceRecommender>,
    curated: &'a CuratedResources,
    max_per_skill: usize,
}

impl<'a> RecommendationComposer<'a> {
    pub fn new(
        recommender: Option<&'a dyn ResourceRecommender>,
        curated: &'a CuratedResources,
        max_per_skill: usize,
    ) -> Self {
        Self {
            recommender,
            curated,
            max_per_skill: max_per_skill.max(1),
        }
    }

    /// One entry per skill, in the given order.
    pub fn compose(&self, ordered: &[SkillId]) -> Vec<SkillRecommendation> {
        ordered.iter().map(|skill| self.for_skill(skill)).collect()
    }

    pub fn for_skill(&self, skill: &SkillId) -> SkillRecommendation {
        let learned = self
            .recommender
            .map(|r| self.dedupe(r.recommend(skill.as_str())))
            .unwrap_or_default();

        let (resources, source) = if !learned.is_empty() {
            (learned, RecommendationSource::Learned)
        } else if let Some(curated) = self.curated.get(skill.as_str()).filter(|c| !c.is_empty()) {
            (self.dedupe(curated.to_vec()), RecommendationSource::Curated)
        } else {
            (vec![generic_search_resource(skill.as_str())], RecommendationSource::Generated)
        };

        SkillRecommendation {
            skill: skill.clone(),
            resources,
            source,
        }
    }

    fn dedupe(&self, resources: Vec<LearningResource>) -> Vec<LearningResource> {
        let mut seen = HashSet::new();
        resources
            .into_iter()
            .filter(|r| seen.insert(r.title.clone()))
            .take(self.max_per_skill)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::resources::ResourceType;

    fn resource(title: &str) -> LearningResource {
        LearningResource {
            title: title.to_string(),
            resource_type: ResourceType::Course,
            provider: None,
            url: format!("https://example.com/{}", title),
            difficulty: "beginner".to_string(),
            duration_hours: 4.0,
            relevance: Some(0.5),
        }
    }

    struct Fixed(Vec<LearningResource>);

    impl ResourceRecommender for Fixed {
        fn recommend(&self, skill: &str) -> Vec<LearningResource> {
            if skill == "docker" {
                self.0.clone()
            } else {
                Vec::new()
            }
        }
    }

    #[test]
    fn test_source_order() {
        let curated = CuratedResources::builtin();
        let recommender = Fixed(vec![resource("Docker Deep Dive")]);
        let composer = RecommendationComposer::new(Some(&recommender), &curated, 2);

        let recs = composer.compose(&[
            SkillId::canonical("docker"),
            SkillId::canonical("python"),
            SkillId::canonical("cobol"),
        ]);

        assert_eq!(recs[0].source, RecommendationSource::Learned);
        assert_eq!(recs[1].source, RecommendationSource::Curated);
        assert_eq!(recs[1].resources.len(), 2);
        assert_eq!(recs[2].source, RecommendationSource::Generated);
        assert_eq!(recs[2].resources[0].title, "Learn cobol");
    }

    #[test]
    fn test_dedupe_by_title_then_cap() {
        let curated = CuratedResources::builtin();
        let recommender = Fixed(vec![resource("A"), resource("A"), resource("B"), resource("C")]);
        let composer = RecommendationComposer::new(Some(&recommender), &curated, 2);

        let rec = composer.for_skill(&SkillId::canonical("docker"));
        let titles: Vec<&str> = rec.resources.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_no_recommender_uses_curated() {
        let curated = CuratedResources::builtin();
        let composer = RecommendationComposer::new(None, &curated, 1);

        let rec = composer.for_skill(&SkillId::canonical("python"));
        assert_eq!(rec.source, RecommendationSource::Curated);
        assert_eq!(rec.resources.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let curated = CuratedResources::builtin();
        assert!(RecommendationComposer::new(None, &curated, 2).compose(&[]).is_empty());
    }
}
