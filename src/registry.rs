//! Read-only bundle of static tables and loaded capabilities

use crate::capabilities::extractor::KeywordExtractor;
use crate::capabilities::models::{LinearGapScorer, LogisticReadinessModel, TableRecommender};
use crate::capabilities::similarity::{EmbeddingSimilarity, LexicalSimilarity};
use crate::capabilities::{
    Capability, GapScorer, ReadinessClassifier, ResourceRecommender, SkillExtractor, SkillSimilarity,
};
use crate::catalog::dependencies::DependencyGraph;
use crate::catalog::resources::CuratedResources;
use crate::catalog::roles::RoleCatalog;
use crate::catalog::taxonomy::SkillNormalizer;
use crate::config::{Config, ExtractorBackend, SimilarityBackend};
use crate::error::Result;
use log::{info, warn};

/// Built once at startup and shared by reference; nothing mutates it afterwards.
pub struct Registry {
    normalizer: SkillNormalizer,
    roles: RoleCatalog,
    graph: DependencyGraph,
    curated: CuratedResources,
    extractor: Capability<Box<dyn SkillExtractor>>,
    similarity: Capability<Box<dyn SkillSimilarity>>,
    readiness: Capability<Box<dyn ReadinessClassifier>>,
    gap_scorer: Capability<Box<dyn GapScorer>>,
    recommender: Capability<Box<dyn ResourceRecommender>>,
}

impl Registry {
    /// Static tables only; every capability absent.
    pub fn builtin() -> Self {
        let normalizer = SkillNormalizer::new();
        let roles = RoleCatalog::builtin(&normalizer);
        let graph = DependencyGraph::builtin(&normalizer);

        Self {
            normalizer,
            roles,
            graph,
            curated: CuratedResources::builtin(),
            extractor: Capability::Absent,
            similarity: Capability::Absent,
            readiness: Capability::Absent,
            gap_scorer: Capability::Absent,
            recommender: Capability::Absent,
        }
    }

    /// Static tables plus whatever the config enables. Missing artifact files
    /// leave the capability absent; corrupt ones are an error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::builtin();
        let artifacts = &config.artifacts;

        if config.analysis.extractor == ExtractorBackend::Keywords {
            registry.extractor = Capability::Present(Box::new(KeywordExtractor::new(&registry.normalizer)?));
        }

        registry.similarity = match config.analysis.similarity {
            SimilarityBackend::None => Capability::Absent,
            SimilarityBackend::Lexical => Capability::Present(Box::new(LexicalSimilarity::new(&registry.normalizer))),
            SimilarityBackend::Embeddings => {
                let path = config.artifact_path(&artifacts.skill_embeddings);
                match EmbeddingSimilarity::load(&path, &registry.normalizer)? {
                    Some(embeddings) => Capability::Present(Box::new(embeddings)),
                    None => {
                        warn!("Skill embeddings not found at {}, matching exact skills only", path.display());
                        Capability::Absent
                    }
                }
            }
        };

        registry.readiness = LogisticReadinessModel::load(&config.artifact_path(&artifacts.readiness_model))?
            .map(|m| Box::new(m) as Box<dyn ReadinessClassifier>)
            .into();
        registry.gap_scorer = LinearGapScorer::load(&config.artifact_path(&artifacts.gap_ranker))?
            .map(|m| Box::new(m) as Box<dyn GapScorer>)
            .into();
        registry.recommender = TableRecommender::load(&config.artifact_path(&artifacts.recommender), &registry.normalizer)?
            .map(|m| Box::new(m) as Box<dyn ResourceRecommender>)
            .into();

        registry.log_status();
        Ok(registry)
    }

    pub fn with_roles(mut self, roles: RoleCatalog) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_extractor(mut self, extractor: impl SkillExtractor + 'static) -> Self {
        self.extractor = Capability::Present(Box::new(extractor));
        self
    }

    pub fn with_similarity(mut self, similarity: impl SkillSimilarity + 'static) -> Self {
        self.similarity = Capability::Present(Box::new(similarity));
        self
    }

    pub fn with_readiness_classifier(mut self, classifier: impl ReadinessClassifier + 'static) -> Self {
        self.readiness = Capability::Present(Box::new(classifier));
        self
    }

    pub fn with_gap_scorer(mut self, scorer: impl GapScorer + 'static) -> Self {
        self.gap_scorer = Capability::Present(Box::new(scorer));
        self
    }

    pub fn with_recommender(mut self, recommender: impl ResourceRecommender + 'static) -> Self {
        self.recommender = Capability::Present(Box::new(recommender));
        self
    }

    fn log_status(&self) {
        info!(
            "Registry ready: {} roles, {} curated skills; extractor {}, similarity {}, readiness model {}, gap ranker {}, recommender {}",
            self.roles.list_roles().len(),
            self.curated.skill_count(),
            self.extractor.status(),
            self.similarity.status(),
            self.readiness.status(),
            self.gap_scorer.status(),
            self.recommender.status(),
        );
    }

    pub fn normalizer(&self) -> &SkillNormalizer {
        &self.normalizer
    }

    pub fn roles(&self) -> &RoleCatalog {
        &self.roles
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn curated(&self) -> &CuratedResources {
        &self.curated
    }

    pub fn extractor(&self) -> Option<&dyn SkillExtractor> {
        self.extractor.as_ref().map(|b| &**b)
    }

    pub fn similarity(&self) -> Option<&dyn SkillSimilarity> {
        self.similarity.as_ref().map(|b| &**b)
    }

    pub fn readiness_classifier(&self) -> Option<&dyn ReadinessClassifier> {
        self.readiness.as_ref().map(|b| &**b)
    }

    pub fn gap_scorer(&self) -> Option<&dyn GapScorer> {
        self.gap_scorer.as_ref().map(|b| &**b)
    }

    pub fn recommender(&self) -> Option<&dyn ResourceRecommender> {
        self.recommender.as_ref().map(|b| &**b)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
