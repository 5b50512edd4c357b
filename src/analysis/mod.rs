//! Skill-gap analysis engine

pub mod matcher;
pub mod pipeline;
pub mod prioritizer;
pub mod readiness;
pub mod recommendations;
pub mod roadmap;
pub mod types;

pub use pipeline::{AnalysisEngine, AnalysisOptions};
pub use types::{
    AnalysisRequest, AnalysisResult, ReadinessExplanation, ReadinessLabel, RecommendationSource, RoadmapWeek,
    RoleTarget, SkillAnalysis, SkillGap, SkillRecommendation,
};
