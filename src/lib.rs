//! Skill-gap analysis library
//!
//! Matches a candidate's skills against tiered role requirements, ranks the
//! gaps by learning priority, estimates readiness and plans a roadmap. Learned
//! components are optional capabilities held in a [`Registry`]; when one is
//! absent the engine uses a deterministic rule-based fallback.

pub mod analysis;
pub mod capabilities;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod registry;

pub use analysis::{AnalysisEngine, AnalysisOptions, AnalysisRequest, AnalysisResult};
pub use catalog::{SkillId, Tier};
pub use config::Config;
pub use error::{Result, SkillGapError};
pub use registry::Registry;
