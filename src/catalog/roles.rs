//! Job role definitions with level-specific, tiered skill requirements

use crate::catalog::taxonomy::SkillNormalizer;
use crate::catalog::{SkillId, Tier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Intern,
    Junior,
    Mid,
    Senior,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Intern, Level::Junior, Level::Mid, Level::Senior];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Intern => "intern",
            Level::Junior => "junior",
            Level::Mid => "mid",
            Level::Senior => "senior",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "intern" => Ok(Level::Intern),
            "junior" => Ok(Level::Junior),
            "mid" => Ok(Level::Mid),
            "senior" => Ok(Level::Senior),
            other => Err(format!(
                "Invalid level: {}. Supported: intern, junior, mid, senior",
                other
            )),
        }
    }
}

/// Tiered requirements for one (role, level) pair. Read-only after load.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleLevelRequirement {
    pub role_id: String,
    pub title: String,
    pub domain: String,
    pub level: Level,
    pub experience_range: (u32, u32),
    pub readiness_threshold: f64,
    pub core: Vec<SkillId>,
    pub secondary: Vec<SkillId>,
    pub bonus: Vec<SkillId>,
}

impl RoleLevelRequirement {
    pub fn skills(&self, tier: Tier) -> &[SkillId] {
        match tier {
            Tier::Core => &self.core,
            Tier::Secondary => &self.secondary,
            Tier::Bonus => &self.bonus,
        }
    }

    pub fn all_skills(&self) -> Vec<SkillId> {
        self.core
            .iter()
            .chain(&self.secondary)
            .chain(&self.bonus)
            .cloned()
            .collect()
    }

    /// Highest tier a skill appears in, if the role asks for it at all.
    pub fn tier_of(&self, skill: &str) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|tier| self.skills(*tier).iter().any(|s| s.as_str() == skill))
    }

    pub fn weighted_skills(&self) -> Vec<(SkillId, Tier, f64)> {
        Tier::ALL
            .into_iter()
            .flat_map(|tier| {
                self.skills(tier)
                    .iter()
                    .map(move |skill| (skill.clone(), tier, tier.weight()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub role_id: String,
    pub title: String,
    pub domain: String,
}

#[derive(Debug, Clone)]
struct RoleDefinition {
    title: String,
    domain: String,
    levels: HashMap<Level, RoleLevelRequirement>,
}

struct LevelRow {
    level: Level,
    experience: (u32, u32),
    threshold: f64,
    core: &'static [&'static str],
    secondary: &'static [&'static str],
    bonus: &'static [&'static str],
}

struct RoleRow {
    id: &'static str,
    title: &'static str,
    domain: &'static str,
    levels: [LevelRow; 4],
}

const ROLE_TABLE: &[RoleRow] = &[
    RoleRow {
        id: "frontend_developer",
        title: "Frontend Developer",
        domain: "Web Development",
        levels: [
            LevelRow {
                level: Level::Intern,
                experience: (0, 1),
                threshold: 0.6,
                core: &["html", "css", "javascript"],
                secondary: &["react", "git"],
                bonus: &["typescript", "tailwind"],
            },
            LevelRow {
                level: Level::Junior,
                experience: (0, 2),
                threshold: 0.65,
                core: &["html", "css", "javascript", "react"],
                secondary: &["typescript", "git", "rest api"],
                bonus: &["next.js", "tailwind", "testing"],
            },
            LevelRow {
                level: Level::Mid,
                experience: (2, 5),
                threshold: 0.7,
                core: &["html", "css", "javascript", "react", "typescript"],
                secondary: &["next.js", "rest api", "git", "testing"],
                bonus: &["graphql", "webpack", "ci/cd"],
            },
            LevelRow {
                level: Level::Senior,
                experience: (5, 10),
                threshold: 0.75,
                core: &["javascript", "typescript", "react", "next.js"],
                secondary: &["graphql", "testing", "ci/cd", "docker"],
                bonus: &["aws", "kubernetes", "leadership"],
            },
        ],
    },
    RoleRow {
        id: "backend_developer",
        title: "Backend Developer",
        domain: "Web Development",
        levels: [
            LevelRow {
                level: Level::Intern,
                experience: (0, 1),
                threshold: 0.6,
                core: &["python", "sql"],
                secondary: &["git", "rest api"],
                bonus: &["docker", "linux"],
            },
            LevelRow {
                level: Level::Junior,
                experience: (0, 2),
                threshold: 0.65,
                core: &["python", "sql", "rest api"],
                secondary: &["git", "docker", "postgresql"],
                bonus: &["redis", "testing", "linux"],
            },
            LevelRow {
                level: Level::Mid,
                experience: (2, 5),
                threshold: 0.7,
                core: &["python", "sql", "rest api", "docker"],
                secondary: &["postgresql", "redis", "testing", "ci/cd"],
                bonus: &["kubernetes", "aws", "graphql"],
            },
            LevelRow {
                level: Level::Senior,
                experience: (5, 10),
                threshold: 0.75,
                core: &["python", "sql", "docker", "kubernetes"],
                secondary: &["aws", "ci/cd", "graphql", "redis"],
                bonus: &["terraform", "leadership", "elasticsearch"],
            },
        ],
    },
    RoleRow {
        id: "data_scientist",
        title: "Data Scientist",
        domain: "Data Science",
        levels: [
            LevelRow {
                level: Level::Intern,
                experience: (0, 1),
                threshold: 0.6,
                core: &["python", "pandas", "numpy"],
                secondary: &["sql", "data visualization"],
                bonus: &["scikit-learn", "git"],
            },
            LevelRow {
                level: Level::Junior,
                experience: (0, 2),
                threshold: 0.65,
                core: &["python", "pandas", "numpy", "scikit-learn"],
                secondary: &["sql", "data visualization", "machine learning"],
                bonus: &["tensorflow", "git", "docker"],
            },
            LevelRow {
                level: Level::Mid,
                experience: (2, 5),
                threshold: 0.7,
                core: &["python", "pandas", "scikit-learn", "machine learning"],
                secondary: &["tensorflow", "sql", "docker", "deep learning"],
                bonus: &["pytorch", "aws", "nlp"],
            },
            LevelRow {
                level: Level::Senior,
                experience: (5, 10),
                threshold: 0.75,
                core: &["python", "machine learning", "deep learning", "tensorflow"],
                secondary: &["pytorch", "aws", "docker", "kubernetes"],
                bonus: &["nlp", "computer vision", "leadership"],
            },
        ],
    },
    RoleRow {
        id: "fullstack_developer",
        title: "Full Stack Developer",
        domain: "Web Development",
        levels: [
            LevelRow {
                level: Level::Intern,
                experience: (0, 1),
                threshold: 0.6,
                core: &["html", "css", "javascript"],
                secondary: &["python", "sql", "git"],
                bonus: &["react", "node.js"],
            },
            LevelRow {
                level: Level::Junior,
                experience: (0, 2),
                threshold: 0.65,
                core: &["javascript", "react", "node.js", "sql"],
                secondary: &["typescript", "rest api", "git", "docker"],
                bonus: &["mongodb", "postgresql", "testing"],
            },
            LevelRow {
                level: Level::Mid,
                experience: (2, 5),
                threshold: 0.7,
                core: &["javascript", "typescript", "react", "node.js", "sql"],
                secondary: &["docker", "rest api", "postgresql", "testing"],
                bonus: &["aws", "ci/cd", "graphql"],
            },
            LevelRow {
                level: Level::Senior,
                experience: (5, 10),
                threshold: 0.75,
                core: &["typescript", "react", "node.js", "docker"],
                secondary: &["aws", "kubernetes", "ci/cd", "graphql"],
                bonus: &["terraform", "leadership", "elasticsearch"],
            },
        ],
    },
    RoleRow {
        id: "devops_engineer",
        title: "DevOps Engineer",
        domain: "Infrastructure",
        levels: [
            LevelRow {
                level: Level::Intern,
                experience: (0, 1),
                threshold: 0.6,
                core: &["linux", "git"],
                secondary: &["python", "docker"],
                bonus: &["aws", "ci/cd"],
            },
            LevelRow {
                level: Level::Junior,
                experience: (0, 2),
                threshold: 0.65,
                core: &["linux", "docker", "git", "ci/cd"],
                secondary: &["python", "aws", "kubernetes"],
                bonus: &["terraform", "jenkins"],
            },
            LevelRow {
                level: Level::Mid,
                experience: (2, 5),
                threshold: 0.7,
                core: &["docker", "kubernetes", "aws", "ci/cd"],
                secondary: &["terraform", "linux", "python"],
                bonus: &["azure", "gcp", "elasticsearch"],
            },
            LevelRow {
                level: Level::Senior,
                experience: (5, 10),
                threshold: 0.75,
                core: &["kubernetes", "aws", "terraform", "ci/cd"],
                secondary: &["docker", "python", "azure"],
                bonus: &["gcp", "leadership", "elasticsearch"],
            },
        ],
    },
];

/// Resolves (role, level) pairs to tiered requirements.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: HashMap<String, RoleDefinition>,
    order: Vec<String>,
}

impl RoleCatalog {
    /// Build the catalogue of built-in roles, normalizing every listed skill.
    pub fn builtin(normalizer: &SkillNormalizer) -> Self {
        Self::from_requirements(ROLE_TABLE.iter().flat_map(|row| {
            row.levels.iter().map(move |level| RoleLevelRequirement {
                role_id: row.id.to_string(),
                title: row.title.to_string(),
                domain: row.domain.to_string(),
                level: level.level,
                experience_range: level.experience,
                readiness_threshold: level.threshold,
                core: normalizer.normalize_all(level.core),
                secondary: normalizer.normalize_all(level.secondary),
                bonus: normalizer.normalize_all(level.bonus),
            })
        }))
    }

    /// Group per-level requirements by role. Roles keep first-seen order and
    /// take their title and domain from their first entry; a role may define
    /// any subset of levels, and a repeated (role, level) pair replaces the
    /// earlier one.
    pub fn from_requirements<I>(requirements: I) -> Self
    where
        I: IntoIterator<Item = RoleLevelRequirement>,
    {
        let mut roles: HashMap<String, RoleDefinition> = HashMap::new();
        let mut order = Vec::new();

        for requirement in requirements {
            let role = roles.entry(requirement.role_id.clone()).or_insert_with(|| {
                order.push(requirement.role_id.clone());
                RoleDefinition {
                    title: requirement.title.clone(),
                    domain: requirement.domain.clone(),
                    levels: HashMap::new(),
                }
            });
            role.levels.insert(requirement.level, requirement);
        }

        Self { roles, order }
    }

    /// Levels the role defines, in seniority order; empty for unknown roles.
    pub fn levels_of(&self, role_id: &str) -> Vec<Level> {
        self.roles
            .get(role_id)
            .map(|role| Level::ALL.into_iter().filter(|l| role.levels.contains_key(l)).collect())
            .unwrap_or_default()
    }

    /// `None` when the role is unknown or does not define the level.
    pub fn resolve(&self, role_id: &str, level: Level) -> Option<&RoleLevelRequirement> {
        self.roles.get(role_id)?.levels.get(&level)
    }

    pub fn list_roles(&self) -> Vec<RoleSummary> {
        self.order
            .iter()
            .filter_map(|id| {
                self.roles.get(id).map(|role| RoleSummary {
                    role_id: id.clone(),
                    title: role.title.clone(),
                    domain: role.domain.clone(),
                })
            })
            .collect()
    }

    pub fn levels(&self) -> [Level; 4] {
        Level::ALL
    }

    pub fn contains(&self, role_id: &str) -> bool {
        self.roles.contains_key(role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> RoleCatalog {
        RoleCatalog::builtin(&SkillNormalizer::new())
    }

    #[test]
    fn test_resolve_known_role_level() {
        let catalog = catalog();
        let req = catalog.resolve("frontend_developer", Level::Intern).unwrap();

        assert_eq!(req.title, "Frontend Developer");
        assert_eq!(req.core, vec!["html", "css", "javascript"]);
        assert_eq!(req.secondary.len(), 2);
        assert_eq!(req.readiness_threshold, 0.6);
    }

    #[test]
    fn test_resolve_unknown_role_is_none() {
        assert!(catalog().resolve("astronaut", Level::Senior).is_none());
    }

    #[test]
    fn test_tier_lookup() {
        let catalog = catalog();
        let req = catalog.resolve("backend_developer", Level::Junior).unwrap();

        assert_eq!(req.tier_of("python"), Some(Tier::Core));
        assert_eq!(req.tier_of("docker"), Some(Tier::Secondary));
        assert_eq!(req.tier_of("redis"), Some(Tier::Bonus));
        assert_eq!(req.tier_of("cobol"), None);
        assert_eq!(req.weighted_skills().len(), req.all_skills().len());
    }

    #[test]
    fn test_undefined_level_of_known_role_is_none() {
        let catalog = RoleCatalog::from_requirements([RoleLevelRequirement {
            role_id: "qa_engineer".to_string(),
            title: "QA Engineer".to_string(),
            domain: "quality".to_string(),
            level: Level::Junior,
            experience_range: (0, 2),
            readiness_threshold: 0.7,
            core: vec![SkillId::canonical("testing")],
            secondary: Vec::new(),
            bonus: Vec::new(),
        }]);

        assert!(catalog.contains("qa_engineer"));
        assert!(catalog.resolve("qa_engineer", Level::Junior).is_some());
        assert!(catalog.resolve("qa_engineer", Level::Senior).is_none());
        assert_eq!(catalog.levels_of("qa_engineer"), vec![Level::Junior]);
        assert_eq!(catalog.list_roles()[0].title, "QA Engineer");
    }

    #[test]
    fn test_builtin_roles_define_every_level() {
        let catalog = catalog();
        for role in catalog.list_roles() {
            assert_eq!(catalog.levels_of(&role.role_id), Level::ALL.to_vec());
        }
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("Senior".parse::<Level>(), Ok(Level::Senior));
        assert!("principal".parse::<Level>().is_err());
    }

    #[test]
    fn test_list_roles_keeps_definition_order() {
        let roles = catalog().list_roles();
        assert_eq!(roles.len(), 5);
        assert_eq!(roles[0].role_id, "frontend_developer");
        assert_eq!(roles[4].role_id, "devops_engineer");
    }
}
