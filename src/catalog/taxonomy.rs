//! Skill taxonomy, alias normalization and per-skill learning metadata

use crate::catalog::SkillId;
use std::collections::{HashMap, HashSet};

/// Every skill the built-in extractor and lexical matcher know about.
pub const SKILL_TAXONOMY: &[&str] = &[
    // Programming languages
    "python", "javascript", "typescript", "java", "c++", "c#", "go", "rust", "ruby", "php",
    "swift", "kotlin",
    // Frontend
    "html", "css", "react", "angular", "vue", "next.js", "tailwind", "sass", "webpack", "vite",
    // Backend
    "node.js", "express", "fastapi", "django", "flask", "spring boot", "asp.net", "graphql",
    "rest api",
    // Databases
    "sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "firebase",
    // Cloud & DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "ci/cd", "terraform", "jenkins",
    "github actions",
    // Data & ML
    "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "machine learning",
    "deep learning", "data analysis", "data visualization", "nlp", "computer vision",
    // Tools & practices
    "git", "linux", "agile", "scrum", "jira", "testing", "unit testing", "tdd",
    // Soft skills
    "communication", "problem solving", "teamwork", "leadership",
];

const SKILL_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("node", "node.js"),
    ("nextjs", "next.js"),
    ("tailwindcss", "tailwind"),
    ("postgres", "postgresql"),
    ("mongo", "mongodb"),
    ("k8s", "kubernetes"),
    ("ml", "machine learning"),
    ("dl", "deep learning"),
    ("sklearn", "scikit-learn"),
    ("tf", "tensorflow"),
    ("cv", "computer vision"),
    ("reactjs", "react"),
    ("vuejs", "vue"),
    ("angularjs", "angular"),
];

pub const DEFAULT_LEARNING_HOURS: f64 = 20.0;

/// (difficulty 1-5, market demand 1-5, learning hours)
const SKILL_METADATA: &[(&str, u8, u8, f64)] = &[
    ("python", 2, 5, 40.0),
    ("javascript", 2, 5, 40.0),
    ("typescript", 3, 4, 25.0),
    ("java", 3, 4, 50.0),
    ("sql", 2, 5, 20.0),
    ("html", 1, 3, 10.0),
    ("css", 2, 3, 20.0),
    ("react", 3, 5, 40.0),
    ("node.js", 3, 4, 30.0),
    ("docker", 3, 5, 20.0),
    ("kubernetes", 4, 5, 30.0),
    ("aws", 3, 5, 40.0),
    ("git", 1, 4, 10.0),
    ("linux", 2, 4, 25.0),
    ("pandas", 2, 4, 20.0),
    ("numpy", 2, 3, 15.0),
    ("scikit-learn", 3, 4, 25.0),
    ("tensorflow", 4, 4, 40.0),
    ("pytorch", 4, 4, 40.0),
    ("machine learning", 4, 5, 60.0),
    ("deep learning", 5, 4, 50.0),
    ("rest api", 2, 4, 15.0),
    ("graphql", 3, 3, 20.0),
    ("postgresql", 2, 4, 20.0),
    ("mongodb", 2, 3, 20.0),
    ("redis", 3, 3, 10.0),
    ("ci/cd", 3, 4, 15.0),
    ("testing", 2, 4, 20.0),
    ("next.js", 3, 4, 25.0),
    ("vue", 3, 3, 30.0),
    ("angular", 3, 3, 35.0),
    ("tailwind", 2, 3, 10.0),
    ("terraform", 4, 4, 25.0),
    ("agile", 1, 3, 10.0),
];

/// Learning metadata used by the gap ranker and the roadmap builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillMetadata {
    pub difficulty: f64,
    pub market_demand: f64,
    pub learning_hours: f64,
}

impl Default for SkillMetadata {
    fn default() -> Self {
        Self {
            difficulty: 3.0,
            market_demand: 3.0,
            learning_hours: DEFAULT_LEARNING_HOURS,
        }
    }
}

/// Canonicalizes raw skill strings and answers taxonomy questions.
#[derive(Debug, Clone)]
pub struct SkillNormalizer {
    aliases: HashMap<String, String>,
    taxonomy: HashSet<String>,
    metadata: HashMap<String, SkillMetadata>,
}

impl Default for SkillNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillNormalizer {
    pub fn new() -> Self {
        let aliases = SKILL_ALIASES
            .iter()
            .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
            .collect();

        let taxonomy = SKILL_TAXONOMY.iter().map(|s| s.to_string()).collect();

        let metadata = SKILL_METADATA
            .iter()
            .map(|(skill, difficulty, demand, hours)| {
                (
                    skill.to_string(),
                    SkillMetadata {
                        difficulty: f64::from(*difficulty),
                        market_demand: f64::from(*demand),
                        learning_hours: *hours,
                    },
                )
            })
            .collect();

        Self {
            aliases,
            taxonomy,
            metadata,
        }
    }

    /// Lowercase, trim and resolve aliases. Unknown tokens pass through.
    pub fn normalize(&self, raw: &str) -> SkillId {
        let lowered = raw.trim().to_lowercase();
        match self.aliases.get(&lowered) {
            Some(canonical) => SkillId::canonical(canonical.clone()),
            None => SkillId::canonical(lowered),
        }
    }

    /// Normalize a list, dropping blanks and duplicates while keeping first-seen order.
    pub fn normalize_all<S: AsRef<str>>(&self, raws: &[S]) -> Vec<SkillId> {
        let mut seen = HashSet::new();
        raws.iter()
            .map(|raw| self.normalize(raw.as_ref()))
            .filter(|skill| !skill.as_str().is_empty())
            .filter(|skill| seen.insert(skill.clone()))
            .collect()
    }

    pub fn is_known(&self, skill: &str) -> bool {
        self.taxonomy.contains(skill)
    }

    pub fn taxonomy(&self) -> impl Iterator<Item = &str> {
        self.taxonomy.iter().map(String::as_str)
    }

    /// Canonical skill an alias token stands for, if it is one.
    pub fn alias_target(&self, token: &str) -> Option<&str> {
        self.aliases.get(token).map(String::as_str)
    }

    pub fn metadata(&self, skill: &str) -> SkillMetadata {
        self.metadata.get(skill).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        let normalizer = SkillNormalizer::new();
        assert_eq!(normalizer.normalize("  Python "), "python");
        assert_eq!(normalizer.normalize("Spring Boot"), "spring boot");
    }

    #[test]
    fn test_normalize_resolves_aliases() {
        let normalizer = SkillNormalizer::new();
        assert_eq!(normalizer.normalize("JS"), "javascript");
        assert_eq!(normalizer.normalize("k8s"), "kubernetes");
        assert_eq!(normalizer.normalize(" Postgres"), "postgresql");
    }

    #[test]
    fn test_unknown_skill_passes_through() {
        let normalizer = SkillNormalizer::new();
        assert_eq!(normalizer.normalize("Haskell"), "haskell");
        assert!(!normalizer.is_known("haskell"));
    }

    #[test]
    fn test_normalize_all_dedupes_in_order() {
        let normalizer = SkillNormalizer::new();
        let skills = normalizer.normalize_all(&["React", "reactjs", "", "css", "CSS"]);
        let names: Vec<&str> = skills.iter().map(SkillId::as_str).collect();
        assert_eq!(names, vec!["react", "css"]);
    }

    #[test]
    fn test_metadata_defaults() {
        let normalizer = SkillNormalizer::new();
        assert_eq!(normalizer.metadata("html").learning_hours, 10.0);
        assert_eq!(normalizer.metadata("cobol"), SkillMetadata::default());
    }
}
