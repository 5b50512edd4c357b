//! Skill prerequisite graph and dependency-aware learning order

use crate::catalog::taxonomy::SkillNormalizer;
use crate::catalog::SkillId;
use std::collections::{BTreeSet, HashMap, HashSet};

/// skill -> prerequisites that should be learned first
const SKILL_DEPENDENCIES: &[(&str, &[&str])] = &[
    // Frontend chain
    ("javascript", &["html", "css"]),
    ("typescript", &["javascript"]),
    ("react", &["javascript", "html", "css"]),
    ("angular", &["typescript", "html", "css"]),
    ("vue", &["javascript", "html", "css"]),
    ("next.js", &["react"]),
    ("tailwind", &["css"]),
    ("sass", &["css"]),
    ("webpack", &["javascript"]),
    ("vite", &["javascript"]),
    // Backend chains
    ("node.js", &["javascript"]),
    ("express", &["node.js"]),
    ("fastapi", &["python"]),
    ("django", &["python"]),
    ("flask", &["python"]),
    ("spring boot", &["java"]),
    ("asp.net", &["c#"]),
    ("graphql", &["rest api"]),
    // Databases
    ("postgresql", &["sql"]),
    ("mysql", &["sql"]),
    // Cloud / DevOps
    ("docker", &["linux"]),
    ("kubernetes", &["docker"]),
    ("terraform", &["aws"]),
    ("ci/cd", &["git"]),
    ("jenkins", &["ci/cd"]),
    ("github actions", &["git", "ci/cd"]),
    // Data science
    ("pandas", &["python"]),
    ("numpy", &["python"]),
    ("data visualization", &["pandas"]),
    ("data analysis", &["pandas", "numpy"]),
    ("scikit-learn", &["pandas", "numpy"]),
    ("machine learning", &["scikit-learn"]),
    ("deep learning", &["machine learning"]),
    ("tensorflow", &["deep learning"]),
    ("pytorch", &["deep learning"]),
    ("nlp", &["machine learning"]),
    ("computer vision", &["deep learning"]),
];

/// Static prerequisite graph. May contain cycles; nothing here assumes otherwise.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    prerequisites: HashMap<SkillId, Vec<SkillId>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

impl DependencyGraph {
    pub fn builtin(normalizer: &SkillNormalizer) -> Self {
        Self::from_edges(
            SKILL_DEPENDENCIES
                .iter()
                .map(|(skill, prereqs)| (normalizer.normalize(skill), normalizer.normalize_all(*prereqs))),
        )
    }

    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (SkillId, Vec<SkillId>)>,
    {
        let mut prerequisites: HashMap<SkillId, Vec<SkillId>> = HashMap::new();
        for (skill, prereqs) in edges {
            prerequisites.entry(skill).or_default().extend(prereqs);
        }
        Self { prerequisites }
    }

    /// Direct prerequisites; empty for skills the graph does not know.
    pub fn prerequisites(&self, skill: &str) -> &[SkillId] {
        self.prerequisites.get(skill).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Transitive prerequisites, deepest first, each listed once.
    ///
    /// Nodes are marked in-progress while their subtree is walked and are
    /// never re-entered, so a cyclic graph still terminates.
    pub fn all_prerequisites(&self, skill: &str) -> Vec<SkillId> {
        let mut state: HashMap<&str, VisitState> = HashMap::new();
        let mut ordered = Vec::new();
        // (node, index of the next prerequisite to visit)
        let mut stack: Vec<(&str, usize)> = vec![(skill, 0)];
        state.insert(skill, VisitState::InProgress);

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let prereqs = self.prerequisites(node);

            if next < prereqs.len() {
                frame.1 += 1;
                let child = prereqs[next].as_str();
                if !state.contains_key(child) {
                    state.insert(child, VisitState::InProgress);
                    stack.push((child, 0));
                }
            } else {
                stack.pop();
                state.insert(node, VisitState::Done);
                if node != skill {
                    ordered.push(SkillId::canonical(node));
                }
            }
        }

        debug_assert!(state.values().all(|s| *s == VisitState::Done));
        ordered
    }

    /// Order `skills` so prerequisites come first, using only the edges whose
    /// endpoints are both in the set.
    ///
    /// Kahn's algorithm; among ready nodes the lexicographically smallest is
    /// placed next. Nodes left over by a cycle are appended in lexicographic
    /// order, so the result is always a total order over the input.
    pub fn topological_order(&self, skills: &[SkillId]) -> Vec<SkillId> {
        let members: BTreeSet<&SkillId> = skills.iter().collect();

        let mut in_degree: HashMap<&SkillId, usize> = members.iter().map(|s| (*s, 0)).collect();
        let mut successors: HashMap<&SkillId, Vec<&SkillId>> = HashMap::new();

        for skill in &members {
            for prereq in self.prerequisites(skill.as_str()) {
                if let Some(prereq) = members.get(prereq) {
                    successors.entry(*prereq).or_default().push(*skill);
                    if let Some(degree) = in_degree.get_mut(*skill) {
                        *degree += 1;
                    }
                }
            }
        }

        let mut ready: BTreeSet<&SkillId> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(skill, _)| *skill)
            .collect();
        let mut placed: HashSet<&SkillId> = HashSet::new();
        let mut order = Vec::with_capacity(members.len());

        while let Some(current) = ready.pop_first() {
            placed.insert(current);
            order.push(current.clone());

            for next in successors.get(current).map(Vec::as_slice).unwrap_or(&[]) {
                if let Some(degree) = in_degree.get_mut(*next) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 && !placed.contains(*next) {
                        ready.insert(*next);
                    }
                }
            }
        }

        // cycle residue
        order.extend(
            members
                .iter()
                .filter(|skill| !placed.contains(**skill))
                .map(|skill| (*skill).clone()),
        );

        order
    }
}
