//! Greedy bucketing of ordered skills into roadmap windows

use crate::analysis::types::RoadmapWeek;
use crate::catalog::taxonomy::SkillNormalizer;
use crate::catalog::SkillId;

/// A window may run this far past its share of the total hours before closing.
const OVERFLOW_FACTOR: f64 = 1.3;

pub struct RoadmapBuilder<'a> {
    normalizer: &'a SkillNormalizer,
    windows: usize,
}

impl<'a> RoadmapBuilder<'a> {
    pub fn new(normalizer: &'a SkillNormalizer, windows: usize) -> Self {
        Self { normalizer, windows }
    }

    pub fn build(&self, ordered: &[SkillId]) -> Vec<RoadmapWeek> {
        let hours: Vec<f64> = ordered
            .iter()
            .map(|skill| self.normalizer.metadata(skill.as_str()).learning_hours)
            .collect();
        bucket(ordered, &hours, self.windows)
    }
}

/// Split `ordered` into consecutive weeks. Not optimal packing: a week closes
/// as soon as the next skill would push it past `target * 1.3`.
pub fn bucket(ordered: &[SkillId], hours: &[f64], windows: usize) -> Vec<RoadmapWeek> {
    let total: f64 = hours.iter().sum();
    let target = total / windows.max(1) as f64;
    let limit = target * OVERFLOW_FACTOR;

    let mut weeks = Vec::new();
    let mut current: Vec<SkillId> = Vec::new();
    let mut accumulated = 0.0;

    for (skill, h) in ordered.iter().zip(hours) {
        if !current.is_empty() && accumulated + h > limit {
            weeks.push(week(weeks.len() + 1, std::mem::take(&mut current), accumulated));
            accumulated = 0.0;
        }
        current.push(skill.clone());
        accumulated += h;
    }

    if !current.is_empty() {
        weeks.push(week(weeks.len() + 1, current, accumulated));
    }
    weeks
}

fn week(index: usize, skills: Vec<SkillId>, estimated_hours: f64) -> RoadmapWeek {
    let focus = skills[0].clone();
    RoadmapWeek {
        week: index,
        skills,
        estimated_hours,
        focus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<SkillId> {
        names.iter().map(|n| SkillId::canonical(*n)).collect()
    }

    #[test]
    fn test_weeks_partition_input() {
        let normalizer = SkillNormalizer::new();
        let ordered = ids(&["html", "css", "javascript", "react", "typescript", "git", "cobol"]);
        let weeks = RoadmapBuilder::new(&normalizer, 4).build(&ordered);

        let flattened: Vec<SkillId> = weeks.iter().flat_map(|w| w.skills.clone()).collect();
        assert_eq!(flattened, ordered);
        for (i, w) in weeks.iter().enumerate() {
            assert_eq!(w.week, i + 1);
            assert_eq!(w.focus, w.skills[0]);
        }
    }

    #[test]
    fn test_bucketing_closes_on_overflow() {
        // total 100, target 25, limit 32.5
        let weeks = bucket(&ids(&["a", "b", "c", "d"]), &[10.0, 20.0, 40.0, 30.0], 4);

        let skills: Vec<Vec<&str>> = weeks
            .iter()
            .map(|w| w.skills.iter().map(SkillId::as_str).collect())
            .collect();
        assert_eq!(skills, vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
        assert_eq!(weeks[0].estimated_hours, 30.0);
        assert_eq!(weeks[1].estimated_hours, 40.0);
    }

    #[test]
    fn test_zero_windows_is_single_window() {
        let weeks = bucket(&ids(&["a", "b", "c"]), &[20.0, 20.0, 20.0], 0);
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].estimated_hours, 60.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(bucket(&[], &[], 4).is_empty());
    }
}
