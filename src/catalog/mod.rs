//! Static skill catalogue: taxonomy, roles, prerequisite graph and curated resources

pub mod dependencies;
pub mod resources;
pub mod roles;
pub mod taxonomy;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Canonical skill identifier: lowercase, trimmed, alias-resolved.
///
/// Only [`taxonomy::SkillNormalizer`] and the built-in tables construct these,
/// so two `SkillId`s are equal exactly when they name the same skill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(String);

impl SkillId {
    /// Wrap a string that is already in canonical form.
    pub(crate) fn canonical(value: impl Into<String>) -> Self {
        SkillId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SkillId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SkillId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for SkillId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Priority category of a required skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Core,
    Secondary,
    Bonus,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Core, Tier::Secondary, Tier::Bonus];

    pub fn weight(self) -> f64 {
        match self {
            Tier::Core => 1.0,
            Tier::Secondary => 0.6,
            Tier::Bonus => 0.3,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Core => write!(f, "core"),
            Tier::Secondary => write!(f, "secondary"),
            Tier::Bonus => write!(f, "bonus"),
        }
    }
}
