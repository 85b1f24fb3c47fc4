use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

/// Skill used as the starting candidate (and tie winner) when picking the
/// skill to highlight
pub const DEFAULT_SKILL: &str = "magic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Skill {
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillError {
    #[error("invalid skill set: missing default skill '{0}'")]
    InvalidInput(&'static str),
}

/// Skills in the order they were listed in the source data.
///
/// Stored as a sequence rather than a hash map so tie-breaking while
/// scanning is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillMap(Vec<(String, Skill)>);

impl SkillMap {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Skill)> {
        self.0.iter().map(|(name, skill)| (name.as_str(), skill))
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, skill)| skill)
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for SkillMap {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, level)| (name.into(), Skill { level }))
                .collect(),
        )
    }
}

struct SkillMapVisitor;

impl<'de> Visitor<'de> for SkillMapVisitor {
    type Value = SkillMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of skill name to { level }")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SkillMap, A::Error> {
        let mut entries: Vec<(String, Skill)> = Vec::with_capacity(access.size_hint().unwrap_or(8));
        while let Some((name, skill)) = access.next_entry::<String, Skill>()? {
            // A repeated name keeps its first position and takes the last level
            match entries.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => *existing = skill,
                None => entries.push((name, skill)),
            }
        }
        Ok(SkillMap(entries))
    }
}

// Entries are kept in document order regardless of serde_json's map features
impl<'de> Deserialize<'de> for SkillMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SkillMapVisitor)
    }
}

/// Name of the skill with the highest level.
///
/// Scanning starts from [`DEFAULT_SKILL`] and only a strictly higher level
/// replaces the candidate, so ties go to `magic` and then to whichever skill
/// was listed first.
pub fn select_dominant(skills: &SkillMap) -> Result<&str, SkillError> {
    let mut best_level = skills
        .get(DEFAULT_SKILL)
        .ok_or(SkillError::InvalidInput(DEFAULT_SKILL))?
        .level;
    let mut best = DEFAULT_SKILL;

    for (name, skill) in skills.iter() {
        if skill.level > best_level {
            best = name;
            best_level = skill.level;
        }
    }

    Ok(best)
}

/// Memoised [`select_dominant`]; recomputes only when the skills change
#[derive(Debug, Default)]
pub struct DominantSkill {
    source: Option<SkillMap>,
    result: Option<Result<String, SkillError>>,
}

impl DominantSkill {
    pub fn get(&mut self, skills: &SkillMap) -> Result<String, SkillError> {
        let stale = self.source.as_ref() != Some(skills);
        if stale || self.result.is_none() {
            self.result = Some(select_dominant(skills).map(str::to_string));
            self.source = Some(skills.clone());
        }

        match &self.result {
            Some(result) => result.clone(),
            None => select_dominant(skills).map(str::to_string),
        }
    }

    #[cfg(test)]
    pub fn is_cached_for(&self, skills: &SkillMap) -> bool {
        self.source.as_ref() == Some(skills) && self.result.is_some()
    }
}
