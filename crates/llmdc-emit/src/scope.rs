//! Heading stack and scope name resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// How a resolved scope name is built from the heading stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeMode {
    /// Just the current heading's name.
    #[default]
    Flat,
    /// Underscore-joined names from root to current.
    Concat,
    /// Same resolved name as `Concat`; kept as a distinct config value
    /// because the external surface exposes both spellings.
    Stacked,
}

impl<'de> Deserialize<'de> for ScopeMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for ScopeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "concat" => Ok(Self::Concat),
            "stacked" => Ok(Self::Stacked),
            other => Err(format!("unknown scope mode {other:?}, expected flat|concat|stacked")),
        }
    }
}

impl fmt::Display for ScopeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Flat => "flat",
            Self::Concat => "concat",
            Self::Stacked => "stacked",
        };
        f.write_str(s)
    }
}

/// A stack of `(level, normalized_name)` pairs, one per open heading.
///
/// On each new heading, every entry with `level >= current` pops
/// before the new one pushes, so the stack always reflects the current
/// nesting path from root to the active heading.
#[derive(Debug, Default)]
pub struct ScopeStack {
    entries: Vec<(u8, String)>,
}

impl ScopeStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_heading(&mut self, level: u8, normalized_name: String) {
        while self.entries.last().is_some_and(|(l, _)| *l >= level) {
            self.entries.pop();
        }
        self.entries.push((level, normalized_name));
    }

    /// The scope name this mode resolves to, or `None` if no heading
    /// has been seen yet.
    #[must_use]
    pub fn resolve(&self, mode: ScopeMode) -> Option<String> {
        match mode {
            ScopeMode::Flat => self.entries.last().map(|(_, n)| n.clone()),
            ScopeMode::Concat | ScopeMode::Stacked => {
                if self.entries.is_empty() {
                    None
                } else {
                    Some(self.entries.iter().map(|(_, n)| n.as_str()).collect::<Vec<_>>().join("_"))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_mode_uses_only_the_innermost_heading() {
        let mut stack = ScopeStack::new();
        stack.push_heading(1, "root".into());
        stack.push_heading(2, "child".into());
        assert_eq!(stack.resolve(ScopeMode::Flat), Some("child".into()));
    }

    #[test]
    fn concat_mode_joins_root_to_current() {
        let mut stack = ScopeStack::new();
        stack.push_heading(1, "root".into());
        stack.push_heading(2, "child".into());
        assert_eq!(stack.resolve(ScopeMode::Concat), Some("root_child".into()));
    }

    #[test]
    fn sibling_heading_pops_previous_at_same_level() {
        let mut stack = ScopeStack::new();
        stack.push_heading(1, "a".into());
        stack.push_heading(2, "b".into());
        stack.push_heading(2, "c".into());
        assert_eq!(stack.resolve(ScopeMode::Concat), Some("a_c".into()));
    }

    #[test]
    fn shallower_heading_pops_deeper_ones() {
        let mut stack = ScopeStack::new();
        stack.push_heading(1, "a".into());
        stack.push_heading(3, "deep".into());
        stack.push_heading(2, "mid".into());
        assert_eq!(stack.resolve(ScopeMode::Concat), Some("a_mid".into()));
    }

    #[test]
    fn empty_stack_resolves_to_none() {
        let stack = ScopeStack::new();
        assert_eq!(stack.resolve(ScopeMode::Flat), None);
    }

    #[test]
    fn scope_mode_parses_all_three_spellings() {
        assert_eq!("flat".parse::<ScopeMode>().unwrap(), ScopeMode::Flat);
        assert_eq!("concat".parse::<ScopeMode>().unwrap(), ScopeMode::Concat);
        assert_eq!("stacked".parse::<ScopeMode>().unwrap(), ScopeMode::Stacked);
        assert!("bogus".parse::<ScopeMode>().is_err());
    }
}
