//! Merges one or more loaded dictionaries into the sorted entry lists
//! the substitution engine scans.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::schema::{DictionaryFile, Maps, Policy};

/// Every dictionary's `maps`, flattened per namespace and sorted by
/// key length descending so the engine always tries the longest
/// candidate first. Ties keep dictionary load order (stable sort).
#[derive(Debug, Clone, Default)]
pub struct MergedDictionary {
    pub policy: Policy,
    pub scope: Vec<(String, String)>,
    pub key: Vec<(String, String)>,
    pub value: Vec<(String, String)>,
    pub text: Vec<(String, String)>,
    pub type_: Vec<(String, String)>,
    pub c3_stop: HashSet<String>,
}

impl MergedDictionary {
    /// Merge dictionaries in load order. The last dictionary's policy
    /// wins for scalar settings; `stop.c3` lists union across all of
    /// them.
    #[must_use]
    pub fn merge(dicts: &[DictionaryFile]) -> Self {
        let policy = dicts.last().map(|d| d.policy.clone()).unwrap_or_default();
        let mut c3_stop = HashSet::new();
        for dict in dicts {
            if let Some(stop) = &dict.stop {
                c3_stop.extend(stop.c3.iter().map(|w| w.to_lowercase()));
            }
        }

        Self {
            policy,
            scope: collect_sorted(dicts, |m| &m.scope),
            key: collect_sorted(dicts, |m| &m.key),
            value: collect_sorted(dicts, |m| &m.value),
            text: collect_sorted(dicts, |m| &m.text),
            type_: collect_sorted(dicts, |m| &m.type_),
            c3_stop,
        }
    }
}

fn collect_sorted(
    dicts: &[DictionaryFile],
    select: impl Fn(&Maps) -> &HashMap<String, String>,
) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    for dict in dicts {
        for (k, v) in select(&dict.maps) {
            entries.push((k.clone(), v.clone()));
        }
    }
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DictionaryFile;

    fn dict(json: &str) -> DictionaryFile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn entries_sort_longest_key_first() {
        let d = dict(r#"{"version":"0.1","maps":{"text":{"hi":"a","hello there":"b","x":"c"}}}"#);
        let merged = MergedDictionary::merge(&[d]);
        let lens: Vec<usize> = merged.text.iter().map(|(k, _)| k.len()).collect();
        assert!(lens.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn ties_preserve_load_order() {
        let d1 = dict(r#"{"version":"0.1","maps":{"text":{"ab":"first"}}}"#);
        let d2 = dict(r#"{"version":"0.1","maps":{"text":{"cd":"second"}}}"#);
        let merged = MergedDictionary::merge(&[d1, d2]);
        assert_eq!(merged.text, vec![("ab".to_string(), "first".to_string()), ("cd".to_string(), "second".to_string())]);
    }

    #[test]
    fn stop_lists_union_across_dictionaries() {
        let d1 = dict(r#"{"version":"0.1","stop":{"c3":["THE"]}}"#);
        let d2 = dict(r#"{"version":"0.1","stop":{"c3":["a"]}}"#);
        let merged = MergedDictionary::merge(&[d1, d2]);
        assert!(merged.c3_stop.contains("the"));
        assert!(merged.c3_stop.contains("a"));
    }

    #[test]
    fn last_dictionary_policy_wins() {
        let d1 = dict(r#"{"version":"0.1","policy":{"max_passes":2}}"#);
        let d2 = dict(r#"{"version":"0.1","policy":{"max_passes":5}}"#);
        let merged = MergedDictionary::merge(&[d1, d2]);
        assert_eq!(merged.policy.max_passes, 5);
    }
}
