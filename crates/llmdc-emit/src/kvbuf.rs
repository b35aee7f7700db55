//! Key-value buffering with prefix extraction.
//!
//! KV nodes never emit immediately. They accumulate here until the
//! emitter hits any non-KV node or runs out of input, at which point
//! [`KvBuffer::flush`] is the only path that turns them into lines.
//! Callers must flush on every interruption and once more at
//! end-of-input, or buffered pairs silently vanish.

#[derive(Debug, Default)]
pub struct KvBuffer {
    pairs: Vec<(String, String)>,
}

impl KvBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: String, value: String) {
        self.pairs.push((key, value));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Drain the buffer into zero or more `:`-prefixed lines.
    ///
    /// At compression 0, one pair per line. Otherwise up to
    /// `max_kv_per_line` pairs share a line, and when at least three
    /// pairs are buffered a shared key prefix may be factored out into
    /// a leading `:_pfx=` line first.
    pub fn flush(
        &mut self,
        compression: u8,
        max_kv_per_line: usize,
        prefix_extraction: bool,
        min_prefix_len: usize,
        min_prefix_pct: f64,
    ) -> Vec<String> {
        let mut pairs = std::mem::take(&mut self.pairs);
        if pairs.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::new();

        if compression >= 1 && prefix_extraction && pairs.len() >= 3 {
            if let Some(prefix) = shared_key_prefix(&pairs, min_prefix_len, min_prefix_pct) {
                out.push(format!(":_pfx={prefix}"));
                for (key, _) in &mut pairs {
                    if let Some(rest) = key.strip_prefix(prefix.as_str()) {
                        *key = rest.to_string();
                    }
                }
            }
        }

        let chunk_size = if compression == 0 { 1 } else { max_kv_per_line.max(1) };
        for chunk in pairs.chunks(chunk_size) {
            let body = chunk
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(" ");
            out.push(format!(":{body}"));
        }
        out
    }
}

/// Longest common prefix across every buffered key, trimmed back to
/// the last `-`, `_`, or `.` so the cut always lands on a word
/// boundary the keys actually used.
fn shared_key_prefix(pairs: &[(String, String)], min_len: usize, min_pct: f64) -> Option<String> {
    let first = &pairs[0].0;
    let mut common_len = first.chars().count();
    for (key, _) in &pairs[1..] {
        let shared = first.chars().zip(key.chars()).take_while(|(a, b)| a == b).count();
        common_len = common_len.min(shared);
        if common_len == 0 {
            return None;
        }
    }
    let candidate: String = first.chars().take(common_len).collect();
    let cut = candidate.rfind(['-', '_', '.'])?;
    let trimmed = candidate[..=cut].to_string();
    if trimmed.chars().count() < min_len {
        return None;
    }
    let matching = pairs.iter().filter(|(k, _)| k.starts_with(trimmed.as_str())).count();
    let pct = f64::from(u32::try_from(matching).unwrap_or(u32::MAX))
        / f64::from(u32::try_from(pairs.len()).unwrap_or(1));
    if pct >= min_pct {
        Some(trimmed)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_zero_emits_one_pair_per_line() {
        let mut buf = KvBuffer::new();
        buf.push("a".into(), "1".into());
        buf.push("b".into(), "2".into());
        assert_eq!(buf.flush(0, 4, true, 6, 0.6), vec![":a=1", ":b=2"]);
    }

    #[test]
    fn compression_one_groups_up_to_max_per_line() {
        let mut buf = KvBuffer::new();
        for (k, v) in [("a", "1"), ("b", "2"), ("c", "3")] {
            buf.push(k.into(), v.into());
        }
        assert_eq!(buf.flush(1, 2, true, 6, 0.6), vec![":a=1 b=2", ":c=3"]);
    }

    #[test]
    fn four_unrelated_keys_fit_one_line_without_prefix() {
        let mut buf = KvBuffer::new();
        for (k, v) in [("foo", "1"), ("bar", "2"), ("baz", "3"), ("foobar", "4")] {
            buf.push(k.into(), v.into());
        }
        assert_eq!(buf.flush(1, 4, true, 6, 0.6), vec![":foo=1 bar=2 baz=3 foobar=4"]);
    }

    #[test]
    fn shared_prefix_is_factored_out() {
        let mut buf = KvBuffer::new();
        for (k, v) in [
            ("config_max_retries", "3"),
            ("config_max_delay", "5"),
            ("config_max_backoff", "2"),
        ] {
            buf.push(k.into(), v.into());
        }
        let lines = buf.flush(1, 4, true, 6, 0.6);
        assert_eq!(lines[0], ":_pfx=config_max_");
        assert_eq!(lines[1], ":retries=3 delay=5 backoff=2");
    }

    #[test]
    fn prefix_extraction_skipped_below_three_pairs() {
        let mut buf = KvBuffer::new();
        buf.push("config_max_retries".into(), "3".into());
        buf.push("config_max_delay".into(), "5".into());
        let lines = buf.flush(1, 4, true, 6, 0.6);
        assert!(!lines[0].starts_with(":_pfx="));
    }

    #[test]
    fn empty_buffer_flushes_to_nothing() {
        let mut buf = KvBuffer::new();
        assert!(buf.flush(1, 4, true, 6, 0.6).is_empty());
    }
}
