//! Post-processing (S6): the scope-before-content sanity check and
//! periodic re-anchoring.

const SCOPED_PREFIXES: [char; 6] = [':', '-', '>', '→', '←', '='];

fn is_scope_line(line: &str) -> bool {
    line.starts_with('@')
}

fn is_scoped_content_line(line: &str) -> bool {
    if line == "<<<" || line == ">>>" {
        return false;
    }
    SCOPED_PREFIXES.iter().any(|p| line.starts_with(*p)) || line.chars().next().is_some_and(|c| c.is_alphanumeric())
}

/// Warn (non-fatally, via `log::warn!`) if a scoped content line
/// appears before any `@scope` line has been emitted. The implicit
/// root scope keeps the output valid either way; this only surfaces
/// the condition for diagnostics.
pub fn check_scope_before_content(lines: &[String]) {
    let mut seen_scope = false;
    for line in lines {
        if is_scope_line(line) {
            seen_scope = true;
        } else if is_scoped_content_line(line) && !seen_scope {
            log::warn!("content line emitted before any @scope line: {line:?}");
            return;
        }
    }
}

/// If `anchor_every > 0`, re-emit the most recently seen `@scope` line
/// after every `anchor_every` non-scope lines, so a reader skimming a
/// long section never drifts far from its heading.
#[must_use]
pub fn reanchor(lines: Vec<String>, anchor_every: usize) -> Vec<String> {
    if anchor_every == 0 {
        return lines;
    }
    let mut out = Vec::with_capacity(lines.len());
    let mut last_scope: Option<String> = None;
    let mut since_anchor = 0usize;
    let mut in_block = false;

    for line in lines {
        let is_fence = line == "<<<" || line == ">>>";
        let was_in_block = in_block;
        if line == "<<<" {
            in_block = true;
        } else if line == ">>>" {
            in_block = false;
        }

        if is_scope_line(&line) {
            last_scope = Some(line.clone());
            since_anchor = 0;
            out.push(line);
            continue;
        }

        out.push(line);
        if is_fence || was_in_block {
            continue;
        }
        since_anchor += 1;
        if since_anchor >= anchor_every {
            if let Some(scope) = &last_scope {
                out.push(scope.clone());
            }
            since_anchor = 0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warns_when_content_precedes_any_scope() {
        check_scope_before_content(&[">orphan prose".to_string(), "@root".to_string()]);
    }

    #[test]
    fn silent_when_scope_comes_first() {
        check_scope_before_content(&["@root".to_string(), ">hello".to_string()]);
    }

    #[test]
    fn reanchor_is_noop_when_disabled() {
        let lines = vec!["@a".to_string(), ">x".to_string(), ">y".to_string()];
        assert_eq!(reanchor(lines.clone(), 0), lines);
    }

    #[test]
    fn reanchor_reinserts_last_scope_every_n_lines() {
        let lines = vec!["@a".to_string(), ">x".to_string(), ">y".to_string(), ">z".to_string()];
        let out = reanchor(lines, 2);
        assert_eq!(out, vec!["@a".to_string(), ">x".to_string(), ">y".to_string(), "@a".to_string(), ">z".to_string()]);
    }

    #[test]
    fn reanchor_does_not_count_lines_inside_verbatim_blocks() {
        let lines =
            vec!["@a".to_string(), "<<<".to_string(), "x".to_string(), "y".to_string(), ">>>".to_string(), ">z".to_string()];
        let out = reanchor(lines.clone(), 2);
        assert_eq!(out, lines);
    }
}
