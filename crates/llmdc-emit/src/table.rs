//! Table classification and emission.

use llmdc_ir::normalize::normalize_key;

use crate::inline::strip_inline;
use crate::kvbuf::KvBuffer;

const INFORMATIVE_STOPLIST: &[&str] =
    &["value", "description", "details", "info", "notes", "default", "type"];
const BOOLEAN_TRUE: &[&str] = &["yes", "true", "enabled"];
const BOOLEAN_FALSE: &[&str] = &["no", "false", "disabled"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Property,
    KeyedMulti,
    Raw,
}

/// Classify a table by its header and data rows (`rows[0]` is the
/// header; everything after is data).
#[must_use]
pub fn classify(rows: &[Vec<String>]) -> TableKind {
    if rows.len() < 2 {
        return TableKind::Raw;
    }
    let header = &rows[0];
    let data = &rows[1..];
    if header.len() < 2 {
        return TableKind::Raw;
    }
    if !data.iter().all(|r| r.len() == header.len()) {
        return TableKind::Raw;
    }

    let first_col: Vec<&str> = data.iter().map(|r| r[0].as_str()).collect();
    let mut seen = std::collections::HashSet::new();
    let unique = first_col.iter().all(|v| seen.insert(*v));
    let identifier_like = first_col.iter().all(|v| is_identifier_like(v));
    if !unique || !identifier_like {
        return TableKind::Raw;
    }

    if header.len() == 2 {
        TableKind::Property
    } else {
        TableKind::KeyedMulti
    }
}

fn is_identifier_like(value: &str) -> bool {
    let starts_ok = value
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '.' || c == '_' || c == '-');
    starts_ok && value.split_whitespace().count() <= 4
}

/// Emit a classified table: `:_col`/`:_cols` directive lines go
/// straight to `out`; `property` and `keyed_multi` rows become
/// key-value pairs pushed onto the shared buffer so they still
/// participate in prefix extraction and grouping.
pub fn emit(
    rows: &[Vec<String>],
    kind: TableKind,
    kv_buffer: &mut KvBuffer,
    out: &mut Vec<String>,
    compression: u8,
    bool_compress: bool,
    keep_urls: bool,
) {
    let header = &rows[0];
    let mut data: Vec<Vec<String>> = rows[1..].to_vec();

    if bool_compress && compression >= 2 {
        compress_boolean_columns(&mut data);
    }

    match kind {
        TableKind::Property => {
            if is_informative(&header[1]) {
                out.push(format!(":_col={}", normalize_key(&header[1])));
            }
            for row in &data {
                let key = normalize_key(&row[0]);
                let value = sanitize_value(&strip_inline(&row[1], keep_urls, compression));
                kv_buffer.push(key, value);
            }
        }
        TableKind::KeyedMulti => {
            let cols = header[1..]
                .iter()
                .map(|h| normalize_key(h))
                .collect::<Vec<_>>()
                .join("¦");
            out.push(format!(":_cols={cols}"));
            for row in &data {
                let key = normalize_key(&row[0]);
                let value = row[1..]
                    .iter()
                    .map(|c| sanitize_value(&strip_inline(c, keep_urls, compression)))
                    .collect::<Vec<_>>()
                    .join("¦");
                kv_buffer.push(key, value);
            }
        }
        TableKind::Raw => {
            out.push(":_cols=".to_string());
            for row in rows {
                let cells = row
                    .iter()
                    .map(|c| strip_inline(c, keep_urls, compression))
                    .collect::<Vec<_>>()
                    .join("¦");
                out.push(format!(">{cells}"));
            }
        }
    }
}

fn is_informative(header_cell: &str) -> bool {
    !INFORMATIVE_STOPLIST.contains(&header_cell.trim().to_lowercase().as_str())
}

fn sanitize_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_sep = false;
    for ch in value.trim().chars() {
        if ch.is_whitespace() {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        out.push(ch);
    }
    out
}

fn compress_boolean_columns(data: &mut [Vec<String>]) {
    let Some(ncols) = data.first().map(Vec::len) else { return };
    for col in 1..ncols {
        let all_boolean = data.iter().all(|row| {
            let cell = row[col].trim().to_lowercase();
            BOOLEAN_TRUE.contains(&cell.as_str()) || BOOLEAN_FALSE.contains(&cell.as_str())
        });
        if !all_boolean {
            continue;
        }
        for row in data.iter_mut() {
            let cell = row[col].trim().to_lowercase();
            row[col] = if BOOLEAN_TRUE.contains(&cell.as_str()) {
                "Y".to_string()
            } else {
                "N".to_string()
            };
        }
    }
}
