//! Property-style checks for the compiler's structural guarantees.

use llmdc_driver::CompileConfig;
use llmdc_ir::normalize::normalize_scope_name;

fn compile(source: &str, compression: u8) -> String {
    let mut config = CompileConfig::default();
    config.compression = compression;
    llmdc_driver::compile(source, &config, &[]).expect("compile should succeed")
}

#[test]
fn first_non_block_line_is_always_a_scope_line() {
    for source in ["Just a paragraph, no heading.", "- a list with no heading\n- second item", "k: v"] {
        let out = compile(source, 2);
        let first = out.lines().find(|l| *l != "<<<" && *l != ">>>").expect("at least one line");
        assert!(first.starts_with('@'), "expected @scope first, got {first:?}");
    }
}

#[test]
fn every_verbatim_block_is_balanced() {
    let out = compile("# Code\n\n```rust\nfn main() {}\n```\n\nMore text after.", 1);
    let lines: Vec<&str> = out.lines().collect();
    let opens = lines.iter().filter(|l| **l == "<<<").count();
    let closes = lines.iter().filter(|l| **l == ">>>").count();
    assert_eq!(opens, closes);
    assert_eq!(opens, 1);
}

#[test]
fn kv_pairs_parse_back_into_key_and_unspaced_value() {
    let out = compile("# Cfg\n\nalpha: one two\nbeta: three", 1);
    for line in out.lines().filter(|l| l.starts_with(':') && !l.starts_with(":_")) {
        for pair in line[1..].split(' ') {
            let (key, value) = pair.split_once('=').expect("pair must contain =");
            assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
            assert!(!value.contains(' '));
        }
    }
}

#[test]
fn scope_normalization_is_idempotent() {
    for raw in ["  Weird   Heading!!  ", "already_normal", "Mixed-Case_Name", ""] {
        let once = normalize_scope_name(raw, true);
        let twice = normalize_scope_name(&once, true);
        assert_eq!(once, twice);
    }
}

#[test]
fn protected_words_survive_stopword_removal() {
    let mut config = CompileConfig::default();
    config.compression = 2;
    config.stopwords = vec!["not".into(), "must".into()];
    let out = llmdc_driver::compile("# X\n\nYou must not stop now.", &config, &[]).unwrap();
    assert!(out.contains("must"));
    assert!(out.contains("not"));
}

#[test]
fn kv_group_count_never_exceeds_ceil_n_over_max_per_line() {
    let source = "# Cfg\n\na: 1\nb: 2\nc: 3\nd: 4\ne: 5\nf: 6\ng: 7";
    let mut config = CompileConfig::default();
    config.compression = 1;
    config.max_kv_per_line = 4;
    config.prefix_extraction = false;
    let out = llmdc_driver::compile(source, &config, &[]).unwrap();
    let kv_lines = out.lines().filter(|l| l.starts_with(':') && !l.starts_with(":_")).count();
    assert!(kv_lines <= 7_f64.div_euclid(4.0) as usize + 1);
    assert_eq!(kv_lines, 2);
}

#[test]
fn dictionary_substitution_never_touches_digit_prefixed_tokens() {
    let dict = llmdc_dict::load(r#"{"version":"0.1","maps":{"text":{"3rd":"third"}}}"#).unwrap();
    let mut config = CompileConfig::default();
    config.compression = 3;
    let out = llmdc_driver::compile("# X\n\nThe 3rd item is ready.", &config, &[dict]).unwrap();
    assert!(out.contains("3rd"));
}

#[test]
fn round_trip_at_compression_zero_is_stable() {
    let source = "# Stable\n\nThis text should not change between runs.";
    let first = compile(source, 0);
    let second = compile(source, 0);
    assert_eq!(first, second);
}
