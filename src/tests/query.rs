use super::fake::{self, counters, ALL_FILES};
use crate::{MigemoError, OperatorKind};

fn loaded_fake() -> (tempfile::TempDir, crate::Migemo) {
    let dir = tempfile::tempdir().unwrap();
    fake::write_dict_set(dir.path(), &ALL_FILES);
    let mut migemo = fake::fake();
    migemo.load_dir(dir.path()).unwrap();
    (dir, migemo)
}

#[test]
fn query_without_dictionaries_is_none() {
    let mut migemo = fake::fake();
    assert!(migemo.query("kensaku").unwrap().is_none());
    assert!(migemo.query_str("kanji").unwrap().is_none());
}

#[test]
fn query_expands_romaji_into_alternation() {
    let (_dir, mut migemo) = loaded_fake();
    let pattern = migemo.query("kensaku").unwrap().unwrap();
    let s = pattern.to_str().unwrap();

    assert!(!pattern.is_empty());
    assert!(s.starts_with('(') && s.ends_with(')'), "{s}");
    assert!(s.contains('|'));
    for alt in ["kensaku", "けんさく", "ケンサク", "検索", "研削"] {
        assert!(s.contains(alt), "{alt} missing from {s}");
    }
    assert_eq!(pattern.len(), s.len());
    assert_eq!(pattern.as_bytes(), s.as_bytes());
}

#[test]
fn query_uses_current_operators() {
    let (_dir, mut migemo) = loaded_fake();
    migemo.set_operator(OperatorKind::GroupingIn, "(?:").unwrap();
    migemo.set_operator(OperatorKind::Or, "||").unwrap();

    let s = migemo.query_str("kanji").unwrap().unwrap();
    assert!(s.starts_with("(?:"));
    assert!(s.contains("かんじ||カンジ"));
    assert!(s.contains("漢字"));
}

#[test]
fn query_with_nul_is_rejected() {
    let (_dir, mut migemo) = loaded_fake();
    assert!(matches!(
        migemo.query(b"ken\0saku"),
        Err(MigemoError::InvalidQuery)
    ));
}

#[test]
fn empty_query_yields_none() {
    let (_dir, mut migemo) = loaded_fake();
    assert!(migemo.query("").unwrap().is_none());
}

#[test]
fn each_result_is_released_once() {
    let (_dir, mut migemo) = loaded_fake();
    let before = counters();

    let a = migemo.query("kensaku").unwrap().unwrap();
    let b = migemo.query("kanji").unwrap().unwrap();
    assert_eq!(counters().since(before).releases, 0);

    drop(a);
    assert_eq!(counters().since(before).releases, 1);
    drop(b);

    let delta = counters().since(before);
    assert_eq!(delta.queries, 2);
    assert_eq!(delta.releases, 2);
}

#[test]
fn result_outlives_engine() {
    let before = counters();
    let pattern = {
        let (_dir, mut migemo) = loaded_fake();
        migemo.query("kensaku").unwrap().unwrap()
    };
    // Engine is gone; the buffer is still ours.
    assert_eq!(counters().since(before).closes, 1);
    assert!(pattern.to_string().contains("検索"));

    drop(pattern);
    let delta = counters().since(before);
    assert_eq!(delta.releases, 1);
    assert_eq!(delta.null_calls, 0);
}

#[test]
fn result_can_be_sent_to_another_thread() {
    let (_dir, mut migemo) = loaded_fake();
    let pattern = migemo.query("kensaku").unwrap().unwrap();
    let len = std::thread::spawn(move || pattern.len()).join().unwrap();
    assert!(len > 0);
}

#[test]
fn display_and_debug_render_pattern() {
    let (_dir, mut migemo) = loaded_fake();
    let pattern = migemo.query("kanji").unwrap().unwrap();
    assert_eq!(pattern.to_string(), pattern.to_string_lossy());
    assert!(format!("{pattern:?}").starts_with("RegexpString("));
    let bytes: &[u8] = &pattern;
    assert_eq!(bytes, pattern.as_ref());
}

#[test]
fn non_utf8_pattern_is_a_utf8_error_for_query_str() {
    let before = counters();
    let mut migemo = fake::with(&fake::LATIN1_API);

    assert!(matches!(
        migemo.query_str("cafe"),
        Err(MigemoError::Utf8(_))
    ));

    // The raw bytes are still available through `query`.
    let pattern = migemo.query("cafe").unwrap().unwrap();
    assert!(pattern.to_str().is_err());
    assert_eq!(pattern.as_bytes(), b"(caf\xe9|na\xefve)");
    assert!(pattern.to_string_lossy().contains('\u{FFFD}'));
    drop(pattern);

    let delta = counters().since(before);
    assert_eq!(delta.queries, 2);
    assert_eq!(delta.releases, 2, "failed conversion still releases");
}
