//! Session journal: append-only, timestamped, failure-tolerant.

use sona_agent::journal::SessionJournal;

fn temp_journal_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("sona_journal_test_{}.log", uuid::Uuid::new_v4()))
}

#[test]
fn entries_append_in_order_with_timestamps() {
    let path = temp_journal_path();
    let journal = SessionJournal::new(path.clone());

    journal.record("assessment started");
    journal.record("assessment completed: total 4 (minimal or no depression)");

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("assessment started"));
    assert!(lines[1].contains("total 4"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn unwritable_path_does_not_panic() {
    let journal = SessionJournal::new("/nonexistent-dir/sona/sessions.log".into());
    journal.record("this entry is dropped");
}
