//! Append-only session journal.
//!
//! One timestamped line per event. Journal failures are logged and swallowed;
//! the conversation never stops because the disk did.

use std::io::Write;
use std::path::PathBuf;

use tracing::warn;

pub struct SessionJournal {
    path: PathBuf,
}

impl SessionJournal {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one event line, best-effort.
    pub fn record(&self, event: &str) {
        if let Err(e) = self.append(event) {
            warn!(path = %self.path.display(), error = %e, "failed to write journal entry");
        }
    }

    fn append(&self, event: &str) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let stamp = jiff::Zoned::now().strftime("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{stamp}] {event}")
    }
}
