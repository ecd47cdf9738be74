// PROMPTOID History Log - Append-Only Prompt Sessions
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One stored prompt session. The engine reads `input` and
/// `auto_korean_prompt`; the remaining fields exist for the operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub input: String,
    pub auto_korean_prompt: String,
    pub edited_korean_prompt: String,
    pub diff_text: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Append-only JSON array on disk.
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored entry. A missing file means no history yet; a
    /// record that does not parse is skipped with a warning instead of
    /// poisoning the whole pass.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                warn!("[HISTORY] Log at {:?} unreadable: {}", self.path, e);
                return Vec::new();
            }
        };
        values
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value::<HistoryEntry>(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("[HISTORY] Skipping malformed record {}: {}", i, e);
                    None
                }
            })
            .collect()
    }

    /// Append one entry, stamping it now. The whole array is rewritten to
    /// a temp file in the same directory, then renamed over the log so a
    /// crash mid-write never corrupts existing history.
    pub fn append(&self, mut entry: HistoryEntry) -> std::io::Result<()> {
        entry.timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string();

        let mut entries = self.load();
        entries.push(entry);

        let dir = self.path.parent().unwrap_or(Path::new("."));
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        })?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(input: &str, prompt: &str) -> HistoryEntry {
        HistoryEntry {
            input: input.to_string(),
            auto_korean_prompt: prompt.to_string(),
            edited_korean_prompt: prompt.to_string(),
            diff_text: "(No Differences Found)".to_string(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::new(dir.path().join("nope.json"));
        assert!(log.load().is_empty());
    }

    #[test]
    fn append_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::new(dir.path().join("log.json"));

        log.append(entry("입력 하나", "프롬프트 하나")).unwrap();
        log.append(entry("입력 둘", "프롬프트 둘")).unwrap();

        let entries = log.load();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].input, "입력 하나");
        assert_eq!(entries[1].auto_korean_prompt, "프롬프트 둘");
        assert!(!entries[0].timestamp.is_empty());
    }

    #[test]
    fn malformed_record_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(
            &path,
            r#"[
                {"input": "좋은 기록", "auto_korean_prompt": "p", "edited_korean_prompt": "p", "diff_text": ""},
                {"not_a_history_field": true}
            ]"#,
        )
        .unwrap();

        let entries = HistoryLog::new(&path).load();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].input, "좋은 기록");
    }

    #[test]
    fn unreadable_log_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, "definitely not json").unwrap();
        assert!(HistoryLog::new(&path).load().is_empty());
    }
}
