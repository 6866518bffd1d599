//! JSON file storage for tasks
//!
//! Tasks are stored as one pretty-printed JSON array. Each element is a
//! positional triple `[priority, "YYYY-MM-DD", task]`, where the first two
//! values are the ordering key and the third is the task object.
//!
//! The whole file is rewritten on every save: temp file + rename, under an
//! exclusive lock. A missing or undecodable file loads as an empty list.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use super::TaskPersistence;
use crate::domain::{parse_iso_date, Task, DUE_DATE_FORMAT};

/// Default file name, relative to the working directory
pub const DEFAULT_FILE_NAME: &str = "tareas.json";

/// On-disk shape of one task: `[priority, due_date, task]`
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry(i64, String, Task);

impl StoredEntry {
    fn from_task(task: &Task) -> Self {
        Self(
            task.priority,
            task.due_date.format(DUE_DATE_FORMAT).to_string(),
            task.clone(),
        )
    }

    /// The positional priority and date are the ordering key and win over
    /// the copies inside the task object.
    fn into_task(self) -> Option<Task> {
        let StoredEntry(priority, due_date, task) = self;
        let due_date = parse_stored_date(&due_date)?;
        Some(Task {
            priority,
            due_date,
            ..task
        })
    }
}

/// Parses the date part of a stored key, ignoring any time suffix
/// (older files wrote `"2025-03-01 00:00:00"`).
fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split_whitespace().next()?;
    parse_iso_date(date_part)
}

/// Task store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonTaskFile {
    path: PathBuf,
}

impl JsonTaskFile {
    /// Creates a store for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn decode(&self, content: &str) -> Option<Vec<Task>> {
        let entries: Vec<StoredEntry> = match serde_json::from_str(content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable task file");
                return None;
            }
        };

        let mut tasks = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match entry.into_task() {
                Some(task) => tasks.push(task),
                None => {
                    tracing::warn!(path = %self.path.display(), index, "discarding task file with a malformed due date");
                    return None;
                }
            }
        }
        Some(tasks)
    }
}

impl TaskPersistence for JsonTaskFile {
    fn load(&self) -> Result<Vec<Task>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no task file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open task file: {}", self.path.display())
                })
            }
        };

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on task file")?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .with_context(|| format!("Failed to read task file: {}", self.path.display()))?;

        // Lock is released when file is dropped
        let tasks = String::from_utf8(bytes)
            .ok()
            .and_then(|content| self.decode(&content))
            .unwrap_or_default();

        tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.temp_path();
        let entries: Vec<StoredEntry> = tasks.iter().map(StoredEntry::from_task).collect();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on task file")?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, &entries)
                .context("Failed to serialize tasks")?;
            writeln!(writer).context("Failed to write task file")?;
            writer.flush().context("Failed to flush task file")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn make_task(name: &str, priority: i64, due: &str, deps: &[&str]) -> Task {
        Task::new(
            name,
            priority,
            NaiveDate::parse_from_str(due, "%Y-%m-%d").unwrap(),
            deps.iter().map(|d| d.to_string()).collect(),
        )
    }

    fn store_in(dir: &TempDir) -> JsonTaskFile {
        JsonTaskFile::new(dir.path().join("tareas.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn invalid_json_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn empty_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "").unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"nombre": "not an array"}"#).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn bad_stored_date_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"[[1, "someday", {"nombre": "x", "prioridad": 1, "fecha_vencimiento": "2025-01-01", "dependencias": []}]]"#,
        )
        .unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let tasks = vec![
            make_task("Email client", 1, "2025-02-15", &[]),
            make_task("Write report", 2, "2025-03-01", &["Draft"]),
        ];

        store.save(&tasks).unwrap();

        assert_eq!(store.load().unwrap(), tasks);
    }

    #[test]
    fn signed_or_zero_year_keys_load_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for key in ["+2025-01-01", "0000-01-01", "-0001-01-01"] {
            fs::write(
                store.path(),
                format!(
                    r#"[[1, "{}", {{"nombre": "x", "prioridad": 1, "fecha_vencimiento": "2025-01-01", "dependencias": []}}]]"#,
                    key
                ),
            )
            .unwrap();

            assert!(store.load().unwrap().is_empty(), "expected {:?} to be rejected", key);
        }
    }

    #[test]
    fn writes_positional_entries() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&[make_task("Write report", 2, "2025-03-01", &["Draft"])])
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();

        assert_eq!(
            raw,
            serde_json::json!([[
                2,
                "2025-03-01",
                {
                    "nombre": "Write report",
                    "prioridad": 2,
                    "fecha_vencimiento": "2025-03-01",
                    "dependencias": ["Draft"]
                }
            ]])
        );
    }

    #[test]
    fn reads_legacy_datetime_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"[
    [
        1,
        "2025-02-15 00:00:00",
        {
            "nombre": "Email client",
            "prioridad": 1,
            "fecha_vencimiento": "2025-02-15",
            "dependencias": []
        }
    ]
]"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![make_task("Email client", 1, "2025-02-15", &[])]);
    }

    #[test]
    fn positional_key_wins_over_task_object() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"[[5, "2026-01-01", {"nombre": "x", "prioridad": 1, "fecha_vencimiento": "2025-01-01", "dependencias": []}]]"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded[0].priority, 5);
        assert_eq!(loaded[0].due_date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&[make_task("a", 1, "2025-01-01", &[])]).unwrap();
        store.save(&[]).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonTaskFile::new(dir.path().join("nested").join("dir").join("tareas.json"));

        store.save(&[make_task("a", 1, "2025-01-01", &[])]).unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&[make_task("a", 1, "2025-01-01", &[])]).unwrap();

        // Temp file should not exist after write
        assert!(!store.temp_path().exists());
    }

    fn arb_task() -> impl Strategy<Value = Task> {
        let name = prop_oneof![
            "[a-zA-Z0-9 ,\"'\\\\]{1,12}",
            "\\PC{1,8}",
            Just("Write report".to_string()),
        ]
        .prop_filter("names are stored trimmed and non-empty", |n| {
            !n.trim().is_empty() && n.trim() == n
        });
        let priority = prop_oneof![any::<i64>(), -3i64..3, Just(i64::MIN), Just(i64::MAX)];
        let due = (1i32..=9999, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        let deps = prop::collection::vec("[a-z ,\"]{0,6}", 0..4).prop_map(|deps| {
            deps.into_iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect::<Vec<_>>()
        });

        (name, priority, due, deps)
            .prop_map(|(name, priority, due_date, deps)| Task::new(name, priority, due_date, deps))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn round_trip_preserves_every_task(
            tasks in prop::collection::vec(arb_task(), 1..20),
            tie_copies in 0usize..3,
        ) {
            let dir = TempDir::new().unwrap();
            let store = store_in(&dir);

            let mut tasks = tasks;
            let first = tasks[0].clone();
            tasks.extend(std::iter::repeat(first).take(tie_copies));

            store.save(&tasks).unwrap();

            prop_assert_eq!(store.load().unwrap(), tasks);
        }
    }
}
