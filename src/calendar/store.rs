use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::date_key::DateKey;
use super::task::TaskItem;

/// Field separator in the tasks file. Not escaped.
pub const SEPARATOR: char = '|';

const FIELD_COUNT: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a non-blank line of the tasks file was not loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    FieldCount(usize),
    LineBreak,
    BadDate,
}

/// Tasks keyed by calendar day, persisted as `date|name|color|time` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: BTreeMap<DateKey, Vec<TaskItem>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "no tasks file yet");
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::parse(&content);
        info!(path = %path.display(), tasks = store.len(), "loaded tasks");
        Ok(store)
    }

    /// Parse tasks file content. Lines that would not survive a save (wrong
    /// field count, stray line breaks, an impossible date) are dropped.
    pub fn parse(content: &str) -> Self {
        let mut store = Self::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok((date, item)) => store.add_task(date, item),
                Err(SkipReason::BadDate) => {
                    warn!(line, "dropping task with invalid date, it will not be saved back");
                }
                Err(reason) => debug!(line, ?reason, "skipping malformed task line"),
            }
        }
        store
    }

    /// Render every task as one line, dates in chronological order and
    /// tasks in insertion order. A task whose fields would break the line
    /// format is left out so the rest still reaches disk.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (date, items) in &self.tasks {
            for item in items {
                let fields = [item.name.as_str(), item.color.as_str(), item.time.as_str()];
                if fields.iter().any(|f| breaks_line_format(f)) {
                    warn!(%date, name = ?item.name, "not saving task with '|' or line break in a field");
                    continue;
                }
                out.push_str(&format!(
                    "{date}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}\n",
                    item.name, item.color, item.time
                ));
            }
        }
        out
    }

    /// Write the store to `path`, creating the parent directory if needed.
    /// The file is replaced via a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let content = self.serialize();
        let write_err = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        debug!(path = %path.display(), tasks = self.len(), "saved tasks");
        Ok(())
    }

    pub fn add_task(&mut self, date: DateKey, item: TaskItem) {
        self.tasks.entry(date).or_default().push(item);
    }

    pub fn tasks_for(&self, date: DateKey) -> &[TaskItem] {
        self.tasks.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days of the given month that have at least one task.
    pub fn days_with_tasks(&self, year: i32, month: u32) -> HashSet<u32> {
        self.tasks
            .iter()
            .filter(|(date, items)| date.year == year && date.month == month && !items.is_empty())
            .map(|(date, _)| date.day)
            .collect()
    }

    /// Total number of tasks across all days.
    pub fn len(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }
}

fn breaks_line_format(field: &str) -> bool {
    field.contains([SEPARATOR, '\n', '\r'])
}

fn parse_line(line: &str) -> Result<(DateKey, TaskItem), SkipReason> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let parts: Vec<&str> = line.split(SEPARATOR).collect();
    if parts.len() != FIELD_COUNT {
        return Err(SkipReason::FieldCount(parts.len()));
    }
    if parts.iter().any(|f| breaks_line_format(f)) {
        return Err(SkipReason::LineBreak);
    }
    let date = parts[0].parse::<DateKey>().map_err(|_| SkipReason::BadDate)?;
    Ok((
        date,
        TaskItem {
            name: parts[1].to_string(),
            color: parts[2].to_string(),
            time: parts[3].to_string(),
        },
    ))
}

/// Load the store, falling back to an empty one on failure. The returned
/// message is meant for the user.
pub fn load_or_empty(path: &Path) -> (TaskStore, Option<String>) {
    match TaskStore::load(path) {
        Ok(store) => (store, None),
        Err(e) => {
            warn!(error = %e, "could not load tasks, starting empty");
            (TaskStore::new(), Some(format!("Error loading tasks: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::task::{Meridiem, TaskColor, TaskTime};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn key(y: i32, m: u32, d: u32) -> DateKey {
        DateKey::new(y, m, d).unwrap()
    }

    fn item(name: &str, color: &str, time: &str) -> TaskItem {
        TaskItem {
            name: name.to_string(),
            color: color.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_serialize_single_task() {
        let mut store = TaskStore::new();
        store.add_task(
            key(2024, 3, 5),
            TaskItem::new("Dentist", TaskColor::Red, TaskTime::new(2, 30, Meridiem::Pm).unwrap()),
        );
        assert_eq!(store.serialize(), "2024-03-05|Dentist|#ea4335|2:30 PM\n");
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut store = TaskStore::new();
        let a = item("A", "#ea4335", "9:00 AM");
        let b = item("B", "#34a853", "8:00 AM");
        store.add_task(key(2024, 1, 1), a.clone());
        store.add_task(key(2024, 1, 1), b.clone());
        assert_eq!(store.tasks_for(key(2024, 1, 1)), &[a, b]);
    }

    #[test]
    fn test_absent_date_is_empty() {
        let store = TaskStore::new();
        assert!(store.tasks_for(key(2024, 1, 1)).is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let content = "\
2024-01-01|Standup|#ea4335|9:00 AM
2024-01-01|two fields
2024-01-02|three|fields

2024-01-03|five|fields|are|wrong
not-a-date|Name|#34a853|1:00 PM
2024-01-04|Lunch|#34a853|12:00 PM
";
        let store = TaskStore::parse(content);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.tasks_for(key(2024, 1, 1)),
            &[item("Standup", "#ea4335", "9:00 AM")]
        );
        assert_eq!(
            store.tasks_for(key(2024, 1, 4)),
            &[item("Lunch", "#34a853", "12:00 PM")]
        );
        assert!(store.tasks_for(key(2024, 1, 3)).is_empty());
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        let store = TaskStore::parse("2024-01-01|Gym|#fa7b17|6:15 AM\r\n");
        assert_eq!(store.tasks_for(key(2024, 1, 1)), &[item("Gym", "#fa7b17", "6:15 AM")]);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("tasks.txt");

        let mut store = TaskStore::new();
        store.add_task(key(2024, 3, 5), item("Dentist", "#ea4335", "2:30 PM"));
        store.add_task(key(2024, 3, 5), item("Groceries", "#34a853", "5:45 PM"));
        store.add_task(key(2023, 12, 31), item("Party", "#fa7b17", "11:45 PM"));
        store.save(&path).unwrap();

        let loaded = TaskStore::load(&path).unwrap();
        assert_eq!(loaded, store);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "2023-12-31|Party|#fa7b17|11:45 PM\n\
             2024-03-05|Dentist|#ea4335|2:30 PM\n\
             2024-03-05|Groceries|#34a853|5:45 PM\n"
        );
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.txt");
        fs::write(&path, "2020-01-01|Old|#ea4335|1:00 AM\n").unwrap();

        let mut store = TaskStore::new();
        store.add_task(key(2024, 1, 1), item("New", "#ea4335", "1:00 AM"));
        store.save(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "2024-01-01|New|#ea4335|1:00 AM\n");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::load(&tmp.path().join("absent.txt")).unwrap();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_load_unreadable_file_falls_back_to_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x7c]).unwrap();

        assert!(matches!(TaskStore::load(&path), Err(StoreError::Read { .. })));
        let (store, warning) = load_or_empty(&path);
        assert_eq!(store.len(), 0);
        assert!(warning.unwrap().starts_with("Error loading tasks"));
    }

    #[test]
    fn test_save_leaves_out_task_with_separator_in_name() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.txt");
        let mut store = TaskStore::new();
        store.add_task(key(2024, 1, 1), item("a|b", "#ea4335", "1:00 AM"));
        store.add_task(key(2024, 1, 1), item("Fine", "#ea4335", "2:00 AM"));

        store.save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "2024-01-01|Fine|#ea4335|2:00 AM\n");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_parse_drops_line_with_embedded_carriage_return() {
        let store = TaskStore::parse(
            "2024-01-01|a\rb|#ea4335|1:00 AM\n2024-01-01|Good|#34a853|2:00 PM\n",
        );
        assert_eq!(store.tasks_for(key(2024, 1, 1)), &[item("Good", "#34a853", "2:00 PM")]);
    }

    #[test]
    fn test_stray_carriage_return_does_not_block_later_saves() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.txt");
        fs::write(
            &path,
            "2024-01-01|a\rb|#ea4335|1:00 AM\n2024-01-01|Good|#34a853|2:00 PM\n",
        )
        .unwrap();

        let mut store = TaskStore::load(&path).unwrap();
        store.add_task(key(2024, 1, 2), item("New", "#fa7b17", "3:15 PM"));
        store.save(&path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "2024-01-01|Good|#34a853|2:00 PM\n\
             2024-01-02|New|#fa7b17|3:15 PM\n"
        );
    }

    #[test]
    fn test_line_skip_reasons() {
        assert_eq!(
            parse_line("2024-02-30|Ghost|#ea4335|1:00 AM").unwrap_err(),
            SkipReason::BadDate
        );
        assert_eq!(parse_line("2024-02-01|x|y").unwrap_err(), SkipReason::FieldCount(3));
        assert_eq!(
            parse_line("2024-02-01|a\rb|#ea4335|1:00 AM").unwrap_err(),
            SkipReason::LineBreak
        );
        let (date, task) = parse_line("2024-02-29|Leap|#ea4335|1:00 AM\r").unwrap();
        assert_eq!(date, key(2024, 2, 29));
        assert_eq!(task.time, "1:00 AM");
    }

    #[test]
    fn test_save_into_file_path_parent_fails() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut store = TaskStore::new();
        store.add_task(key(2024, 1, 1), item("A", "#ea4335", "1:00 AM"));
        let err = store.save(&blocker.join("tasks.txt")).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[test]
    fn test_days_with_tasks_filters_by_month() {
        let mut store = TaskStore::new();
        store.add_task(key(2024, 2, 3), item("A", "#ea4335", "1:00 AM"));
        store.add_task(key(2024, 2, 29), item("B", "#ea4335", "1:00 AM"));
        store.add_task(key(2024, 3, 3), item("C", "#ea4335", "1:00 AM"));
        store.add_task(key(2023, 2, 3), item("D", "#ea4335", "1:00 AM"));

        let days = store.days_with_tasks(2024, 2);
        assert_eq!(days, HashSet::from([3, 29]));
    }
}
