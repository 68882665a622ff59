//! In-memory task collection with an action history.
//!
//! Tasks are looked up by title with a linear scan. Titles are not unique:
//! status changes always apply to the first task carrying the title.
//! The history is never written to the task file.

use crate::error::AppError;
use crate::model::{Clock, SystemClock, Task, TaskStatus};
use crate::storage::json_store;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct TaskStore<C: Clock = SystemClock> {
    tasks: Vec<Task>,
    history: Vec<String>,
    clock: C,
}

impl TaskStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self::from_tasks_with_clock(tasks, SystemClock)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        Self::load_with_clock(path, SystemClock)
    }
}

impl<C: Clock> TaskStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::from_tasks_with_clock(Vec::new(), clock)
    }

    pub fn from_tasks_with_clock(tasks: Vec<Task>, clock: C) -> Self {
        Self {
            tasks,
            history: Vec::new(),
            clock,
        }
    }

    /// Reads the whole file; any bad entry fails the load and nothing is kept.
    pub fn load_with_clock(path: &Path, clock: C) -> Result<Self, AppError> {
        let tasks = json_store::load_tasks(path)?;
        Ok(Self::from_tasks_with_clock(tasks, clock))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn find(&self, title: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.title == title)
    }

    pub fn add_task<T: Into<String>, D: Into<String>>(
        &mut self,
        title: T,
        description: D,
    ) -> &Task {
        let now = self.clock.now();
        let task = Task::new(title, description, TaskStatus::New, now, now);

        tracing::debug!(title = %task.title, "task added");
        self.history.push(format!("Added task: {}", task.title));
        self.tasks.push(task);

        let index = self.tasks.len() - 1;
        &self.tasks[index]
    }

    /// Any status may follow any other.
    pub fn change_status(&mut self, title: &str, status: TaskStatus) -> Result<&Task, AppError> {
        let Some(index) = self.tasks.iter().position(|task| task.title == title) else {
            tracing::warn!(title, "status change for unknown task");
            return Err(AppError::not_found(format!(
                "task with title '{title}' not found"
            )));
        };

        let now = self.clock.now();
        let task = &mut self.tasks[index];
        task.status = status;
        task.status_changed_date = now.max(task.created_date);

        tracing::info!(title, status = status.name(), "task status changed");
        self.history.push(format!(
            "Status of task '{}' changed to '{}'",
            task.title,
            status.label()
        ));

        Ok(&self.tasks[index])
    }

    pub fn cancel_task(&mut self, title: &str) -> Result<&Task, AppError> {
        self.change_status(title, TaskStatus::Canceled)
    }

    /// Writes every task, in order, to `path`. History is not written.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        json_store::save_tasks(path, &self.tasks)
    }

    /// Like [`TaskStore::save`], but replaces `path` through a rename.
    pub fn save_atomic(&self, path: &Path) -> Result<(), AppError> {
        json_store::save_tasks_atomic(path, &self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::model::{ManualClock, Task, TaskStatus};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};
    use time::Duration;
    use time::macros::datetime;

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("task-tracker-{nanos}-{file_name}"))
    }

    fn store_at_noon() -> (TaskStore<ManualClock>, ManualClock) {
        let clock = ManualClock::new(datetime!(2025-12-20 12:00:00));
        (TaskStore::with_clock(clock.clone()), clock)
    }

    #[test]
    fn add_task_uses_defaults() {
        let (mut store, _clock) = store_at_noon();

        let task = store.add_task("Write spec", "first draft").clone();

        assert_eq!(task.title, "Write spec");
        assert_eq!(task.description, "first draft");
        assert_eq!(task.status, TaskStatus::New);
        assert_eq!(task.created_date, datetime!(2025-12-20 12:00:00));
        assert_eq!(task.status_changed_date, task.created_date);
        assert_eq!(store.history(), ["Added task: Write spec"]);
    }

    #[test]
    fn add_task_is_never_rejected() {
        let (mut store, _clock) = store_at_noon();

        store.add_task("same", "");
        store.add_task("same", "");
        store.add_task("", "");

        assert_eq!(store.len(), 3);
        assert_eq!(store.history().len(), 3);
    }

    #[test]
    fn add_task_preserves_insertion_order() {
        let mut store = TaskStore::new();
        for title in ["c", "a", "b"] {
            store.add_task(title, "");
        }

        let titles: Vec<&str> = store.tasks().iter().map(|task| task.title.as_str()).collect();
        assert_eq!(titles, ["c", "a", "b"]);
    }

    #[test]
    fn change_status_updates_first_match_only() {
        let (mut store, clock) = store_at_noon();
        store.add_task("other", "");
        store.add_task("dup", "first");
        store.add_task("dup", "second");
        let before = store.tasks().to_vec();

        clock.advance(Duration::hours(2));
        let updated = store.change_status("dup", TaskStatus::InProgress).unwrap().clone();

        assert_eq!(updated.description, "first");
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.status_changed_date, datetime!(2025-12-20 14:00:00));
        assert_eq!(updated.created_date, before[1].created_date);

        assert_eq!(store.tasks()[0], before[0]);
        assert_eq!(store.tasks()[2], before[2]);
        assert_eq!(
            store.history().last().map(String::as_str),
            Some("Status of task 'dup' changed to 'Выполняется'")
        );
    }

    #[test]
    fn history_quotes_stored_label_inside_english_text() {
        let (mut store, _clock) = store_at_noon();
        store.add_task("demo", "");

        for status in TaskStatus::ALL {
            store.change_status("demo", status).unwrap();
            let expected = format!("Status of task 'demo' changed to '{}'", status.label());
            assert_eq!(store.history().last(), Some(&expected));
        }
    }

    #[test]
    fn change_status_on_missing_title_leaves_store_untouched() {
        let (mut store, clock) = store_at_noon();
        store.add_task("Write spec", "");
        let before = store.tasks().to_vec();

        clock.advance(Duration::minutes(1));
        let err = store.change_status("write spec", TaskStatus::Completed).unwrap_err();

        assert_eq!(err.code(), "not_found");
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn any_transition_is_allowed() {
        let (mut store, _clock) = store_at_noon();
        store.add_task("t", "");

        for status in [
            TaskStatus::Completed,
            TaskStatus::New,
            TaskStatus::Canceled,
            TaskStatus::New,
            TaskStatus::InReview,
        ] {
            let task = store.change_status("t", status).unwrap();
            assert_eq!(task.status, status);
        }
    }

    #[test]
    fn change_status_never_moves_before_creation() {
        let (mut store, clock) = store_at_noon();
        store.add_task("t", "");

        clock.set(datetime!(2025-12-19 08:00:00));
        let task = store.change_status("t", TaskStatus::InReview).unwrap();

        assert_eq!(task.status_changed_date, task.created_date);
    }

    #[test]
    fn cancel_matches_change_status_to_canceled() {
        let (mut cancelled, clock_a) = store_at_noon();
        let (mut changed, clock_b) = store_at_noon();
        for store in [&mut cancelled, &mut changed] {
            store.add_task("a", "x");
            store.add_task("b", "y");
        }
        clock_a.advance(Duration::seconds(30));
        clock_b.advance(Duration::seconds(30));

        cancelled.cancel_task("b").unwrap();
        changed.change_status("b", TaskStatus::Canceled).unwrap();

        assert_eq!(cancelled.tasks(), changed.tasks());
        assert_eq!(cancelled.history(), changed.history());

        let err = cancelled.cancel_task("missing").unwrap_err();
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn find_returns_first_match() {
        let (mut store, _clock) = store_at_noon();
        store.add_task("dup", "first");
        store.add_task("dup", "second");

        assert_eq!(store.find("dup").map(|task| task.description.as_str()), Some("first"));
        assert!(store.find("none").is_none());
    }

    #[test]
    fn save_then_load_reproduces_tasks_without_history() {
        let path = temp_path("store-round-trip.json");
        let (mut store, clock) = store_at_noon();
        store.add_task("Write spec", "outline");
        store.add_task("Review", "");
        clock.advance(Duration::minutes(3));
        store.change_status("Write spec", TaskStatus::InProgress).unwrap();

        store.save(&path).unwrap();
        let loaded = TaskStore::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.tasks(), store.tasks());
        assert!(loaded.history().is_empty());
    }

    #[test]
    fn changed_status_survives_save_and_load() {
        let path = temp_path("store-scenario.json");
        let mut store = TaskStore::from_tasks(vec![Task::new(
            "Write spec",
            "describe the store",
            TaskStatus::New,
            datetime!(2025-12-01 09:00:00),
            datetime!(2025-12-01 09:00:00),
        )]);

        store.change_status("Write spec", TaskStatus::InProgress).unwrap();
        store.save(&path).unwrap();
        let loaded = TaskStore::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.len(), 1);
        let task = &loaded.tasks()[0];
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.title, "Write spec");
        assert_eq!(task.description, "describe the store");
        assert_eq!(task.created_date, datetime!(2025-12-01 09:00:00));
    }

    #[test]
    fn atomic_save_round_trip() {
        let path = temp_path("store-atomic.json");
        let (mut store, _clock) = store_at_noon();
        store.add_task("a", "");

        store.save_atomic(&path).unwrap();
        let loaded = TaskStore::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.tasks(), store.tasks());
    }

    #[test]
    fn load_with_bad_entry_fails() {
        let path = temp_path("store-bad.json");
        let content = "{\n  \"tasks\": [\n    {\n      \"title\": \"t\",\n      \"description\": \"\",\n      \"status\": \"Новая\",\n      \"created_date\": \"2025-12-20 00:00:00\",\n      \"status_changed_date\": \"yesterday\"\n    }\n  ]\n}";
        fs::write(&path, content).unwrap();

        let err = TaskStore::load(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "format_error");
    }

    #[test]
    fn load_without_tasks_key_is_empty() {
        let path = temp_path("store-no-tasks.json");
        fs::write(&path, "{}").unwrap();

        let loaded = TaskStore::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(loaded.is_empty());
    }
}
