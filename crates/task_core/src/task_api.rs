use crate::error::AppError;
use crate::model::{Clock, SystemClock, Task, TaskStatus};
use crate::storage::json_store;
use crate::store::TaskStore;
use std::path::Path;

/// How a store is written back to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveMode {
    #[default]
    Overwrite,
    Atomic,
}

/// Loads `path`, treating a missing file as an empty store.
pub fn open_store(path: &Path) -> Result<TaskStore, AppError> {
    open_store_with_clock(path, SystemClock)
}

fn open_store_with_clock<C: Clock>(path: &Path, clock: C) -> Result<TaskStore<C>, AppError> {
    match json_store::load_tasks(path) {
        Ok(tasks) => Ok(TaskStore::from_tasks_with_clock(tasks, clock)),
        Err(err) if err.is_not_found_io() => {
            tracing::debug!(path = %path.display(), "task file missing, starting empty");
            Ok(TaskStore::with_clock(clock))
        }
        Err(err) => Err(err),
    }
}

pub fn write_store<C: Clock>(
    store: &TaskStore<C>,
    path: &Path,
    mode: SaveMode,
) -> Result<(), AppError> {
    match mode {
        SaveMode::Overwrite => store.save(path),
        SaveMode::Atomic => store.save_atomic(path),
    }
}

/// Trimmed title for a new task; blank input is refused.
pub fn normalize_title(raw: &str) -> Result<&str, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("title is required"));
    }
    Ok(trimmed)
}

pub fn list_tasks(path: &Path) -> Result<Vec<Task>, AppError> {
    Ok(open_store(path)?.tasks().to_vec())
}

pub fn add_task(
    path: &Path,
    title: &str,
    description: &str,
    mode: SaveMode,
) -> Result<Task, AppError> {
    add_task_with_clock(path, title, description, mode, SystemClock)
}

fn add_task_with_clock<C: Clock>(
    path: &Path,
    title: &str,
    description: &str,
    mode: SaveMode,
    clock: C,
) -> Result<Task, AppError> {
    let title = normalize_title(title)?;
    let mut store = open_store_with_clock(path, clock)?;
    let task = store.add_task(title, description).clone();
    write_store(&store, path, mode)?;

    Ok(task)
}

pub fn change_status(
    path: &Path,
    title: &str,
    status: TaskStatus,
    mode: SaveMode,
) -> Result<Task, AppError> {
    change_status_with_clock(path, title, status, mode, SystemClock)
}

fn change_status_with_clock<C: Clock>(
    path: &Path,
    title: &str,
    status: TaskStatus,
    mode: SaveMode,
    clock: C,
) -> Result<Task, AppError> {
    let mut store = open_store_with_clock(path, clock)?;
    let task = store.change_status(title, status)?.clone();
    write_store(&store, path, mode)?;

    Ok(task)
}

pub fn cancel_task(path: &Path, title: &str, mode: SaveMode) -> Result<Task, AppError> {
    change_status(path, title, TaskStatus::Canceled, mode)
}
