use crate::error::AppError;
use crate::model::Task;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct StoredTasks {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct StoredTasksRef<'a> {
    tasks: &'a [Task],
}

pub fn parse_document(content: &str) -> Result<Vec<Task>, AppError> {
    let stored: StoredTasks =
        serde_json::from_str(content).map_err(|err| AppError::format(err.to_string()))?;
    Ok(stored.tasks)
}

pub fn render_document(tasks: &[Task]) -> Result<String, AppError> {
    let stored = StoredTasksRef { tasks };
    let mut content =
        serde_json::to_string_pretty(&stored).map_err(|err| AppError::format(err.to_string()))?;
    content.push('\n');
    Ok(content)
}

pub fn load_tasks(path: &Path) -> Result<Vec<Task>, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(err.kind(), format!("{}: {}", path.display(), err)))?;
    let tasks = parse_document(&content)?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
    Ok(tasks)
}

/// Truncates and rewrites `path`. A crash mid-write can leave a partial file.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    let content = render_document(tasks)?;
    std::fs::write(path, content)
        .map_err(|err| AppError::io(err.kind(), format!("{}: {}", path.display(), err)))?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "saved tasks");
    Ok(())
}

/// Writes a sibling temporary file and renames it over `path`.
pub fn save_tasks_atomic(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    let content = render_document(tasks)?;
    let staging = staging_path(path)?;

    if let Err(err) = std::fs::write(&staging, content) {
        std::fs::remove_file(&staging).ok();
        return Err(AppError::io(
            err.kind(),
            format!("{}: {}", staging.display(), err),
        ));
    }

    if let Err(err) = std::fs::rename(&staging, path) {
        std::fs::remove_file(&staging).ok();
        return Err(AppError::io(
            err.kind(),
            format!("{}: {}", path.display(), err),
        ));
    }

    tracing::debug!(path = %path.display(), count = tasks.len(), "saved tasks atomically");
    Ok(())
}

fn staging_path(path: &Path) -> Result<PathBuf, AppError> {
    let file_name = path.file_name().ok_or_else(|| {
        AppError::invalid_input(format!("{} does not name a file", path.display()))
    })?;
    let mut staging_name = OsString::from(".");
    staging_name.push(file_name);
    staging_name.push(".tmp");
    Ok(path.with_file_name(staging_name))
}
