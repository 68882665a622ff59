use tabled::settings::Color;
use tabled::settings::object::Cell;
use tabled::{Table, Tabled};
use task_core::error::AppError;
use task_core::model::{Task, TaskRecord, TaskStatus, format_timestamp};

const STATUS_COLUMN: usize = 2;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Status changed")]
    status_changed: String,
}

impl TryFrom<&Task> for TaskRow {
    type Error = AppError;

    fn try_from(task: &Task) -> Result<Self, Self::Error> {
        Ok(Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.label(),
            created: format_timestamp(task.created_date)?,
            status_changed: format_timestamp(task.status_changed_date)?,
        })
    }
}

/// Terminal colour per task status. When disabled, text passes through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusStyle {
    enabled: bool,
}

impl StatusStyle {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn color(status: TaskStatus) -> Color {
        match status {
            TaskStatus::New => Color::FG_CYAN,
            TaskStatus::InProgress => Color::FG_YELLOW,
            TaskStatus::InReview => Color::FG_MAGENTA,
            TaskStatus::Completed => Color::FG_GREEN,
            TaskStatus::Canceled => Color::FG_BRIGHT_BLACK,
        }
    }

    pub fn paint(&self, status: TaskStatus, text: &str) -> String {
        if self.enabled {
            Self::color(status).colorize(text)
        } else {
            text.to_string()
        }
    }
}

pub fn render_task_table(tasks: &[Task], style: StatusStyle) -> Result<String, AppError> {
    let rows = tasks
        .iter()
        .map(TaskRow::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let mut table = Table::new(rows);

    if style.enabled {
        // Row 0 is the header.
        for (index, task) in tasks.iter().enumerate() {
            table.modify(
                Cell::new(index + 1, STATUS_COLUMN),
                StatusStyle::color(task.status),
            );
        }
    }

    Ok(table.to_string())
}

pub fn render_tasks_json(tasks: &[Task]) -> Result<String, AppError> {
    let records = tasks
        .iter()
        .map(Task::to_record)
        .collect::<Result<Vec<TaskRecord>, _>>()?;
    serde_json::to_string(&records).map_err(|err| AppError::format(err.to_string()))
}

pub fn render_task_json(task: &Task) -> Result<String, AppError> {
    serde_json::to_string(&task.to_record()?).map_err(|err| AppError::format(err.to_string()))
}
