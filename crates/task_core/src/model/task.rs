use crate::error::AppError;
use crate::model::status::TaskStatus;
use crate::model::timestamp::{Timestamp, format_timestamp, parse_timestamp};
use serde::{Deserialize, Serialize, Serializer};

/// Plain structured form of a task, exactly as it appears in the task file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_date: String,
    pub status_changed_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_date: Timestamp,
    pub status_changed_date: Timestamp,
}

impl Task {
    pub fn new<T: Into<String>, D: Into<String>>(
        title: T,
        description: D,
        status: TaskStatus,
        created_date: Timestamp,
        status_changed_date: Timestamp,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status,
            created_date,
            status_changed_date,
        }
    }

    pub fn to_record(&self) -> Result<TaskRecord, AppError> {
        Ok(TaskRecord {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.label().to_string(),
            created_date: format_timestamp(self.created_date)?,
            status_changed_date: format_timestamp(self.status_changed_date)?,
        })
    }

    pub fn from_record(record: TaskRecord) -> Result<Self, AppError> {
        let status = TaskStatus::from_label(&record.status)?;
        let created_date = parse_timestamp(&record.created_date)?;
        let status_changed_date = parse_timestamp(&record.status_changed_date)?;

        Ok(Self {
            title: record.title,
            description: record.description,
            status,
            created_date,
            status_changed_date,
        })
    }
}

impl Serialize for Task {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record()
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = AppError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        Task::from_record(record)
    }
}
