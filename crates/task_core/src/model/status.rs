use crate::error::AppError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    New,
    InProgress,
    InReview,
    Completed,
    Canceled,
}

/// Variant, stored label, symbolic name.
///
/// The stored labels are what existing task files contain; changing one breaks
/// every file written before the change. Messages quote the label as data
/// inside otherwise English text.
static STATUS_TABLE: [(TaskStatus, &str, &str); 5] = [
    (TaskStatus::New, "Новая", "NEW"),
    (TaskStatus::InProgress, "Выполняется", "IN_PROGRESS"),
    (TaskStatus::InReview, "Ревью", "IN_REVIEW"),
    (TaskStatus::Completed, "Выполнено", "COMPLETED"),
    (TaskStatus::Canceled, "Отменено", "CANCELED"),
];

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::New,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Completed,
        TaskStatus::Canceled,
    ];

    fn entry(self) -> &'static (TaskStatus, &'static str, &'static str) {
        // The table is total over the enum.
        &STATUS_TABLE[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.entry().1
    }

    pub fn name(self) -> &'static str {
        self.entry().2
    }

    pub fn from_label(label: &str) -> Result<Self, AppError> {
        STATUS_TABLE
            .iter()
            .find(|(_, stored, _)| *stored == label)
            .map(|(status, _, _)| *status)
            .ok_or_else(|| AppError::format(format!("unknown status label '{label}'")))
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_uppercase();
        STATUS_TABLE
            .iter()
            .find(|(_, _, name)| *name == wanted)
            .map(|(status, _, _)| *status)
            .ok_or_else(|| AppError::invalid_input(format!("unknown status '{}'", raw.trim())))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
