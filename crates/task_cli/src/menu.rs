use crate::render::{StatusStyle, render_task_table};
use std::io::{BufRead, Write};
use task_core::error::AppError;
use task_core::model::{Clock, TaskStatus};
use task_core::store::TaskStore;
use task_core::task_api::normalize_title;

const MENU: [&str; 7] = [
    "1. Add task",
    "2. Change task status",
    "3. Cancel task",
    "4. Save and exit",
    "5. Exit without saving",
    "6. List tasks",
    "7. Show history",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    SaveAndExit,
    ExitWithoutSave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    ChangeStatus,
    Cancel,
    SaveAndExit,
    Exit,
    List,
    History,
}

impl MenuChoice {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::ChangeStatus),
            "3" => Some(Self::Cancel),
            "4" => Some(Self::SaveAndExit),
            "5" => Some(Self::Exit),
            "6" => Some(Self::List),
            "7" => Some(Self::History),
            _ => None,
        }
    }
}

/// Interactive loop over a store. Saving is left to the caller.
pub struct Menu<R, W, E> {
    input: R,
    output: W,
    errors: E,
    style: StatusStyle,
}

impl<R: BufRead, W: Write, E: Write> Menu<R, W, E> {
    pub fn new(input: R, output: W, errors: E, style: StatusStyle) -> Self {
        Self {
            input,
            output,
            errors,
            style,
        }
    }

    pub fn run<C: Clock>(&mut self, store: &mut TaskStore<C>) -> Result<MenuOutcome, AppError> {
        loop {
            writeln!(self.output)?;
            for line in MENU {
                writeln!(self.output, "{line}")?;
            }

            let Some(raw) = self.prompt("Choose an action (1-7): ")? else {
                return Ok(MenuOutcome::ExitWithoutSave);
            };

            let Some(choice) = MenuChoice::parse(&raw) else {
                writeln!(self.output, "Invalid choice. Try again.")?;
                continue;
            };

            let step = match choice {
                MenuChoice::SaveAndExit => return Ok(MenuOutcome::SaveAndExit),
                MenuChoice::Exit => return Ok(MenuOutcome::ExitWithoutSave),
                MenuChoice::Add => self.add(store),
                MenuChoice::ChangeStatus => self.change_status(store),
                MenuChoice::Cancel => self.cancel(store),
                MenuChoice::List => self.list(store),
                MenuChoice::History => self.history(store),
            };

            match step {
                Ok(true) => {}
                Ok(false) => return Ok(MenuOutcome::ExitWithoutSave),
                Err(err @ AppError::Io { .. }) => return Err(err),
                Err(err) => writeln!(self.errors, "ERROR: {err}")?,
            }
        }
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn add<C: Clock>(&mut self, store: &mut TaskStore<C>) -> Result<bool, AppError> {
        let Some(raw_title) = self.prompt("Task title: ")? else {
            return Ok(false);
        };
        let title = normalize_title(&raw_title)?;
        let Some(description) = self.prompt("Task description: ")? else {
            return Ok(false);
        };

        let task = store.add_task(title, description);
        let message = format!("Task '{}' added.", task.title);
        writeln!(self.output, "{}", self.style.paint(task.status, &message))?;
        Ok(true)
    }

    fn change_status<C: Clock>(&mut self, store: &mut TaskStore<C>) -> Result<bool, AppError> {
        let Some(title) = self.prompt("Task title: ")? else {
            return Ok(false);
        };
        let names: Vec<&str> = TaskStatus::ALL.iter().map(|status| status.name()).collect();
        let Some(raw_status) = self.prompt(&format!("New status ({}): ", names.join(", ")))?
        else {
            return Ok(false);
        };

        let status: TaskStatus = raw_status.parse()?;
        let task = store.change_status(&title, status)?;
        let message = format!(
            "Status of task '{}' changed to '{}'.",
            task.title,
            task.status.label()
        );
        writeln!(self.output, "{}", self.style.paint(task.status, &message))?;
        Ok(true)
    }

    fn cancel<C: Clock>(&mut self, store: &mut TaskStore<C>) -> Result<bool, AppError> {
        let Some(title) = self.prompt("Task title: ")? else {
            return Ok(false);
        };

        let task = store.cancel_task(&title)?;
        let message = format!("Task '{}' canceled.", task.title);
        writeln!(self.output, "{}", self.style.paint(task.status, &message))?;
        Ok(true)
    }

    fn list<C: Clock>(&mut self, store: &TaskStore<C>) -> Result<bool, AppError> {
        if store.is_empty() {
            writeln!(self.output, "No tasks.")?;
        } else {
            let table = render_task_table(store.tasks(), self.style)?;
            writeln!(self.output, "{table}")?;
        }
        Ok(true)
    }

    fn history<C: Clock>(&mut self, store: &TaskStore<C>) -> Result<bool, AppError> {
        if store.history().is_empty() {
            writeln!(self.output, "No actions yet.")?;
        }
        for entry in store.history() {
            writeln!(self.output, "{entry}")?;
        }
        Ok(true)
    }
}
