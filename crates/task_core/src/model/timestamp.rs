use crate::error::AppError;
use std::cell::Cell;
use std::rc::Rc;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Naive local date-time at whole-second precision.
pub type Timestamp = PrimitiveDateTime;

/// `YYYY-MM-DD HH:MM:SS`, shared by both directions of the codec.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Years outside `0000..=9999` have no four-digit rendering and are refused.
pub fn format_timestamp(value: Timestamp) -> Result<String, AppError> {
    if !(0..=9999).contains(&value.year()) {
        return Err(AppError::format(format!(
            "year {} cannot be written as four digits",
            value.year()
        )));
    }

    value
        .format(TIMESTAMP_FORMAT)
        .map_err(|err| AppError::format(format!("cannot format timestamp: {err}")))
}

pub fn parse_timestamp(raw: &str) -> Result<Timestamp, AppError> {
    if !raw.starts_with(|ch: char| ch.is_ascii_digit()) {
        return Err(AppError::format(format!(
            "invalid timestamp '{raw}': expected YYYY-MM-DD HH:MM:SS"
        )));
    }

    PrimitiveDateTime::parse(raw, TIMESTAMP_FORMAT)
        .map_err(|err| AppError::format(format!("invalid timestamp '{raw}': {err}")))
}

fn truncate_to_second(value: Timestamp) -> Timestamp {
    value.replace_nanosecond(0).unwrap_or(value)
}

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock in the local offset, or UTC when the offset cannot be read.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        let local = OffsetDateTime::now_utc().to_offset(offset);
        truncate_to_second(PrimitiveDateTime::new(local.date(), local.time()))
    }
}

/// Settable clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(truncate_to_second(start))),
        }
    }

    pub fn set(&self, value: Timestamp) {
        self.now.set(truncate_to_second(value));
    }

    pub fn advance(&self, by: Duration) {
        self.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}
