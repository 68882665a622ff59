pub mod status;
pub mod task;
pub mod timestamp;

pub use status::TaskStatus;
pub use task::{Task, TaskRecord};
pub use timestamp::{Clock, ManualClock, SystemClock, Timestamp, format_timestamp, parse_timestamp};
