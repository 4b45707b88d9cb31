mod query;
mod store;
mod time;
mod types;

pub use query::status_text;
pub use store::ScheduleStore;
pub use time::{Clock, SystemClock, TimeOfDay, MINUTES_PER_DAY};
pub use types::TimeBlock;
