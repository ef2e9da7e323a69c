mod record;
mod selection;

pub use record::{percent_of, Record};
pub use selection::{ContinentFilter, DateRange, SelectionState};
