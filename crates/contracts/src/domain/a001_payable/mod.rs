pub mod aggregate;
pub mod dto;
pub mod filter;
pub mod input;
pub mod payment;
pub mod stats;

pub use aggregate::{PayableRecord, PayableStatus, RecurrenceFrequency};
pub use dto::{normalize_all, PayableRecordDto};
pub use filter::{DateRange, PayableFilter};
pub use input::PayableInput;
pub use payment::PayRequest;
pub use stats::{PayableStats, PayableStatsDto};
