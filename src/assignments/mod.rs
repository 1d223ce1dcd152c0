pub mod aggregator;
pub mod events;
pub mod models;
pub mod time;

pub use aggregator::{coursework_summary, is_submitted, pending_assignments};
pub use events::insert_pending;
pub use models::{CourseBucket, PendingAssignment, PendingMapping, NOT_AVAILABLE};
