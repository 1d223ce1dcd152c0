pub mod calendar;
pub mod classroom;
pub mod models;
pub mod token;

pub use calendar::{CalendarApi, CalendarClient};
pub use classroom::{ClassroomApi, ClassroomClient};
pub use token::TokenManager;
