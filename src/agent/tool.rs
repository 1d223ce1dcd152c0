use super::coerce::{coerce_tool_input, ToolInput};
use crate::assignments;
use crate::google::CalendarApi;
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Error type for the calendar tool.
///
/// Coercion and insert problems are reported through the tool's string output
/// so the agent can relay them; this error only covers the unrepresentable.
#[derive(Debug)]
pub struct CalendarToolError(String);

impl fmt::Display for CalendarToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CalendarToolError {}

/// Arguments for the calendar tool; the mapping may arrive as an object or
/// as text, depending on what the model emitted.
#[derive(Debug, Deserialize)]
pub struct AddToCalendarArgs {
    pub assignments_to_add: ToolInput,
}

/// Tool that adds pending assignments to the user's Google Calendar
pub struct AddAssignmentsToCalendar {
    calendar: Arc<dyn CalendarApi>,
    calendar_id: String,
    timezone: String,
}

impl AddAssignmentsToCalendar {
    pub fn new(calendar: Arc<dyn CalendarApi>, calendar_id: String, timezone: String) -> Self {
        Self {
            calendar,
            calendar_id,
            timezone,
        }
    }
}

impl Tool for AddAssignmentsToCalendar {
    const NAME: &'static str = "add_assignments_to_calendar";

    type Args = AddToCalendarArgs;
    type Output = String;
    type Error = CalendarToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Adds provided assignment data to the Google Calendar. \
                          Use the structured assignment data provided in the context."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "assignments_to_add": {
                        "type": "object",
                        "description": "A dictionary of assignments to add to the calendar. \
                                        Keys are course names, values are objects with a \
                                        'not_submitted' key holding a list of assignment \
                                        objects (each with 'title', 'due_date', 'due_time')."
                    }
                },
                "required": ["assignments_to_add"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let mapping = match coerce_tool_input(args.assignments_to_add) {
            Ok(mapping) => mapping,
            Err(message) => {
                warn!("Calendar tool received unusable input: {}", message);
                return Ok(message);
            }
        };

        info!(
            assignments = mapping.assignment_count(),
            "Calendar tool inserting pending assignments"
        );
        let status = assignments::insert_pending(
            self.calendar.as_ref(),
            &mapping,
            &self.calendar_id,
            &self.timezone,
        )
        .await;

        Ok(format!("Calendar update process finished: {}", status))
    }
}
