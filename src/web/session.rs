use crate::assignments::PendingMapping;
use crate::google::{CalendarApi, ClassroomApi};
use rig::completion::Message;
use serde::Serialize;
use std::sync::Arc;

/// Placeholder context before the first successful fetch
pub const NO_ASSIGNMENTS_YET: &str = "No assignments fetched yet. Please log in or refresh.";

/// Google API clients bound to one logged-in session
#[derive(Clone)]
pub struct GoogleServices {
    pub classroom: Arc<dyn ClassroomApi>,
    pub calendar: Arc<dyn CalendarApi>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Assistant,
}

/// One entry in the chat transcript
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// Per-session context: assignment cache plus chat transcript.
///
/// The assignment summary and pending mapping are replaced wholesale on each
/// successful refresh and left untouched when a fetch fails.
pub struct Session {
    pub services: Option<GoogleServices>,
    pub summary_context: String,
    pub pending: PendingMapping,
    pub transcript: Vec<ChatTurn>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            services: None,
            summary_context: String::from(NO_ASSIGNMENTS_YET),
            pending: PendingMapping::new(),
            transcript: Vec::new(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.services.is_some()
    }

    /// Replace the assignment cache after a successful fetch
    pub fn replace_assignments(&mut self, summary: String, pending: PendingMapping) {
        self.summary_context = summary;
        self.pending = pending;
    }

    pub fn push_turn(&mut self, role: Role, content: String) {
        self.transcript.push(ChatTurn { role, content });
    }

    /// Convert the transcript into model messages for the agent
    pub fn history_messages(&self) -> Vec<Message> {
        self.transcript
            .iter()
            .map(|turn| match turn.role {
                Role::Human => Message::user(turn.content.clone()),
                Role::Assistant => Message::assistant(turn.content.clone()),
            })
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_replaces_assignment_state_wholesale() {
        let mut session = Session::new();
        assert_eq!(session.summary_context, NO_ASSIGNMENTS_YET);

        session.replace_assignments(String::from("summary one"), PendingMapping::new());
        assert_eq!(session.summary_context, "summary one");

        session.replace_assignments(String::from("summary two"), PendingMapping::new());
        assert_eq!(session.summary_context, "summary two");
    }

    #[test]
    fn transcript_maps_to_history_messages() {
        let mut session = Session::new();
        session.push_turn(Role::Human, String::from("hello"));
        session.push_turn(Role::Assistant, String::from("hi there"));
        assert_eq!(session.history_messages().len(), 2);
    }
}
