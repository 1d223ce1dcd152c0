pub mod coerce;
pub mod tool;

use crate::assignments::PendingMapping;
use crate::error::{agent_error, AppResult};
use crate::google::CalendarApi;
use rig::completion::{AssistantContent, Completion, Message};
use rig::message::{ToolResultContent, UserContent};
use rig::providers::gemini::Client as GeminiClient;
use rig::tool::Tool;
use rig::OneOrMany;
use std::sync::Arc;
use tool::{AddAssignmentsToCalendar, AddToCalendarArgs};
use tracing::{info, warn};

/// Hard cap on reasoning/tool steps per user turn
const MAX_AGENT_ITERATIONS: usize = 5;

/// Sampling temperature for the chat agent
const AGENT_TEMPERATURE: f64 = 0.2;

const SYSTEM_PROMPT_TEMPLATE: &str = "You are a helpful Google Classroom and Calendar assistant.
The Current Date is {current_date}.

Instructions:
1. Use the assignment summary context below together with the Current Date to answer \
questions about assignments (e.g. \"what are my assignments?\", \"what's due today?\", \
\"what was due yesterday?\"). If you are answering from the context, you can say so, \
for example: \"Based on your last fetched assignments and today's date ({current_date}): ...\"

2. If the user asks to add assignments to the calendar, you MUST use the \
'add_assignments_to_calendar' tool. The 'assignments_to_add' argument for the tool MUST BE \
EXACTLY the structured assignment data below. The tool expects 'assignments_to_add' as a \
JSON dictionary object; do NOT provide it as a string.
Example of the structure for 'assignments_to_add':
{\"Course Name 1\": {\"not_submitted\": [{\"title\": \"HW1\", \"due_date\": \"YYYY-MM-DD\", \"due_time\": \"HH:MM\"}]}, \"Course Name 2\": ...}

Structured assignment data for calendar operations:
{structured_assignments}

Assignment Summary Context to refer to:
{assignment_context}
";

/// Conversational agent over the Gemini API with the calendar tool attached.
///
/// Whether a turn is answered from context or routed through the tool is
/// entirely the model's decision; this side only caps the number of steps.
pub struct AssignmentAgent {
    client: GeminiClient,
    model: String,
    calendar: Arc<dyn CalendarApi>,
    calendar_id: String,
    timezone: String,
}

impl AssignmentAgent {
    pub fn new(
        api_key: &str,
        model: String,
        calendar: Arc<dyn CalendarApi>,
        calendar_id: String,
        timezone: String,
    ) -> Self {
        Self {
            client: GeminiClient::new(api_key),
            model,
            calendar,
            calendar_id,
            timezone,
        }
    }

    /// Run one conversational turn: the query plus prior history, with the
    /// current assignment context injected into the system prompt.
    pub async fn respond(
        &self,
        query: &str,
        chat_history: Vec<Message>,
        assignment_context: &str,
        pending: &PendingMapping,
        current_date: &str,
    ) -> AppResult<String> {
        let structured_json = serde_json::to_string(pending)
            .unwrap_or_else(|_| String::from("{}"));

        let preamble = SYSTEM_PROMPT_TEMPLATE
            .replace("{current_date}", current_date)
            .replace("{structured_assignments}", &structured_json)
            .replace("{assignment_context}", assignment_context);

        let calendar_tool = AddAssignmentsToCalendar::new(
            Arc::clone(&self.calendar),
            self.calendar_id.clone(),
            self.timezone.clone(),
        );

        let agent = self
            .client
            .agent(&self.model)
            .preamble(&preamble)
            .temperature(AGENT_TEMPERATURE)
            .tool(AddAssignmentsToCalendar::new(
                Arc::clone(&self.calendar),
                self.calendar_id.clone(),
                self.timezone.clone(),
            ))
            .build();

        let mut history = chat_history;
        let mut prompt = Message::user(query);

        for iteration in 0..MAX_AGENT_ITERATIONS {
            let response = agent
                .completion(prompt.clone(), history.clone())
                .await
                .map_err(|e| agent_error(&format!("Completion request failed: {}", e)))?
                .send()
                .await
                .map_err(|e| agent_error(&format!("Model call failed: {}", e)))?;

            match response.choice.first() {
                AssistantContent::Text(text) => {
                    info!(iteration, "Agent produced final answer");
                    return Ok(text.text);
                }
                AssistantContent::ToolCall(tool_call) => {
                    info!(
                        iteration,
                        tool = %tool_call.function.name,
                        "Agent invoked tool"
                    );
                    let result = if tool_call.function.name == AddAssignmentsToCalendar::NAME {
                        match serde_json::from_value::<AddToCalendarArgs>(
                            tool_call.function.arguments.clone(),
                        ) {
                            Ok(args) => calendar_tool
                                .call(args)
                                .await
                                .map_err(|e| agent_error(&format!("Tool call failed: {}", e)))?,
                            Err(e) => {
                                format!("Error: could not parse tool arguments: {}", e)
                            }
                        }
                    } else {
                        format!("Error: unknown tool '{}'.", tool_call.function.name)
                    };

                    history.push(prompt);
                    history.push(Message::Assistant {
                        content: OneOrMany::one(AssistantContent::ToolCall(tool_call.clone())),
                    });
                    prompt = Message::User {
                        content: OneOrMany::one(UserContent::tool_result(
                            tool_call.id,
                            OneOrMany::one(ToolResultContent::text(result)),
                        )),
                    };
                }
            }
        }

        warn!("Agent exceeded {} iterations", MAX_AGENT_ITERATIONS);
        Err(agent_error(
            "I encountered an issue processing that request. Please try rephrasing.",
        ))
    }
}
