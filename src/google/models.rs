use serde::{Deserialize, Serialize};

/// One Classroom course as returned by `courses.list`
#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
}

/// A partial due date; the API omits components it does not know
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DueDate {
    pub year: Option<u32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// A partial due time in the course's timezone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeOfDay {
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
}

/// One coursework item (assignment) from `courseWork.list`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWork {
    pub id: String,
    pub title: Option<String>,
    pub due_date: Option<DueDate>,
    pub due_time: Option<TimeOfDay>,
}

/// The current user's submission for a coursework item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentSubmission {
    pub state: Option<String>,
}

/// Response envelope for `courses.list`
#[derive(Debug, Default, Deserialize)]
pub struct CourseListResponse {
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// Response envelope for `courseWork.list`
#[derive(Debug, Default, Deserialize)]
pub struct CourseWorkListResponse {
    #[serde(default, rename = "courseWork")]
    pub course_work: Vec<CourseWork>,
}

/// Response envelope for `studentSubmissions.list`
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionListResponse {
    #[serde(default, rename = "studentSubmissions")]
    pub student_submissions: Vec<StudentSubmission>,
}

/// Timestamp with timezone for one end of a calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// Calendar insert payload for one assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
}
