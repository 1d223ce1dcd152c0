use super::models::{CourseBucket, PendingAssignment, PendingMapping, NOT_AVAILABLE};
use super::time::{calendar_due_time, format_due_date, format_due_time};
use crate::error::AppResult;
use crate::google::models::StudentSubmission;
use crate::google::ClassroomApi;
use tracing::debug;

/// Submission states that count as submitted
const SUBMITTED_STATES: [&str; 2] = ["TURNED_IN", "RETURNED"];

/// Classify a coursework item from the current user's submissions.
///
/// Only the first submission record is consulted; a missing record or missing
/// state counts as not submitted.
pub fn is_submitted(submissions: &[StudentSubmission]) -> bool {
    submissions
        .first()
        .and_then(|s| s.state.as_deref())
        .map(|state| SUBMITTED_STATES.contains(&state))
        .unwrap_or(false)
}

/// Walk all courses and produce the narrative summary used as agent context.
///
/// Every coursework item appears in either the Submitted or Not Submitted
/// section of its course; missing date or time components render as `N/A`.
pub async fn coursework_summary(api: &dyn ClassroomApi) -> AppResult<String> {
    let courses = api.list_courses().await?;
    if courses.is_empty() {
        return Ok(String::from("No courses found in your Google Classroom."));
    }

    let mut summary_parts = Vec::new();

    for course in &courses {
        let coursework = api.list_coursework(&course.id).await?;
        if coursework.is_empty() {
            continue;
        }

        let mut submitted = Vec::new();
        let mut not_submitted = Vec::new();

        for work in &coursework {
            let title = work.title.as_deref().unwrap_or("No Title");
            let date_str = format_due_date(work.due_date.as_ref())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            let time_str = format_due_time(work.due_time.as_ref())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());

            let submissions = api.list_submissions(&course.id, &work.id, "me").await?;
            let status = submissions
                .first()
                .and_then(|s| s.state.as_deref())
                .map(|state| format!("Status: {}", state))
                .unwrap_or_else(|| String::from("Status: NOT_SUBMITTED (no submission record)"));

            let line = format!("- {} | Due: {} at {} | {}", title, date_str, time_str, status);
            if is_submitted(&submissions) {
                submitted.push(line);
            } else {
                not_submitted.push(line);
            }
        }

        if submitted.is_empty() && not_submitted.is_empty() {
            continue;
        }

        let mut course_summary = format!("**{}**\n", course.name);
        if !submitted.is_empty() {
            course_summary.push_str("\nSubmitted Assignments:\n");
            course_summary.push_str(&submitted.join("\n"));
            course_summary.push('\n');
        }
        if !not_submitted.is_empty() {
            course_summary.push_str("\nNot Submitted Assignments:\n");
            course_summary.push_str(&not_submitted.join("\n"));
            course_summary.push('\n');
        }
        summary_parts.push(course_summary);
    }

    if summary_parts.is_empty() {
        return Ok(String::from(
            "No assignments found in your Google Classroom courses.",
        ));
    }

    Ok(summary_parts.join("\n"))
}

/// Walk all courses and collect calendar-eligible pending assignments.
///
/// Items without a complete due date are skipped; a missing due time becomes
/// the end-of-day default so every mapping entry is ready for event creation.
pub async fn pending_assignments(api: &dyn ClassroomApi) -> AppResult<PendingMapping> {
    let courses = api.list_courses().await?;
    let mut mapping = PendingMapping::new();

    for course in &courses {
        let coursework = api.list_coursework(&course.id).await?;
        if coursework.is_empty() {
            continue;
        }

        let mut bucket = CourseBucket::default();

        for work in &coursework {
            let Some(date_str) = format_due_date(work.due_date.as_ref()) else {
                debug!(course = %course.name, work = %work.id, "Skipping item without complete due date");
                continue;
            };

            let submissions = api.list_submissions(&course.id, &work.id, "me").await?;
            if is_submitted(&submissions) {
                continue;
            }

            bucket.not_submitted.push(PendingAssignment {
                title: work.title.clone().unwrap_or_else(|| String::from("No Title")),
                due_date: date_str,
                due_time: calendar_due_time(work.due_time.as_ref()),
            });
        }

        if !bucket.not_submitted.is_empty() {
            mapping.insert(course.name.clone(), bucket);
        }
    }

    Ok(mapping)
}
