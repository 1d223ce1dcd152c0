use super::models::{PendingAssignment, PendingMapping, NOT_AVAILABLE};
use crate::google::models::{EventPayload, EventTime};
use crate::google::CalendarApi;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use tracing::{info, warn};

/// Events are one hour long, anchored at the parsed due datetime
const EVENT_DURATION_HOURS: i64 = 1;

/// How many per-item outcome lines are surfaced in the combined status string
const STATUS_LINE_LIMIT: usize = 3;

/// Result of turning one pending assignment into an event payload
enum BuiltEvent {
    Ready(EventPayload),
    /// Built via the date-only fallback; carries a warning line
    ReadyWithWarning(EventPayload, String),
    Skipped(String),
}

/// Parse the due datetime, substituting defaults per the layered fallbacks:
/// a missing or malformed time becomes 23:59 before the combined parse, and a
/// failed combined parse falls back to a date-only parse at noon.
fn parse_due_datetime(date_str: &str, time_str: &str) -> Result<(NaiveDateTime, Option<String>), String> {
    let time_str = if time_str.is_empty() || time_str == NOT_AVAILABLE || !time_str.contains(':') {
        "23:59"
    } else {
        time_str
    };

    let combined = format!("{} {}", date_str, time_str);
    match NaiveDateTime::parse_from_str(&combined, "%Y-%m-%d %H:%M") {
        Ok(dt) => Ok((dt, None)),
        Err(parse_err) => match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(date) => {
                let dt = date.and_hms_opt(12, 0, 0).ok_or_else(|| {
                    format!("invalid date '{}'", date_str)
                })?;
                Ok((dt, Some(format!("used default time (noon) after parse error: {}", parse_err))))
            }
            Err(_) => Err(format!("invalid date format: {}", date_str)),
        },
    }
}

/// Build the calendar payload for one assignment, or a skip diagnostic
fn build_event(course: &str, assignment: &PendingAssignment, tz: Tz) -> BuiltEvent {
    let title = &assignment.title;

    if assignment.due_date.is_empty() || assignment.due_date == NOT_AVAILABLE {
        return BuiltEvent::Skipped(format!(
            "Skipped '{}' for course '{}' due to missing date.",
            title, course
        ));
    }

    let (due_datetime, warning) = match parse_due_datetime(&assignment.due_date, &assignment.due_time)
    {
        Ok(parsed) => parsed,
        Err(reason) => {
            return BuiltEvent::Skipped(format!(
                "Skipped '{}' for course '{}': {}",
                title, course, reason
            ));
        }
    };

    let end_datetime = due_datetime + Duration::hours(EVENT_DURATION_HOURS);
    let time_zone = tz.name().to_string();

    let event = EventPayload {
        summary: format!("[{}] {}", course, title),
        description: String::from("Google Classroom Assignment (Pending)"),
        start: EventTime {
            date_time: due_datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
            time_zone: time_zone.clone(),
        },
        end: EventTime {
            date_time: end_datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
            time_zone,
        },
    };

    match warning {
        Some(warning) => BuiltEvent::ReadyWithWarning(
            event,
            format!("Warning: {} for '{}'.", warning, title),
        ),
        None => BuiltEvent::Ready(event),
    }
}

/// Insert one event per pending assignment, continuing past individual
/// failures. Returns a combined status string with the first few outcome
/// lines; every line is also logged.
pub async fn insert_pending(
    api: &dyn CalendarApi,
    mapping: &PendingMapping,
    calendar_id: &str,
    timezone: &str,
) -> String {
    let tz: Tz = timezone.parse().unwrap_or_else(|_| {
        warn!("Unknown timezone '{}', falling back to Asia/Karachi", timezone);
        chrono_tz::Asia::Karachi
    });

    let mut outcomes = Vec::new();

    for (course, bucket) in mapping.iter() {
        for assignment in &bucket.not_submitted {
            let event = match build_event(course, assignment, tz) {
                BuiltEvent::Ready(event) => event,
                BuiltEvent::ReadyWithWarning(event, warning) => {
                    outcomes.push(warning);
                    event
                }
                BuiltEvent::Skipped(reason) => {
                    outcomes.push(reason);
                    continue;
                }
            };

            match api.insert_event(calendar_id, &event).await {
                Ok(()) => outcomes.push(format!(
                    "Successfully added '{}' for course '{}' to calendar.",
                    assignment.title, course
                )),
                Err(e) => outcomes.push(format!(
                    "Failed to add '{}' for course '{}' to calendar: {}",
                    assignment.title, course, e
                )),
            }
        }
    }

    for line in &outcomes {
        info!("{}", line);
    }

    let mut status = String::from("Calendar event creation process finished. ");
    status.push_str(&outcomes[..outcomes.len().min(STATUS_LINE_LIMIT)].join(" "));
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{calendar_error, AppResult};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    /// Records inserted events; fails inserts whose summary contains "FAIL"
    #[derive(Default)]
    struct RecordingCalendar {
        inserted: Mutex<Vec<EventPayload>>,
    }

    impl CalendarApi for RecordingCalendar {
        fn insert_event<'a>(
            &'a self,
            _calendar_id: &'a str,
            event: &'a EventPayload,
        ) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + Sync + 'a>> {
            Box::pin(async move {
                if event.summary.contains("FAIL") {
                    return Err(calendar_error("insert rejected"));
                }
                self.inserted.lock().unwrap().push(event.clone());
                Ok(())
            })
        }
    }

    fn assignment(title: &str, due_date: &str, due_time: &str) -> PendingAssignment {
        PendingAssignment {
            title: title.to_string(),
            due_date: due_date.to_string(),
            due_time: due_time.to_string(),
        }
    }

    fn mapping_of(course: &str, assignments: Vec<PendingAssignment>) -> PendingMapping {
        let mut mapping = PendingMapping::new();
        mapping.insert(
            course.to_string(),
            crate::assignments::models::CourseBucket {
                not_submitted: assignments,
            },
        );
        mapping
    }

    #[tokio::test]
    async fn missing_time_substitutes_end_of_day_not_noon() {
        let api = RecordingCalendar::default();
        let mapping = mapping_of("Math", vec![assignment("HW1", "2024-05-01", "N/A")]);

        let status = insert_pending(&api, &mapping, "primary", "Asia/Karachi").await;

        let inserted = api.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].start.date_time, "2024-05-01T23:59:00");
        assert_eq!(inserted[0].end.date_time, "2024-05-02T00:59:00");
        assert!(status.contains("Successfully added 'HW1'"));
        // The substitution path must not be reported as the noon fallback
        assert!(!status.contains("noon"));
    }

    #[tokio::test]
    async fn malformed_time_with_colon_falls_back_to_noon() {
        let api = RecordingCalendar::default();
        let mapping = mapping_of("Math", vec![assignment("HW2", "2024-05-01", "ab:cd")]);

        insert_pending(&api, &mapping, "primary", "Asia/Karachi").await;

        let inserted = api.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].start.date_time, "2024-05-01T12:00:00");
    }

    #[tokio::test]
    async fn missing_date_is_skipped() {
        let api = RecordingCalendar::default();
        let mapping = mapping_of("Math", vec![assignment("HW3", "N/A", "10:00")]);

        let status = insert_pending(&api, &mapping, "primary", "Asia/Karachi").await;

        assert!(api.inserted.lock().unwrap().is_empty());
        assert!(status.contains("Skipped 'HW3'"));
    }

    #[tokio::test]
    async fn invalid_date_is_skipped_with_diagnostic() {
        let api = RecordingCalendar::default();
        let mapping = mapping_of("Math", vec![assignment("HW4", "not-a-date", "10:00")]);

        let status = insert_pending(&api, &mapping, "primary", "Asia/Karachi").await;

        assert!(api.inserted.lock().unwrap().is_empty());
        assert!(status.contains("invalid date format"));
    }

    #[tokio::test]
    async fn insert_failure_does_not_abort_batch() {
        let api = RecordingCalendar::default();
        let mapping = mapping_of(
            "Math",
            vec![
                assignment("FAIL this one", "2024-05-01", "10:00"),
                assignment("HW5", "2024-05-02", "10:00"),
            ],
        );

        let status = insert_pending(&api, &mapping, "primary", "Asia/Karachi").await;

        assert_eq!(api.inserted.lock().unwrap().len(), 1);
        assert!(status.contains("Failed to add 'FAIL this one'"));
        assert!(status.contains("Successfully added 'HW5'"));
    }

    #[test]
    fn event_payload_uses_google_field_names() {
        let tz: Tz = "Asia/Karachi".parse().unwrap();
        let BuiltEvent::Ready(event) = build_event("Math", &assignment("HW", "2024-05-01", "10:00"), tz)
        else {
            panic!("expected a ready event");
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["start"]["dateTime"], "2024-05-01T10:00:00");
        assert_eq!(value["start"]["timeZone"], "Asia/Karachi");
        assert_eq!(value["summary"], "[Math] HW");
    }
}
