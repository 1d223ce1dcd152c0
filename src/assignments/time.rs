use crate::google::models::{DueDate, TimeOfDay};

/// Format a due date as `YYYY-MM-DD`, or None when any component is missing
pub fn format_due_date(due_date: Option<&DueDate>) -> Option<String> {
    let due_date = due_date?;
    match (due_date.year, due_date.month, due_date.day) {
        (Some(year), Some(month), Some(day)) => {
            Some(format!("{}-{:02}-{:02}", year, month, day))
        }
        _ => None,
    }
}

/// Format a due time as `HH:MM`, or None when the hour is missing
pub fn format_due_time(due_time: Option<&TimeOfDay>) -> Option<String> {
    let due_time = due_time?;
    let hours = due_time.hours?;
    Some(format!("{:02}:{:02}", hours, due_time.minutes.unwrap_or(0)))
}

/// Format a due time for the calendar mapping, defaulting to end of day
pub fn calendar_due_time(due_time: Option<&TimeOfDay>) -> String {
    match due_time {
        Some(t) => format!(
            "{:02}:{:02}",
            t.hours.unwrap_or(23),
            t.minutes.unwrap_or(59)
        ),
        None => String::from("23:59"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: Option<u32>, month: Option<u32>, day: Option<u32>) -> DueDate {
        DueDate { year, month, day }
    }

    #[test]
    fn complete_date_is_zero_padded() {
        let d = date(Some(2024), Some(5), Some(1));
        assert_eq!(format_due_date(Some(&d)).as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn partial_date_yields_none() {
        assert_eq!(format_due_date(None), None);
        assert_eq!(format_due_date(Some(&date(Some(2024), Some(5), None))), None);
        assert_eq!(format_due_date(Some(&date(None, Some(5), Some(1)))), None);
    }

    #[test]
    fn time_requires_hours() {
        let t = TimeOfDay {
            hours: Some(9),
            minutes: None,
        };
        assert_eq!(format_due_time(Some(&t)).as_deref(), Some("09:00"));
        assert_eq!(format_due_time(Some(&TimeOfDay::default())), None);
        assert_eq!(format_due_time(None), None);
    }

    #[test]
    fn calendar_time_defaults_to_end_of_day() {
        assert_eq!(calendar_due_time(None), "23:59");
        assert_eq!(calendar_due_time(Some(&TimeOfDay::default())), "23:59");
        let t = TimeOfDay {
            hours: Some(8),
            minutes: Some(30),
        };
        assert_eq!(calendar_due_time(Some(&t)), "08:30");
    }
}
