use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel for a missing date or time component
pub const NOT_AVAILABLE: &str = "N/A";

/// One not-yet-submitted assignment, dates already normalized to strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAssignment {
    pub title: String,
    pub due_date: String,
    pub due_time: String,
}

/// The per-course bucket of pending assignments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseBucket {
    pub not_submitted: Vec<PendingAssignment>,
}

/// Course-keyed collection of pending assignments, rebuilt on every fetch.
///
/// Only courses with at least one qualifying not-submitted assignment appear;
/// every contained assignment has a complete `YYYY-MM-DD` due date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingMapping(pub BTreeMap<String, CourseBucket>);

impl PendingMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, course_name: String, bucket: CourseBucket) {
        self.0.insert(course_name, bucket);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CourseBucket)> {
        self.0.iter()
    }

    /// Total number of assignments across all courses
    pub fn assignment_count(&self) -> usize {
        self.0.values().map(|b| b.not_submitted.len()).sum()
    }
}
