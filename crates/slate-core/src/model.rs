// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! LMS entity model.
//!
//! Records reference related entities by name (a section names its teacher,
//! an enrollment names its student and course). Identifiers are numeric and
//! assigned by the store.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::role::Role;

// =============================================================================
// UserProfile
// =============================================================================

/// A user profile derived from token claims.
///
/// The profile is never fetched from a dedicated endpoint; it is built from
/// whatever the token carries, so every field except `id` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Numeric user id.
    pub id: i64,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Platform role, when the token carried a recognizable role claim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

// =============================================================================
// People
// =============================================================================

/// An admin directory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    /// Record id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login name, unique.
    pub username: String,
    /// Email address, unique.
    pub email: String,
}

/// A student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Record id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login name, unique.
    pub username: String,
    /// Email address, unique.
    pub email: String,
    /// Name of the section the student belongs to.
    pub section: String,
}

/// A teacher record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Record id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login name, unique.
    pub username: String,
    /// Email address, unique.
    pub email: String,
    /// Names of the subjects this teacher teaches.
    #[serde(default)]
    pub subjects: Vec<String>,
}

// =============================================================================
// Structure
// =============================================================================

/// A section (homeroom group of students) led by a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Record id.
    pub id: i64,
    /// Section name, unique.
    pub name: String,
    /// Name of the teacher leading the section.
    pub teacher: String,
}

/// A course offered by the institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Record id.
    pub id: i64,
    /// Course name, unique.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Institutional course code.
    pub course_code: String,
    /// Name of the teacher responsible for the course.
    pub teacher: String,
}

/// A subject taught within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Record id.
    pub id: i64,
    /// Subject name, unique.
    pub name: String,
    /// Name of the teacher assigned to the subject.
    pub teacher: String,
    /// Name of the parent course.
    pub course: String,
}

/// A student's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Record id.
    pub id: i64,
    /// Name of the enrolled student.
    pub student: String,
    /// Name of the course.
    pub course: String,
    /// Date of enrollment.
    pub enrollment_date: NaiveDate,
    /// Free-form status (e.g. "active", "completed").
    pub status: String,
    /// Grade awarded so far, if any.
    pub grade: String,
}

// =============================================================================
// Coursework
// =============================================================================

/// An assignment published for a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Record id.
    pub id: i64,
    /// Assignment title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Submission deadline.
    pub due_date: NaiveDate,
    /// Name of the subject the assignment belongs to.
    pub subject: String,
    /// Name of the teacher who published it.
    pub teacher: String,
    /// Maximum attainable marks.
    pub total_marks: u32,
}

/// A student's submission for an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Record id.
    pub id: i64,
    /// Title of the assignment this answers.
    pub assignment: String,
    /// Name of the submitting student.
    pub student: String,
    /// Submitted answer text.
    pub submission_text: String,
    /// When the submission was received.
    pub submitted_at: DateTime<Utc>,
    /// Marks awarded by the grading teacher, once graded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks_obtained: Option<u32>,
    /// Grading feedback, once graded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Attendance state for a single student/subject observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Attended on time.
    Present,
    /// Did not attend.
    Absent,
    /// Attended late.
    Late,
}

impl AttendanceStatus {
    /// Returns the status as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            _ => Err(ModelError::InvalidAttendanceStatus(s.to_string())),
        }
    }
}

/// An attendance observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Record id.
    pub id: i64,
    /// Name of the observed student.
    pub student: String,
    /// Name of the subject the observation belongs to.
    pub subject: String,
    /// Observed status.
    pub status: AttendanceStatus,
    /// When the observation was recorded.
    pub marked_at: DateTime<Utc>,
}

/// An exam result for a student in a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    /// Record id.
    pub id: i64,
    /// Name of the examined student.
    pub student: String,
    /// Name of the subject.
    pub subject: String,
    /// Maximum attainable marks.
    pub total_marks: u32,
    /// Marks obtained.
    pub obtained_marks: u32,
    /// Exam category (e.g. "midterm", "final").
    pub exam_type: String,
    /// Examiner remarks.
    pub remarks: String,
}

// =============================================================================
// Communication
// =============================================================================

/// The audience an announcement targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Everyone in the section.
    All,
    /// Students only.
    Students,
    /// Teachers only.
    Teachers,
}

impl Audience {
    /// Returns the audience as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::All => "all",
            Audience::Students => "students",
            Audience::Teachers => "teachers",
        }
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Audience {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Audience::All),
            "students" => Ok(Audience::Students),
            "teachers" => Ok(Audience::Teachers),
            _ => Err(ModelError::InvalidAudience(s.to_string())),
        }
    }
}

/// An announcement posted by a teacher to a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    /// Record id.
    pub id: i64,
    /// Announcement title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Who the announcement targets.
    pub target_audience: Audience,
    /// Name of the section the announcement is posted to.
    pub section: String,
    /// Name of the posting teacher.
    pub teacher: String,
    /// When the announcement was posted.
    pub created_at: DateTime<Utc>,
}

/// An institution-wide event scheduled by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Record id.
    pub id: i64,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Date of the event.
    pub event_date: NaiveDate,
    /// Start time of the event.
    pub event_time: NaiveTime,
    /// Name of the admin who scheduled it.
    pub admin: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_status_round_trip() {
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Late,
        ] {
            assert_eq!(status.as_str().parse::<AttendanceStatus>().unwrap(), status);
        }
        assert!("tardy".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_audience_parse() {
        assert_eq!("ALL".parse::<Audience>().unwrap(), Audience::All);
        assert!("parents".parse::<Audience>().is_err());
    }

    #[test]
    fn test_user_profile_tolerates_missing_fields() {
        let profile: UserProfile = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(profile.id, 7);
        assert!(profile.email.is_empty());
        assert!(profile.role.is_none());
    }

    #[test]
    fn test_submission_optional_grading_fields() {
        let submission = Submission {
            id: 1,
            assignment: "Essay 1".to_string(),
            student: "Mina Park".to_string(),
            submission_text: "...".to_string(),
            submitted_at: Utc::now(),
            marks_obtained: None,
            feedback: None,
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert!(json.get("marks_obtained").is_none());
        assert!(json.get("feedback").is_none());
    }
}
