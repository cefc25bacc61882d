// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Record storage.
//!
//! The store is an injected collaborator behind `Arc<dyn Store>`: handlers
//! never touch a concrete storage engine. Cross-entity references are by
//! name and are validated by the store on writes.

pub mod memory;

use async_trait::async_trait;
use slate_core::{
    Admin, Announcement, Assignment, AttendanceRecord, AttendanceStatus, Audience, Course,
    Enrollment, Event, ExamResult, Role, Section, Student, Subject, Submission, Teacher,
};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Errors
// =============================================================================

/// Errors produced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field collided with an existing record.
    #[error("{0}")]
    Conflict(String),

    /// A named cross-reference does not resolve to a record.
    #[error("{0}")]
    InvalidReference(String),

    /// The storage engine failed.
    #[error("storage failure: {0}")]
    Internal(String),
}

impl From<StoreError> for crate::error::ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => crate::error::ApiError::conflict(message),
            StoreError::InvalidReference(message) => crate::error::ApiError::validation(message),
            StoreError::Internal(message) => crate::error::ApiError::internal(message),
        }
    }
}

// =============================================================================
// Accounts
// =============================================================================

/// A login account backing an admin, teacher or student record.
#[derive(Debug, Clone)]
pub struct Account {
    /// Id of the backing record.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address (the login identifier).
    pub email: String,
    /// Argon2 PHC hash of the password.
    pub password_hash: String,
    /// Role of the backing record.
    pub role: Role,
}

// =============================================================================
// Write Payloads
// =============================================================================

/// Payload for creating an admin.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Argon2 PHC hash of the password.
    pub password_hash: String,
}

/// Payload for creating a student.
#[derive(Debug, Clone)]
pub struct NewStudent {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Argon2 PHC hash of the password.
    pub password_hash: String,
    /// Name of the section the student joins.
    pub section: String,
}

/// Partial update for a student.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New section name.
    pub section: Option<String>,
    /// New password hash.
    pub password_hash: Option<String>,
}

/// Payload for creating a teacher.
#[derive(Debug, Clone)]
pub struct NewTeacher {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Argon2 PHC hash of the password.
    pub password_hash: String,
}

/// Partial update for a teacher.
#[derive(Debug, Clone, Default)]
pub struct TeacherUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New password hash.
    pub password_hash: Option<String>,
}

/// Payload for creating a section.
#[derive(Debug, Clone)]
pub struct NewSection {
    /// Section name.
    pub name: String,
    /// Name of the leading teacher.
    pub teacher: String,
}

/// Partial update for a section.
#[derive(Debug, Clone, Default)]
pub struct SectionUpdate {
    /// New section name.
    pub name: Option<String>,
    /// New leading teacher name.
    pub teacher: Option<String>,
}

/// Payload for creating a course.
#[derive(Debug, Clone)]
pub struct NewCourse {
    /// Course name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Institutional course code.
    pub course_code: String,
    /// Name of the responsible teacher.
    pub teacher: String,
}

/// Partial update for a course.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    /// New course name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New responsible teacher name.
    pub teacher: Option<String>,
}

/// Payload for creating a subject.
#[derive(Debug, Clone)]
pub struct NewSubject {
    /// Subject name.
    pub name: String,
    /// Name of the assigned teacher.
    pub teacher: String,
    /// Name of the parent course.
    pub course: String,
}

/// Partial update for a subject.
#[derive(Debug, Clone, Default)]
pub struct SubjectUpdate {
    /// New subject name.
    pub name: Option<String>,
    /// New assigned teacher name.
    pub teacher: Option<String>,
    /// New parent course name.
    pub course: Option<String>,
}

/// Payload for enrolling a student in a course.
#[derive(Debug, Clone)]
pub struct NewEnrollment {
    /// Name of the student.
    pub student: String,
    /// Name of the course.
    pub course: String,
    /// Date of enrollment.
    pub enrollment_date: chrono::NaiveDate,
    /// Initial status.
    pub status: String,
    /// Initial grade.
    pub grade: String,
}

/// Partial update for an enrollment.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentUpdate {
    /// New status.
    pub status: Option<String>,
    /// New grade.
    pub grade: Option<String>,
}

/// Filter for listing enrollments.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentFilter {
    /// Restrict to a course name.
    pub course: Option<String>,
    /// Restrict to a student name.
    pub student: Option<String>,
}

/// Payload for creating an assignment.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    /// Assignment title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Submission deadline.
    pub due_date: chrono::NaiveDate,
    /// Name of the subject; the teacher is derived from it.
    pub subject: String,
    /// Maximum attainable marks.
    pub total_marks: u32,
}

/// Partial update for an assignment.
#[derive(Debug, Clone, Default)]
pub struct AssignmentUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New deadline.
    pub due_date: Option<chrono::NaiveDate>,
    /// New subject name.
    pub subject: Option<String>,
    /// New maximum marks.
    pub total_marks: Option<u32>,
}

/// Payload for creating a submission.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    /// Title of the assignment being answered.
    pub assignment: String,
    /// Name of the submitting student.
    pub student: String,
    /// Submitted answer text.
    pub submission_text: String,
}

/// Partial update for a submission (grading).
#[derive(Debug, Clone, Default)]
pub struct SubmissionUpdate {
    /// Corrected answer text.
    pub submission_text: Option<String>,
    /// Awarded marks.
    pub marks_obtained: Option<u32>,
    /// Grading feedback.
    pub feedback: Option<String>,
}

/// Filter for listing submissions.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    /// Restrict to a student name.
    pub student: Option<String>,
    /// Restrict to an assignment title.
    pub assignment: Option<String>,
}

/// Payload for recording attendance.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    /// Name of the observed student.
    pub student: String,
    /// Name of the subject.
    pub subject: String,
    /// Observed status.
    pub status: AttendanceStatus,
}

/// Partial update for an attendance record.
#[derive(Debug, Clone, Default)]
pub struct AttendanceUpdate {
    /// New status.
    pub status: Option<AttendanceStatus>,
    /// New student name.
    pub student: Option<String>,
    /// New subject name.
    pub subject: Option<String>,
}

/// Filter for listing attendance records.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    /// Restrict to a student name.
    pub student: Option<String>,
    /// Restrict to a subject name.
    pub subject: Option<String>,
}

/// Payload for creating an exam result.
#[derive(Debug, Clone)]
pub struct NewResult {
    /// Name of the examined student.
    pub student: String,
    /// Name of the subject.
    pub subject: String,
    /// Maximum attainable marks.
    pub total_marks: u32,
    /// Marks obtained.
    pub obtained_marks: u32,
    /// Exam category.
    pub exam_type: String,
    /// Examiner remarks.
    pub remarks: String,
}

/// Partial update for an exam result.
#[derive(Debug, Clone, Default)]
pub struct ResultUpdate {
    /// New obtained marks.
    pub obtained_marks: Option<u32>,
    /// New remarks.
    pub remarks: Option<String>,
}

/// Payload for posting an announcement.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Target audience.
    pub target_audience: Audience,
    /// Name of the target section.
    pub section: String,
    /// Name of the posting teacher.
    pub teacher: String,
}

/// Partial update for an announcement.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementUpdate {
    /// New title.
    pub title: Option<String>,
    /// New body text.
    pub content: Option<String>,
    /// New target section name.
    pub section: Option<String>,
}

/// Payload for scheduling an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Date of the event.
    pub event_date: chrono::NaiveDate,
    /// Start time.
    pub event_time: chrono::NaiveTime,
    /// Name of the scheduling admin.
    pub admin: String,
}

/// Partial update for an event.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New date.
    pub event_date: Option<chrono::NaiveDate>,
    /// New start time.
    pub event_time: Option<chrono::NaiveTime>,
}

// =============================================================================
// Store Trait
// =============================================================================

/// Record storage for the platform.
///
/// Writes validate unique fields (`Conflict`) and named cross-references
/// (`InvalidReference`). `update_*` and `delete_*` return `None`/`false`
/// for unknown ids; handlers turn that into 404.
#[async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // Accounts
    // =========================================================================

    /// Looks up a login account by email.
    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    // =========================================================================
    // Admins
    // =========================================================================

    /// Lists admin directory records.
    async fn list_admins(&self) -> StoreResult<Vec<Admin>>;
    /// Creates an admin and its login account.
    async fn create_admin(&self, new: NewAdmin) -> StoreResult<Admin>;

    // =========================================================================
    // Students
    // =========================================================================

    /// Lists students.
    async fn list_students(&self) -> StoreResult<Vec<Student>>;
    /// Fetches a student by id.
    async fn get_student(&self, id: i64) -> StoreResult<Option<Student>>;
    /// Creates a student and its login account.
    async fn create_student(&self, new: NewStudent) -> StoreResult<Student>;
    /// Applies a partial update to a student.
    async fn update_student(&self, id: i64, update: StudentUpdate) -> StoreResult<Option<Student>>;
    /// Deletes a student and its login account.
    async fn delete_student(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Teachers
    // =========================================================================

    /// Lists teachers.
    async fn list_teachers(&self) -> StoreResult<Vec<Teacher>>;
    /// Fetches a teacher by id.
    async fn get_teacher(&self, id: i64) -> StoreResult<Option<Teacher>>;
    /// Creates a teacher and its login account.
    async fn create_teacher(&self, new: NewTeacher) -> StoreResult<Teacher>;
    /// Applies a partial update to a teacher.
    async fn update_teacher(&self, id: i64, update: TeacherUpdate) -> StoreResult<Option<Teacher>>;
    /// Deletes a teacher and its login account.
    async fn delete_teacher(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Sections
    // =========================================================================

    /// Lists sections.
    async fn list_sections(&self) -> StoreResult<Vec<Section>>;
    /// Fetches a section by id.
    async fn get_section(&self, id: i64) -> StoreResult<Option<Section>>;
    /// Creates a section.
    async fn create_section(&self, new: NewSection) -> StoreResult<Section>;
    /// Applies a partial update to a section.
    async fn update_section(&self, id: i64, update: SectionUpdate) -> StoreResult<Option<Section>>;
    /// Deletes a section.
    async fn delete_section(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Courses
    // =========================================================================

    /// Lists courses.
    async fn list_courses(&self) -> StoreResult<Vec<Course>>;
    /// Fetches a course by id.
    async fn get_course(&self, id: i64) -> StoreResult<Option<Course>>;
    /// Creates a course.
    async fn create_course(&self, new: NewCourse) -> StoreResult<Course>;
    /// Applies a partial update to a course.
    async fn update_course(&self, id: i64, update: CourseUpdate) -> StoreResult<Option<Course>>;
    /// Deletes a course.
    async fn delete_course(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Subjects
    // =========================================================================

    /// Lists subjects.
    async fn list_subjects(&self) -> StoreResult<Vec<Subject>>;
    /// Fetches a subject by id.
    async fn get_subject(&self, id: i64) -> StoreResult<Option<Subject>>;
    /// Creates a subject.
    async fn create_subject(&self, new: NewSubject) -> StoreResult<Subject>;
    /// Applies a partial update to a subject.
    async fn update_subject(&self, id: i64, update: SubjectUpdate) -> StoreResult<Option<Subject>>;
    /// Deletes a subject.
    async fn delete_subject(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Enrollments
    // =========================================================================

    /// Lists enrollments matching the filter.
    async fn list_enrollments(&self, filter: EnrollmentFilter) -> StoreResult<Vec<Enrollment>>;
    /// Enrolls a student in a course.
    async fn create_enrollment(&self, new: NewEnrollment) -> StoreResult<Enrollment>;
    /// Applies a partial update to an enrollment.
    async fn update_enrollment(
        &self,
        id: i64,
        update: EnrollmentUpdate,
    ) -> StoreResult<Option<Enrollment>>;
    /// Deletes an enrollment.
    async fn delete_enrollment(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Assignments
    // =========================================================================

    /// Lists assignments.
    async fn list_assignments(&self) -> StoreResult<Vec<Assignment>>;
    /// Fetches an assignment by id.
    async fn get_assignment(&self, id: i64) -> StoreResult<Option<Assignment>>;
    /// Creates an assignment; the teacher is derived from the subject.
    async fn create_assignment(&self, new: NewAssignment) -> StoreResult<Assignment>;
    /// Applies a partial update to an assignment.
    async fn update_assignment(
        &self,
        id: i64,
        update: AssignmentUpdate,
    ) -> StoreResult<Option<Assignment>>;
    /// Deletes an assignment.
    async fn delete_assignment(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Submissions
    // =========================================================================

    /// Lists submissions matching the filter.
    async fn list_submissions(&self, filter: SubmissionFilter) -> StoreResult<Vec<Submission>>;
    /// Records a submission.
    async fn create_submission(&self, new: NewSubmission) -> StoreResult<Submission>;
    /// Applies a partial update (grading) to a submission.
    async fn update_submission(
        &self,
        id: i64,
        update: SubmissionUpdate,
    ) -> StoreResult<Option<Submission>>;
    /// Deletes a submission.
    async fn delete_submission(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Attendance
    // =========================================================================

    /// Lists attendance records matching the filter.
    async fn list_attendance(&self, filter: AttendanceFilter)
        -> StoreResult<Vec<AttendanceRecord>>;
    /// Records an attendance observation.
    async fn create_attendance(&self, new: NewAttendance) -> StoreResult<AttendanceRecord>;
    /// Applies a partial update to an attendance record.
    async fn update_attendance(
        &self,
        id: i64,
        update: AttendanceUpdate,
    ) -> StoreResult<Option<AttendanceRecord>>;
    /// Deletes an attendance record.
    async fn delete_attendance(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Results
    // =========================================================================

    /// Lists exam results.
    async fn list_results(&self) -> StoreResult<Vec<ExamResult>>;
    /// Fetches an exam result by id.
    async fn get_result(&self, id: i64) -> StoreResult<Option<ExamResult>>;
    /// Records an exam result.
    async fn create_result(&self, new: NewResult) -> StoreResult<ExamResult>;
    /// Applies a partial update to an exam result.
    async fn update_result(&self, id: i64, update: ResultUpdate)
        -> StoreResult<Option<ExamResult>>;
    /// Deletes an exam result.
    async fn delete_result(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Announcements
    // =========================================================================

    /// Lists announcements.
    async fn list_announcements(&self) -> StoreResult<Vec<Announcement>>;
    /// Fetches an announcement by id.
    async fn get_announcement(&self, id: i64) -> StoreResult<Option<Announcement>>;
    /// Posts an announcement.
    async fn create_announcement(&self, new: NewAnnouncement) -> StoreResult<Announcement>;
    /// Applies a partial update to an announcement.
    async fn update_announcement(
        &self,
        id: i64,
        update: AnnouncementUpdate,
    ) -> StoreResult<Option<Announcement>>;
    /// Deletes an announcement.
    async fn delete_announcement(&self, id: i64) -> StoreResult<bool>;

    // =========================================================================
    // Events
    // =========================================================================

    /// Lists events.
    async fn list_events(&self) -> StoreResult<Vec<Event>>;
    /// Fetches an event by id.
    async fn get_event(&self, id: i64) -> StoreResult<Option<Event>>;
    /// Schedules an event.
    async fn create_event(&self, new: NewEvent) -> StoreResult<Event>;
    /// Applies a partial update to an event.
    async fn update_event(&self, id: i64, update: EventUpdate) -> StoreResult<Option<Event>>;
    /// Deletes an event.
    async fn delete_event(&self, id: i64) -> StoreResult<bool>;
}
