// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed HTTP client for the SLATE API.
//!
//! One request, one settlement: there is no retry or backoff anywhere in
//! this client. A 401/422 from any endpoint force-clears the shared
//! session; the caller observes `ClientError::SessionExpired` and routes
//! the user back to the login screen.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use slate_core::{
    Admin, Announcement, Assignment, AttendanceRecord, AttendanceStatus, Audience, Course,
    Enrollment, Event, ExamResult, Section, Student, Subject, Submission, Teacher,
};

use crate::error::{extract_error_message, ClientError, ClientResult};
use crate::normalize;
use crate::session::SessionState;

// =============================================================================
// ClientConfig
// =============================================================================

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// Timeout applied to chat requests; assistant replies are slow.
    pub chat_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(30),
            chat_timeout: Duration::from_secs(120),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// How an authentication failure (401/422) should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthFailure {
    /// The session is over; report `SessionExpired`. The default.
    EndSession,
    /// Surface the server's message. Used by login, where a 401 means
    /// wrong credentials, not a dead session.
    Surface,
}

// =============================================================================
// ApiClient
// =============================================================================

/// HTTP client for the SLATE API.
///
/// Shares session state with the session manager: the bearer token is read
/// from it on every request, and a rejected token clears it.
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    state: Arc<SessionState>,
}

impl ApiClient {
    /// Creates a new client over the shared session state.
    pub fn new(config: ClientConfig, state: Arc<SessionState>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            config,
            state,
        })
    }

    /// Returns the shared session state.
    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }

    // =========================================================================
    // Request core
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        auth_failure: AuthFailure,
        timeout: Option<Duration>,
    ) -> ClientResult<Value> {
        let mut request = self.http.request(method, self.url(path));

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = self.state.token() {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout
            } else {
                tracing::debug!(error = %e, path, "Request failed before a response arrived");
                ClientError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        // A rejected token ends the session, whatever endpoint it hit.
        if status.as_u16() == 401 || status.as_u16() == 422 {
            self.state.clear_best_effort();
            return match auth_failure {
                AuthFailure::EndSession => Err(ClientError::SessionExpired),
                AuthFailure::Surface => Err(ClientError::api(
                    status.as_u16(),
                    extract_error_message(status.as_u16(), &body),
                )),
            };
        }

        if !status.is_success() {
            return Err(ClientError::api(
                status.as_u16(),
                extract_error_message(status.as_u16(), &body),
            ));
        }

        Ok(body)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Value> {
        self.request::<()>(Method::GET, path, query, None, AuthFailure::EndSession, None)
            .await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<Value> {
        self.request(Method::POST, path, &[], Some(body), AuthFailure::EndSession, None)
            .await
    }

    async fn put<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<Value> {
        self.request(Method::PUT, path, &[], Some(body), AuthFailure::EndSession, None)
            .await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        self.request::<()>(Method::DELETE, path, &[], None, AuthFailure::EndSession, None)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Authenticates against the backend and returns the bearer token.
    ///
    /// One round-trip, no retry. A failure carries the backend's message
    /// (`message` field preferred) for the caller to surface.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<String> {
        let body = serde_json::json!({ "email": email, "password": password });
        let value = self
            .request(
                Method::POST,
                "/login",
                &[],
                Some(&body),
                AuthFailure::Surface,
                None,
            )
            .await?;
        normalize::auth_token("/login", value)
    }

    // =========================================================================
    // Admins
    // =========================================================================

    /// Lists admin directory records.
    pub async fn list_admins(&self) -> ClientResult<Vec<Admin>> {
        let value = self.get("/admins", &[]).await?;
        normalize::entity_list("/admins", "admins", value)
    }

    /// Creates an admin.
    pub async fn create_admin(&self, payload: &CreateAdmin) -> ClientResult<Admin> {
        let value = self.post("/admins", payload).await?;
        normalize::entity("/admins", "admin", value)
    }

    // =========================================================================
    // Students
    // =========================================================================

    /// Lists students.
    pub async fn list_students(&self) -> ClientResult<Vec<Student>> {
        let value = self.get("/students", &[]).await?;
        normalize::entity_list("/students", "students", value)
    }

    /// Fetches a student by id.
    pub async fn get_student(&self, id: i64) -> ClientResult<Student> {
        let value = self.get(&format!("/students/{}", id), &[]).await?;
        normalize::entity("/students/{id}", "student", value)
    }

    /// Creates a student.
    pub async fn create_student(&self, payload: &CreateStudent) -> ClientResult<Student> {
        let value = self.post("/students", payload).await?;
        normalize::entity("/students", "student", value)
    }

    /// Updates a student.
    pub async fn update_student(&self, id: i64, payload: &UpdateStudent) -> ClientResult<Student> {
        let value = self.put(&format!("/students/{}", id), payload).await?;
        normalize::entity("/students/{id}", "student", value)
    }

    /// Deletes a student.
    pub async fn delete_student(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/students/{}", id)).await
    }

    // =========================================================================
    // Teachers
    // =========================================================================

    /// Lists teachers.
    pub async fn list_teachers(&self) -> ClientResult<Vec<Teacher>> {
        let value = self.get("/teachers", &[]).await?;
        normalize::entity_list("/teachers", "teachers", value)
    }

    /// Fetches a teacher by id.
    pub async fn get_teacher(&self, id: i64) -> ClientResult<Teacher> {
        let value = self.get(&format!("/teachers/{}", id), &[]).await?;
        normalize::entity("/teachers/{id}", "teacher", value)
    }

    /// Creates a teacher.
    pub async fn create_teacher(&self, payload: &CreateTeacher) -> ClientResult<Teacher> {
        let value = self.post("/teachers", payload).await?;
        normalize::entity("/teachers", "teacher", value)
    }

    /// Updates a teacher.
    pub async fn update_teacher(&self, id: i64, payload: &UpdateTeacher) -> ClientResult<Teacher> {
        let value = self.put(&format!("/teachers/{}", id), payload).await?;
        normalize::entity("/teachers/{id}", "teacher", value)
    }

    /// Deletes a teacher.
    pub async fn delete_teacher(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/teachers/{}", id)).await
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// Lists sections.
    pub async fn list_sections(&self) -> ClientResult<Vec<Section>> {
        let value = self.get("/sections", &[]).await?;
        normalize::entity_list("/sections", "sections", value)
    }

    /// Creates a section.
    pub async fn create_section(&self, payload: &CreateSection) -> ClientResult<Section> {
        let value = self.post("/sections", payload).await?;
        normalize::entity("/sections", "section", value)
    }

    /// Updates a section.
    pub async fn update_section(&self, id: i64, payload: &UpdateSection) -> ClientResult<Section> {
        let value = self.put(&format!("/sections/{}", id), payload).await?;
        normalize::entity("/sections/{id}", "section", value)
    }

    /// Deletes a section.
    pub async fn delete_section(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/sections/{}", id)).await
    }

    // =========================================================================
    // Courses
    // =========================================================================

    /// Lists courses.
    pub async fn list_courses(&self) -> ClientResult<Vec<Course>> {
        let value = self.get("/courses", &[]).await?;
        normalize::entity_list("/courses", "courses", value)
    }

    /// Creates a course.
    pub async fn create_course(&self, payload: &CreateCourse) -> ClientResult<Course> {
        let value = self.post("/courses", payload).await?;
        normalize::entity("/courses", "course", value)
    }

    /// Updates a course.
    pub async fn update_course(&self, id: i64, payload: &UpdateCourse) -> ClientResult<Course> {
        let value = self.put(&format!("/courses/{}", id), payload).await?;
        normalize::entity("/courses/{id}", "course", value)
    }

    /// Deletes a course.
    pub async fn delete_course(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/courses/{}", id)).await
    }

    // =========================================================================
    // Subjects
    // =========================================================================

    /// Lists subjects.
    pub async fn list_subjects(&self) -> ClientResult<Vec<Subject>> {
        let value = self.get("/subjects", &[]).await?;
        normalize::entity_list("/subjects", "subjects", value)
    }

    /// Creates a subject.
    pub async fn create_subject(&self, payload: &CreateSubject) -> ClientResult<Subject> {
        let value = self.post("/subjects", payload).await?;
        normalize::entity("/subjects", "subject", value)
    }

    /// Updates a subject.
    pub async fn update_subject(&self, id: i64, payload: &UpdateSubject) -> ClientResult<Subject> {
        let value = self.put(&format!("/subjects/{}", id), payload).await?;
        normalize::entity("/subjects/{id}", "subject", value)
    }

    /// Deletes a subject.
    pub async fn delete_subject(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/subjects/{}", id)).await
    }

    // =========================================================================
    // Enrollments
    // =========================================================================

    /// Lists enrollments, optionally filtered by course and student name.
    pub async fn list_enrollments(
        &self,
        course: Option<&str>,
        student: Option<&str>,
    ) -> ClientResult<Vec<Enrollment>> {
        let mut query = Vec::new();
        if let Some(course) = course {
            query.push(("course", course.to_string()));
        }
        if let Some(student) = student {
            query.push(("student", student.to_string()));
        }

        let value = self.get("/enrollments", &query).await?;
        normalize::entity_list("/enrollments", "enrollments", value)
    }

    /// Enrolls a student in a course.
    pub async fn create_enrollment(&self, payload: &CreateEnrollment) -> ClientResult<Enrollment> {
        let value = self.post("/enrollments", payload).await?;
        normalize::entity("/enrollments", "enrollment", value)
    }

    /// Updates an enrollment.
    pub async fn update_enrollment(
        &self,
        id: i64,
        payload: &UpdateEnrollment,
    ) -> ClientResult<Enrollment> {
        let value = self.put(&format!("/enrollments/{}", id), payload).await?;
        normalize::entity("/enrollments/{id}", "enrollment", value)
    }

    /// Deletes an enrollment.
    pub async fn delete_enrollment(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/enrollments/{}", id)).await
    }

    // =========================================================================
    // Assignments
    // =========================================================================

    /// Lists assignments.
    pub async fn list_assignments(&self) -> ClientResult<Vec<Assignment>> {
        let value = self.get("/assignments", &[]).await?;
        normalize::entity_list("/assignments", "assignments", value)
    }

    /// Creates an assignment.
    pub async fn create_assignment(&self, payload: &CreateAssignment) -> ClientResult<Assignment> {
        let value = self.post("/assignments", payload).await?;
        normalize::entity("/assignments", "assignment", value)
    }

    /// Updates an assignment.
    pub async fn update_assignment(
        &self,
        id: i64,
        payload: &UpdateAssignment,
    ) -> ClientResult<Assignment> {
        let value = self.put(&format!("/assignments/{}", id), payload).await?;
        normalize::entity("/assignments/{id}", "assignment", value)
    }

    /// Deletes an assignment.
    pub async fn delete_assignment(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/assignments/{}", id)).await
    }

    // =========================================================================
    // Submissions
    // =========================================================================

    /// Lists submissions, optionally filtered by student name and
    /// assignment title.
    pub async fn list_submissions(
        &self,
        student: Option<&str>,
        assignment: Option<&str>,
    ) -> ClientResult<Vec<Submission>> {
        let mut query = Vec::new();
        if let Some(student) = student {
            query.push(("student", student.to_string()));
        }
        if let Some(assignment) = assignment {
            query.push(("assignment", assignment.to_string()));
        }

        let value = self.get("/submissions", &query).await?;
        normalize::entity_list("/submissions", "submissions", value)
    }

    /// Submits assignment work for the logged-in student.
    pub async fn create_submission(&self, payload: &CreateSubmission) -> ClientResult<Submission> {
        let value = self.post("/submissions", payload).await?;
        normalize::entity("/submissions", "submission", value)
    }

    /// Grades or amends a submission.
    pub async fn update_submission(
        &self,
        id: i64,
        payload: &UpdateSubmission,
    ) -> ClientResult<Submission> {
        let value = self.put(&format!("/submissions/{}", id), payload).await?;
        normalize::entity("/submissions/{id}", "submission", value)
    }

    /// Deletes a submission.
    pub async fn delete_submission(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/submissions/{}", id)).await
    }

    // =========================================================================
    // Attendance
    // =========================================================================

    /// Lists attendance records, optionally filtered by student and
    /// subject name.
    pub async fn list_attendance(
        &self,
        student: Option<&str>,
        subject: Option<&str>,
    ) -> ClientResult<Vec<AttendanceRecord>> {
        let mut query = Vec::new();
        if let Some(student) = student {
            query.push(("student", student.to_string()));
        }
        if let Some(subject) = subject {
            query.push(("subject", subject.to_string()));
        }

        let value = self.get("/attendance", &query).await?;
        normalize::entity_list("/attendance", "attendance", value)
    }

    /// Records an attendance observation.
    pub async fn mark_attendance(&self, payload: &CreateAttendance) -> ClientResult<AttendanceRecord> {
        let value = self.post("/attendance", payload).await?;
        normalize::entity("/attendance", "attendance", value)
    }

    /// Updates an attendance record.
    pub async fn update_attendance(
        &self,
        id: i64,
        payload: &UpdateAttendance,
    ) -> ClientResult<AttendanceRecord> {
        let value = self.put(&format!("/attendance/{}", id), payload).await?;
        normalize::entity("/attendance/{id}", "attendance", value)
    }

    /// Deletes an attendance record.
    pub async fn delete_attendance(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/attendance/{}", id)).await
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Lists exam results.
    pub async fn list_results(&self) -> ClientResult<Vec<ExamResult>> {
        let value = self.get("/results", &[]).await?;
        normalize::entity_list("/results", "results", value)
    }

    /// Records an exam result.
    pub async fn create_result(&self, payload: &CreateResult) -> ClientResult<ExamResult> {
        let value = self.post("/results", payload).await?;
        normalize::entity("/results", "result", value)
    }

    /// Updates an exam result.
    pub async fn update_result(&self, id: i64, payload: &UpdateResult) -> ClientResult<ExamResult> {
        let value = self.put(&format!("/results/{}", id), payload).await?;
        normalize::entity("/results/{id}", "result", value)
    }

    /// Deletes an exam result.
    pub async fn delete_result(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/results/{}", id)).await
    }

    // =========================================================================
    // Announcements
    // =========================================================================

    /// Lists announcements.
    pub async fn list_announcements(&self) -> ClientResult<Vec<Announcement>> {
        let value = self.get("/announcements", &[]).await?;
        normalize::entity_list("/announcements", "announcements", value)
    }

    /// Posts an announcement.
    pub async fn create_announcement(
        &self,
        payload: &CreateAnnouncement,
    ) -> ClientResult<Announcement> {
        let value = self.post("/announcements", payload).await?;
        normalize::entity("/announcements", "announcement", value)
    }

    /// Updates an announcement.
    pub async fn update_announcement(
        &self,
        id: i64,
        payload: &UpdateAnnouncement,
    ) -> ClientResult<Announcement> {
        let value = self.put(&format!("/announcements/{}", id), payload).await?;
        normalize::entity("/announcements/{id}", "announcement", value)
    }

    /// Deletes an announcement.
    pub async fn delete_announcement(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/announcements/{}", id)).await
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Lists events.
    pub async fn list_events(&self) -> ClientResult<Vec<Event>> {
        let value = self.get("/events", &[]).await?;
        normalize::entity_list("/events", "events", value)
    }

    /// Schedules an event.
    pub async fn create_event(&self, payload: &CreateEvent) -> ClientResult<Event> {
        let value = self.post("/events", payload).await?;
        normalize::entity("/events", "event", value)
    }

    /// Updates an event.
    pub async fn update_event(&self, id: i64, payload: &UpdateEvent) -> ClientResult<Event> {
        let value = self.put(&format!("/events/{}", id), payload).await?;
        normalize::entity("/events/{id}", "event", value)
    }

    /// Deletes an event.
    pub async fn delete_event(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/events/{}", id)).await
    }

    // =========================================================================
    // Overview
    // =========================================================================

    /// Aggregates the dashboard overview from several independent list
    /// calls.
    ///
    /// The calls are issued concurrently and partial failure is tolerated:
    /// a failed list contributes an empty collection rather than aborting
    /// the whole view.
    pub async fn overview(&self) -> Overview {
        let (students, teachers, courses, announcements, events) = tokio::join!(
            self.list_students(),
            self.list_teachers(),
            self.list_courses(),
            self.list_announcements(),
            self.list_events(),
        );

        Overview {
            students: students.unwrap_or_default(),
            teachers: teachers.unwrap_or_default(),
            courses: courses.unwrap_or_default(),
            announcements: announcements.unwrap_or_default(),
            events: events.unwrap_or_default(),
        }
    }

    // =========================================================================
    // Chat
    // =========================================================================

    /// Sends a chat message and returns the assistant's reply.
    ///
    /// Uses the extended chat timeout; assistant replies take far longer
    /// than CRUD calls.
    pub async fn chat(&self, message: &str) -> ClientResult<String> {
        let body = serde_json::json!({ "message": message });
        let value = self
            .request(
                Method::POST,
                "/chat",
                &[],
                Some(&body),
                AuthFailure::EndSession,
                Some(self.config.chat_timeout),
            )
            .await?;
        normalize::chat_reply("/chat", value)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

// =============================================================================
// Overview
// =============================================================================

/// A dashboard overview: the lists a landing page renders.
#[derive(Debug, Clone, Default)]
pub struct Overview {
    /// All students visible to the caller.
    pub students: Vec<Student>,
    /// All teachers visible to the caller.
    pub teachers: Vec<Teacher>,
    /// All courses.
    pub courses: Vec<Course>,
    /// All announcements.
    pub announcements: Vec<Announcement>,
    /// All events.
    pub events: Vec<Event>,
}

// =============================================================================
// Payloads
// =============================================================================

/// Payload for creating an admin.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAdmin {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
}

/// Payload for creating a student.
#[derive(Debug, Clone, Serialize)]
pub struct CreateStudent {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Name of the section the student joins.
    pub section: String,
}

/// Payload for updating a student.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateStudent {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New section name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Payload for creating a teacher.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTeacher {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
}

/// Payload for updating a teacher.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTeacher {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Payload for creating a section.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSection {
    /// Section name.
    pub name: String,
    /// Name of the leading teacher.
    pub teacher: String,
}

/// Payload for updating a section.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSection {
    /// New section name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New leading teacher name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
}

/// Payload for creating a course.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCourse {
    /// Course name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Institutional course code.
    pub course_code: String,
    /// Name of the responsible teacher.
    pub teacher: String,
}

/// Payload for updating a course.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCourse {
    /// New course name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New responsible teacher name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
}

/// Payload for creating a subject.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSubject {
    /// Subject name.
    pub name: String,
    /// Name of the assigned teacher.
    pub teacher: String,
    /// Name of the parent course.
    pub course: String,
}

/// Payload for updating a subject.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSubject {
    /// New subject name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New assigned teacher name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    /// New parent course name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

/// Payload for enrolling a student.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEnrollment {
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

/// Payload for updating an enrollment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateEnrollment {
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New grade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// Payload for creating an assignment.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssignment {
    /// Assignment title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Submission deadline.
    pub due_date: chrono::NaiveDate,
    /// Name of the subject.
    pub subject: String,
    /// Maximum attainable marks.
    pub total_marks: u32,
}

/// Payload for updating an assignment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAssignment {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<chrono::NaiveDate>,
    /// New subject name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// New maximum marks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<u32>,
}

/// Payload for submitting assignment work.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSubmission {
    /// Title of the assignment being answered.
    pub assignment: String,
    /// Submitted answer text.
    pub submission_text: String,
}

/// Payload for grading a submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSubmission {
    /// Corrected answer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_text: Option<String>,
    /// Awarded marks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks_obtained: Option<u32>,
    /// Grading feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Payload for recording attendance.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAttendance {
    /// Name of the observed student.
    pub student: String,
    /// Name of the subject.
    pub subject: String,
    /// Observed status.
    pub status: AttendanceStatus,
}

/// Payload for updating an attendance record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAttendance {
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
    /// New student name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<String>,
    /// New subject name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Payload for recording an exam result.
#[derive(Debug, Clone, Serialize)]
pub struct CreateResult {
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

/// Payload for updating an exam result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateResult {
    /// New obtained marks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obtained_marks: Option<u32>,
    /// New remarks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Payload for posting an announcement.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAnnouncement {
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Target audience.
    pub target_audience: Audience,
    /// Name of the target section.
    pub section: String,
}

/// Payload for updating an announcement.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAnnouncement {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New target section name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// Payload for scheduling an event.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEvent {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Date of the event.
    pub event_date: chrono::NaiveDate,
    /// Start time of the event.
    pub event_time: chrono::NaiveTime,
}

/// Payload for updating an event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateEvent {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<chrono::NaiveDate>,
    /// New start time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<chrono::NaiveTime>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySessionStore;

    #[test]
    fn test_url_joining() {
        let state =
            Arc::new(SessionState::rehydrate(Arc::new(MemorySessionStore::new())).unwrap());

        let client =
            ApiClient::new(ClientConfig::new("http://localhost:5000/api/"), state).unwrap();
        assert_eq!(client.url("/students"), "http://localhost:5000/api/students");
    }

    #[test]
    fn test_update_payloads_skip_absent_fields() {
        let payload = UpdateStudent {
            name: Some("Mina Park".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["name"], "Mina Park");
        assert!(json.get("email").is_none());
        assert!(json.get("password").is_none());
    }
}
