// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory store implementation.
//!
//! Backs the API with plain vectors behind an `RwLock`. Collections are
//! small (a school's worth of records), so scans are fine and ordering is
//! insertion order.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use slate_core::{
    Admin, Announcement, Assignment, AttendanceRecord, Course, Enrollment, Event, ExamResult,
    Role, Section, Student, Subject, Submission, Teacher,
};

use super::*;

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory record storage.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    /// Login accounts keyed by lowercase email.
    accounts: HashMap<String, Account>,
    admins: Vec<Admin>,
    students: Vec<Student>,
    teachers: Vec<Teacher>,
    sections: Vec<Section>,
    courses: Vec<Course>,
    subjects: Vec<Subject>,
    enrollments: Vec<Enrollment>,
    assignments: Vec<Assignment>,
    submissions: Vec<Submission>,
    attendance: Vec<AttendanceRecord>,
    results: Vec<ExamResult>,
    announcements: Vec<Announcement>,
    events: Vec<Event>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Internal("store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Internal("store lock poisoned".to_string()))
    }
}

impl Inner {
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_credentials_free(&self, email: &str, username: &str) -> StoreResult<()> {
        if self.accounts.contains_key(&email.to_lowercase()) {
            return Err(StoreError::Conflict("Email already exists".to_string()));
        }
        if self.accounts.values().any(|a| a.username == username) {
            return Err(StoreError::Conflict("Username already exists".to_string()));
        }
        Ok(())
    }

    fn insert_account(
        &mut self,
        id: i64,
        name: &str,
        username: &str,
        email: &str,
        password_hash: String,
        role: Role,
    ) {
        self.accounts.insert(
            email.to_lowercase(),
            Account {
                id,
                name: name.to_string(),
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            },
        );
    }

    /// Re-keys and patches the account belonging to a person record.
    fn patch_account(
        &mut self,
        id: i64,
        name: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> StoreResult<()> {
        let Some(old_key) = self
            .accounts
            .iter()
            .find(|(_, a)| a.id == id)
            .map(|(k, _)| k.clone())
        else {
            return Ok(());
        };

        if let Some(new_email) = email {
            let new_key = new_email.to_lowercase();
            if new_key != old_key && self.accounts.contains_key(&new_key) {
                return Err(StoreError::Conflict("Email already exists".to_string()));
            }
        }

        // Checks passed; the unwrap-free remove/insert below cannot miss.
        if let Some(mut account) = self.accounts.remove(&old_key) {
            if let Some(name) = name {
                account.name = name.to_string();
            }
            if let Some(email) = email {
                account.email = email.to_string();
            }
            if let Some(hash) = password_hash {
                account.password_hash = hash.to_string();
            }
            let key = account.email.to_lowercase();
            self.accounts.insert(key, account);
        }
        Ok(())
    }

    fn remove_account(&mut self, id: i64) {
        self.accounts.retain(|_, a| a.id != id);
    }

    fn teacher_exists(&self, name: &str) -> StoreResult<()> {
        if self.teachers.iter().any(|t| t.name == name) {
            Ok(())
        } else {
            Err(StoreError::InvalidReference(format!(
                "Teacher '{}' not found",
                name
            )))
        }
    }

    fn student_exists(&self, name: &str) -> StoreResult<()> {
        if self.students.iter().any(|s| s.name == name) {
            Ok(())
        } else {
            Err(StoreError::InvalidReference(format!(
                "Student '{}' not found",
                name
            )))
        }
    }

    fn section_exists(&self, name: &str) -> StoreResult<()> {
        if self.sections.iter().any(|s| s.name == name) {
            Ok(())
        } else {
            Err(StoreError::InvalidReference(format!(
                "Section '{}' not found",
                name
            )))
        }
    }

    fn course_exists(&self, name: &str) -> StoreResult<()> {
        if self.courses.iter().any(|c| c.name == name) {
            Ok(())
        } else {
            Err(StoreError::InvalidReference(format!(
                "Course '{}' not found",
                name
            )))
        }
    }

    fn subject_by_name(&self, name: &str) -> StoreResult<&Subject> {
        self.subjects
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| StoreError::InvalidReference(format!("Subject '{}' not found", name)))
    }

    fn assignment_exists(&self, title: &str) -> StoreResult<()> {
        if self.assignments.iter().any(|a| a.title == title) {
            Ok(())
        } else {
            Err(StoreError::InvalidReference(format!(
                "Assignment '{}' not found",
                title
            )))
        }
    }

    fn admin_exists(&self, name: &str) -> StoreResult<()> {
        if self.admins.iter().any(|a| a.name == name) {
            Ok(())
        } else {
            Err(StoreError::InvalidReference(format!(
                "Admin '{}' not found",
                name
            )))
        }
    }

    /// Subjects assigned to a teacher, for the derived `subjects` field.
    fn subjects_of(&self, teacher: &str) -> Vec<String> {
        self.subjects
            .iter()
            .filter(|s| s.teacher == teacher)
            .map(|s| s.name.clone())
            .collect()
    }
}

/// Removes by id from a vector of records, returning whether one was removed.
fn remove_by_id<T>(records: &mut Vec<T>, id: i64, id_of: impl Fn(&T) -> i64) -> bool {
    let before = records.len();
    records.retain(|r| id_of(r) != id);
    records.len() != before
}

// =============================================================================
// Store Implementation
// =============================================================================

#[async_trait]
impl Store for MemoryStore {
    // =========================================================================
    // Accounts
    // =========================================================================

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        Ok(self.read()?.accounts.get(&email.to_lowercase()).cloned())
    }

    // =========================================================================
    // Admins
    // =========================================================================

    async fn list_admins(&self) -> StoreResult<Vec<Admin>> {
        Ok(self.read()?.admins.clone())
    }

    async fn create_admin(&self, new: NewAdmin) -> StoreResult<Admin> {
        let mut inner = self.write()?;
        inner.check_credentials_free(&new.email, &new.username)?;

        let id = inner.alloc_id();
        inner.insert_account(
            id,
            &new.name,
            &new.username,
            &new.email,
            new.password_hash,
            Role::Admin,
        );

        let admin = Admin {
            id,
            name: new.name,
            username: new.username,
            email: new.email,
        };
        inner.admins.push(admin.clone());
        Ok(admin)
    }

    // =========================================================================
    // Students
    // =========================================================================

    async fn list_students(&self) -> StoreResult<Vec<Student>> {
        Ok(self.read()?.students.clone())
    }

    async fn get_student(&self, id: i64) -> StoreResult<Option<Student>> {
        Ok(self.read()?.students.iter().find(|s| s.id == id).cloned())
    }

    async fn create_student(&self, new: NewStudent) -> StoreResult<Student> {
        let mut inner = self.write()?;
        inner.check_credentials_free(&new.email, &new.username)?;
        inner.section_exists(&new.section)?;

        let id = inner.alloc_id();
        inner.insert_account(
            id,
            &new.name,
            &new.username,
            &new.email,
            new.password_hash,
            Role::Student,
        );

        let student = Student {
            id,
            name: new.name,
            username: new.username,
            email: new.email,
            section: new.section,
        };
        inner.students.push(student.clone());
        Ok(student)
    }

    async fn update_student(&self, id: i64, update: StudentUpdate) -> StoreResult<Option<Student>> {
        let mut inner = self.write()?;

        if inner.students.iter().all(|s| s.id != id) {
            return Ok(None);
        }
        if let Some(section) = &update.section {
            inner.section_exists(section)?;
        }
        inner.patch_account(
            id,
            update.name.as_deref(),
            update.email.as_deref(),
            update.password_hash.as_deref(),
        )?;

        let student = inner.students.iter_mut().find(|s| s.id == id);
        Ok(student.map(|s| {
            if let Some(name) = update.name {
                s.name = name;
            }
            if let Some(email) = update.email {
                s.email = email;
            }
            if let Some(section) = update.section {
                s.section = section;
            }
            s.clone()
        }))
    }

    async fn delete_student(&self, id: i64) -> StoreResult<bool> {
        let mut inner = self.write()?;
        let removed = remove_by_id(&mut inner.students, id, |s| s.id);
        if removed {
            inner.remove_account(id);
        }
        Ok(removed)
    }

    // =========================================================================
    // Teachers
    // =========================================================================

    async fn list_teachers(&self) -> StoreResult<Vec<Teacher>> {
        let inner = self.read()?;
        Ok(inner
            .teachers
            .iter()
            .map(|t| Teacher {
                subjects: inner.subjects_of(&t.name),
                ..t.clone()
            })
            .collect())
    }

    async fn get_teacher(&self, id: i64) -> StoreResult<Option<Teacher>> {
        let inner = self.read()?;
        Ok(inner.teachers.iter().find(|t| t.id == id).map(|t| Teacher {
            subjects: inner.subjects_of(&t.name),
            ..t.clone()
        }))
    }

    async fn create_teacher(&self, new: NewTeacher) -> StoreResult<Teacher> {
        let mut inner = self.write()?;
        inner.check_credentials_free(&new.email, &new.username)?;

        let id = inner.alloc_id();
        inner.insert_account(
            id,
            &new.name,
            &new.username,
            &new.email,
            new.password_hash,
            Role::Teacher,
        );

        let teacher = Teacher {
            id,
            name: new.name,
            username: new.username,
            email: new.email,
            subjects: Vec::new(),
        };
        inner.teachers.push(teacher.clone());
        Ok(teacher)
    }

    async fn update_teacher(&self, id: i64, update: TeacherUpdate) -> StoreResult<Option<Teacher>> {
        let mut inner = self.write()?;

        if inner.teachers.iter().all(|t| t.id != id) {
            return Ok(None);
        }
        inner.patch_account(
            id,
            update.name.as_deref(),
            update.email.as_deref(),
            update.password_hash.as_deref(),
        )?;

        let teacher = inner.teachers.iter_mut().find(|t| t.id == id);
        let updated = teacher.map(|t| {
            if let Some(name) = update.name {
                t.name = name;
            }
            if let Some(email) = update.email {
                t.email = email;
            }
            t.clone()
        });
        Ok(updated.map(|t| Teacher {
            subjects: inner.subjects_of(&t.name),
            ..t
        }))
    }

    async fn delete_teacher(&self, id: i64) -> StoreResult<bool> {
        let mut inner = self.write()?;
        let removed = remove_by_id(&mut inner.teachers, id, |t| t.id);
        if removed {
            inner.remove_account(id);
        }
        Ok(removed)
    }

    // =========================================================================
    // Sections
    // =========================================================================

    async fn list_sections(&self) -> StoreResult<Vec<Section>> {
        Ok(self.read()?.sections.clone())
    }

    async fn get_section(&self, id: i64) -> StoreResult<Option<Section>> {
        Ok(self.read()?.sections.iter().find(|s| s.id == id).cloned())
    }

    async fn create_section(&self, new: NewSection) -> StoreResult<Section> {
        let mut inner = self.write()?;
        if inner.sections.iter().any(|s| s.name == new.name) {
            return Err(StoreError::Conflict(format!(
                "Section '{}' already exists",
                new.name
            )));
        }
        inner.teacher_exists(&new.teacher)?;

        let id = inner.alloc_id();
        let section = Section {
            id,
            name: new.name,
            teacher: new.teacher,
        };
        inner.sections.push(section.clone());
        Ok(section)
    }

    async fn update_section(&self, id: i64, update: SectionUpdate) -> StoreResult<Option<Section>> {
        let mut inner = self.write()?;

        if inner.sections.iter().all(|s| s.id != id) {
            return Ok(None);
        }
        if let Some(name) = &update.name {
            if inner.sections.iter().any(|s| s.id != id && &s.name == name) {
                return Err(StoreError::Conflict(format!(
                    "Section '{}' already exists",
                    name
                )));
            }
        }
        if let Some(teacher) = &update.teacher {
            inner.teacher_exists(teacher)?;
        }

        let section = inner.sections.iter_mut().find(|s| s.id == id);
        Ok(section.map(|s| {
            if let Some(name) = update.name {
                s.name = name;
            }
            if let Some(teacher) = update.teacher {
                s.teacher = teacher;
            }
            s.clone()
        }))
    }

    async fn delete_section(&self, id: i64) -> StoreResult<bool> {
        Ok(remove_by_id(&mut self.write()?.sections, id, |s| s.id))
    }

    // =========================================================================
    // Courses
    // =========================================================================

    async fn list_courses(&self) -> StoreResult<Vec<Course>> {
        Ok(self.read()?.courses.clone())
    }

    async fn get_course(&self, id: i64) -> StoreResult<Option<Course>> {
        Ok(self.read()?.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn create_course(&self, new: NewCourse) -> StoreResult<Course> {
        let mut inner = self.write()?;
        if inner.courses.iter().any(|c| c.name == new.name) {
            return Err(StoreError::Conflict(format!(
                "Course '{}' already exists",
                new.name
            )));
        }
        inner.teacher_exists(&new.teacher)?;

        let id = inner.alloc_id();
        let course = Course {
            id,
            name: new.name,
            description: new.description,
            course_code: new.course_code,
            teacher: new.teacher,
        };
        inner.courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: i64, update: CourseUpdate) -> StoreResult<Option<Course>> {
        let mut inner = self.write()?;

        if inner.courses.iter().all(|c| c.id != id) {
            return Ok(None);
        }
        if let Some(name) = &update.name {
            if inner.courses.iter().any(|c| c.id != id && &c.name == name) {
                return Err(StoreError::Conflict(format!(
                    "Course '{}' already exists",
                    name
                )));
            }
        }
        if let Some(teacher) = &update.teacher {
            inner.teacher_exists(teacher)?;
        }

        let course = inner.courses.iter_mut().find(|c| c.id == id);
        Ok(course.map(|c| {
            if let Some(name) = update.name {
                c.name = name;
            }
            if let Some(description) = update.description {
                c.description = description;
            }
            if let Some(teacher) = update.teacher {
                c.teacher = teacher;
            }
            c.clone()
        }))
    }

    async fn delete_course(&self, id: i64) -> StoreResult<bool> {
        Ok(remove_by_id(&mut self.write()?.courses, id, |c| c.id))
    }

    // =========================================================================
    // Subjects
    // =========================================================================

    async fn list_subjects(&self) -> StoreResult<Vec<Subject>> {
        Ok(self.read()?.subjects.clone())
    }

    async fn get_subject(&self, id: i64) -> StoreResult<Option<Subject>> {
        Ok(self.read()?.subjects.iter().find(|s| s.id == id).cloned())
    }

    async fn create_subject(&self, new: NewSubject) -> StoreResult<Subject> {
        let mut inner = self.write()?;
        if inner.subjects.iter().any(|s| s.name == new.name) {
            return Err(StoreError::Conflict(format!(
                "Subject '{}' already exists",
                new.name
            )));
        }
        inner.teacher_exists(&new.teacher)?;
        inner.course_exists(&new.course)?;

        let id = inner.alloc_id();
        let subject = Subject {
            id,
            name: new.name,
            teacher: new.teacher,
            course: new.course,
        };
        inner.subjects.push(subject.clone());
        Ok(subject)
    }

    async fn update_subject(&self, id: i64, update: SubjectUpdate) -> StoreResult<Option<Subject>> {
        let mut inner = self.write()?;

        if inner.subjects.iter().all(|s| s.id != id) {
            return Ok(None);
        }
        if let Some(name) = &update.name {
            if inner.subjects.iter().any(|s| s.id != id && &s.name == name) {
                return Err(StoreError::Conflict(format!(
                    "Subject '{}' already exists",
                    name
                )));
            }
        }
        if let Some(teacher) = &update.teacher {
            inner.teacher_exists(teacher)?;
        }
        if let Some(course) = &update.course {
            inner.course_exists(course)?;
        }

        let subject = inner.subjects.iter_mut().find(|s| s.id == id);
        Ok(subject.map(|s| {
            if let Some(name) = update.name {
                s.name = name;
            }
            if let Some(teacher) = update.teacher {
                s.teacher = teacher;
            }
            if let Some(course) = update.course {
                s.course = course;
            }
            s.clone()
        }))
    }

    async fn delete_subject(&self, id: i64) -> StoreResult<bool> {
        Ok(remove_by_id(&mut self.write()?.subjects, id, |s| s.id))
    }

    // =========================================================================
    // Enrollments
    // =========================================================================

    async fn list_enrollments(&self, filter: EnrollmentFilter) -> StoreResult<Vec<Enrollment>> {
        let inner = self.read()?;
        Ok(inner
            .enrollments
            .iter()
            .filter(|e| filter.course.as_ref().is_none_or(|c| &e.course == c))
            .filter(|e| filter.student.as_ref().is_none_or(|s| &e.student == s))
            .cloned()
            .collect())
    }

    async fn create_enrollment(&self, new: NewEnrollment) -> StoreResult<Enrollment> {
        let mut inner = self.write()?;
        inner.student_exists(&new.student)?;
        inner.course_exists(&new.course)?;
        if inner
            .enrollments
            .iter()
            .any(|e| e.student == new.student && e.course == new.course)
        {
            return Err(StoreError::Conflict(format!(
                "Student '{}' is already enrolled in '{}'",
                new.student, new.course
            )));
        }

        let id = inner.alloc_id();
        let enrollment = Enrollment {
            id,
            student: new.student,
            course: new.course,
            enrollment_date: new.enrollment_date,
            status: new.status,
            grade: new.grade,
        };
        inner.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn update_enrollment(
        &self,
        id: i64,
        update: EnrollmentUpdate,
    ) -> StoreResult<Option<Enrollment>> {
        let mut inner = self.write()?;
        let enrollment = inner.enrollments.iter_mut().find(|e| e.id == id);
        Ok(enrollment.map(|e| {
            if let Some(status) = update.status {
                e.status = status;
            }
            if let Some(grade) = update.grade {
                e.grade = grade;
            }
            e.clone()
        }))
    }

    async fn delete_enrollment(&self, id: i64) -> StoreResult<bool> {
        Ok(remove_by_id(&mut self.write()?.enrollments, id, |e| e.id))
    }

    // =========================================================================
    // Assignments
    // =========================================================================

    async fn list_assignments(&self) -> StoreResult<Vec<Assignment>> {
        Ok(self.read()?.assignments.clone())
    }

    async fn get_assignment(&self, id: i64) -> StoreResult<Option<Assignment>> {
        Ok(self.read()?.assignments.iter().find(|a| a.id == id).cloned())
    }

    async fn create_assignment(&self, new: NewAssignment) -> StoreResult<Assignment> {
        let mut inner = self.write()?;
        let teacher = inner.subject_by_name(&new.subject)?.teacher.clone();

        let id = inner.alloc_id();
        let assignment = Assignment {
            id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            subject: new.subject,
            teacher,
            total_marks: new.total_marks,
        };
        inner.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: AssignmentUpdate,
    ) -> StoreResult<Option<Assignment>> {
        let mut inner = self.write()?;

        if inner.assignments.iter().all(|a| a.id != id) {
            return Ok(None);
        }
        // A subject change re-derives the owning teacher.
        let new_teacher = match &update.subject {
            Some(subject) => Some(inner.subject_by_name(subject)?.teacher.clone()),
            None => None,
        };

        let assignment = inner.assignments.iter_mut().find(|a| a.id == id);
        Ok(assignment.map(|a| {
            if let Some(title) = update.title {
                a.title = title;
            }
            if let Some(description) = update.description {
                a.description = description;
            }
            if let Some(due_date) = update.due_date {
                a.due_date = due_date;
            }
            if let Some(subject) = update.subject {
                a.subject = subject;
            }
            if let Some(teacher) = new_teacher {
                a.teacher = teacher;
            }
            if let Some(total_marks) = update.total_marks {
                a.total_marks = total_marks;
            }
            a.clone()
        }))
    }

    async fn delete_assignment(&self, id: i64) -> StoreResult<bool> {
        Ok(remove_by_id(&mut self.write()?.assignments, id, |a| a.id))
    }

    // =========================================================================
    // Submissions
    // =========================================================================

    async fn list_submissions(&self, filter: SubmissionFilter) -> StoreResult<Vec<Submission>> {
        let inner = self.read()?;
        Ok(inner
            .submissions
            .iter()
            .filter(|s| filter.student.as_ref().is_none_or(|n| &s.student == n))
            .filter(|s| filter.assignment.as_ref().is_none_or(|a| &s.assignment == a))
            .cloned()
            .collect())
    }

    async fn create_submission(&self, new: NewSubmission) -> StoreResult<Submission> {
        let mut inner = self.write()?;
        inner.assignment_exists(&new.assignment)?;
        inner.student_exists(&new.student)?;
        if inner
            .submissions
            .iter()
            .any(|s| s.assignment == new.assignment && s.student == new.student)
        {
            return Err(StoreError::Conflict(format!(
                "Student '{}' already submitted '{}'",
                new.student, new.assignment
            )));
        }

        let id = inner.alloc_id();
        let submission = Submission {
            id,
            assignment: new.assignment,
            student: new.student,
            submission_text: new.submission_text,
            submitted_at: Utc::now(),
            marks_obtained: None,
            feedback: None,
        };
        inner.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn update_submission(
        &self,
        id: i64,
        update: SubmissionUpdate,
    ) -> StoreResult<Option<Submission>> {
        let mut inner = self.write()?;
        let submission = inner.submissions.iter_mut().find(|s| s.id == id);
        Ok(submission.map(|s| {
            if let Some(text) = update.submission_text {
                s.submission_text = text;
            }
            if let Some(marks) = update.marks_obtained {
                s.marks_obtained = Some(marks);
            }
            if let Some(feedback) = update.feedback {
                s.feedback = Some(feedback);
            }
            s.clone()
        }))
    }

    async fn delete_submission(&self, id: i64) -> StoreResult<bool> {
        Ok(remove_by_id(&mut self.write()?.submissions, id, |s| s.id))
    }

    // =========================================================================
    // Attendance
    // =========================================================================

    async fn list_attendance(
        &self,
        filter: AttendanceFilter,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let inner = self.read()?;
        Ok(inner
            .attendance
            .iter()
            .filter(|a| filter.student.as_ref().is_none_or(|s| &a.student == s))
            .filter(|a| filter.subject.as_ref().is_none_or(|s| &a.subject == s))
            .cloned()
            .collect())
    }

    async fn create_attendance(&self, new: NewAttendance) -> StoreResult<AttendanceRecord> {
        let mut inner = self.write()?;
        inner.student_exists(&new.student)?;
        inner.subject_by_name(&new.subject)?;

        let id = inner.alloc_id();
        let record = AttendanceRecord {
            id,
            student: new.student,
            subject: new.subject,
            status: new.status,
            marked_at: Utc::now(),
        };
        inner.attendance.push(record.clone());
        Ok(record)
    }

    async fn update_attendance(
        &self,
        id: i64,
        update: AttendanceUpdate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let mut inner = self.write()?;

        if inner.attendance.iter().all(|a| a.id != id) {
            return Ok(None);
        }
        if let Some(student) = &update.student {
            inner.student_exists(student)?;
        }
        if let Some(subject) = &update.subject {
            inner.subject_by_name(subject)?;
        }

        let record = inner.attendance.iter_mut().find(|a| a.id == id);
        Ok(record.map(|a| {
            if let Some(status) = update.status {
                a.status = status;
            }
            if let Some(student) = update.student {
                a.student = student;
            }
            if let Some(subject) = update.subject {
                a.subject = subject;
            }
            a.clone()
        }))
    }

    async fn delete_attendance(&self, id: i64) -> StoreResult<bool> {
        Ok(remove_by_id(&mut self.write()?.attendance, id, |a| a.id))
    }

    // =========================================================================
    // Results
    // =========================================================================

    async fn list_results(&self) -> StoreResult<Vec<ExamResult>> {
        Ok(self.read()?.results.clone())
    }

    async fn get_result(&self, id: i64) -> StoreResult<Option<ExamResult>> {
        Ok(self.read()?.results.iter().find(|r| r.id == id).cloned())
    }

    async fn create_result(&self, new: NewResult) -> StoreResult<ExamResult> {
        let mut inner = self.write()?;
        inner.student_exists(&new.student)?;
        inner.subject_by_name(&new.subject)?;

        let id = inner.alloc_id();
        let result = ExamResult {
            id,
            student: new.student,
            subject: new.subject,
            total_marks: new.total_marks,
            obtained_marks: new.obtained_marks,
            exam_type: new.exam_type,
            remarks: new.remarks,
        };
        inner.results.push(result.clone());
        Ok(result)
    }

    async fn update_result(
        &self,
        id: i64,
        update: ResultUpdate,
    ) -> StoreResult<Option<ExamResult>> {
        let mut inner = self.write()?;
        let result = inner.results.iter_mut().find(|r| r.id == id);
        Ok(result.map(|r| {
            if let Some(marks) = update.obtained_marks {
                r.obtained_marks = marks;
            }
            if let Some(remarks) = update.remarks {
                r.remarks = remarks;
            }
            r.clone()
        }))
    }

    async fn delete_result(&self, id: i64) -> StoreResult<bool> {
        Ok(remove_by_id(&mut self.write()?.results, id, |r| r.id))
    }

    // =========================================================================
    // Announcements
    // =========================================================================

    async fn list_announcements(&self) -> StoreResult<Vec<Announcement>> {
        Ok(self.read()?.announcements.clone())
    }

    async fn get_announcement(&self, id: i64) -> StoreResult<Option<Announcement>> {
        Ok(self
            .read()?
            .announcements
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create_announcement(&self, new: NewAnnouncement) -> StoreResult<Announcement> {
        let mut inner = self.write()?;
        inner.section_exists(&new.section)?;
        inner.teacher_exists(&new.teacher)?;

        let id = inner.alloc_id();
        let announcement = Announcement {
            id,
            title: new.title,
            content: new.content,
            target_audience: new.target_audience,
            section: new.section,
            teacher: new.teacher,
            created_at: Utc::now(),
        };
        inner.announcements.push(announcement.clone());
        Ok(announcement)
    }

    async fn update_announcement(
        &self,
        id: i64,
        update: AnnouncementUpdate,
    ) -> StoreResult<Option<Announcement>> {
        let mut inner = self.write()?;

        if inner.announcements.iter().all(|a| a.id != id) {
            return Ok(None);
        }
        if let Some(section) = &update.section {
            inner.section_exists(section)?;
        }

        let announcement = inner.announcements.iter_mut().find(|a| a.id == id);
        Ok(announcement.map(|a| {
            if let Some(title) = update.title {
                a.title = title;
            }
            if let Some(content) = update.content {
                a.content = content;
            }
            if let Some(section) = update.section {
                a.section = section;
            }
            a.clone()
        }))
    }

    async fn delete_announcement(&self, id: i64) -> StoreResult<bool> {
        Ok(remove_by_id(&mut self.write()?.announcements, id, |a| a.id))
    }

    // =========================================================================
    // Events
    // =========================================================================

    async fn list_events(&self) -> StoreResult<Vec<Event>> {
        Ok(self.read()?.events.clone())
    }

    async fn get_event(&self, id: i64) -> StoreResult<Option<Event>> {
        Ok(self.read()?.events.iter().find(|e| e.id == id).cloned())
    }

    async fn create_event(&self, new: NewEvent) -> StoreResult<Event> {
        let mut inner = self.write()?;
        inner.admin_exists(&new.admin)?;

        let id = inner.alloc_id();
        let event = Event {
            id,
            title: new.title,
            description: new.description,
            event_date: new.event_date,
            event_time: new.event_time,
            admin: new.admin,
        };
        inner.events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: i64, update: EventUpdate) -> StoreResult<Option<Event>> {
        let mut inner = self.write()?;
        let event = inner.events.iter_mut().find(|e| e.id == id);
        Ok(event.map(|e| {
            if let Some(title) = update.title {
                e.title = title;
            }
            if let Some(description) = update.description {
                e.description = description;
            }
            if let Some(event_date) = update.event_date {
                e.event_date = event_date;
            }
            if let Some(event_time) = update.event_time {
                e.event_time = event_time;
            }
            e.clone()
        }))
    }

    async fn delete_event(&self, id: i64) -> StoreResult<bool> {
        Ok(remove_by_id(&mut self.write()?.events, id, |e| e.id))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slate_core::AttendanceStatus;

    async fn store_with_structure() -> MemoryStore {
        let store = MemoryStore::new();

        store
            .create_teacher(NewTeacher {
                name: "Priya Shah".to_string(),
                username: "priya".to_string(),
                email: "priya@school.example".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        store
            .create_section(NewSection {
                name: "A1".to_string(),
                teacher: "Priya Shah".to_string(),
            })
            .await
            .unwrap();
        store
            .create_course(NewCourse {
                name: "Mathematics".to_string(),
                description: "Core maths".to_string(),
                course_code: "MATH-101".to_string(),
                teacher: "Priya Shah".to_string(),
            })
            .await
            .unwrap();
        store
            .create_subject(NewSubject {
                name: "Algebra".to_string(),
                teacher: "Priya Shah".to_string(),
                course: "Mathematics".to_string(),
            })
            .await
            .unwrap();

        store
    }

    fn new_student(name: &str, username: &str, email: &str) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            section: "A1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_students() {
        let store = store_with_structure().await;

        let student = store
            .create_student(new_student("Mina Park", "mina", "mina@school.example"))
            .await
            .unwrap();
        assert!(student.id > 0);

        let students = store.list_students().await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].section, "A1");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = store_with_structure().await;

        store
            .create_student(new_student("Mina Park", "mina", "mina@school.example"))
            .await
            .unwrap();
        let err = store
            .create_student(new_student("Other Kid", "other", "MINA@school.example"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_section_is_invalid_reference() {
        let store = store_with_structure().await;

        let mut new = new_student("Mina Park", "mina", "mina@school.example");
        new.section = "Z9".to_string();

        let err = store.create_student(new).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_assignment_derives_teacher_from_subject() {
        let store = store_with_structure().await;

        let assignment = store
            .create_assignment(NewAssignment {
                title: "Worksheet 1".to_string(),
                description: "Solve all".to_string(),
                due_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                subject: "Algebra".to_string(),
                total_marks: 100,
            })
            .await
            .unwrap();

        assert_eq!(assignment.teacher, "Priya Shah");
    }

    #[tokio::test]
    async fn test_delete_student_removes_account() {
        let store = store_with_structure().await;

        let student = store
            .create_student(new_student("Mina Park", "mina", "mina@school.example"))
            .await
            .unwrap();
        assert!(store
            .find_account_by_email("mina@school.example")
            .await
            .unwrap()
            .is_some());

        assert!(store.delete_student(student.id).await.unwrap());
        assert!(store
            .find_account_by_email("mina@school.example")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_student_email_rekeys_account() {
        let store = store_with_structure().await;

        let student = store
            .create_student(new_student("Mina Park", "mina", "mina@school.example"))
            .await
            .unwrap();

        store
            .update_student(
                student.id,
                StudentUpdate {
                    email: Some("mina.park@school.example".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(store
            .find_account_by_email("mina@school.example")
            .await
            .unwrap()
            .is_none());
        let account = store
            .find_account_by_email("mina.park@school.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.id, student.id);
    }

    #[tokio::test]
    async fn test_teacher_subjects_are_derived() {
        let store = store_with_structure().await;

        let teachers = store.list_teachers().await.unwrap();
        assert_eq!(teachers[0].subjects, vec!["Algebra".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_enrollment_conflicts() {
        let store = store_with_structure().await;
        store
            .create_student(new_student("Mina Park", "mina", "mina@school.example"))
            .await
            .unwrap();

        let new = NewEnrollment {
            student: "Mina Park".to_string(),
            course: "Mathematics".to_string(),
            enrollment_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            status: "active".to_string(),
            grade: String::new(),
        };
        store.create_enrollment(new.clone()).await.unwrap();

        let err = store.create_enrollment(new).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_attendance_requires_known_student() {
        let store = store_with_structure().await;

        let err = store
            .create_attendance(NewAttendance {
                student: "Nobody".to_string(),
                subject: "Algebra".to_string(),
                status: AttendanceStatus::Present,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let store = store_with_structure().await;

        let updated = store
            .update_student(999, StudentUpdate::default())
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(!store.delete_student(999).await.unwrap());
    }
}
