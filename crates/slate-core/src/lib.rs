// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # slate-core
//!
//! Core domain model and shared types for the SLATE learning management
//! platform.
//!
//! This crate provides the types shared by the API server and the client:
//!
//! - **Role**: the closed role enumeration (`admin` / `teacher` / `student`)
//! - **Model**: LMS entities (students, teachers, sections, courses,
//!   subjects, enrollments, assignments, submissions, attendance, results,
//!   announcements, events) and the derived user profile
//! - **Error**: model-level error hierarchy

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod model;
pub mod role;

pub use error::ModelError;
pub use model::{
    Admin, Announcement, Assignment, AttendanceRecord, AttendanceStatus, Audience, Course,
    Enrollment, Event, ExamResult, Section, Student, Subject, Submission, Teacher, UserProfile,
};
pub use role::Role;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
