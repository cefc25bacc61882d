// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # slate-tests
//!
//! Cross-crate integration tests for the SLATE platform, plus the shared
//! fixtures, builders and assertions they use.

pub mod common;
