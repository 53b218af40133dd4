// ABOUTME: Re-exports the unified error types from recipebook-core
// ABOUTME: Keeps AppError/ErrorCode as one type identity across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipebook_core::errors::*;
