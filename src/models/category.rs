// ABOUTME: Recipe category model
// ABOUTME: Categories are reference data rendered in filters and the recipe form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A recipe category ("Breakfast", "Soup", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    pub id: i64,
    /// Display name
    pub name: String,
}
