// ABOUTME: Re-exports pagination types from recipebook-core for unified type identity
// ABOUTME: Ensures PageRequest/Page are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipebook_core::pagination::*;
