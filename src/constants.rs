// ABOUTME: Re-exports domain constants from recipebook-core
// ABOUTME: Single source for page size, rating scale, and home-feed limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipebook_core::constants::*;
