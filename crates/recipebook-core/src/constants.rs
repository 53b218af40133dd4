// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for listings, ratings, the home feed, and network defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than kept in a single flat list.

/// Recipe listing
pub mod listing {
    /// Recipes per listing page
    pub const RECIPES_PER_PAGE: u32 = 5;
}

/// Review rating scale
pub mod ratings {
    /// Lowest rating a review can carry
    pub const MIN_RATING: u8 = 1;
    /// Highest rating a review can carry
    pub const MAX_RATING: u8 = 5;
}

/// Landing page feed
pub mod home {
    /// Newest recipes shown on the landing page
    pub const LATEST_LIMIT: u32 = 3;
    /// Most-viewed recipes shown on the landing page
    pub const POPULAR_LIMIT: u32 = 2;
}

/// Object storage
pub mod storage {
    /// Key prefix for uploaded recipe images
    pub const RECIPE_IMAGE_PREFIX: &str = "recipe";
    /// Default upload size limit (5 MiB)
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
}

/// Network defaults
pub mod network {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    /// Default header carrying the authenticated user id
    pub const DEFAULT_IDENTITY_HEADER: &str = "x-user-id";
}

/// Service identity used in logs
pub mod service_names {
    /// Server binary service name
    pub const RECIPEBOOK_SERVER: &str = "recipebook-server";
}
