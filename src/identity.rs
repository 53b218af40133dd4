// ABOUTME: Identity seam: who is making the request, and whether they wrote a given recipe
// ABOUTME: The authenticated user id is passed explicitly into every service call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::http::{HeaderMap, HeaderName};
use tracing::debug;
use uuid::Uuid;

use crate::constants::network::DEFAULT_IDENTITY_HEADER;
use crate::errors::{AppError, AppResult};

/// Resolves the current user from a request
pub trait IdentityProvider: Send + Sync {
    /// The authenticated user's id, or `None` for an anonymous request
    fn current_user_id(&self, headers: &HeaderMap) -> Option<Uuid>;

    /// The authenticated user's id, failing for anonymous requests
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when the request carries no identity
    fn require_user_id(&self, headers: &HeaderMap) -> AppResult<Uuid> {
        self.current_user_id(headers)
            .ok_or_else(AppError::auth_required)
    }
}

/// Trusts a header set by an upstream authenticating proxy
#[derive(Debug, Clone)]
pub struct HeaderIdentityProvider {
    header: HeaderName,
}

impl HeaderIdentityProvider {
    /// Read the user id from `header`
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` if `header` is not a valid header name
    pub fn new(header: &str) -> AppResult<Self> {
        let header = HeaderName::try_from(header)
            .map_err(|e| AppError::config(format!("Invalid identity header {header}: {e}")))?;
        Ok(Self { header })
    }

    /// Header the provider reads
    #[must_use]
    pub const fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl Default for HeaderIdentityProvider {
    fn default() -> Self {
        Self {
            header: HeaderName::from_static(DEFAULT_IDENTITY_HEADER),
        }
    }
}

impl IdentityProvider for HeaderIdentityProvider {
    fn current_user_id(&self, headers: &HeaderMap) -> Option<Uuid> {
        let value = headers.get(&self.header)?.to_str().ok()?;
        match Uuid::parse_str(value.trim()) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!(error = %e, "Ignoring malformed identity header");
                None
            }
        }
    }
}

/// True iff the viewer is authenticated and is the recipe's author
#[must_use]
pub fn is_owner(viewer: Option<Uuid>, author_id: Uuid) -> bool {
    viewer == Some(author_id)
}
