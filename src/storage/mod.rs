// ABOUTME: Object storage seam for recipe images
// ABOUTME: Turns uploaded bytes into a durable public URL before any database write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Object Storage
//!
//! The catalogue never stores image bytes. An [`ObjectStore`] persists the
//! upload and hands back the URL that goes into the recipe row.

mod local;
mod memory;

pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppResult;

/// Raw image as submitted with a new recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Image content
    pub bytes: Bytes,
    /// MIME type reported by the client, if any
    pub content_type: Option<String>,
}

impl ImageUpload {
    /// Build an upload from bytes and an optional MIME type
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }

    /// File extension for the stored object
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.content_type.as_deref() {
            Some("image/jpeg" | "image/jpg") => "jpg",
            Some("image/png") => "png",
            Some("image/gif") => "gif",
            Some("image/webp") => "webp",
            _ => "bin",
        }
    }
}

/// Durable storage for uploaded images
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Persist `upload` and return its fully-resolved public URL
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` if the object could not be stored
    async fn store(&self, upload: ImageUpload) -> AppResult<String>;
}
