// ABOUTME: Process-local object store for development and tests
// ABOUTME: Keeps image bytes in a map keyed by object key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ImageUpload, ObjectStore};
use crate::constants::storage::RECIPE_IMAGE_PREFIX;
use crate::errors::{AppError, AppResult};

const MEMORY_SCHEME: &str = "memory://";

/// In-memory object store; cloned handles share the same objects
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryObjectStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored behind a URL previously returned by `store`
    pub async fn get(&self, url: &str) -> Option<Bytes> {
        let key = url.strip_prefix(MEMORY_SCHEME)?;
        self.objects.read().await.get(key).cloned()
    }

    /// Number of stored objects
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether nothing has been stored
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn store(&self, upload: ImageUpload) -> AppResult<String> {
        if upload.bytes.is_empty() {
            return Err(AppError::storage("Refusing to store an empty image"));
        }

        let key = format!(
            "{RECIPE_IMAGE_PREFIX}/{}.{}",
            Uuid::new_v4(),
            upload.extension()
        );
        self.objects.write().await.insert(key.clone(), upload.bytes);
        Ok(format!("{MEMORY_SCHEME}{key}"))
    }
}
