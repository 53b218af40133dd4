// ABOUTME: Filesystem-backed object store serving images from a public base URL
// ABOUTME: Objects are written under <root>/recipe/<uuid>.<ext>
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{ImageUpload, ObjectStore};
use crate::constants::storage::RECIPE_IMAGE_PREFIX;
use crate::errors::{AppError, AppResult};

/// Stores images on local disk
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    /// Store objects under `root`, addressed as `<public_base_url>/<key>`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Directory objects are written to
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn store(&self, upload: ImageUpload) -> AppResult<String> {
        if upload.bytes.is_empty() {
            return Err(AppError::storage("Refusing to store an empty image"));
        }

        let key = format!(
            "{RECIPE_IMAGE_PREFIX}/{}.{}",
            Uuid::new_v4(),
            upload.extension()
        );
        let path = self.root.join(&key);

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await.map_err(|e| {
                warn!(path = %dir.display(), error = %e, "Failed to create image directory");
                AppError::storage(format!("Failed to create image directory: {e}")).with_source(e)
            })?;
        }

        fs::write(&path, &upload.bytes).await.map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to write image");
            AppError::storage(format!("Failed to write image: {e}")).with_source(e)
        })?;

        debug!(key = %key, bytes = upload.bytes.len(), "Stored recipe image");
        Ok(format!("{}/{key}", self.public_base_url))
    }
}
