// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named texture resources with upload on first use.

use alloc::string::{String, ToString};

use hashbrown::HashMap;

use crate::surface::{ChannelSwizzle, TextureHandle};

/// Errors from binding a texture.
///
/// None of these abort a frame; the pane falls back to a placeholder.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TextureError {
    /// The layout does not provide a texture with this name.
    #[error("texture `{0}` is not loaded")]
    Missing(String),
    /// The resource could not be uploaded.
    #[error("texture `{name}` failed to upload: {reason}")]
    Upload {
        /// Texture name.
        name: String,
        /// Backend-provided reason.
        reason: String,
    },
}

/// A decoded texture that can be uploaded to the drawing backend.
pub trait TextureResource {
    /// Upload the texture if needed and return its handle.
    ///
    /// Must be idempotent: calling it again after a success returns the same handle.
    fn upload(&mut self) -> Result<TextureHandle, TextureError>;

    /// How sampled channels map onto the output.
    fn channel_swizzle(&self) -> ChannelSwizzle;

    /// Release backend resources.
    fn dispose(&mut self);
}

#[derive(Debug)]
enum Upload {
    Pending,
    Ready(TextureHandle),
    Failed(TextureError),
}

#[derive(Debug)]
struct Entry<T> {
    resource: T,
    upload: Upload,
}

/// Texture resources keyed by name, uploaded the first time they are bound.
///
/// A failed upload is remembered and not retried until the texture is
/// replaced with [`TextureCache::insert`].
#[derive(Debug)]
pub struct TextureCache<T> {
    entries: HashMap<String, Entry<T>>,
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: TextureResource> TextureCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a texture. A replaced texture is disposed.
    pub fn insert(&mut self, name: impl Into<String>, resource: T) {
        let entry = Entry {
            resource,
            upload: Upload::Pending,
        };
        if let Some(mut old) = self.entries.insert(name.into(), entry) {
            old.resource.dispose();
        }
    }

    /// Whether a texture with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The resource registered under `name`.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name).map(|e| &e.resource)
    }

    /// Number of textures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no textures.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `name` has been uploaded successfully.
    pub fn is_uploaded(&self, name: &str) -> bool {
        matches!(
            self.entries.get(name).map(|e| &e.upload),
            Some(Upload::Ready(_))
        )
    }

    /// Resolve `name` to an uploaded handle and its channel swizzle,
    /// uploading on first use.
    pub fn bind(&mut self, name: &str) -> Result<(TextureHandle, ChannelSwizzle), TextureError> {
        let Some(entry) = self.entries.get_mut(name) else {
            return Err(TextureError::Missing(name.to_string()));
        };
        match &entry.upload {
            Upload::Ready(handle) => return Ok((*handle, entry.resource.channel_swizzle())),
            Upload::Failed(err) => return Err(err.clone()),
            Upload::Pending => {}
        }
        match entry.resource.upload() {
            Ok(handle) => {
                tracing::debug!(texture = name, ?handle, "texture uploaded");
                entry.upload = Upload::Ready(handle);
                Ok((handle, entry.resource.channel_swizzle()))
            }
            Err(err) => {
                tracing::warn!(texture = name, %err, "texture upload failed");
                entry.upload = Upload::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Dispose and drop the texture registered under `name`.
    pub fn dispose(&mut self, name: &str) -> bool {
        match self.entries.remove(name) {
            Some(mut entry) => {
                entry.resource.dispose();
                true
            }
            None => false,
        }
    }

    /// Dispose and drop every texture.
    pub fn dispose_all(&mut self) {
        let count = self.entries.len();
        for (_, mut entry) in self.entries.drain() {
            entry.resource.dispose();
        }
        if count > 0 {
            tracing::debug!(count, "textures disposed");
        }
    }
}
