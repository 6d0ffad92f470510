use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    assets::decode::{DecodedImage, decode_image},
    foundation::error::{ResourceErrorKind, SceneError, SceneResult},
};

/// Append-only cache of decoded images keyed by file path.
///
/// A single lock covers the whole check-load-insert sequence, so each path is read and decoded at
/// most once even when several scenes are decoded concurrently against the same cache. Failed
/// loads are never cached: the next request for a bad path tries the filesystem again.
///
/// The lock is held while a missing image is read and decoded, so lookups of already cached
/// paths wait for any load in progress.
#[derive(Debug, Default)]
pub struct ImageCache {
    inner: Mutex<CacheInner>,
}

#[derive(Debug, Default)]
struct CacheInner {
    images: HashMap<PathBuf, Arc<DecodedImage>>,
    attempts: HashMap<PathBuf, u32>,
}

impl ImageCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the decoded image for `path`, loading it on first request.
    pub fn resolve(&self, path: impl AsRef<Path>) -> SceneResult<Arc<DecodedImage>> {
        let path = path.as_ref();
        self.resolve_as(&path.display().to_string(), path)
    }

    /// Like [`ImageCache::resolve`], for a file that a document names as `doc_path`.
    ///
    /// The cache is keyed by `path`; errors report `doc_path`, with `path` kept in the source.
    pub fn resolve_as(
        &self,
        doc_path: &str,
        path: impl AsRef<Path>,
    ) -> SceneResult<Arc<DecodedImage>> {
        let path = path.as_ref();
        let mut inner = self.lock();
        if let Some(img) = inner.images.get(path) {
            tracing::debug!(path = %path.display(), "image cache hit");
            return Ok(Arc::clone(img));
        }

        *inner.attempts.entry(path.to_path_buf()).or_default() += 1;
        tracing::debug!(path = %path.display(), "image cache miss, loading");

        let img = Arc::new(load(doc_path, path)?);
        inner.images.insert(path.to_path_buf(), Arc::clone(&img));
        Ok(img)
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.lock().images.len()
    }

    /// Return `true` when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return `true` when `path` has been successfully loaded.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.lock().images.contains_key(path.as_ref())
    }

    /// How many times the filesystem and codec were invoked for `path`, failures included.
    pub fn load_attempts(&self, path: impl AsRef<Path>) -> u32 {
        self.lock().attempts.get(path.as_ref()).copied().unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load(doc_path: &str, path: &Path) -> SceneResult<DecodedImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        let kind = if e.kind() == ErrorKind::NotFound {
            ResourceErrorKind::NotFound
        } else {
            ResourceErrorKind::IoFailure
        };
        let source = anyhow::Error::new(e).context(format!("read '{}'", path.display()));
        SceneError::resource(kind, doc_path, source)
    })?;

    decode_image(&bytes).map_err(|e| {
        let kind = match e {
            image::ImageError::Unsupported(_) | image::ImageError::Decoding(_) => {
                ResourceErrorKind::UnsupportedFormat
            }
            _ => ResourceErrorKind::IoFailure,
        };
        let source = anyhow::Error::new(e).context(format!("decode '{}'", path.display()));
        SceneError::resource(kind, doc_path, source)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
