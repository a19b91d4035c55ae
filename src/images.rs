use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use iced::widget::image::Handle;
use iced::Task;
use tracing::{debug, warn};

use crate::media::Message;
use crate::tmdb::fetch_image_bytes;

fn url_hash(s: &str) -> String {
    let mut hash: u64 = 5381;
    for byte in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    format!("{:016x}", hash)
}

fn default_cache_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".cache")
            .join("cinescope")
            .join("images")
    })
}

/// Decoded image handles keyed by URL, backed by an on-disk byte cache.
#[derive(Debug, Default)]
pub struct ImageCache {
    handles: HashMap<String, Handle>,
    pending: HashSet<String>,
    failed: HashSet<String>,
    directory: Option<PathBuf>,
}

impl ImageCache {
    pub fn new() -> Self {
        let directory = default_cache_dir();
        if let Some(ref dir) = directory {
            if let Err(error) = std::fs::create_dir_all(dir) {
                warn!(dir = %dir.display(), %error, "image cache directory unavailable");
            }
        }
        Self::with_directory(directory)
    }

    pub fn with_directory(directory: Option<PathBuf>) -> Self {
        Self {
            directory,
            ..Default::default()
        }
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.handles.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.handles.insert(url, handle);
    }

    pub fn mark_failed(&mut self, url: String) {
        self.pending.remove(&url);
        self.failed.insert(url);
    }

    /// True when `url` has never been requested.
    pub fn needs_load(&self, url: &str) -> bool {
        !self.handles.contains_key(url) && !self.pending.contains(url) && !self.failed.contains(url)
    }

    pub fn cache_path(&self, url: &str) -> Option<PathBuf> {
        self.directory.as_ref().map(|dir| dir.join(url_hash(url)))
    }

    /// Starts loading `url` from disk or network. Does nothing for URLs that
    /// are already cached, pending or known to fail.
    pub fn load(&mut self, url: String) -> Task<Message> {
        if !self.needs_load(&url) {
            return Task::none();
        }
        self.pending.insert(url.clone());
        let cache_path = self.cache_path(&url);

        Task::perform(read_or_fetch(url.clone(), cache_path), move |result| {
            Message::ImageLoaded(url, result.map(Handle::from_bytes))
        })
    }
}

async fn read_or_fetch(url: String, cache_path: Option<PathBuf>) -> Result<Vec<u8>, String> {
    if let Some(ref path) = cache_path {
        if let Ok(bytes) = tokio::fs::read(path).await {
            return Ok(bytes);
        }
    }

    debug!(%url, "downloading image");
    let bytes = fetch_image_bytes(url).await?;
    if let Some(path) = cache_path {
        if let Err(error) = tokio::fs::write(&path, &bytes).await {
            warn!(path = %path.display(), %error, "failed to write image cache");
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_is_stable_per_url() {
        let cache = ImageCache::with_directory(Some(PathBuf::from("/tmp/cinescope-test")));
        let a = cache.cache_path("https://img/a.jpg").unwrap();
        let b = cache.cache_path("https://img/a.jpg").unwrap();
        let c = cache.cache_path("https://img/b.jpg").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("/tmp/cinescope-test"));
    }

    #[test]
    fn each_url_loads_once() {
        let mut cache = ImageCache::with_directory(None);
        assert!(cache.needs_load("u"));
        let _task = cache.load(String::from("u"));
        assert!(!cache.needs_load("u"));

        cache.insert(String::from("u"), Handle::from_bytes(vec![0u8; 4]));
        assert!(cache.get("u").is_some());
        assert!(!cache.needs_load("u"));
    }

    #[test]
    fn failed_urls_are_not_retried() {
        let mut cache = ImageCache::with_directory(None);
        let _task = cache.load(String::from("broken"));
        cache.mark_failed(String::from("broken"));
        assert!(!cache.needs_load("broken"));
        assert!(cache.get("broken").is_none());
    }
}
