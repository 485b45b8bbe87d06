use std::collections::BTreeMap;

use log::debug;

/// Releases a playable handle. The browser implementation revokes object URLs.
pub trait Revoke {
    fn revoke(&self, url: &str);
}

pub struct ObjectUrlRevoker;

impl Revoke for ObjectUrlRevoker {
    fn revoke(&self, url: &str) {
        if let Err(e) = web_sys::Url::revoke_object_url(url) {
            debug!("Failed to revoke {}: {:?}", url, e);
        }
    }
}

/// Object URLs for the hero clips keyed by 1-based index.
///
/// Every handle that enters the pool is revoked exactly once: when it is
/// replaced, when the pool is released, or when the pool is dropped. After
/// `release_all` the pool is closed and late arrivals are revoked on insert.
pub struct HandlePool<R: Revoke = ObjectUrlRevoker> {
    handles: BTreeMap<usize, String>,
    revoker: R,
    closed: bool,
}

impl HandlePool<ObjectUrlRevoker> {
    pub fn new() -> Self {
        Self::with_revoker(ObjectUrlRevoker)
    }
}

impl Default for HandlePool<ObjectUrlRevoker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Revoke> HandlePool<R> {
    pub fn with_revoker(revoker: R) -> Self {
        Self {
            handles: BTreeMap::new(),
            revoker,
            closed: false,
        }
    }

    /// Returns false if the pool is already released and the handle was revoked instead.
    pub fn insert(&mut self, index: usize, url: String) -> bool {
        if self.closed {
            self.revoker.revoke(&url);
            return false;
        }
        if let Some(previous) = self.handles.insert(index, url) {
            self.revoker.revoke(&previous);
        }
        true
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.handles.get(&index).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    #[cfg(test)]
    pub fn indices(&self) -> Vec<usize> {
        self.handles.keys().copied().collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Revokes whatever the pool holds right now and closes it. Idempotent.
    pub fn release_all(&mut self) {
        self.closed = true;
        let handles = std::mem::take(&mut self.handles);
        if !handles.is_empty() {
            debug!("Releasing {} video handles", handles.len());
        }
        for url in handles.values() {
            self.revoker.revoke(url);
        }
    }
}

impl<R: Revoke> Drop for HandlePool<R> {
    fn drop(&mut self) {
        self.release_all();
    }
}
