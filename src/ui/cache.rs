use std::collections::HashMap;

use ratatui::text::Line;

use crate::models::Region;

/// Key for cached region renders: (message index, region, version, width)
pub type RegionCacheKey = (usize, Region, u64, u16);

/// Wrapped lines for each message region.
///
/// A region is re-wrapped only when its version or its width changes; every
/// other region of every other message is served from here. Only the latest
/// render of each `(message, region)` is kept.
#[derive(Debug, Default)]
pub struct RegionCache {
    cache: HashMap<RegionCacheKey, Vec<Line<'static>>>,
    hits: u64,
    misses: u64,
}

impl RegionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        index: usize,
        region: Region,
        version: u64,
        width: u16,
    ) -> Option<&Vec<Line<'static>>> {
        let key = (index, region, version, width);
        if self.cache.contains_key(&key) {
            self.hits += 1;
            self.cache.get(&key)
        } else {
            self.misses += 1;
            None
        }
    }

    pub fn insert(
        &mut self,
        index: usize,
        region: Region,
        version: u64,
        width: u16,
        lines: Vec<Line<'static>>,
    ) {
        // Drop stale renders of the same region
        self.cache.retain(|k, _| k.0 != index || k.1 != region);
        self.cache.insert((index, region, version, width), lines);
    }

    /// Borrow the cached lines for a region, rendering them with `render` on
    /// a miss.
    pub fn lines<F>(
        &mut self,
        index: usize,
        region: Region,
        version: u64,
        width: u16,
        render: F,
    ) -> &[Line<'static>]
    where
        F: FnOnce() -> Vec<Line<'static>>,
    {
        let key = (index, region, version, width);
        if self.get(index, region, version, width).is_none() {
            self.insert(index, region, version, width, render());
        }
        self.cache.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Owned copy of [`lines`](Self::lines).
    pub fn get_or_render<F>(
        &mut self,
        index: usize,
        region: Region,
        version: u64,
        width: u16,
        render: F,
    ) -> Vec<Line<'static>>
    where
        F: FnOnce() -> Vec<Line<'static>>,
    {
        self.lines(index, region, version, width, render).to_vec()
    }

    pub fn contains(&self, index: usize, region: Region, version: u64, width: u16) -> bool {
        self.cache.contains_key(&(index, region, version, width))
    }

    /// Must be called when the transcript is cleared, since indices are reused.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
