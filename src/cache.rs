//! Bounded LRU cache for tracks fetched during a session.
//!
//! Avoids redundant catalog calls when the same seed or candidates come up
//! across requests. The cache is an explicit object owned by the server
//! state, not process-wide; a key returns the same value for the lifetime of
//! the session, with least-recently-used eviction at capacity.

use std::collections::{HashMap, VecDeque};

use crate::types::Track;

/// LRU cache of tracks keyed by catalog id
pub struct TrackCache {
    capacity: usize,
    entries: HashMap<String, Track>,
    /// Access order, least recently used at the front
    order: VecDeque<String>,
}

impl TrackCache {
    /// Create a cache holding at most `capacity` tracks (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Look up a track, marking it as most recently used
    pub fn get(&mut self, id: &str) -> Option<Track> {
        if !self.entries.contains_key(id) {
            return None;
        }
        self.touch(id);
        self.entries.get(id).cloned()
    }

    /// Insert a track, evicting the least recently used entry at capacity
    pub fn insert(&mut self, track: Track) {
        if self.entries.contains_key(&track.id) {
            self.touch(&track.id);
            self.entries.insert(track.id.clone(), track);
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }

        self.order.push_back(track.id.clone());
        self.entries.insert(track.id.clone(), track);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, id: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == id) {
            self.order.remove(pos);
            self.order.push_back(id.to_string());
        }
    }
}
