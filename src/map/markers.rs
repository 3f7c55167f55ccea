//! Marker lifecycle
//!
//! Tracks which engine marker belongs to which key. A key owns at most one
//! live marker: adding a marker under a key that already has one removes
//! the old marker from the engine first.

use crate::coord::Coordinates;
use crate::map::{MapEngine, MarkerIcon, MarkerId};
use std::collections::HashMap;
use std::hash::Hash;

/// Key-to-marker bookkeeping for one map instance
#[derive(Debug, Clone)]
pub struct MarkerLayer<K> {
    markers: HashMap<K, MarkerId>,
}

impl<K> Default for MarkerLayer<K> {
    fn default() -> Self {
        Self {
            markers: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> MarkerLayer<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Add a marker for `key`, replacing any marker the key already owns
    pub fn insert<E: MapEngine>(
        &mut self,
        engine: &mut E,
        key: K,
        position: Coordinates,
        icon: &MarkerIcon,
    ) -> MarkerId {
        if let Some(old) = self.markers.remove(&key) {
            engine.remove_layer(old);
        }

        let id = engine.add_marker(position, icon);
        self.markers.insert(key, id);
        id
    }

    /// Marker owned by a key
    pub fn get(&self, key: &K) -> Option<MarkerId> {
        self.markers.get(key).copied()
    }

    /// Key owning a marker
    pub fn key_for(&self, marker: MarkerId) -> Option<&K> {
        self.markers
            .iter()
            .find_map(|(key, id)| (*id == marker).then_some(key))
    }

    /// All live marker handles
    pub fn handles(&self) -> Vec<MarkerId> {
        self.markers.values().copied().collect()
    }

    /// Iterate over `(key, marker)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&K, MarkerId)> {
        self.markers.iter().map(|(key, id)| (key, *id))
    }

    /// Remove every marker from the engine and forget them
    pub fn clear<E: MapEngine>(&mut self, engine: &mut E) {
        for (_, id) in self.markers.drain() {
            engine.remove_layer(id);
        }
    }
}
