/// Ordered Map Module
///
/// A string-keyed map that iterates in first-insertion order. Records are
/// built on it so that column order survives every export.
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

/// Insertion-ordered map over string keys.
///
/// Updating an existing key rewrites its value in place, so a key never moves
/// once inserted. Equality compares entries in order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct OrderedMap<V> {
    entries: IndexMap<String, V>,
}

impl<V> OrderedMap<V> {
    /// Creates a new, empty map.
    pub fn new() -> Self {
        OrderedMap {
            entries: IndexMap::new(),
        }
    }

    /// Creates an empty map with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts `key` if it is absent.
    ///
    /// If the key is already present its value is replaced only when
    /// `overwrite` is true; otherwise the call leaves the map untouched.
    /// Either way the key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: V, overwrite: bool) {
        match self.entries.entry(key.into()) {
            Entry::Occupied(mut slot) => {
                if overwrite {
                    slot.insert(value);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(key, value)` pairs in insertion order.
    ///
    /// Each call starts a fresh pass over the map.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values()
    }

    /// The underlying ordered map.
    pub fn as_index_map(&self) -> &IndexMap<String, V> {
        &self.entries
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap::new()
    }
}

impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

/// Later pairs overwrite earlier ones with the same key.
impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.set(k, v, true);
        }
        map
    }
}
