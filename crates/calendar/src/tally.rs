//! Occurrence counting with a deterministic, first-seen tie-break.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Sparse occurrence counter that remembers the order in which keys were first seen.
///
/// Keys are expected to come from a small closed set (calendar enums), so a
/// linear lookup keeps `add` constant-time in practice and preserves insertion
/// order without an extra index.
///
/// Ties are always broken in favour of the key that was seen first, so results
/// never depend on hash or map iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    entries: Vec<(K, u64)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: Copy + Eq> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key, 1)),
        }
    }

    /// Count for `key` (zero when never seen).
    pub fn get(&self, key: K) -> u64 {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (K, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Key with the highest count; the first-seen key wins on a tie.
    pub fn leader(&self) -> Option<K> {
        let mut best: Option<(K, u64)> = None;
        for &(key, count) in &self.entries {
            match best {
                Some((_, c)) if c >= count => {}
                _ => best = Some((key, count)),
            }
        }
        best.map(|(k, _)| k)
    }

    /// Up to `n` keys by descending count, first-seen order among equal counts.
    pub fn top(&self, n: usize) -> Vec<K> {
        let mut ranked = self.entries.clone();
        // Stable sort keeps first-seen order for equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).map(|(k, _)| k).collect()
    }
}

impl<K: Serialize> Serialize for Tally<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
