use dashmap::{DashMap, mapref::entry::Entry};
use std::{
    hash::Hash,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::config::TraversalConfig;

/// A concurrent set that remembers first-insertion order.
#[derive(Debug)]
pub struct Registry<K: Eq + Hash> {
    entries: DashMap<K, usize>,
    next_seq: AtomicUsize,
}

impl<K: Eq + Hash> Default for Registry<K> {
    fn default() -> Self {
        Self { entries: DashMap::new(), next_seq: AtomicUsize::new(0) }
    }
}

impl<K: Eq + Hash> Registry<K> {
    /// Returns `true` if `key` was not present before.
    pub fn insert(&self, key: K) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(self.next_seq.fetch_add(1, Ordering::Relaxed));
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_ordered(self) -> Vec<K> {
        let mut entries: Vec<(K, usize)> = self.entries.into_iter().collect();
        entries.sort_unstable_by_key(|(_, seq)| *seq);
        entries.into_iter().map(|(key, _)| key).collect()
    }
}

/// The run-wide sets of visited stylesheet paths and remote URLs.
///
/// A registry is `None` when the run does not collect it. Shared by
/// reference with every branch of the traversal.
#[derive(Debug, Default)]
pub struct Registries {
    pub files: Option<Registry<PathBuf>>,
    pub urls: Option<Registry<String>>,
}

impl Registries {
    pub fn for_config(config: &TraversalConfig) -> Self {
        Self {
            files: config.collects_files().then(Registry::default),
            urls: config.collects_urls().then(Registry::default),
        }
    }

    pub fn record_file(&self, path: &Path) {
        if let Some(files) = &self.files {
            files.insert(path.to_path_buf());
        }
    }

    pub fn record_url(&self, url: &str) {
        if let Some(urls) = &self.urls {
            urls.insert(url.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_insert_dedups() {
        let registry = Registry::default();
        assert!(registry.insert("a".to_string()));
        assert!(registry.insert("b".to_string()));
        assert!(!registry.insert("a".to_string()));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.into_ordered(), vec!["a", "b"]);
    }

    #[test]
    fn test_into_ordered_keeps_first_insertion_order() {
        let registry = Registry::default();
        for key in ["c", "a", "c", "b", "a"] {
            registry.insert(key.to_string());
        }
        assert_eq!(registry.into_ordered(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_concurrent_inserts() {
        let registry = Registry::default();
        (0..1000).into_par_iter().for_each(|i| {
            registry.insert(i % 50);
        });
        assert_eq!(registry.len(), 50);

        let mut ordered = registry.into_ordered();
        ordered.sort_unstable();
        assert_eq!(ordered, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_for_config_skips_excluded_registries() {
        let registries = Registries::for_config(&TraversalConfig::files_only(false));
        assert!(registries.files.is_some());
        assert!(registries.urls.is_none());

        registries.record_url("//ignored");
        registries.record_file(Path::new("/a.css"));
        assert_eq!(registries.files.as_ref().map(Registry::len), Some(1));
    }
}
