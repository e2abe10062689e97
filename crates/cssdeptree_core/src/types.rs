use regex::Regex;
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    File,
    Url,
}

impl ReferenceKind {
    /// Classifies an import target as remote when it starts with `//` or
    /// with an alphanumeric scheme followed by `://`.
    pub fn classify(target: &str) -> Self {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"^(//|[A-Za-z0-9]+://)").expect("remote reference pattern is valid")
        });
        if re.is_match(target) { ReferenceKind::Url } else { ReferenceKind::File }
    }
}

/// A single classified `@import url(...)` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetReference {
    pub raw: String,
    pub kind: ReferenceKind,
    /// Canonical path, set for [`ReferenceKind::File`] references only.
    pub resolved: Option<PathBuf>,
}

/// One visited stylesheet's direct contribution to the tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreeNode {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "FileMap::is_empty")]
    pub files: FileMap,
}

/// Child stylesheets keyed by canonical path, in declaration order.
///
/// A `None` value is a child that imports nothing. Inserting an existing key
/// keeps its position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileMap {
    entries: Vec<(PathBuf, Option<TreeNode>)>,
}

impl FileMap {
    pub fn insert(&mut self, path: PathBuf, node: Option<TreeNode>) {
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((path, node)),
        }
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Option<TreeNode>> {
        let path = path.as_ref();
        self.entries.iter().find(|(p, _)| p == path).map(|(_, node)| node)
    }

    pub fn contains_key(&self, path: impl AsRef<Path>) -> bool {
        self.get(path).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.iter().map(|(p, _)| p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FileMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, node) in &self.entries {
            map.serialize_entry(path, node)?;
        }
        map.end()
    }
}

/// A single-entry mapping from a stylesheet's canonical path to its node.
///
/// Returned for the root of a run and for every recursive visit, so a parent
/// merges its children directly by path.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyTree {
    pub path: PathBuf,
    pub node: Option<TreeNode>,
}

impl Serialize for DependencyTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.path, &self.node)?;
        map.end()
    }
}
