use log::{debug, trace};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::TraversalConfig,
    error::{ResolveError, Result},
    extractor::extract_imports,
    registry::Registries,
    resolver::PathResolver,
    types::{DependencyTree, FileMap, ReferenceKind, TreeNode},
};

/// Recursively visits a stylesheet and everything it imports.
///
/// Sibling imports are walked in parallel on the rayon pool and merged back
/// in declaration order. Paths and URLs are recorded in the shared
/// [`Registries`] as they are found. A file that imports one of its own
/// ancestors fails the run with [`ResolveError::Cycle`].
pub struct Walker<'a> {
    config: &'a TraversalConfig,
    resolver: &'a PathResolver,
    registries: &'a Registries,
}

impl<'a> Walker<'a> {
    pub fn new(
        config: &'a TraversalConfig,
        resolver: &'a PathResolver,
        registries: &'a Registries,
    ) -> Self {
        Self { config, resolver, registries }
    }

    pub fn walk(&self, root: &Path) -> Result<DependencyTree> {
        let root = self.resolver.canonicalize(root);
        debug!("Walking stylesheet tree from {}", root.display());
        self.visit(root, &[])
    }

    fn visit(&self, path: PathBuf, ancestors: &[PathBuf]) -> Result<DependencyTree> {
        if ancestors.contains(&path) {
            let mut chain = ancestors.to_vec();
            chain.push(path);
            return Err(ResolveError::Cycle { chain });
        }

        let bytes = fs::read(self.resolver.absolute(&path))
            .map_err(|source| ResolveError::Read { path: path.clone(), source })?;
        let content = String::from_utf8_lossy(&bytes);

        self.registries.record_file(&path);

        let importer_dir = path.parent().unwrap_or(Path::new(""));
        let mut urls = Vec::new();
        let mut children = Vec::new();
        let mut remote = 0;

        for target in extract_imports(&content) {
            let reference = self.resolver.reference(importer_dir, target);
            match reference.kind {
                ReferenceKind::File => children.extend(reference.resolved),
                ReferenceKind::Url => {
                    trace!("Remote import '{}' in {}", reference.raw, path.display());
                    remote += 1;
                    self.registries.record_url(&reference.raw);
                    if self.config.builds_tree() {
                        urls.push(reference.raw);
                    }
                }
            }
        }

        debug!(
            "Visited {}: {} local imports, {} remote imports",
            path.display(),
            children.len(),
            remote
        );

        let mut chain = Vec::with_capacity(ancestors.len() + 1);
        chain.extend_from_slice(ancestors);
        chain.push(path.clone());

        let child_trees: Vec<DependencyTree> = children
            .into_par_iter()
            .map(|child| self.visit(child, &chain))
            .collect::<Result<_>>()?;

        let node = if self.config.builds_tree() { merge(urls, child_trees) } else { None };
        Ok(DependencyTree { path, node })
    }
}

/// Builds a node from this file's own URLs and its children's trees.
/// Collapses to `None` when the file imported nothing at all.
fn merge(urls: Vec<String>, children: Vec<DependencyTree>) -> Option<TreeNode> {
    if urls.is_empty() && children.is_empty() {
        return None;
    }

    let mut files = FileMap::default();
    for child in children {
        files.insert(child.path, child.node);
    }
    Some(TreeNode { urls, files })
}
