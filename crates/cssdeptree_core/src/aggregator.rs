use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::{
    config::TraversalConfig,
    error::Result,
    registry::{Registries, Registry},
    resolver::PathResolver,
    types::DependencyTree,
    walker::Walker,
};

/// The result of a full run. Parts excluded by the run's configuration are
/// `None` and left out when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<DependencyTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<PathBuf>>,
}

/// Resolves the full dependency tree of the stylesheet at `root` against the
/// process working directory.
pub fn resolve(root: impl AsRef<Path>, config: &TraversalConfig) -> Result<AggregateOutput> {
    let resolver = PathResolver::from_current_dir(config.relative)?;
    run(&resolver, root.as_ref(), config)
}

/// Like [`resolve`], with `cwd` standing in for the process working
/// directory for path resolution, relative output and reading.
pub fn resolve_in(
    cwd: impl AsRef<Path>,
    root: impl AsRef<Path>,
    config: &TraversalConfig,
) -> Result<AggregateOutput> {
    let resolver = PathResolver::new(cwd.as_ref(), config.relative);
    run(&resolver, root.as_ref(), config)
}

/// Every stylesheet path reachable from `root`, root first.
pub fn resolve_files(root: impl AsRef<Path>, relative: bool) -> Result<Vec<PathBuf>> {
    let output = resolve(root, &TraversalConfig::files_only(relative))?;
    Ok(output.files.unwrap_or_default())
}

/// Every remote URL imported anywhere below `root`.
pub fn resolve_urls(root: impl AsRef<Path>, relative: bool) -> Result<Vec<String>> {
    let output = resolve(root, &TraversalConfig::urls_only(relative))?;
    Ok(output.urls.unwrap_or_default())
}

fn run(
    resolver: &PathResolver,
    root: &Path,
    config: &TraversalConfig,
) -> Result<AggregateOutput> {
    info!("Resolving stylesheet dependencies of {}", root.display());
    debug!("Config: {:?}, cwd={}", config, resolver.cwd().display());

    let registries = Registries::for_config(config);
    let tree = Walker::new(config, resolver, &registries).walk(root)?;

    let Registries { files, urls } = registries;
    debug!(
        "Registry statistics: files={:?}, urls={:?}",
        files.as_ref().map(Registry::len),
        urls.as_ref().map(Registry::len)
    );

    let output = AggregateOutput {
        tree: config.builds_tree().then_some(tree),
        urls: urls.map(Registry::into_ordered),
        files: files.map(Registry::into_ordered),
    };
    info!("Finished resolving {}", root.display());
    Ok(output)
}
