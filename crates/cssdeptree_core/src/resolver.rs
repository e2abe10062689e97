use log::{debug, trace};
use path_clean::clean;
use std::{
    env,
    path::{Component, Path, PathBuf},
};

use crate::{
    error::{ResolveError, Result},
    types::{ReferenceKind, StylesheetReference},
};

/// Turns stylesheet paths into their canonical identity for one run.
///
/// Canonical paths are lexically cleaned absolute paths, or, when `relative`
/// is set, the same paths expressed relative to `cwd`. The filesystem is
/// never consulted, so symlinks are not followed.
#[derive(Debug, Clone)]
pub struct PathResolver {
    cwd: PathBuf,
    relative: bool,
}

impl PathResolver {
    pub fn new(cwd: impl Into<PathBuf>, relative: bool) -> Self {
        let cwd: PathBuf = cwd.into();
        Self { cwd: clean(cwd), relative }
    }

    pub fn from_current_dir(relative: bool) -> Result<Self> {
        let cwd = env::current_dir().map_err(|source| ResolveError::CurrentDir { source })?;
        Ok(Self::new(cwd, relative))
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn canonicalize(&self, path: &Path) -> PathBuf {
        let absolute = self.absolute(path);
        if !self.relative {
            return absolute;
        }
        match make_relative(&absolute, &self.cwd) {
            Some(rel) => rel,
            None => {
                debug!(
                    "Cannot relativize {} to {}, keeping absolute path",
                    absolute.display(),
                    self.cwd.display()
                );
                absolute
            }
        }
    }

    /// Absolute location of `path`, used for reading regardless of the
    /// output mode.
    pub fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { clean(path) } else { clean(self.cwd.join(path)) }
    }

    /// Classifies `target` as imported from a file in `importer_dir`,
    /// resolving file references to their canonical path.
    ///
    /// Targets are always appended to `importer_dir`, so `/sub/x.css` names
    /// `sub/x.css` below the importer rather than the filesystem root.
    pub fn reference(&self, importer_dir: &Path, target: &str) -> StylesheetReference {
        let kind = ReferenceKind::classify(target);
        let resolved = match kind {
            ReferenceKind::Url => None,
            ReferenceKind::File => {
                let joined = importer_dir.join(target.trim_start_matches('/'));
                let resolved = self.canonicalize(&joined);
                trace!("Resolved '{}' to {}", target, resolved.display());
                Some(resolved)
            }
        };
        StylesheetReference { raw: target.to_string(), kind, resolved }
    }
}

/// Create a relative path from `base` to `target`. Both must be absolute
/// and cleaned. Returns `None` when they do not share a root.
fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    if target_parts.first() != base_parts.first() {
        return None;
    }

    let common = target_parts.iter().zip(&base_parts).take_while(|(t, b)| t == b).count();

    let mut result = PathBuf::new();
    for _ in &base_parts[common..] {
        result.push("..");
    }
    for component in &target_parts[common..] {
        result.push(component.as_os_str());
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_absolute_mode() {
        let resolver = PathResolver::new("/work/project", false);
        assert_eq!(
            resolver.canonicalize(Path::new("styles/a.css")),
            PathBuf::from("/work/project/styles/a.css")
        );
        assert_eq!(
            resolver.canonicalize(Path::new("/elsewhere/./x/../b.css")),
            PathBuf::from("/elsewhere/b.css")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_relative_mode() {
        let resolver = PathResolver::new("/work/project", true);
        assert_eq!(
            resolver.canonicalize(Path::new("./styles/../styles/a.css")),
            PathBuf::from("styles/a.css")
        );
        assert_eq!(
            resolver.canonicalize(Path::new("/work/shared/b.css")),
            PathBuf::from("../shared/b.css")
        );
        assert_eq!(resolver.canonicalize(Path::new("/work/project")), PathBuf::from("."));
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_paths_read_from_cwd() {
        let resolver = PathResolver::new("/work/project", true);
        assert_eq!(
            resolver.absolute(Path::new("../shared/b.css")),
            PathBuf::from("/work/shared/b.css")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_reference_file_joins_importer_dir() {
        let resolver = PathResolver::new("/work", false);
        let reference = resolver.reference(Path::new("/work/css"), "../base/reset.css");
        assert_eq!(reference.kind, ReferenceKind::File);
        assert_eq!(reference.raw, "../base/reset.css");
        assert_eq!(reference.resolved, Some(PathBuf::from("/work/base/reset.css")));
    }

    #[cfg(unix)]
    #[test]
    fn test_reference_relative_mode_from_relative_importer() {
        let resolver = PathResolver::new("/work", true);
        let reference = resolver.reference(Path::new("css"), "./theme.css");
        assert_eq!(reference.resolved, Some(PathBuf::from("css/theme.css")));

        let reference = resolver.reference(Path::new(""), "theme.css");
        assert_eq!(reference.resolved, Some(PathBuf::from("theme.css")));
    }

    #[cfg(unix)]
    #[test]
    fn test_reference_root_relative_target_stays_under_importer() {
        let resolver = PathResolver::new("/work", false);
        let reference = resolver.reference(Path::new("/work/css"), "/sub/x.css");
        assert_eq!(reference.kind, ReferenceKind::File);
        assert_eq!(reference.resolved, Some(PathBuf::from("/work/css/sub/x.css")));

        let resolver = PathResolver::new("/work", true);
        let reference = resolver.reference(Path::new(""), "//not-a-file");
        assert_eq!(reference.resolved, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_unrelatable_path_stays_absolute() {
        let resolver = PathResolver::new("relative/cwd", true);
        let canonical = resolver.canonicalize(Path::new("/abs/a.css"));
        assert_eq!(canonical, PathBuf::from("/abs/a.css"));
    }

    #[test]
    fn test_reference_url_is_not_resolved() {
        let resolver = PathResolver::new("/work", false);
        let reference = resolver.reference(Path::new("/work/css"), "//cdn.example/x.css");
        assert_eq!(reference.kind, ReferenceKind::Url);
        assert_eq!(reference.resolved, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_make_relative() {
        assert_eq!(
            make_relative(Path::new("/a/b/c.css"), Path::new("/a")),
            Some(PathBuf::from("b/c.css"))
        );
        assert_eq!(
            make_relative(Path::new("/a/x.css"), Path::new("/a/b/c")),
            Some(PathBuf::from("../../x.css"))
        );
        assert_eq!(make_relative(Path::new("/a"), Path::new("/a/b")), Some(PathBuf::from("..")));
        assert_eq!(make_relative(Path::new("/a"), Path::new("/a")), Some(PathBuf::from(".")));
    }
}
