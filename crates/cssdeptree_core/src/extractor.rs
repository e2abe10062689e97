use log::{debug, trace};
use regex::{CaptureMatches, Regex};
use std::sync::OnceLock;

// Only the `url(...)` form is recognised; `@import "x.css"` and
// media-qualified imports are intentionally not matched.
fn regex_css_url_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)@import\s+url\s*\(\s*(["']?)([^"')]+)(["']?)\s*\)"#)
            .expect("css import pattern is valid")
    })
}

/// Lazily yields the target of every `@import url(...)` in `content`, in
/// order of appearance, with surrounding whitespace trimmed.
///
/// Each call starts scanning from the beginning of the text.
pub fn extract_imports(content: &str) -> Imports<'_> {
    Imports { captures: regex_css_url_import().captures_iter(content) }
}

pub struct Imports<'t> {
    captures: CaptureMatches<'static, 't>,
}

impl<'t> Iterator for Imports<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        for caps in self.captures.by_ref() {
            // Group 2 is mandatory in the pattern, so it is always present.
            let target = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
            if target.is_empty() {
                debug!("Skipping blank @import target: {:?}", &caps[0]);
                continue;
            }
            trace!("Found @import target: '{}'", target);
            return Some(target);
        }
        None
    }
}
