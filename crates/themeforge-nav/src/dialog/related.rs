//! Directories related to the one currently shown.

use std::path::{Path, PathBuf};

use crate::file::{HostFs, PathComparison};

use super::settings::DialogSettings;

/// Default number of related folders.
pub const DEFAULT_RELATED_ITEMS: usize = 10;

const MAX_SIBLINGS: usize = 5;
const MAX_CHILDREN: usize = 3;
const MAX_NESTED_HISTORY: usize = 3;

/// Collects folders related to `current`.
///
/// The result lists, in order: the parent, up to five siblings, up to three
/// children and up to three previously visited directories nested beneath
/// `current`. Siblings and children come in name order. Listing failures
/// only drop that group. An empty list is returned when `current` is not an
/// existing directory.
pub fn related_folders(
    settings: &DialogSettings,
    host: &dyn HostFs,
    comparison: PathComparison,
    current: &Path,
    max_items: usize,
) -> Vec<PathBuf> {
    if !host.dir_exists(current) {
        return Vec::new();
    }

    let mut out: Vec<PathBuf> = Vec::new();
    let mut push = |path: PathBuf| {
        if !comparison.contains(&out, &path) {
            out.push(path);
        }
    };

    if let Some(parent) = host.parent(current) {
        push(parent.clone());
        match host.child_dirs(&parent) {
            Ok(siblings) => siblings
                .into_iter()
                .filter(|s| !comparison.same_path(s, current))
                .take(MAX_SIBLINGS)
                .for_each(&mut push),
            Err(e) => tracing::debug!("cannot list siblings of {}: {}", current.display(), e),
        }
    }

    match host.child_dirs(current) {
        Ok(children) => children.into_iter().take(MAX_CHILDREN).for_each(&mut push),
        Err(e) => tracing::debug!("cannot list children of {}: {}", current.display(), e),
    }

    settings
        .navigation_history
        .iter()
        .filter(|p| comparison.starts_with(p, current) && !comparison.same_path(p, current))
        .filter(|p| host.dir_exists(p))
        .take(MAX_NESTED_HISTORY)
        .cloned()
        .for_each(&mut push);

    out.truncate(max_items);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::testing::TempHost;

    fn related(settings: &DialogSettings, host: &TempHost, current: &Path) -> Vec<PathBuf> {
        related_folders(
            settings,
            host,
            PathComparison::CaseSensitive,
            current,
            DEFAULT_RELATED_ITEMS,
        )
    }

    #[test]
    fn test_missing_current_is_empty() {
        let host = TempHost::new();
        let settings = DialogSettings::default();
        assert!(related(&settings, &host, &host.root().join("gone")).is_empty());
    }

    #[test]
    fn test_order_parent_siblings_children_history() {
        let host = TempHost::new();
        let current = host.mkdir("work/proj");
        let sibling = host.mkdir("work/other");
        let child = host.mkdir("work/proj/src");
        let deep = host.mkdir("work/proj/src/deep/er");
        let settings = DialogSettings {
            navigation_history: vec![deep.clone(), current.clone()],
            ..Default::default()
        };

        let result = related(&settings, &host, &current);
        assert_eq!(
            result,
            vec![host.root().join("work"), sibling, child, deep]
        );
    }

    #[test]
    fn test_group_caps() {
        let host = TempHost::new();
        let current = host.mkdir("p/cur");
        for i in 0..8 {
            host.mkdir(&format!("p/sib{i}"));
            host.mkdir(&format!("p/cur/child{i}"));
        }

        let result = related(&DialogSettings::default(), &host, &current);
        // parent + 5 siblings + 3 children
        assert_eq!(result.len(), 9);
        assert_eq!(result[1], host.root().join("p/sib0"));
        assert_eq!(result[6], current.join("child0"));
        assert!(!result.contains(&current));
    }

    #[test]
    fn test_history_nesting_is_component_wise() {
        let host = TempHost::new();
        let current = host.mkdir("a/foo");
        let lookalike = host.mkdir("a/foobar");
        let settings = DialogSettings {
            navigation_history: vec![lookalike.clone()],
            ..Default::default()
        };

        let result = related(&settings, &host, &current);
        // foobar appears once, as a sibling, not as nested history.
        assert_eq!(result.iter().filter(|p| **p == lookalike).count(), 1);
        assert_eq!(result[1], lookalike);
    }

    #[test]
    fn test_truncated_to_max() {
        let host = TempHost::new();
        let current = host.mkdir("q/cur");
        host.mkdir("q/cur/c1");
        let result = related_folders(
            &DialogSettings::default(),
            &host,
            PathComparison::CaseSensitive,
            &current,
            1,
        );
        assert_eq!(result, vec![host.root().join("q")]);
    }
}
