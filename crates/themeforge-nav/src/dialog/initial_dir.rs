//! Choosing the directory a dialog opens in.

use std::path::{Path, PathBuf};

use crate::file::{HostFs, WellKnownDir};

use super::settings::{DialogKind, DialogSettings};

/// Picks the directory a new dialog should show first.
///
/// Candidates are tried in order and the first usable one wins:
///
/// 1. `explicit_dir`, if it is an existing directory
/// 2. the directory containing `reference_file`, if that file exists
/// 3. the last directory used by a dialog of the same `kind`
/// 4. the first existing entry of the navigation history
/// 5. the documents directory, then the home directory, then `.`
///
/// Empty paths count as absent.
pub fn resolve_initial_directory(
    explicit_dir: Option<&Path>,
    reference_file: Option<&Path>,
    kind: DialogKind,
    settings: &DialogSettings,
    host: &dyn HostFs,
) -> PathBuf {
    if let Some(dir) = explicit_dir.filter(non_empty)
        && host.dir_exists(dir)
    {
        return dir.to_path_buf();
    }

    if let Some(file) = reference_file.filter(non_empty)
        && host.file_exists(file)
        && let Some(parent) = host.parent(file)
    {
        return parent;
    }

    if let Some(last) = settings.last_directory(kind).filter(non_empty)
        && host.dir_exists(last)
    {
        return last.to_path_buf();
    }

    if let Some(dir) = settings
        .navigation_history
        .iter()
        .find(|p| host.dir_exists(p))
    {
        return dir.clone();
    }

    host.well_known_dir(WellKnownDir::Documents)
        .or_else(|| host.well_known_dir(WellKnownDir::Home))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn non_empty(path: &&Path) -> bool {
    !path.as_os_str().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::testing::TempHost;

    #[test]
    fn test_empty_state_falls_back_to_documents() {
        let host = TempHost::new();
        let settings = DialogSettings::default();
        let dir = resolve_initial_directory(None, None, DialogKind::Open, &settings, &host);
        assert_eq!(dir, host.known(WellKnownDir::Documents));

        let dir = resolve_initial_directory(
            Some(Path::new("")),
            Some(Path::new("")),
            DialogKind::Save,
            &settings,
            &host,
        );
        assert_eq!(dir, host.known(WellKnownDir::Documents));
    }

    #[test]
    fn test_explicit_dir_wins() {
        let host = TempHost::new();
        let explicit = host.mkdir("explicit");
        let file = host.touch("other/file.txt");
        let settings = DialogSettings {
            last_open_directory: Some(host.mkdir("last")),
            ..Default::default()
        };
        let dir = resolve_initial_directory(
            Some(explicit.as_path()),
            Some(file.as_path()),
            DialogKind::Open,
            &settings,
            &host,
        );
        assert_eq!(dir, explicit);
    }

    #[test]
    fn test_reference_file_directory() {
        let host = TempHost::new();
        let file = host.touch("other/file.txt");
        let settings = DialogSettings::default();
        let dir = resolve_initial_directory(
            Some(host.root().join("missing").as_path()),
            Some(file.as_path()),
            DialogKind::Open,
            &settings,
            &host,
        );
        assert_eq!(dir, host.root().join("other"));
    }

    #[test]
    fn test_last_directory_by_kind() {
        let host = TempHost::new();
        let open = host.mkdir("open");
        let save = host.mkdir("save");
        let settings = DialogSettings {
            last_open_directory: Some(open.clone()),
            last_save_directory: Some(save.clone()),
            ..Default::default()
        };
        let resolve = |kind| resolve_initial_directory(None, None, kind, &settings, &host);
        assert_eq!(resolve(DialogKind::Open), open);
        assert_eq!(resolve(DialogKind::Save), save);
    }

    #[test]
    fn test_first_existing_history_entry() {
        let host = TempHost::new();
        let nav = host.mkdir("nav");
        let settings = DialogSettings {
            last_open_directory: Some(host.root().join("deleted")),
            navigation_history: vec![host.root().join("gone"), nav.clone()],
            ..Default::default()
        };
        let dir = resolve_initial_directory(None, None, DialogKind::Open, &settings, &host);
        assert_eq!(dir, nav);
    }
}
