//! Unified ranking of remembered directories.
//!
//! Three sources feed the ranking: the navigation history, the directories
//! of recently opened files and the frequently used folders. Each source has
//! a base weight and each entry loses one point per position, so a folder
//! near the top of the history outranks one buried in the frequent list.

use std::path::PathBuf;

use crate::file::{HostFs, PathComparison};

use super::settings::DialogSettings;

/// Default number of ranked entries.
pub const DEFAULT_RANKED_ITEMS: usize = 20;

/// Weights and tie-break offsets used by [`rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingPolicy {
    /// Base priority of navigation history entries.
    pub navigation_weight: u32,
    /// Base priority of recent file directories.
    pub recent_file_weight: u32,
    /// Base priority of frequent folders.
    pub frequent_weight: u32,
    /// Recency offset added to navigation history positions.
    pub navigation_offset: usize,
    /// Recency offset added to recent file positions.
    pub recent_file_offset: usize,
    /// Recency offset added to frequent folder positions.
    pub frequent_offset: usize,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            navigation_weight: 100,
            recent_file_weight: 50,
            frequent_weight: 25,
            navigation_offset: 0,
            recent_file_offset: 10,
            frequent_offset: 20,
        }
    }
}

struct Candidate {
    path: PathBuf,
    priority: u32,
    recency: usize,
}

/// Ranks every remembered directory, best first.
///
/// A directory reachable from several sources keeps the entry of the first
/// source that contributed it (navigation, then recent files, then frequent
/// folders). Directories that no longer exist are skipped.
pub fn rank(
    settings: &DialogSettings,
    host: &dyn HostFs,
    policy: &RankingPolicy,
    comparison: PathComparison,
    max_items: usize,
) -> Vec<PathBuf> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut offer = |path: PathBuf, weight: u32, index: usize, offset: usize| {
        if !host.dir_exists(&path)
            || candidates
                .iter()
                .any(|c| comparison.same_path(&c.path, &path))
        {
            return;
        }
        let penalty = u32::try_from(index).unwrap_or(u32::MAX);
        candidates.push(Candidate {
            path,
            priority: weight.saturating_sub(penalty),
            recency: index + offset,
        });
    };

    for (i, dir) in settings.navigation_history.iter().enumerate() {
        offer(
            dir.clone(),
            policy.navigation_weight,
            i,
            policy.navigation_offset,
        );
    }
    for (i, file) in settings.recent_files.iter().enumerate() {
        if let Some(dir) = host.parent(file) {
            offer(dir, policy.recent_file_weight, i, policy.recent_file_offset);
        }
    }
    for (i, dir) in settings.frequent_folders.iter().enumerate() {
        offer(dir.clone(), policy.frequent_weight, i, policy.frequent_offset);
    }

    candidates.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.recency.cmp(&b.recency))
    });
    candidates
        .into_iter()
        .take(max_items)
        .map(|c| c.path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::testing::TempHost;

    fn ranked(settings: &DialogSettings, host: &TempHost, max: usize) -> Vec<PathBuf> {
        rank(
            settings,
            host,
            &RankingPolicy::default(),
            PathComparison::CaseSensitive,
            max,
        )
    }

    #[test]
    fn test_navigation_beats_frequent() {
        let host = TempHost::new();
        let x = host.mkdir("x");
        let y = host.mkdir("y");
        let settings = DialogSettings {
            navigation_history: vec![x.clone()],
            frequent_folders: vec![y.clone()],
            ..Default::default()
        };
        assert_eq!(ranked(&settings, &host, 10), vec![x, y]);
    }

    #[test]
    fn test_recent_file_directory_deduped_against_history() {
        let host = TempHost::new();
        let d1 = host.mkdir("d1");
        let d2 = host.mkdir("d2");
        let d3 = host.mkdir("d3");
        let d4 = host.mkdir("d4");
        let f = host.touch("d2/f.txt");
        let settings = DialogSettings {
            navigation_history: vec![d1.clone(), d2.clone(), d3.clone()],
            recent_files: vec![f],
            frequent_folders: vec![d4.clone()],
            ..Default::default()
        };
        assert_eq!(ranked(&settings, &host, 10), vec![d1, d2, d3, d4]);
    }

    #[test]
    fn test_deep_history_falls_below_recent_files() {
        let host = TempHost::new();
        let mut history = Vec::new();
        for i in 0..60 {
            history.push(host.mkdir(&format!("nav{i:02}")));
        }
        let file = host.touch("recent/a.txt");
        let settings = DialogSettings {
            navigation_history: history.clone(),
            recent_files: vec![file],
            ..Default::default()
        };

        let result = ranked(&settings, &host, 100);
        // The recent file directory ties nav50 at priority 50 and wins on
        // recency (10 against 50).
        let recent_pos = result.iter().position(|p| p.ends_with("recent")).unwrap();
        assert_eq!(recent_pos, 50);
        assert_eq!(result[49], history[49]);
        assert_eq!(result.len(), 61);
    }

    #[test]
    fn test_missing_entries_skipped_and_truncated() {
        let host = TempHost::new();
        let a = host.mkdir("a");
        let b = host.mkdir("b");
        let settings = DialogSettings {
            navigation_history: vec![host.root().join("gone"), a.clone(), b],
            ..Default::default()
        };
        assert_eq!(ranked(&settings, &host, 1), vec![a]);
    }

    #[test]
    fn test_custom_policy() {
        let host = TempHost::new();
        let x = host.mkdir("x");
        let y = host.mkdir("y");
        let settings = DialogSettings {
            navigation_history: vec![x.clone()],
            frequent_folders: vec![y.clone()],
            ..Default::default()
        };
        let policy = RankingPolicy {
            frequent_weight: 200,
            ..Default::default()
        };
        let result = rank(&settings, &host, &policy, PathComparison::CaseSensitive, 10);
        assert_eq!(result, vec![y, x]);
    }
}
