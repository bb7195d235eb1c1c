use crate::pattern::MatchPattern;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A proposed rename. Only the file name changes; the directory is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlanEntry {
    pub original: PathBuf,
    pub proposed: PathBuf,
}

impl RenamePlanEntry {
    /// False when the proposed name would move the file elsewhere: an empty
    /// name, `.`/`..`, or a name containing a path separator.
    pub fn stays_in_directory(&self) -> bool {
        self.proposed.file_name().is_some() && self.proposed.parent() == self.original.parent()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    pub root: PathBuf,
    pub entries: Vec<RenamePlanEntry>,
    /// Every regular file looked at, whether or not it changes.
    pub files_checked: usize,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Regular files under `root`, sorted by name within each directory.
///
/// Symlinks pointing at regular files count as files; symlinked directories
/// are not followed. Unreadable entries are logged and skipped.
pub fn walk_files(root: &Path, recursive: bool) -> impl Iterator<Item = PathBuf> {
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            },
        })
        .filter(is_regular_file)
        .map(DirEntry::into_path)
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

fn file_name_str(path: &Path) -> Option<&str> {
    let name = path.file_name()?;
    let name = name.to_str();
    if name.is_none() {
        tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name");
    }
    name
}

/// Files whose name contains at least one match.
pub fn find_matching_files(root: &Path, recursive: bool, pattern: &MatchPattern) -> Vec<PathBuf> {
    walk_files(root, recursive)
        .filter(|path| file_name_str(path).is_some_and(|name| pattern.is_match(name)))
        .collect()
}

/// Compute the rename plan for every file in scope. Reads only.
pub fn plan_renames(root: &Path, recursive: bool, pattern: &MatchPattern) -> Plan {
    let mut plan = Plan {
        root: root.to_path_buf(),
        ..Plan::default()
    };

    for path in walk_files(root, recursive) {
        plan.files_checked += 1;

        let Some(name) = file_name_str(&path) else {
            continue;
        };

        let proposed_name = pattern.propose(name);
        if proposed_name == name {
            continue;
        }

        tracing::debug!(from = name, to = %proposed_name, "planned rename");
        plan.entries.push(RenamePlanEntry {
            proposed: path.with_file_name(&proposed_name),
            original: path,
        });
    }

    plan
}
