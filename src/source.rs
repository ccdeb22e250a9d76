//! Source file discovery.
//!
//! The source file name is fixed; only the directory varies. Candidates are
//! walked in order and the first directory whose `conf.ini` can actually be
//! read wins. Unreadable files are treated the same as missing ones: the
//! walk moves on. Resolution decides later whether having found nothing is a
//! problem.

use std::path::{Path, PathBuf};

/// The fixed source file name looked for in every candidate directory.
pub const CONFIG_FILE: &str = "conf.ini";

/// Prepended to the candidate list when set and non-empty.
pub(crate) const CONFIG_PATH_VAR: &str = "DRIFTBIN_CONFIG_PATH";

/// The default candidate directories: an optional override (from
/// `DRIFTBIN_CONFIG_PATH`), then `{root}/cfg`.
pub(crate) fn candidate_dirs(root: &Path, override_dir: Option<&str>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = override_dir {
        dirs.push(PathBuf::from(dir));
    }
    dirs.push(root.join("cfg"));
    dirs
}

/// Read the first `conf.ini` found across `dirs`, in order. Returns the
/// winning path and its contents, or `None` when no candidate is readable.
pub(crate) fn read_first(dirs: &[PathBuf]) -> Option<(PathBuf, String)> {
    for dir in dirs {
        let path = dir.join(CONFIG_FILE);
        if let Ok(contents) = std::fs::read_to_string(&path) {
            return Some((path, contents));
        }
    }
    None
}
