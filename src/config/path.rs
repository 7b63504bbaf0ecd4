//! Module for searching for report fixup config files

use std::{
    fs::{self, DirEntry},
    path::PathBuf,
};

/// Base system fallback path to use if one cannot be found with XDG
const FALLBACK_BASE_PATH: &str = "/usr/share/hid-fixup";

/// Returns the base path for configuration data
pub fn get_base_path() -> PathBuf {
    let Ok(base_dirs) = xdg::BaseDirectories::with_prefix("hid-fixup") else {
        log::warn!("Unable to determine config base path. Using fallback path.");
        return PathBuf::from(FALLBACK_BASE_PATH);
    };

    // Get the data directories in preference order
    let data_dirs = base_dirs.get_data_dirs();
    for dir in data_dirs {
        if dir.exists() {
            return dir;
        }
    }

    log::debug!("Config base path not found. Using fallback path.");
    PathBuf::from(FALLBACK_BASE_PATH)
}

/// Returns a list of directories in load order to find report fixup configs.
/// E.g. ["/etc/hid-fixup/fixups.d", "/usr/share/hid-fixup/fixups"]
pub fn get_fixups_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("./rootfs/usr/share/hid-fixup/fixups"),
        PathBuf::from("/etc/hid-fixup/fixups.d"),
        get_base_path().join("fixups"),
    ]
}

/// Returns a list of file paths for the given directories sorted by filename across
/// all given directories. The filter argument is a closure that should return
/// `true` for any files that should be included in the final results. Files
/// with the same name are ordered by the position of their directory in `paths`.
pub fn get_multidir_sorted_files<F>(paths: &[PathBuf], filter: F) -> Vec<PathBuf>
where
    F: Fn(&DirEntry) -> bool,
{
    let mut file_entries: Vec<DirEntry> = paths
        .iter()
        .flat_map(|path| {
            log::trace!("Checking {path:?} for files");
            let files = match fs::read_dir(path) {
                Ok(files) => files,
                Err(e) => {
                    log::trace!("Unable to read directory: {path:?}: {e}");
                    return vec![];
                }
            };
            files
                .filter_map(|r| {
                    let Ok(entry) = r else { return None };
                    if filter(&entry) {
                        Some(entry)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect();

    let priority = |entry: &DirEntry| {
        let path = entry.path();
        path.parent()
            .and_then(|dir| {
                paths
                    .iter()
                    .position(|base_path| base_path.as_os_str() == dir.as_os_str())
            })
            .unwrap_or(paths.len())
    };

    file_entries.sort_by(|a, b| {
        a.file_name()
            .cmp(&b.file_name())
            .then_with(|| priority(a).cmp(&priority(b)))
    });
    log::trace!("Got sorted entries: {file_entries:?}");

    file_entries.into_iter().map(|entry| entry.path()).collect()
}
