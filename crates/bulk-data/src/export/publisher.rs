use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use shared_types::AppError;

use crate::error_convert::IoResultExt;

/// File name endings that are moved into the public tree.
pub const PUBLISHABLE_SUFFIXES: [&str; 3] = [".tar", ".tar.gz", ".csv.gz"];

pub fn is_publishable(name: &str) -> bool {
    PUBLISHABLE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Move every finished archive in `src_dir` into `dest_dir`, replacing
/// same-named files. Other files in either directory are left alone.
///
/// Each move is a rename, or copy-then-remove when the two directories sit
/// on different filesystems. Any other rename failure is returned as is.
/// Moves are independent: a failure part way leaves earlier files swapped.
pub fn swap_archives(src_dir: &Path, dest_dir: &Path) -> Result<Vec<String>, AppError> {
    fs::create_dir_all(dest_dir).at_path(dest_dir)?;

    let entries = match fs::read_dir(src_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).at_path(src_dir),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.at_path(src_dir)?;
        if !entry.file_type().at_path(&entry.path())?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if is_publishable(&name) {
            names.push(name);
        }
    }
    names.sort();

    for name in &names {
        let from = src_dir.join(name);
        let to = dest_dir.join(name);
        move_file(&from, &to).at_path(&from)?;
        tracing::debug!(file = %name, dest = %dest_dir.display(), "Published");
    }

    Ok(names)
}

fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if needs_copy(&e) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

fn needs_copy(e: &std::io::Error) -> bool {
    e.kind() == ErrorKind::CrossesDevices
}
