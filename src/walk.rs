use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::{AppError, AppResult};

/// List every directory below `root`, down to `depth` levels.
///
/// Level 1 is the immediate children of `root`; `root` itself is never listed. Entries
/// are sorted by file name within each directory so that repeated runs see the same
/// order. Symlinks to directories are followed; dangling links and links back to an
/// ancestor are skipped.
#[tracing::instrument(level = "debug")]
pub fn list_sub_dirs(root: &Path, depth: usize) -> AppResult<Vec<PathBuf>> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(AppError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::PathNotFound(root.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    }

    let mut dirs = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(depth)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_bad_link(&e) => {
                debug!("Skipping unusable link: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if entry.file_type().is_dir() {
            trace!("Found directory {:?}", entry.path());
            dirs.push(entry.into_path());
        }
    }
    debug!("Found {} directories under {:?}", dirs.len(), root);
    Ok(dirs)
}

/// A symlink below the root that loops back to an ancestor or points nowhere.
fn is_bad_link(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_some()
        || (err.depth() > 0
            && err
                .io_error()
                .is_some_and(|io| io.kind() == ErrorKind::NotFound))
}
