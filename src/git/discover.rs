use std::collections::HashSet;
use std::path::Path;

use git2::{ErrorCode, Repository};
use tracing::{debug, trace};

use crate::AppResult;
use crate::walk::list_sub_dirs;

/// How many directory levels below the scan root are probed for repositories.
pub const DISCOVERY_DEPTH: usize = 2;

/// Outcome of probing a directory for a repository.
pub enum Opened {
    Repo(Repository),
    NotARepository,
}

/// Open the repository that owns `path`, searching upward from it.
///
/// Only "no repository here" is reported as [`Opened::NotARepository`]; every other
/// failure is returned as an error.
#[tracing::instrument(level = "trace")]
pub fn open_repo(path: &Path) -> AppResult<Opened> {
    match Repository::discover(path) {
        Ok(repo) => Ok(Opened::Repo(repo)),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(Opened::NotARepository),
        Err(e) => Err(e.into()),
    }
}

/// Find the distinct repositories among the directories up to [`DISCOVERY_DEPTH`]
/// levels below `root`.
///
/// Repositories are keyed by their canonicalized metadata directory (`.git`, or
/// `.git/worktrees/<name>` for a linked worktree). The first directory that resolves to
/// a given key wins, and the result keeps the walk order.
#[tracing::instrument(level = "debug")]
pub fn list_git_repos(root: &Path) -> AppResult<Vec<Repository>> {
    let mut repos = Vec::new();
    let mut git_dirs = HashSet::new();
    for dir in list_sub_dirs(root, DISCOVERY_DEPTH)? {
        let repo = match open_repo(&dir)? {
            Opened::Repo(repo) => repo,
            Opened::NotARepository => {
                trace!("No repository at {:?}", dir);
                continue;
            }
        };
        let git_dir = std::fs::canonicalize(repo.path())?;
        if git_dirs.insert(git_dir) {
            debug!("Found git repository at {:?}", repo.path());
            repos.push(repo);
        } else {
            trace!("{:?} belongs to an already discovered repository", dir);
        }
    }
    debug!("Discovered {} repositories under {:?}", repos.len(), root);
    Ok(repos)
}
