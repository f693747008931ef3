//! Throwaway repositories for tests.

use std::path::Path;
use std::sync::Once;

use git2::{ConfigLevel, Oid, Repository, Signature};
use time::OffsetDateTime;

static ISOLATE: Once = Once::new();

/// Point libgit2's global and system config lookups at an empty directory so the
/// host's `user.name` never leaks into a test.
pub fn isolate_git_config() {
    ISOLATE.call_once(|| {
        let empty = std::env::temp_dir().join("daily-notes-test-empty-config");
        std::fs::create_dir_all(&empty).unwrap();
        for level in [ConfigLevel::System, ConfigLevel::XDG, ConfigLevel::Global] {
            // SAFETY: runs once, before any repository in this process reads its config.
            unsafe { git2::opts::set_search_path(level, empty.as_path()).unwrap() };
        }
    });
}

/// Initialise a repository at `path`, optionally with a local `user.name`.
pub fn init_repo(path: &Path, user: Option<&str>) -> Repository {
    isolate_git_config();
    let repo = Repository::init(path).unwrap();
    if let Some(user) = user {
        repo.config().unwrap().set_str("user.name", user).unwrap();
    }
    repo
}

/// Commit on `HEAD` as `author` at `when`.
pub fn commit(repo: &Repository, author: &str, message: &str, when: OffsetDateTime) -> Oid {
    commit_to(repo, "HEAD", author, message, when)
}

/// Commit to `refname`, branching off `HEAD` when the ref doesn't exist yet.
pub fn commit_to(
    repo: &Repository,
    refname: &str,
    author: &str,
    message: &str,
    when: OffsetDateTime,
) -> Oid {
    let sig = Signature::new(
        author,
        &format!("{}@example.com", author.to_lowercase().replace(' ', ".")),
        &git2::Time::new(when.unix_timestamp(), 0),
    )
    .unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo
        .revparse_single(refname)
        .or_else(|_| repo.revparse_single("HEAD"))
        .ok()
        .and_then(|obj| obj.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some(refname), &sig, &sig, message, &tree, &parents)
        .unwrap()
}
