use git2::{ErrorCode, Repository, Sort};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, trace};

use crate::report::ReportEntry;
use crate::time_utils::git_time_to_datetime;
use crate::{AppError, AppResult};

/// Upper bound on matching commits read from a single repository.
pub const MAX_COMMITS: usize = 100;

/// Messages containing any of these were produced by merging, not authored work.
const MERGE_MARKERS: [&str; 2] = ["Merge pull request", "Merge branch"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMeta {
    pub message: String,
    pub author: String,
    #[serde(with = "crate::serde_helpers::offset_datetime")]
    pub timestamp: OffsetDateTime,
}

fn is_merge_message(message: &str) -> bool {
    MERGE_MARKERS.iter().any(|marker| message.contains(marker))
}

/// Read `user.name` as git resolves it for this repository.
#[tracing::instrument(level = "trace", skip(repo))]
pub fn author_name(repo: &Repository) -> AppResult<String> {
    let missing = || AppError::MissingAuthorConfig(repo.path().to_path_buf());
    match repo.config()?.get_string("user.name") {
        Ok(name) if name.trim().is_empty() => Err(missing()),
        Ok(name) => Ok(name),
        Err(e) if e.code() == ErrorCode::NotFound => Err(missing()),
        Err(e) => Err(e.into()),
    }
}

/// Commits reachable from any ref (or `HEAD`) written by `author` at or after `since`.
///
/// At most [`MAX_COMMITS`] matches are read, newest first. Merge commits are then
/// dropped by message and the rest sorted by message.
#[tracing::instrument(level = "debug", skip(repo))]
pub fn daily_commits(
    repo: &Repository,
    author: &str,
    since: OffsetDateTime,
) -> AppResult<Vec<CommitMeta>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TIME)?;
    revwalk.push_glob("*")?;
    if let Err(e) = revwalk.push_head() {
        debug!("No HEAD to walk in {:?}: {}", repo.path(), e);
    }

    let cutoff = since.unix_timestamp();
    let mut commits = Vec::new();
    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        if commit.time().seconds() < cutoff {
            break;
        }
        let signature = commit.author();
        if signature.name_bytes() != author.as_bytes() {
            trace!("Skipping {} by another author", commit.id());
            continue;
        }
        commits.push(CommitMeta {
            message: String::from_utf8_lossy(commit.message_bytes())
                .trim_end()
                .to_string(),
            author: author.to_string(),
            timestamp: git_time_to_datetime(commit.time())?,
        });
        if commits.len() >= MAX_COMMITS {
            debug!("Reached {} commits in {:?}", MAX_COMMITS, repo.path());
            break;
        }
    }

    commits.retain(|c| !is_merge_message(&c.message));
    commits.sort_by(|a, b| a.message.cmp(&b.message));
    Ok(commits)
}

/// Name shown for a repository: its working directory's name, or the metadata
/// directory's name (minus `.git`) for a bare repository.
pub fn repo_name(repo: &Repository) -> String {
    let name = match repo.workdir() {
        Some(workdir) => workdir.file_name(),
        None => repo.path().file_stem(),
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| repo.path().display().to_string())
}

/// Build the report section for one repository, or `None` if nothing qualifies.
#[tracing::instrument(level = "debug", skip(repo), fields(repo = ?repo.path()))]
pub fn repo_entry(repo: &Repository, since: OffsetDateTime) -> AppResult<Option<ReportEntry>> {
    let author = author_name(repo)?;
    let commits = daily_commits(repo, &author, since)?;
    if commits.is_empty() {
        debug!("No commits by {} since {}", author, since);
        return Ok(None);
    }
    Ok(Some(ReportEntry {
        name: repo_name(repo),
        commits,
    }))
}
