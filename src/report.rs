use std::fmt::Write;
use std::path::Path;

use serde::Serialize;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::AppResult;
use crate::git::discover::list_git_repos;
use crate::git::hist::{CommitMeta, repo_entry};
use crate::time_utils::iso_date;

/// One repository's section of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub commits: Vec<CommitMeta>,
}

/// The daily notes for one run: a dated title and one section per repository that had
/// qualifying commits, in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(with = "crate::serde_helpers::iso_date")]
    pub date: Date,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    /// Repositories that contributed at least one commit.
    pub fn repo_count(&self) -> usize {
        self.entries.len()
    }

    pub fn commit_count(&self) -> usize {
        self.entries.iter().map(|e| e.commits.len()).sum()
    }

    /// `daily-notes-<YYYY-MM-DD>.md`
    pub fn file_name(&self) -> AppResult<String> {
        Ok(format!("daily-notes-{}.md", iso_date(self.date)?))
    }

    /// Render the report as markdown.
    ///
    /// Each commit is a bullet. Extra lines of a multi-line message are indented under
    /// their bullet and blank lines are dropped.
    pub fn render(&self) -> AppResult<String> {
        let mut out = String::new();
        writeln!(out, "# Daily Notes {}", iso_date(self.date)?)?;
        for entry in &self.entries {
            writeln!(out, "## {}", entry.name)?;
            for commit in &entry.commits {
                let mut lines = commit.message.lines().filter(|l| !l.trim().is_empty());
                writeln!(out, "* {}", lines.next().unwrap_or_default())?;
                for line in lines {
                    writeln!(out, "  {}", line)?;
                }
            }
        }
        Ok(out)
    }
}

/// Discover the repositories below `root` and collect each one's commits since `since`.
///
/// Repositories are processed one after another. Any failure other than a directory not
/// being a repository aborts the whole report.
#[tracing::instrument(name = "Collecting commits", level = "info", skip(date, since))]
pub fn generate_report(root: &Path, date: Date, since: OffsetDateTime) -> AppResult<Report> {
    let repos = list_git_repos(root)?;
    let mut entries = Vec::new();
    for repo in &repos {
        if let Some(entry) = repo_entry(repo, since)? {
            info!("{} commits in {}", entry.commits.len(), entry.name);
            entries.push(entry);
        }
    }
    Ok(Report { date, entries })
}
