use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{ColorChoice, Parser};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::{debug, info};
use tracing_indicatif::indicatif_println;

use crate::time_utils::{now_local, yesterday};
use crate::{AppResult, io_utils, report};

const STYLES: Styles = Styles::styled()
    .header(Style::new().bold())
    .usage(Style::new().bold())
    .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
    .literal(
        Style::new()
            .bold()
            .fg_color(Some(Color::Ansi(AnsiColor::Green))),
    )
    .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
    .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
    .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightRed))))
    .context(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Magenta))))
    .context_value(
        Style::new()
            .bold()
            .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
    );

/// Long-form CLI description shown in `--help`.
const LONG_ABOUT: &str = "Daily Notes - Summarize the commits you made today

Scans the directories up to two levels below --path for git repositories, collects
the commits authored in the last 24 hours by each repository's configured user.name
(merge commits excluded) and writes them to daily-notes-<date>.md in the current
directory.";

/// Daily Notes - Summarize the commits you made today.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = Some(LONG_ABOUT), styles = STYLES)]
pub struct Cli {
    /// Path to the directory containing your repositories
    #[arg(short, long)]
    pub path: PathBuf,

    /// Color choice for the log output
    #[arg(long, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

impl Cli {
    /// Whether log lines on stderr should carry ANSI colors.
    pub fn use_ansi(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        }
    }

    /// Build today's notes, save them to the current directory and open them.
    pub async fn run(&self) -> AppResult<()> {
        let path = self.write_notes(&std::env::current_dir()?).await?;
        io_utils::open_with_default_app(&path);
        Ok(())
    }

    /// Build today's notes and save them into `out_dir`. Nothing is written unless the
    /// whole report was collected.
    #[tracing::instrument(name = "Generating daily notes", level = "info", skip(self))]
    pub async fn write_notes(&self, out_dir: &Path) -> AppResult<PathBuf> {
        // Resolve the local date before any worker thread exists.
        let date = now_local().date();
        let since = yesterday();

        let root = self.path.clone();
        let report =
            tokio::task::spawn_blocking(move || report::generate_report(&root, date, since))
                .await??;
        debug!("{}", serde_json::to_string(&report)?);

        let path = io_utils::write_report(out_dir, &report).await?;
        info!("Wrote daily notes to {}", path.display());

        indicatif_println!(
            "Found {} commits in {} repos",
            report.commit_count(),
            report.repo_count()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::CommandFactory;
    use tempfile::TempDir;
    use time::OffsetDateTime;

    use super::*;
    use crate::AppError;
    use crate::git::fixtures::{commit, init_repo};

    fn cli_for(path: &Path) -> Cli {
        Cli::try_parse_from([OsStr::new("daily-notes"), OsStr::new("-p"), path.as_os_str()])
            .unwrap()
    }

    fn written_files(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn path_is_required() {
        assert!(Cli::try_parse_from(["daily-notes"]).is_err());
    }

    #[test]
    fn parses_short_and_long_path() {
        let short = Cli::try_parse_from(["daily-notes", "-p", "/src"]).unwrap();
        let long = Cli::try_parse_from(["daily-notes", "--path", "/src"]).unwrap();
        assert_eq!(short.path, PathBuf::from("/src"));
        assert_eq!(long.path, short.path);
        assert_eq!(short.color, ColorChoice::Auto);
    }

    #[test]
    fn never_color_disables_ansi() {
        let cli = Cli::try_parse_from(["daily-notes", "-p", ".", "--color", "never"]).unwrap();
        assert!(!cli.use_ansi());
    }

    #[tokio::test]
    async fn writes_notes_for_todays_commits() {
        let scan = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let repo = init_repo(&scan.path().join("repoA"), Some("Dev"));
        commit(&repo, "Dev", "Fix bug", OffsetDateTime::now_utc());

        let path = cli_for(scan.path()).write_notes(out.path()).await.unwrap();
        assert_eq!(written_files(out.path()), vec![path.clone()]);
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("daily-notes-") && name.ends_with(".md"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("## repoA\n* Fix bug\n"));
    }

    #[tokio::test]
    async fn missing_scan_path_writes_nothing() {
        let scan = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let result = cli_for(&scan.path().join("missing"))
            .write_notes(out.path())
            .await;
        assert!(matches!(result, Err(AppError::PathNotFound(_))));
        assert!(written_files(out.path()).is_empty());
    }

    #[tokio::test]
    async fn unconfigured_repository_writes_nothing() {
        let scan = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let good = init_repo(&scan.path().join("a-good"), Some("Dev"));
        commit(&good, "Dev", "Fine", OffsetDateTime::now_utc());
        init_repo(&scan.path().join("b-unconfigured"), None);

        let result = cli_for(scan.path()).write_notes(out.path()).await;
        assert!(matches!(result, Err(AppError::MissingAuthorConfig(_))));
        assert!(written_files(out.path()).is_empty());
    }
}
