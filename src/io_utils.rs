use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::AppResult;
use crate::report::Report;

/// Render `report` into `dir`, replacing any notes already written for that date.
#[tracing::instrument(name = "Saving daily notes", level = "debug", skip(report))]
pub async fn write_report(dir: &Path, report: &Report) -> AppResult<PathBuf> {
    let path = dir.join(report.file_name()?);
    write_file(&path, report.render()?).await?;
    Ok(path)
}

/// Write raw string data to a file, overwriting any existing content.
async fn write_file<P: AsRef<Path> + std::fmt::Debug>(output: P, data: String) -> AppResult<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(output)
        .await?;
    file.write_all(data.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

fn opener_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Hand `path` to the desktop's default application without waiting for it.
///
/// Failing to launch the opener is logged and otherwise ignored.
#[tracing::instrument(level = "debug")]
pub fn open_with_default_app(path: &Path) {
    let spawned = opener_command(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(child) => debug!("Launched opener for {:?} (pid {:?})", path, child.id()),
        Err(e) => warn!("Unable to open {}: {}", path.display(), e),
    }
}
