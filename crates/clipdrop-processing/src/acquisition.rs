//! Acquisition: have the media tool write the chosen format into a directory,
//! then find the file it produced.

use crate::error::{PipelineError, PipelineResult};
use crate::tool::MediaTool;
use chrono::{DateTime, Utc};
use clipdrop_core::models::AcquiredFile;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Used when the caller has no format id
pub const FALLBACK_FORMAT_SELECTOR: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";

/// Extensions the tool leaves behind for unfinished downloads
const PARTIAL_EXTENSIONS: [&str; 3] = ["part", "ytdl", "temp"];

/// Filesystems with coarse timestamps can date a fresh file slightly before the
/// recorded start.
const MTIME_SLACK: Duration = Duration::from_secs(2);

/// Download `url` in `format_id` (or the fallback selector) into `output_dir`.
///
/// `output_dir` should belong to this call alone: the newest finished file in it
/// is taken to be the result.
#[tracing::instrument(skip(tool, output_dir), fields(program = %tool.program(), output_dir = %output_dir.display()))]
pub async fn acquire(
    tool: &MediaTool,
    url: &str,
    format_id: Option<&str>,
    output_dir: &Path,
) -> PipelineResult<AcquiredFile> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| PipelineError::io(output_dir, e))?;

    let selector = format_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(FALLBACK_FORMAT_SELECTOR);

    let started = SystemTime::now();
    let since = started.checked_sub(MTIME_SLACK).unwrap_or(started);
    let start = std::time::Instant::now();

    let mut args: Vec<OsString> = ["-f", selector, "--merge-output-format", "mp4", "-P"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(output_dir.as_os_str().to_owned());
    args.push(OsString::from("--"));
    args.push(OsString::from(url));

    tool.run(args, tool.timeouts().download).await?;

    let (local_path, modified) = newest_file(output_dir, since)
        .await
        .map_err(|e| PipelineError::io(output_dir, e))?
        .ok_or_else(|| PipelineError::NoFileProduced {
            dir: output_dir.to_path_buf(),
        })?;

    tracing::info!(
        path = %local_path.display(),
        format = %selector,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Video acquired"
    );

    Ok(AcquiredFile {
        local_path,
        created_at: DateTime::<Utc>::from(modified),
    })
}

fn is_partial(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| PARTIAL_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Most recently modified finished regular file in `dir` not older than `since`
async fn newest_file(
    dir: &Path,
    since: SystemTime,
) -> std::io::Result<Option<(PathBuf, SystemTime)>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut newest: Option<(PathBuf, SystemTime)> = None;

    while let Some(entry) = entries.next_entry().await? {
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let path = entry.path();
        if is_partial(&path) {
            continue;
        }
        let modified = metadata.modified()?;
        if modified < since {
            continue;
        }
        if newest.as_ref().map_or(true, |(_, best)| modified > *best) {
            newest = Some((path, modified));
        }
    }

    Ok(newest)
}
