//! Metadata resolution
//!
//! One `-J` dump from the media tool, mapped into [`VideoMetadata`].

use crate::error::{PipelineError, PipelineResult};
use crate::tool::MediaTool;
use clipdrop_core::models::{FormatDescriptor, VideoMetadata};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static DIMENSIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)x(\d+)\s*$").expect("dimensions pattern is valid"));
static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)p").expect("height pattern is valid"));

/// Subset of the tool's info JSON we read
#[derive(Debug, Deserialize)]
struct RawVideoInfo {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    #[serde(default)]
    format_id: Option<String>,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    resolution: Option<String>,
    #[serde(default)]
    filesize: Option<u64>,
    #[serde(default)]
    format_note: Option<String>,
    #[serde(default)]
    vcodec: Option<String>,
    #[serde(default)]
    acodec: Option<String>,
    #[serde(default)]
    fps: Option<f64>,
    #[serde(default)]
    tbr: Option<f64>,
    #[serde(default)]
    vbr: Option<f64>,
    #[serde(default)]
    abr: Option<f64>,
    #[serde(default)]
    asr: Option<f64>,
}

impl From<RawFormat> for FormatDescriptor {
    fn from(raw: RawFormat) -> Self {
        let resolution_label = raw.resolution.unwrap_or_default();
        let (width, height) = match parse_resolution(&resolution_label) {
            Some((w, h)) => (Some(w), Some(h)),
            None => (None, None),
        };

        FormatDescriptor {
            format_id: raw.format_id.unwrap_or_default(),
            container: raw.ext.unwrap_or_default(),
            resolution_label,
            file_size_bytes: raw.filesize,
            format_note: raw.format_note.unwrap_or_default(),
            video_codec: raw.vcodec,
            audio_codec: raw.acodec,
            width,
            height,
            fps: raw.fps,
            tbr: raw.tbr,
            vbr: raw.vbr,
            abr: raw.abr,
            asr: raw.asr,
        }
    }
}

/// Width and height from a resolution label.
///
/// `"1920x1080"` is read as-is; otherwise the first `"<H>p"` gives the height and
/// a 16:9 width. `"audio only"` and anything else unrecognised give `None`.
pub fn parse_resolution(label: &str) -> Option<(u32, u32)> {
    if let Some(caps) = DIMENSIONS_RE.captures(label) {
        let width = caps[1].parse().ok()?;
        let height = caps[2].parse().ok()?;
        return Some((width, height));
    }

    let caps = HEIGHT_RE.captures(label)?;
    let height: u32 = caps[1].parse().ok()?;
    let width = (f64::from(height) * 16.0 / 9.0).round() as u32;
    Some((width, height))
}

fn parse_info(stdout: &[u8]) -> Result<VideoMetadata, serde_json::Error> {
    let raw: RawVideoInfo = serde_json::from_slice(stdout)?;
    Ok(VideoMetadata {
        title: raw.title.unwrap_or_default(),
        duration_seconds: raw.duration.map(|d| d.round() as i64).unwrap_or(0),
        thumbnail_url: raw.thumbnail.unwrap_or_default(),
        formats: raw.formats.into_iter().map(FormatDescriptor::from).collect(),
    })
}

/// Ask the media tool for everything it knows about `url`.
///
/// The URL goes to the tool as a single argument after `--`; the tool is the only
/// thing that validates it. Nothing is written to disk.
#[tracing::instrument(skip(tool), fields(program = %tool.program()))]
pub async fn resolve(tool: &MediaTool, url: &str) -> PipelineResult<VideoMetadata> {
    let start = std::time::Instant::now();

    let output = tool
        .run(
            ["-J", "--no-playlist", "--no-warnings", "--", url],
            tool.timeouts().metadata,
        )
        .await?;

    let metadata = parse_info(&output.stdout).map_err(|e| PipelineError::ExternalTool {
        program: tool.program().to_string(),
        message: format!("invalid JSON output: {}", e),
    })?;

    tracing::info!(
        title = %metadata.title,
        duration_seconds = metadata.duration_seconds,
        format_count = metadata.formats.len(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Video metadata resolved"
    );

    Ok(metadata)
}
