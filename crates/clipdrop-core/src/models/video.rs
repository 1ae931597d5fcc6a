use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Codec value the media tool reports for a missing stream
pub const NONE_CODEC: &str = "none";

/// Metadata for one video, as reported by the media tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoMetadata {
    pub title: String,
    pub duration_seconds: i64,
    pub thumbnail_url: String,
    pub formats: Vec<FormatDescriptor>,
}

/// One encoding the media tool can deliver for a video
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormatDescriptor {
    pub format_id: String,
    pub container: String,
    pub resolution_label: String,
    pub file_size_bytes: Option<u64>,
    pub format_note: String,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    /// Total bitrate
    pub tbr: Option<f64>,
    /// Video bitrate
    pub vbr: Option<f64>,
    /// Audio bitrate
    pub abr: Option<f64>,
    /// Audio sample rate
    pub asr: Option<f64>,
}

fn is_real_codec(codec: Option<&str>) -> bool {
    matches!(codec, Some(c) if !c.is_empty() && c != NONE_CODEC)
}

impl FormatDescriptor {
    pub fn has_video(&self) -> bool {
        is_real_codec(self.video_codec.as_deref())
    }

    pub fn has_audio(&self) -> bool {
        is_real_codec(self.audio_codec.as_deref())
    }

    /// True when the format carries both a video and an audio stream
    pub fn is_audio_video(&self) -> bool {
        self.has_video() && self.has_audio()
    }
}

/// A file the media tool wrote to local disk
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredFile {
    pub local_path: PathBuf,
    pub created_at: DateTime<Utc>,
}

/// An uploaded object and the URL it is served from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishedAsset {
    pub public_url: String,
    pub key: String,
}
