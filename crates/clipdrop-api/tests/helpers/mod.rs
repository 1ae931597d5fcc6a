//! Test helpers: build AppState and router for integration tests.
//!
//! The media tool is a shell script run through `sh`, and published files land in
//! a local storage directory, so no network or yt-dlp install is needed.
//! Run with: `cargo test -p clipdrop-api --test api_test`

use axum_test::TestServer;
use clipdrop_api::setup::routes;
use clipdrop_api::state::AppState;
use clipdrop_core::{Config, DownloaderConfig};
use clipdrop_storage::LocalStorage;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const PUBLIC_BASE_URL: &str = "https://cdn.example.com/clips";

/// Stand-in for yt-dlp.
///
/// `-J`: prints metadata. URLs containing `audio-only` have no muxed format,
/// URLs containing `broken` make the tool fail.
/// `-f`: writes the URL into `<-P dir>/clip.mp4`; format `missing` fails like an
/// unavailable format.
pub const FAKE_YTDLP: &str = r#"
if [ "$1" = "--version" ]; then echo "2024.08.06"; exit 0; fi
mode="download"; dir=""; fmt=""; url=""
while [ $# -gt 0 ]; do
  case "$1" in
    -J) mode="info"; shift ;;
    -P) dir="$2"; shift 2 ;;
    -f) fmt="$2"; shift 2 ;;
    --) url="$2"; break ;;
    *) shift ;;
  esac
done
case "$url" in
  *broken*) echo "ERROR: Unsupported URL: $url" >&2; exit 1 ;;
esac
if [ "$mode" = "info" ]; then
  case "$url" in
    *audio-only*)
      echo '{"title": "Podcast", "duration": 10, "formats": [{"format_id": "140", "ext": "m4a", "resolution": "audio only", "vcodec": "none", "acodec": "mp4a.40.2"}]}'
      ;;
    *)
      cat <<'JSON'
{"title": "Sample clip", "duration": 95.4, "thumbnail": "https://i.example.com/sample.jpg",
 "formats": [
  {"format_id": "136", "ext": "mp4", "resolution": "1280x720", "vcodec": "avc1.4d401f", "acodec": "none"},
  {"format_id": "18", "ext": "mp4", "resolution": "640x360", "vcodec": "avc1.42001E", "acodec": "mp4a.40.2", "filesize": 100},
  {"format_id": "37", "ext": "mp4", "resolution": "1920x1080", "vcodec": "avc1.64001F", "acodec": "mp4a.40.2", "filesize": 500, "format_note": "1080p"},
  {"format_id": "38", "ext": "mp4", "resolution": "1920x1080", "vcodec": "avc1.640028", "acodec": "mp4a.40.2", "filesize": 900, "format_note": "1080p"}
 ]}
JSON
      ;;
  esac
  exit 0
fi
if [ "$fmt" = "missing" ]; then echo "ERROR: Requested format is not available" >&2; exit 1; fi
printf '%s' "$url" > "$dir/clip.mp4"
"#;

/// Test application: server and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<LocalStorage>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn download_dir(&self) -> PathBuf {
        self.temp_dir.path().join("downloads")
    }
}

/// Setup test app with the fake media tool and local storage.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let script = temp_dir.path().join("yt-dlp.sh");
    std::fs::write(&script, FAKE_YTDLP).expect("Failed to write fake tool");

    let bucket_dir = temp_dir.path().join("bucket");
    let download_dir = temp_dir.path().join("downloads");

    let vars: HashMap<String, String> = [
        ("YTDLP_PATH", "sh".to_string()),
        ("YTDLP_EXTRA_ARGS", script.to_string_lossy().into_owned()),
        ("YTDLP_METADATA_TIMEOUT_SECS", "10".to_string()),
        ("YTDLP_DOWNLOAD_TIMEOUT_SECS", "10".to_string()),
        ("DOWNLOAD_DIR", download_dir.to_string_lossy().into_owned()),
        ("STORAGE_BACKEND", "local".to_string()),
        ("LOCAL_STORAGE_PATH", bucket_dir.to_string_lossy().into_owned()),
        ("LOCAL_STORAGE_BASE_URL", PUBLIC_BASE_URL.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let config = Config(Box::new(
        DownloaderConfig::from_vars(|key| vars.get(key).cloned()).expect("Invalid test config"),
    ));
    config.validate().expect("Invalid test config");

    let storage = Arc::new(
        LocalStorage::new(bucket_dir, PUBLIC_BASE_URL.to_string())
            .await
            .expect("Failed to create local storage"),
    );

    let state = Arc::new(AppState::new(config.clone(), storage.clone()));
    let app = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        temp_dir,
    }
}
