//! Key generation for published videos.
//!
//! Key format: `videos/{unix_millis}-{token}.{ext}`.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Prefix every published video is stored under
pub const VIDEO_KEY_PREFIX: &str = "videos";

const TOKEN_LEN: usize = 6;

/// File extension for a content type: the subtype, without parameters.
///
/// `video/mp4` gives `mp4`, `video/webm; codecs=vp9` gives `webm`. A content type
/// without a subtype falls back to `bin`.
pub fn extension_for_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .and_then(|essence| essence.split('/').nth(1))
        .map(|subtype| subtype.trim().to_lowercase())
        .filter(|subtype| {
            !subtype.is_empty()
                && subtype
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '+')
        })
        .unwrap_or_else(|| "bin".to_string())
}

/// Build a video key from its parts
pub fn video_key(timestamp_millis: i64, token: &str, content_type: &str) -> String {
    format!(
        "{}/{}-{}.{}",
        VIDEO_KEY_PREFIX,
        timestamp_millis,
        token,
        extension_for_content_type(content_type)
    )
}

/// Generate a fresh key for a video of the given content type
pub fn generate_video_key(content_type: &str) -> String {
    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    video_key(chrono::Utc::now().timestamp_millis(), &token, content_type)
}

/// Reject keys that could escape the storage root
pub fn validate_key(storage_key: &str) -> bool {
    !storage_key.is_empty() && !storage_key.contains("..") && !storage_key.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_content_type() {
        assert_eq!(extension_for_content_type("video/mp4"), "mp4");
        assert_eq!(extension_for_content_type("video/webm; codecs=vp9"), "webm");
        assert_eq!(extension_for_content_type("VIDEO/MP4"), "mp4");
        assert_eq!(extension_for_content_type("video"), "bin");
        assert_eq!(extension_for_content_type("video/../../x"), "bin");
    }

    #[test]
    fn test_video_key_layout() {
        assert_eq!(
            video_key(1_700_000_000_000, "k3x9q1", "video/mp4"),
            "videos/1700000000000-k3x9q1.mp4"
        );
    }

    #[test]
    fn test_generated_keys_are_unique_and_valid() {
        let a = generate_video_key("video/mp4");
        let b = generate_video_key("video/mp4");
        assert_ne!(a, b);
        assert!(a.starts_with("videos/"));
        assert!(a.ends_with(".mp4"));
        assert!(validate_key(&a));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("videos/1-a.mp4"));
        assert!(!validate_key("../etc/passwd"));
        assert!(!validate_key("/etc/passwd"));
        assert!(!validate_key(""));
    }
}
