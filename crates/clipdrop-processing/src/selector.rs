use crate::error::{PipelineError, PipelineResult};
use clipdrop_core::models::FormatDescriptor;
use std::cmp::Reverse;

/// Pick the best format that carries both video and audio.
///
/// Highest height wins, then the larger file size. Unknown heights and sizes count
/// as 0. Remaining ties go to the earliest entry, so the choice is stable for a
/// given input.
///
/// Height comes from `parse_resolution`, which reads `WxH` labels as well as
/// `<N>p`. A `"1920x1080"` entry therefore ranks as 1080, not 0 as it would
/// under a `<N>p`-only reading.
pub fn select_best(formats: &[FormatDescriptor]) -> PipelineResult<&FormatDescriptor> {
    formats
        .iter()
        .filter(|format| format.is_audio_video())
        .min_by_key(|format| {
            Reverse((
                format.height.unwrap_or(0),
                format.file_size_bytes.unwrap_or(0),
            ))
        })
        .ok_or(PipelineError::NoSuitableFormat {
            candidates: formats.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::parse_resolution;

    fn format(id: &str, label: &str, video: &str, audio: &str, size: Option<u64>) -> FormatDescriptor {
        let (width, height) = parse_resolution(label).unzip();
        FormatDescriptor {
            format_id: id.to_string(),
            container: "mp4".to_string(),
            resolution_label: label.to_string(),
            file_size_bytes: size,
            video_codec: Some(video.to_string()),
            audio_codec: Some(audio.to_string()),
            width,
            height,
            ..Default::default()
        }
    }

    #[test]
    fn test_four_format_scenario_picks_largest_1080p() {
        let formats = vec![
            format("a", "720p", "avc1", "none", None),
            format("b", "480p", "v", "a", None),
            format("c", "1080p", "v", "a", Some(500)),
            format("d", "1080p", "v", "a", Some(900)),
        ];

        let best = select_best(&formats).unwrap();
        assert_eq!(best.format_id, "d");
        assert_eq!(best.height, Some(1080));
        assert_eq!(best.file_size_bytes, Some(900));
    }

    #[test]
    fn test_no_audio_video_format_fails() {
        let formats = vec![
            format("v", "1080p", "avc1", "none", Some(10)),
            format("a", "audio only", "none", "opus", Some(10)),
        ];
        assert!(matches!(
            select_best(&formats),
            Err(PipelineError::NoSuitableFormat { candidates: 2 })
        ));
        assert!(matches!(
            select_best(&[]),
            Err(PipelineError::NoSuitableFormat { candidates: 0 })
        ));
    }

    #[test]
    fn test_result_is_maximal_among_qualifying() {
        let formats = vec![
            format("1", "640x360", "v", "a", Some(5_000)),
            format("2", "1920x1080", "v", "a", None),
            format("3", "2560x1440", "v", "none", Some(1)),
            format("4", "1080p", "v", "a", Some(10)),
            format("5", "weird", "v", "a", Some(1_000_000)),
        ];

        let best = select_best(&formats).unwrap();
        assert!(best.is_audio_video());
        for other in formats.iter().filter(|f| f.is_audio_video()) {
            let key = |f: &FormatDescriptor| (f.height.unwrap_or(0), f.file_size_bytes.unwrap_or(0));
            assert!(key(best) >= key(other));
        }
        assert_eq!(best.format_id, "4");
    }

    #[test]
    fn test_width_by_height_label_ranks_by_its_height() {
        let formats = vec![
            format("p", "720p", "v", "a", Some(9_000)),
            format("wxh", "1920x1080", "v", "a", Some(10)),
        ];
        assert_eq!(select_best(&formats).unwrap().format_id, "wxh");
    }

    #[test]
    fn test_exact_ties_resolve_to_first_entry() {
        let formats = vec![
            format("first", "720p", "v", "a", Some(42)),
            format("second", "720p", "v", "a", Some(42)),
        ];
        for _ in 0..3 {
            assert_eq!(select_best(&formats).unwrap().format_id, "first");
        }
    }
}
