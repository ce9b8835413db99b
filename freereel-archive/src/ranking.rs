//! File ranking: manifest in, ordered playable renditions out.
//!
//! Pure and deterministic, no I/O. A file qualifies either by its format
//! tag or by its filename extension; the OR accepts files whose format
//! metadata is missing or nonstandard, trading precision for coverage.
//! Thumbnail sidecars are never offered as playable.
//!
//! Primary selection and the full option list share one qualification
//! predicate and one priority function, so the two can never disagree: the
//! primary is simply the highest-priority qualifying file, while the option
//! list keeps manifest order.

use crate::types::{ArchiveFile, ArchiveManifest, QualityLabel, RenditionOption};

/// Format vocabulary in fixed priority order, best first.
pub const FORMAT_PRIORITY: [&str; 5] = ["MPEG4", "h.264", "MP4", "OGG Video", "MPEG2"];

/// Extension fallback in fixed priority order, consulted only for files
/// with no recognized format.
pub const EXTENSION_PRIORITY: [&str; 3] = [".mp4", ".ogv", ".mpeg"];

/// Archival thumbnail sidecar marker.
const THUMBNAIL_MARKER: &str = ".thumbs";

/// Selection priority of a file, or `None` when it does not qualify.
///
/// Lower is better. A recognized format decides the rank outright, so files
/// sharing a format tie and manifest position decides between them; the
/// extension order is consulted only for files with no recognized format,
/// and any format match outranks every extension-only match.
fn priority(file: &ArchiveFile) -> Option<(usize, usize)> {
    if file.name.contains(THUMBNAIL_MARKER) {
        return None;
    }

    if let Some(format_rank) = FORMAT_PRIORITY
        .iter()
        .position(|f| f.eq_ignore_ascii_case(&file.format))
    {
        return Some((format_rank, 0));
    }

    let name = file.name.to_lowercase();
    EXTENSION_PRIORITY
        .iter()
        .position(|ext| name.ends_with(ext))
        .map(|extension_rank| (FORMAT_PRIORITY.len(), extension_rank))
}

/// Quality label for a file, a pure function of filename and format.
///
/// Evaluated in fixed precedence; the first matching rule wins.
pub fn quality_label(name: &str, format: &str) -> QualityLabel {
    let name = name.to_lowercase();
    let format = format.to_lowercase();

    if name.contains("1080") || name.contains("hd") {
        QualityLabel::P1080
    } else if name.contains("720") {
        QualityLabel::P720
    } else if name.contains("480") {
        QualityLabel::P480
    } else if format.contains("mpeg4") || format.contains("h.264") {
        QualityLabel::High
    } else if format.contains("ogg") {
        QualityLabel::Medium
    } else {
        QualityLabel::Standard
    }
}

/// Map every qualifying file to a rendition, in manifest order.
///
/// No deduplication beyond the thumbnail filter: the same rendition under
/// two filenames yields two options.
pub fn rank(manifest: &ArchiveManifest) -> Vec<RenditionOption> {
    manifest
        .files
        .iter()
        .filter(|file| priority(file).is_some())
        .map(|file| to_rendition(manifest, file))
        .collect()
}

/// The single best-guess rendition, or `None` when nothing qualifies.
///
/// Walks the format vocabulary in priority order and falls back to the
/// extension order; ties break on manifest position. A `None` here is a
/// normal "not playable" outcome, not an error.
pub fn select_primary(manifest: &ArchiveManifest) -> Option<RenditionOption> {
    manifest
        .files
        .iter()
        .filter_map(|file| priority(file).map(|rank| (rank, file)))
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, file)| to_rendition(manifest, file))
}

fn to_rendition(manifest: &ArchiveManifest, file: &ArchiveFile) -> RenditionOption {
    RenditionOption {
        url: manifest.file_url(file),
        name: file.name.clone(),
        format: file.format.clone(),
        size_label: file.size_label(),
        quality: quality_label(&file.name, &file.format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemMetadata;

    fn manifest(files: Vec<ArchiveFile>) -> ArchiveManifest {
        ArchiveManifest {
            identifier: "test_item".to_string(),
            metadata: ItemMetadata::default(),
            files,
            server: "https://ia800300.us.archive.org".to_string(),
            dir: "/29/items/test_item".to_string(),
        }
    }

    fn file(name: &str, format: &str) -> ArchiveFile {
        ArchiveFile {
            name: name.to_string(),
            format: format.to_string(),
            size: None,
        }
    }

    #[test]
    fn test_empty_manifest_yields_nothing() {
        let manifest = manifest(vec![]);
        assert!(rank(&manifest).is_empty());
        assert!(select_primary(&manifest).is_none());
    }

    #[test]
    fn test_no_qualifying_files_yields_nothing() {
        let manifest = manifest(vec![
            file("cover.jpg", "JPEG"),
            file("meta.xml", "Metadata"),
            file("audio.mp3", "VBR MP3"),
        ]);
        assert!(rank(&manifest).is_empty());
        assert!(select_primary(&manifest).is_none());
    }

    #[test]
    fn test_thumbnail_excluded_even_with_video_extension() {
        let manifest = manifest(vec![file("reel1.thumbs/frame.mp4", "MPEG4")]);
        assert!(rank(&manifest).is_empty());
        assert!(select_primary(&manifest).is_none());
    }

    #[test]
    fn test_format_priority_tiebreak() {
        // OGG Video listed first, MPEG4 still wins the primary pick
        let manifest = manifest(vec![
            file("movie.ogv", "OGG Video"),
            file("movie.mp4", "MPEG4"),
        ]);

        let primary = select_primary(&manifest).unwrap();
        assert_eq!(
            primary.url,
            "https://ia800300.us.archive.org/29/items/test_item/movie.mp4"
        );

        // Option list keeps manifest order regardless
        let options = rank(&manifest);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].name, "movie.ogv");
        assert_eq!(options[1].name, "movie.mp4");
    }

    #[test]
    fn test_extension_fallback_when_no_format_matches() {
        let manifest = manifest(vec![
            file("notes.txt", "Text"),
            file("movie.mp4", ""),
        ]);

        let primary = select_primary(&manifest).unwrap();
        assert_eq!(primary.name, "movie.mp4");
        assert_eq!(rank(&manifest).len(), 1);
    }

    #[test]
    fn test_extension_order_within_fallback() {
        // No recognized formats; .mp4 outranks .ogv regardless of position
        let manifest = manifest(vec![file("b.ogv", ""), file("a.mp4", "")]);
        assert_eq!(select_primary(&manifest).unwrap().name, "a.mp4");
    }

    #[test]
    fn test_format_match_beats_extension_match() {
        // A low-priority format (MPEG2) still beats an extension-only file
        let manifest = manifest(vec![file("clip.mp4", ""), file("clip.m2v", "MPEG2")]);
        assert_eq!(select_primary(&manifest).unwrap().name, "clip.m2v");
    }

    #[test]
    fn test_same_format_tie_takes_first_manifest_file() {
        // Extension never reorders files sharing a recognized format
        let manifest = manifest(vec![
            file("movie.avi", "MPEG4"),
            file("movie.mp4", "MPEG4"),
        ]);
        assert_eq!(select_primary(&manifest).unwrap().name, "movie.avi");
    }

    #[test]
    fn test_manifest_order_breaks_equal_priority() {
        let manifest = manifest(vec![
            file("first.mp4", "MPEG4"),
            file("second.mp4", "MPEG4"),
        ]);
        assert_eq!(select_primary(&manifest).unwrap().name, "first.mp4");
    }

    #[test]
    fn test_duplicate_renditions_both_kept() {
        let manifest = manifest(vec![
            file("movie.mp4", "MPEG4"),
            file("movie_copy.mp4", "MPEG4"),
        ]);
        assert_eq!(rank(&manifest).len(), 2);
    }

    #[test]
    fn test_quality_label_precedence() {
        assert_eq!(quality_label("movie_1080p.mp4", ""), QualityLabel::P1080);
        assert_eq!(quality_label("movie_hd.ogv", "OGG Video"), QualityLabel::P1080);
        // Filename rule wins over format rule
        assert_eq!(
            quality_label("movie_720p.ogv", "OGG Video"),
            QualityLabel::P720
        );
        assert_eq!(quality_label("movie_480.mpeg", "MPEG2"), QualityLabel::P480);
        assert_eq!(quality_label("movie.mp4", "MPEG4"), QualityLabel::High);
        assert_eq!(quality_label("movie.mp4", "h.264"), QualityLabel::High);
        assert_eq!(quality_label("movie.ogv", "OGG Video"), QualityLabel::Medium);
        assert_eq!(quality_label("movie.mpeg", "MPEG2"), QualityLabel::Standard);
    }

    #[test]
    fn test_labels_stable_under_permutation() {
        let files = vec![
            file("movie_720p.ogv", "OGG Video"),
            file("movie.mp4", "MPEG4"),
            file("movie_1080p.mp4", "h.264"),
        ];
        let forward = manifest(files.clone());
        let mut reversed_files = files;
        reversed_files.reverse();
        let reversed = manifest(reversed_files);

        let mut forward_labels: Vec<_> = rank(&forward)
            .into_iter()
            .map(|r| (r.name, r.quality))
            .collect();
        let mut reversed_labels: Vec<_> = rank(&reversed)
            .into_iter()
            .map(|r| (r.name, r.quality))
            .collect();

        // Output order follows input order, per-file labels never change
        assert_eq!(forward_labels.len(), 3);
        forward_labels.sort();
        reversed_labels.sort();
        assert_eq!(forward_labels, reversed_labels);
    }

    #[test]
    fn test_thumbnail_sidecar_scenario() {
        let manifest = manifest(vec![
            file("reel1.thumbs/x.jpg", ""),
            file("movie_720p.ogv", "OGG Video"),
        ]);

        let options = rank(&manifest);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "movie_720p.ogv");
        assert_eq!(options[0].quality, QualityLabel::P720);
        assert_eq!(
            select_primary(&manifest).unwrap().url,
            "https://ia800300.us.archive.org/29/items/test_item/movie_720p.ogv"
        );
    }
}
