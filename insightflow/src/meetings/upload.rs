//! Reading transcripts from disk.

use crate::errors::UploadError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^/.]+$").expect("extension pattern is valid"));

/// A transcript loaded from a file, with a title derived from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFile {
    /// File name without its final extension.
    pub title: String,
    /// File contents.
    pub transcript: String,
}

/// Strips the final extension from a file name.
///
/// ```
/// use insightflow::meetings::title_from_file_name;
///
/// assert_eq!(title_from_file_name("weekly.sync.txt"), "weekly.sync");
/// assert_eq!(title_from_file_name("notes"), "notes");
/// ```
#[must_use]
pub fn title_from_file_name(name: &str) -> String {
    EXTENSION.replace(name, "").into_owned()
}

/// Reads a UTF-8 transcript file.
///
/// # Errors
///
/// Returns [`UploadError::Read`] if the file cannot be read and
/// [`UploadError::NotText`] if it is not valid UTF-8.
pub async fn read_transcript_file(path: impl AsRef<Path>) -> Result<TranscriptFile, UploadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Read {
        path: display.clone(),
        source,
    })?;
    let transcript = String::from_utf8(bytes).map_err(|_| UploadError::NotText(display.clone()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(display);

    Ok(TranscriptFile {
        title: title_from_file_name(&name),
        transcript,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_title_strips_last_extension_only() {
        assert_eq!(title_from_file_name("q3-review.md"), "q3-review");
        assert_eq!(title_from_file_name("archive.tar.gz"), "archive.tar");
        assert_eq!(title_from_file_name(".hidden"), "");
        assert_eq!(title_from_file_name("trailing."), "trailing.");
    }

    #[tokio::test]
    async fn test_read_transcript_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board meeting.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"We met. We agreed.")
            .unwrap();

        let file = read_transcript_file(&path).await.unwrap();
        assert_eq!(file.title, "board meeting");
        assert_eq!(file.transcript, "We met. We agreed.");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_transcript_file(dir.path().join("nope.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Read { .. }));
    }

    #[tokio::test]
    async fn test_read_binary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = read_transcript_file(&path).await.unwrap_err();
        assert!(matches!(err, UploadError::NotText(_)));
    }
}
