use std::borrow::Cow;

/// Label used for files whose name carries no `.` at all.
pub const NO_EXTENSION: &str = "no extension";

/// Returns the final segment of a repository path (`/assets/video.mp4` -> `video.mp4`).
pub fn file_name(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, name)) => name,
        None => path,
    }
}

/// Extracts the extension label from a file name.
///
/// The label is everything after the last `.`, prefixed with a dot and kept
/// in its original case (`archive.tar.gz` -> `.gz`, `IMAGE.PNG` -> `.PNG`).
/// Names without any dot map to [`NO_EXTENSION`].
pub fn extension_label(file_name: &str) -> Cow<'_, str> {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => Cow::Owned(format!(".{}", ext)),
        None => Cow::Borrowed(NO_EXTENSION),
    }
}
