//! Filesystem-safe names for directories built from remote metadata such as
//! playlist titles.

/// Longest name we hand to the filesystem, in characters.
pub const MAX_FILENAME_CHARS: usize = 255;

const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const TRAVERSAL_SEQUENCES: &[&str] = &["../", "..\\"];

/// Maps an arbitrary title to a single safe path segment.
///
/// - Replaces `< > : " / \ | ? *` with `_`
/// - Deletes `../` and `..\` until none remain, so nested attempts such as
///   `....//` cannot reassemble a traversal
/// - Limits the result to [`MAX_FILENAME_CHARS`] characters
///
/// An empty input yields an empty name.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let mut sanitized = strip_traversal(replaced);
    match sanitized.char_indices().nth(MAX_FILENAME_CHARS) {
        Some((cut, _)) => {
            sanitized.truncate(cut);
            sanitized
        }
        None => sanitized,
    }
}

/// Deletes traversal sequences until a pass removes nothing.
fn strip_traversal(mut value: String) -> String {
    loop {
        let before = value.len();
        for sequence in TRAVERSAL_SEQUENCES {
            value = value.replace(sequence, "");
        }
        if value.len() == before {
            return value;
        }
    }
}
