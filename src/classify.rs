//! URL classification used before anything is handed to yt-dlp.
//!
//! Every function here is a pure, total predicate over the input string: no
//! I/O, no logging, and every input (empty, malformed, hostile) produces a
//! verdict. Malformed and malicious URLs are not distinguished; both are
//! simply rejected.

use once_cell::sync::Lazy;
use regex::Regex;

/// Generic `http(s)` URL shape: hostname, `localhost` or dotted-quad host,
/// optional port, and a whitespace-free path or query.
static GENERIC_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?",
        r"|localhost",
        r"|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("generic URL pattern is valid")
});

/// Substrings that must never appear after the scheme separator.
const SHELL_METACHARACTERS: &[&str] = &[";", "&&", "||", "|", "`", "$(", "<", ">", ">>"];

/// Host/path prefixes (after `http(s)://` and an optional `www.`) that are
/// followed by a fixed-length video id.
const VIDEO_ID_PREFIXES: &[&str] = &[
    "youtube.com/watch?v=",
    "youtube.com/embed/",
    "youtube.com/v/",
    "music.youtube.com/watch?v=",
    "youtu.be/",
];

/// Prefixes for links that carry no fixed-length id: playlists and
/// attribution redirects.
const NO_ID_PREFIXES: &[&str] = &[
    "youtube.com/attribution_link?a=",
    "youtube.com/playlist?list=",
    "music.youtube.com/playlist?list=",
];

const VIDEO_ID_LEN: usize = 11;

/// Bytes allowed to directly follow a video id.
const VIDEO_ID_TERMINATORS: &[u8] = b"&#/?";

/// One accepted YouTube URL shape.
#[derive(Debug, Clone, Copy)]
struct Shape {
    prefix: &'static str,
    /// `Some(n)`: exactly `n` id bytes then end-of-string or a terminator.
    /// `None`: the rest of the string must be query-safe characters.
    id_len: Option<usize>,
}

impl Shape {
    fn matches(&self, rest: &str) -> bool {
        let Some(tail) = strip_prefix_ignore_case(rest, self.prefix) else {
            return false;
        };
        let tail = tail.as_bytes();
        match self.id_len {
            Some(len) => {
                tail.len() >= len
                    && tail[..len].iter().copied().all(is_video_id_byte)
                    && tail
                        .get(len)
                        .is_none_or(|next| VIDEO_ID_TERMINATORS.contains(next))
            }
            None => tail.iter().copied().all(is_query_byte),
        }
    }
}

static YOUTUBE_SHAPES: Lazy<Vec<Shape>> = Lazy::new(|| {
    VIDEO_ID_PREFIXES
        .iter()
        .map(|&prefix| Shape {
            prefix,
            id_len: Some(VIDEO_ID_LEN),
        })
        .chain(NO_ID_PREFIXES.iter().map(|&prefix| Shape {
            prefix,
            id_len: None,
        }))
        .collect()
});

/// What a URL turned out to be, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Invalid,
    Generic,
    YoutubeVideo,
    YoutubePlaylist,
}

impl UrlKind {
    pub fn is_youtube(self) -> bool {
        matches!(self, UrlKind::YoutubeVideo | UrlKind::YoutubePlaylist)
    }
}

/// Basic well-formedness check for `http`/`https` URLs.
pub fn validate_url(url: &str) -> bool {
    GENERIC_URL.is_match(url)
}

/// Accepts only the YouTube URL shapes yt-dlp is allowed to see, after
/// rejecting anything carrying shell metacharacters.
pub fn validate_youtube_url(url: &str) -> bool {
    if contains_shell_metacharacters(url) {
        return false;
    }
    let Some(rest) = strip_scheme(url) else {
        return false;
    };
    let rest = strip_prefix_ignore_case(rest, "www.").unwrap_or(rest);
    YOUTUBE_SHAPES.iter().any(|shape| shape.matches(rest))
}

/// Loose playlist heuristic: any occurrence of `playlist` or `list=`.
pub fn is_playlist(url: &str) -> bool {
    url.contains("playlist") || url.contains("list=")
}

pub fn classify(url: &str) -> UrlKind {
    if validate_youtube_url(url) {
        if is_playlist(url) {
            UrlKind::YoutubePlaylist
        } else {
            UrlKind::YoutubeVideo
        }
    } else if validate_url(url) {
        UrlKind::Generic
    } else {
        UrlKind::Invalid
    }
}

fn contains_shell_metacharacters(url: &str) -> bool {
    match url.split_once("://") {
        Some((_, after)) => SHELL_METACHARACTERS.iter().any(|m| after.contains(m)),
        None => false,
    }
}

fn strip_scheme(url: &str) -> Option<&str> {
    strip_prefix_ignore_case(url, "https://").or_else(|| strip_prefix_ignore_case(url, "http://"))
}

/// ASCII case-insensitive `str::strip_prefix`. Prefixes are ASCII so the
/// split point is always a char boundary when the comparison succeeds.
fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.as_bytes().get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix.as_bytes()) {
        Some(&value[prefix.len()..])
    } else {
        None
    }
}

fn is_video_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_query_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'&' | b'=' | b'%' | b'-')
}
