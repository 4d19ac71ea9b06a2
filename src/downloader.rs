//! Everything that talks to yt-dlp.
//!
//! Process execution goes through [`CommandRunner`] so the planning and
//! parsing logic can be exercised without spawning anything. The real
//! implementation is [`SystemRunner`].

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::classify::validate_youtube_url;
use crate::sanitize::sanitize_filename;

/// Name of the cached binary and of the program looked up on `PATH`.
#[cfg(windows)]
pub const YTDLP_BINARY: &str = "yt-dlp.exe";
#[cfg(not(windows))]
pub const YTDLP_BINARY: &str = "yt-dlp";

/// Release asset runnable on this platform.
#[cfg(windows)]
pub const YTDLP_RELEASE_URL: &str =
    "https://github.com/yt-dlp/yt-dlp/releases/latest/download/yt-dlp.exe";
#[cfg(not(windows))]
pub const YTDLP_RELEASE_URL: &str =
    "https://github.com/yt-dlp/yt-dlp/releases/latest/download/yt-dlp";

pub const PLAYLISTS_SUBDIR: &str = "Playlists";
const UNKNOWN_PLAYLIST: &str = "Unknown Playlist";
const SINGLE_TEMPLATE: &str = "%(title)s.%(ext)s";
const PLAYLIST_TEMPLATE: &str = "%(playlist_index)s - %(title)s.%(ext)s";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid YouTube URL: {0}")]
    InvalidUrl(String),
    #[error("yt-dlp could not be found or installed: {0}")]
    Unavailable(String),
    #[error("yt-dlp exited with {}", describe_exit(.code))]
    Failed { code: Option<i32> },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Result of running an external program to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Narrow port over process execution.
pub trait CommandRunner {
    /// Runs `program` with captured stdout/stderr.
    fn run(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput>;

    /// Runs `program` attached to the terminal so the user sees progress.
    /// Captured output is empty.
    fn run_attached(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        self.run(program, args)
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }

    fn run_attached(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        (**self).run_attached(program, args)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("running {}", program.display()))?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_attached(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("running {}", program.display()))?;
        Ok(CommandOutput {
            code: status.code(),
            ..CommandOutput::default()
        })
    }
}

/// Finds a usable yt-dlp: the cached copy, then one on `PATH`, and finally
/// a fresh download from the GitHub release into the cache.
pub fn resolve_ytdlp(
    cache_dir: &Path,
    runner: &impl CommandRunner,
) -> Result<PathBuf, DownloadError> {
    let cached = cache_dir.join(YTDLP_BINARY);
    if cached.is_file() {
        tracing::debug!(path = %cached.display(), "using cached yt-dlp");
        return Ok(cached);
    }

    let on_path = PathBuf::from(YTDLP_BINARY);
    match runner.run(&on_path, &[OsString::from("--version")]) {
        Ok(output) if output.success() => {
            tracing::debug!(version = output.stdout.trim(), "using yt-dlp from PATH");
            return Ok(on_path);
        }
        Ok(output) => tracing::debug!(code = ?output.code, "yt-dlp on PATH is unusable"),
        Err(err) => tracing::debug!("yt-dlp not on PATH: {err:#}"),
    }

    println!("\nyt-dlp not found in cache. Downloading latest version...");
    fetch_ytdlp(YTDLP_RELEASE_URL, &cached)
        .map_err(|err| DownloadError::Unavailable(format!("{err:#}")))?;
    println!("Installed yt-dlp to: {}", cached.display());
    Ok(cached)
}

/// Streams the release binary into a temp file next to `target`, marks it
/// executable, then moves it into place.
fn fetch_ytdlp(url: &str, target: &Path) -> Result<()> {
    let dir = target
        .parent()
        .with_context(|| format!("{} has no parent directory", target.display()))?;
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    tracing::info!(url, "downloading yt-dlp");
    let response = ureq::get(url)
        .call()
        .with_context(|| format!("requesting {url}"))?;
    let mut reader = response.into_reader();
    let mut staged =
        NamedTempFile::new_in(dir).with_context(|| format!("staging in {}", dir.display()))?;
    io::copy(&mut reader, &mut staged).context("writing yt-dlp binary")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(staged.path(), fs::Permissions::from_mode(0o755))
            .context("marking yt-dlp executable")?;
    }

    staged
        .persist(target)
        .with_context(|| format!("moving yt-dlp to {}", target.display()))?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    /// Best available video.
    Video,
    /// Audio extracted to MP3.
    Audio,
}

impl MediaFormat {
    pub fn label(self) -> &'static str {
        match self {
            MediaFormat::Video => "Best quality video",
            MediaFormat::Audio => "MP3 (audio only)",
        }
    }
}

/// Playlist summary from a flat listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistInfo {
    pub count: usize,
    /// Already passed through [`sanitize_filename`].
    pub title: String,
}

/// First line of `--flat-playlist --dump-json` output.
#[derive(Debug, Deserialize)]
struct FlatEntry {
    playlist_title: Option<String>,
}

/// Fully resolved yt-dlp invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    pub url: String,
    pub format: MediaFormat,
    pub output_dir: PathBuf,
    pub output_template: PathBuf,
}

impl DownloadPlan {
    /// Builds the plan for `url`. Playlists get their own folder under
    /// `Playlists/` named after the sanitized playlist title.
    pub fn new(
        url: &str,
        format: MediaFormat,
        download_dir: &Path,
        playlist: Option<&PlaylistInfo>,
    ) -> Self {
        let (output_dir, template) = match playlist {
            Some(info) => (
                download_dir
                    .join(PLAYLISTS_SUBDIR)
                    .join(playlist_folder_name(&info.title)),
                PLAYLIST_TEMPLATE,
            ),
            None => (download_dir.to_path_buf(), SINGLE_TEMPLATE),
        };
        Self {
            url: url.to_owned(),
            format,
            output_template: output_dir.join(template),
            output_dir,
        }
    }

    pub fn args(&self) -> Vec<OsString> {
        let mut args = vec![
            OsString::from(&self.url),
            OsString::from("-o"),
            self.output_template.clone().into_os_string(),
        ];
        if self.format == MediaFormat::Audio {
            args.extend(["-x", "--audio-format", "mp3"].map(OsString::from));
        }
        args
    }
}

/// Sanitized folder name for a playlist. Names that would resolve to the
/// `Playlists` directory itself or its parent fall back to the placeholder.
fn playlist_folder_name(title: &str) -> String {
    let name = sanitize_filename(title);
    match name.trim() {
        "" | "." | ".." => UNKNOWN_PLAYLIST.to_string(),
        _ => name,
    }
}

/// yt-dlp bound to a concrete binary and runner.
pub struct Downloader<R> {
    runner: R,
    ytdlp: PathBuf,
}

impl<R: CommandRunner> Downloader<R> {
    pub fn new(runner: R, ytdlp: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            ytdlp: ytdlp.into(),
        }
    }

    /// Counts playlist entries and reads the playlist title. Any failure
    /// (invalid URL, yt-dlp error, unparsable output) yields `None`.
    pub fn probe_playlist(&self, url: &str) -> Option<PlaylistInfo> {
        if !validate_youtube_url(url) {
            return None;
        }
        let args = ["--flat-playlist", "--dump-json", url].map(OsString::from);
        let output = match self.runner.run(&self.ytdlp, &args) {
            Ok(output) if output.success() => output,
            Ok(output) => {
                tracing::warn!(url, code = ?output.code, "playlist listing failed");
                return None;
            }
            Err(err) => {
                tracing::warn!(url, "playlist listing failed: {err:#}");
                return None;
            }
        };
        parse_flat_playlist(&output.stdout)
    }

    /// Runs the plan. A non-zero exit is reported, never retried.
    pub fn download(&self, plan: &DownloadPlan) -> Result<(), DownloadError> {
        if !validate_youtube_url(&plan.url) {
            return Err(DownloadError::InvalidUrl(plan.url.clone()));
        }
        fs::create_dir_all(&plan.output_dir)
            .with_context(|| format!("creating {}", plan.output_dir.display()))?;

        let args = plan.args();
        tracing::info!(
            url = %plan.url,
            command = %format_command(&self.ytdlp, &args),
            "starting download"
        );
        let output = self.runner.run_attached(&self.ytdlp, &args)?;
        if output.success() {
            Ok(())
        } else {
            tracing::warn!(url = %plan.url, code = ?output.code, "download failed");
            Err(DownloadError::Failed { code: output.code })
        }
    }
}

fn parse_flat_playlist(stdout: &str) -> Option<PlaylistInfo> {
    let lines: Vec<&str> = stdout.trim().split('\n').collect();
    let first = lines.first()?.trim();
    if first.is_empty() {
        return None;
    }
    let entry: FlatEntry = match serde_json::from_str(first) {
        Ok(entry) => entry,
        Err(err) => {
            tracing::warn!("could not parse playlist listing: {err}");
            return None;
        }
    };
    let title = entry
        .playlist_title
        .unwrap_or_else(|| UNKNOWN_PLAYLIST.to_string());
    Some(PlaylistInfo {
        count: lines.len(),
        title: playlist_folder_name(&title),
    })
}

fn format_command(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use tempfile::tempdir;

    pub(crate) const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    pub(crate) const PLAYLIST_URL: &str = "https://www.youtube.com/playlist?list=PL123";

    /// Replays canned outputs and records every invocation.
    #[derive(Default)]
    pub(crate) struct FakeRunner {
        pub(crate) responses: RefCell<VecDeque<Result<CommandOutput>>>,
        pub(crate) calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
    }

    impl FakeRunner {
        pub(crate) fn with(responses: Vec<CommandOutput>) -> Self {
            Self {
                responses: RefCell::new(responses.into_iter().map(Ok).collect()),
                calls: RefCell::default(),
            }
        }

        pub(crate) fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
            self.calls.borrow_mut().push((
                program.to_path_buf(),
                args.iter()
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect(),
            ));
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(ok("")))
        }
    }

    pub(crate) fn ok(stdout: &str) -> CommandOutput {
        CommandOutput {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub(crate) fn exit(code: i32) -> CommandOutput {
        CommandOutput {
            code: Some(code),
            ..CommandOutput::default()
        }
    }

    #[test]
    fn plan_for_single_video_uses_download_dir() {
        let plan = DownloadPlan::new(VIDEO_URL, MediaFormat::Video, Path::new("/dl"), None);
        assert_eq!(plan.output_dir, PathBuf::from("/dl"));
        let args: Vec<_> = plan.args().into_iter().map(|a| a.into_string().unwrap()).collect();
        assert_eq!(args, vec![VIDEO_URL, "-o", "/dl/%(title)s.%(ext)s"]);
    }

    #[test]
    fn plan_for_audio_adds_extraction_flags() {
        let plan = DownloadPlan::new(VIDEO_URL, MediaFormat::Audio, Path::new("/dl"), None);
        let args: Vec<_> = plan.args().into_iter().map(|a| a.into_string().unwrap()).collect();
        assert_eq!(&args[3..], ["-x", "--audio-format", "mp3"]);
    }

    #[test]
    fn plan_for_playlist_uses_sanitized_folder() {
        let info = PlaylistInfo {
            count: 3,
            title: "../Mix: 2024".into(),
        };
        let plan = DownloadPlan::new(PLAYLIST_URL, MediaFormat::Video, Path::new("/dl"), Some(&info));
        assert_eq!(plan.output_dir, PathBuf::from("/dl/Playlists/.._Mix_ 2024"));
        assert_eq!(
            plan.output_template,
            PathBuf::from("/dl/Playlists/.._Mix_ 2024/%(playlist_index)s - %(title)s.%(ext)s")
        );
    }

    #[test]
    fn probe_playlist_counts_lines_and_sanitizes_title() {
        let stdout = concat!(
            r#"{"id":"a","playlist_title":"Road/Trip: Mix"}"#,
            "\n",
            r#"{"id":"b","playlist_title":"Road/Trip: Mix"}"#,
            "\n",
            r#"{"id":"c"}"#,
            "\n"
        );
        let runner = FakeRunner::with(vec![ok(stdout)]);
        let downloader = Downloader::new(&runner, "/bin/yt-dlp");
        let info = downloader.probe_playlist(PLAYLIST_URL).expect("info");
        assert_eq!(info.count, 3);
        assert_eq!(info.title, "Road_Trip_ Mix");

        let calls = runner.calls();
        assert_eq!(calls[0].0, PathBuf::from("/bin/yt-dlp"));
        assert_eq!(calls[0].1, vec!["--flat-playlist", "--dump-json", PLAYLIST_URL]);
    }

    #[test]
    fn plan_never_targets_playlists_dir_or_its_parent() {
        for title in ["..", ".", "", " .. "] {
            let info = PlaylistInfo {
                count: 1,
                title: title.into(),
            };
            let plan = DownloadPlan::new(PLAYLIST_URL, MediaFormat::Video, Path::new("/dl"), Some(&info));
            assert_eq!(plan.output_dir, Path::new("/dl/Playlists").join(UNKNOWN_PLAYLIST));
        }
    }

    #[test]
    fn probe_playlist_replaces_dot_titles() {
        let runner = FakeRunner::with(vec![ok("{\"playlist_title\":\"..\"}\n")]);
        let info = Downloader::new(&runner, "yt-dlp")
            .probe_playlist(PLAYLIST_URL)
            .expect("info");
        assert_eq!(info.title, UNKNOWN_PLAYLIST);
    }

    #[test]
    fn probe_playlist_defaults_missing_title() {
        let runner = FakeRunner::with(vec![ok("{\"id\":\"a\"}\n")]);
        let info = Downloader::new(&runner, "yt-dlp")
            .probe_playlist(PLAYLIST_URL)
            .expect("info");
        assert_eq!(info, PlaylistInfo { count: 1, title: UNKNOWN_PLAYLIST.into() });
    }

    #[test]
    fn probe_playlist_returns_none_on_failure_paths() {
        let runner = FakeRunner::with(vec![exit(1), ok(""), ok("not json\n")]);
        let downloader = Downloader::new(&runner, "yt-dlp");
        assert!(downloader.probe_playlist(PLAYLIST_URL).is_none());
        assert!(downloader.probe_playlist(PLAYLIST_URL).is_none());
        assert!(downloader.probe_playlist(PLAYLIST_URL).is_none());
        assert_eq!(runner.calls().len(), 3);
    }

    #[test]
    fn probe_playlist_skips_invalid_urls_without_running() {
        let runner = FakeRunner::default();
        let downloader = Downloader::new(&runner, "yt-dlp");
        assert!(downloader.probe_playlist("https://example.com/playlist").is_none());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn download_reports_nonzero_exit() -> Result<()> {
        let dir = tempdir()?;
        let runner = FakeRunner::with(vec![exit(2)]);
        let downloader = Downloader::new(&runner, "yt-dlp");
        let plan = DownloadPlan::new(VIDEO_URL, MediaFormat::Video, dir.path(), None);
        let err = downloader.download(&plan).unwrap_err();
        assert!(matches!(err, DownloadError::Failed { code: Some(2) }));
        assert_eq!(err.to_string(), "yt-dlp exited with status 2");
        Ok(())
    }

    #[test]
    fn download_creates_output_dir_and_passes_plan_args() -> Result<()> {
        let dir = tempdir()?;
        let runner = FakeRunner::with(vec![ok("")]);
        let downloader = Downloader::new(&runner, "yt-dlp");
        let info = PlaylistInfo { count: 2, title: "Mix".into() };
        let plan = DownloadPlan::new(PLAYLIST_URL, MediaFormat::Audio, dir.path(), Some(&info));
        downloader.download(&plan)?;
        assert!(dir.path().join("Playlists").join("Mix").is_dir());
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.last().map(String::as_str), Some("mp3"));
        Ok(())
    }

    #[test]
    fn download_refuses_invalid_urls() {
        let runner = FakeRunner::default();
        let downloader = Downloader::new(&runner, "yt-dlp");
        let plan = DownloadPlan::new(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ;rm -rf /",
            MediaFormat::Video,
            Path::new("/nonexistent"),
            None,
        );
        assert!(matches!(
            downloader.download(&plan),
            Err(DownloadError::InvalidUrl(_))
        ));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn resolve_prefers_cached_binary() -> Result<()> {
        let dir = tempdir()?;
        let cached = dir.path().join(YTDLP_BINARY);
        fs::write(&cached, "#!/bin/sh\n")?;
        let runner = FakeRunner::default();
        assert_eq!(resolve_ytdlp(dir.path(), &runner)?, cached);
        assert!(runner.calls().is_empty());
        Ok(())
    }

    #[test]
    fn resolve_falls_back_to_path_binary() -> Result<()> {
        let dir = tempdir()?;
        let runner = FakeRunner::with(vec![ok("2024.01.01\n")]);
        assert_eq!(resolve_ytdlp(dir.path(), &runner)?, PathBuf::from(YTDLP_BINARY));
        assert_eq!(runner.calls()[0].1, vec!["--version"]);
        Ok(())
    }

    #[test]
    fn format_command_joins_program_and_args() {
        let args = ["-o", "out dir/x"].map(OsString::from);
        assert_eq!(format_command(Path::new("yt-dlp"), &args), "yt-dlp -o out dir/x");
    }

    #[cfg(unix)]
    fn install_ytdlp_stub(dir: &Path) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let script_path = dir.join("yt-dlp");
        let script = r#"#!/usr/bin/env bash
set -euo pipefail
if [[ " $* " == *" --flat-playlist "* ]]; then
cat <<'JSON'
{"id":"one","playlist_title":"Stub Playlist"}
{"id":"two","playlist_title":"Stub Playlist"}
JSON
exit 0
fi
if [[ " $* " == *"fail"* ]]; then
echo "boom" >&2
exit 3
fi
exit 0
"#;
        fs::write(&script_path, script)?;
        let mut perms = fs::metadata(&script_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms)?;
        Ok(script_path)
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_drives_stub_ytdlp() -> Result<()> {
        let temp = tempdir()?;
        let stub = install_ytdlp_stub(temp.path())?;
        let downloader = Downloader::new(SystemRunner, &stub);

        let info = downloader.probe_playlist(PLAYLIST_URL).expect("playlist info");
        assert_eq!(info, PlaylistInfo { count: 2, title: "Stub Playlist".into() });

        let output = SystemRunner.run(&stub, &[OsString::from("fail")])?;
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stderr.trim(), "boom");

        let plan = DownloadPlan::new(VIDEO_URL, MediaFormat::Audio, &temp.path().join("ok"), None);
        downloader.download(&plan)?;
        assert!(plan.output_dir.is_dir());

        let plan = DownloadPlan::new(VIDEO_URL, MediaFormat::Video, &temp.path().join("fail"), None);
        assert!(matches!(
            downloader.download(&plan),
            Err(DownloadError::Failed { code: Some(3) })
        ));
        Ok(())
    }

    /// Answers a single HTTP request with `status` and `body`.
    #[cfg(unix)]
    fn serve_once(status: &'static str, body: &'static [u8]) -> Result<String> {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        std::thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        });
        Ok(format!("http://{addr}/yt-dlp"))
    }

    #[cfg(unix)]
    #[test]
    fn fetch_installs_executable_release() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir()?;
        let target = temp.path().join("cache").join(YTDLP_BINARY);
        let url = serve_once("200 OK", b"#!/bin/sh\necho stub\n")?;
        fetch_ytdlp(&url, &target)?;

        assert_eq!(fs::read(&target)?, b"#!/bin/sh\necho stub\n");
        assert_eq!(fs::metadata(&target)?.permissions().mode() & 0o777, 0o755);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn fetch_error_status_leaves_no_binary() -> Result<()> {
        let temp = tempdir()?;
        let target = temp.path().join(YTDLP_BINARY);
        let url = serve_once("404 Not Found", b"missing")?;
        assert!(fetch_ytdlp(&url, &target).is_err());
        assert!(!target.exists());
        assert_eq!(fs::read_dir(temp.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn release_asset_matches_cached_binary_name() {
        assert!(YTDLP_RELEASE_URL.ends_with(&format!("/{YTDLP_BINARY}")));
    }
}
