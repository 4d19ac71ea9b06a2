//! Interactive front end: prompts, the main menu and batch mode.
//!
//! A [`Session`] owns everything one run needs (paths, history, the process
//! runner and the input stream) so the whole flow can be driven from an
//! in-memory reader in tests.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::classify::{UrlKind, classify};
use crate::config::{AppPaths, load_settings};
use crate::downloader::{
    CommandRunner, DownloadError, DownloadPlan, Downloader, MediaFormat, resolve_ytdlp,
};
use crate::history::HistoryStore;

const RULE: &str = "==================================================";

const BANNER: &str = r#"
  _   _ _____ ___   ___  ____
 | | | |_   _/ _ \ / _ \| __ )
 | | | | | || | | | | | |  _ \
 | |_| | | || |_| | |_| | |_) |
  \___/  |_| \___/ \___/|____/
"#;

pub fn print_banner() {
    println!("{BANNER}");
    println!("    Smart YouTube Downloader");
}

/// How a single URL was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Downloaded,
    /// Already in history and the user declined to fetch it again.
    Skipped,
    /// Playlist confirmation declined.
    Cancelled,
    /// Not an acceptable YouTube URL.
    Rejected,
    /// yt-dlp was missing or exited non-zero.
    Failed,
}

pub struct Session<R, C> {
    paths: AppPaths,
    history: HistoryStore,
    runner: C,
    input: R,
    assume_yes: bool,
    ytdlp: Option<PathBuf>,
}

impl<R: BufRead, C: CommandRunner> Session<R, C> {
    pub fn new(paths: AppPaths, history: HistoryStore, runner: C, input: R) -> Self {
        Self {
            paths,
            history,
            runner,
            input,
            assume_yes: false,
            ytdlp: None,
        }
    }

    /// Answer every confirmation with yes.
    pub fn assume_yes(mut self, value: bool) -> Self {
        self.assume_yes = value;
        self
    }

    /// Uses a specific yt-dlp binary instead of resolving one on demand.
    pub fn with_ytdlp(mut self, path: impl Into<PathBuf>) -> Self {
        self.ytdlp = Some(path.into());
        self
    }

    /// Main menu loop. Returns when the user quits or input ends.
    pub fn run_menu(&mut self) -> Result<()> {
        loop {
            println!("\n{RULE}");
            println!("           UTOOB DOWNLOADER MENU");
            println!("{RULE}");
            println!("  1. Download Video    - Best quality video");
            println!("  2. Download Audio    - Extract MP3 audio");
            println!("  3. Batch Download    - Multiple URLs at once");
            println!("  4. Quit              - Exit program");
            println!("{RULE}");

            let Some(choice) = self.prompt("\nYour choice [1-4]: ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.single_download(MediaFormat::Video)?,
                "2" => self.single_download(MediaFormat::Audio)?,
                "3" => {
                    self.batch_download()?;
                }
                "4" => {
                    println!("\nThanks for using utoob!");
                    println!("   Your downloads are in: {}\n", self.download_dir()?.display());
                    return Ok(());
                }
                _ => println!("\nInvalid choice. Please enter 1, 2, 3, or 4."),
            }
        }
    }

    fn single_download(&mut self, format: MediaFormat) -> Result<()> {
        match format {
            MediaFormat::Video => println!("\nVideo Download"),
            MediaFormat::Audio => println!("\nAudio Download"),
        }
        match self.prompt("   Paste YouTube URL: ")? {
            Some(url) if !url.is_empty() => {
                self.download_media(&url, format)?;
            }
            _ => println!("   No URL entered."),
        }
        Ok(())
    }

    /// Collects URLs until `done`, then downloads each in order. Returns the
    /// number of URLs processed.
    pub fn batch_download(&mut self) -> Result<usize> {
        println!("\nBatch Download Mode");
        println!("   Paste multiple YouTube URLs, one per line");
        println!("   Type 'done' when finished\n");

        let mut urls = Vec::new();
        loop {
            let prompt = format!("   URL #{} (or 'done'): ", urls.len() + 1);
            let Some(url) = self.prompt(&prompt)? else {
                break;
            };
            if url.eq_ignore_ascii_case("done") {
                break;
            }
            if url.is_empty() {
                continue;
            }
            if !classify(&url).is_youtube() {
                println!("   Invalid YouTube URL: {url}. Skipping...");
                continue;
            }
            urls.push(url);
            println!("   Added ({} total)", urls.len());
        }

        if urls.is_empty() {
            println!("\n   No URLs entered. Returning to menu...");
            return Ok(0);
        }

        let total = urls.len();
        println!("\nReady to process {total} URL(s)");
        let format = if self.confirm("   Download as audio (MP3)?")? {
            MediaFormat::Audio
        } else {
            MediaFormat::Video
        };

        println!("\n{RULE}");
        for (index, url) in urls.iter().enumerate() {
            let current = index + 1;
            println!("\n[{current}/{total}] Processing URL {current}...");
            let outcome = self.download_media(url, format)?;
            tracing::debug!(url = %url, ?outcome, "batch entry finished");
            if current < total {
                println!("\n{RULE}");
            }
        }
        println!("\nBatch complete! Processed {total} URL(s).");
        Ok(total)
    }

    /// Validates, checks history, handles playlists and runs yt-dlp for one
    /// URL.
    pub fn download_media(&mut self, url: &str, format: MediaFormat) -> Result<Outcome> {
        let kind = classify(url);
        if !kind.is_youtube() {
            println!("Invalid YouTube URL format");
            return Ok(Outcome::Rejected);
        }

        let download_dir = self.download_dir()?;

        if let Some(entry) = self.history.check(url)? {
            println!("\nThis URL was already downloaded:");
            println!("   Title: {}", entry.title);
            println!("   Date: {}", entry.date_only());
            if !self.confirm("\n   Download again anyway?")? {
                println!("   Skipped.");
                return Ok(Outcome::Skipped);
            }
        }

        let playlist = if kind == UrlKind::YoutubePlaylist {
            let info = match self.ytdlp_path() {
                Ok(ytdlp) => Downloader::new(&self.runner, ytdlp).probe_playlist(url),
                Err(err) => return self.report_failure(err),
            };
            if let Some(info) = &info {
                println!("\nPlaylist Detected!");
                println!("   Name: {}", info.title);
                println!("   Videos: {}", info.count);
                println!("   Location: Playlists/{}/", info.title);
                let question = format!("\n   Download all {} videos?", info.count);
                if !self.confirm(&question)? {
                    println!("   Cancelled.");
                    return Ok(Outcome::Cancelled);
                }
            }
            info
        } else {
            None
        };

        let plan = DownloadPlan::new(url, format, &download_dir, playlist.as_ref());
        if playlist.is_some() {
            println!("\n   Using folder: {}", plan.output_dir.display());
        }
        println!("\nStarting download...");
        println!("   Format: {}", format.label());

        let result = match self.ytdlp_path() {
            Ok(ytdlp) => Downloader::new(&self.runner, ytdlp).download(&plan),
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => {
                println!("\nDownload complete!");
                println!("   Saved to: {}/", plan.output_dir.display());
                self.history
                    .add(url, "Downloaded", &download_dir.to_string_lossy())?;
                Ok(Outcome::Downloaded)
            }
            Err(err) => self.report_failure(err),
        }
    }

    fn report_failure(&self, err: DownloadError) -> Result<Outcome> {
        match err {
            DownloadError::Other(err) => Err(err),
            err @ DownloadError::Failed { .. } => {
                eprintln!("\nDownload failed");
                eprintln!("   Error: {err}");
                eprintln!("   Tip: Try updating yt-dlp with: yt-dlp -U");
                Ok(Outcome::Failed)
            }
            err => {
                eprintln!("\nError: {err}");
                Ok(Outcome::Failed)
            }
        }
    }

    /// Resolves yt-dlp on first use and remembers the result.
    fn ytdlp_path(&mut self) -> Result<PathBuf, DownloadError> {
        if let Some(path) = &self.ytdlp {
            return Ok(path.clone());
        }
        let path = resolve_ytdlp(&self.paths.cache_dir, &self.runner)?;
        self.ytdlp = Some(path.clone());
        Ok(path)
    }

    fn download_dir(&self) -> Result<PathBuf> {
        let settings = load_settings(&self.paths.config_file)?;
        Ok(self.paths.download_dir(&settings))
    }

    /// Reads one trimmed line; `None` once input is exhausted.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush().ok();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim().to_string())),
            Err(err) => bail!("Input aborted: {err}"),
        }
    }

    /// `[y/N]` question; only `y`/`yes` count as yes.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        if self.assume_yes {
            println!("{question} [y/N]: y");
            return Ok(true);
        }
        let answer = self.prompt(&format!("{question} [y/N]: "))?;
        Ok(matches!(
            answer.map(|value| value.to_lowercase()).as_deref(),
            Some("y" | "yes")
        ))
    }
}
