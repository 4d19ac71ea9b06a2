#![forbid(unsafe_code)]

//! `utoob` command line: the interactive menu by default, or one-shot
//! subcommands for scripting.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::{self, StdinLock};
use std::path::PathBuf;
use utoob::config::{AppPaths, load_settings, save_settings};
use utoob::downloader::{MediaFormat, SystemRunner};
use utoob::history::HistoryStore;
use utoob::install::install_globally;
use utoob::logging::{init_logging, init_logging_stderr};
use utoob::menu::{Outcome, Session, print_banner};

#[derive(Parser, Debug)]
#[command(author, version, about = "Smart YouTube downloader built on yt-dlp.")]
struct Cli {
    #[arg(
        long = "base-dir",
        value_name = "PATH",
        global = true,
        help = "Directory holding sys_files/ and downloads (default: $UTOOB_HOME or the platform data dir)"
    )]
    base_dir: Option<PathBuf>,
    #[arg(
        short = 'y',
        long = "assume-yes",
        global = true,
        help = "Automatically answer yes to prompts"
    )]
    assume_yes: bool,
    #[arg(short = 'v', long = "verbose", global = true, help = "Debug logging")]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Download a video (or playlist) in the best available quality
    Video { url: String },
    /// Download audio only, converted to MP3
    Audio { url: String },
    /// Enter several URLs and download them one after another
    Batch,
    /// Make `utoob` available on PATH
    Install,
    /// Show the download history, or the entry for one URL
    History {
        url: Option<String>,
        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
    },
    /// Read or change settings in config.json
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ConfigAction {
    Get { key: String },
    Set { key: String, value: String },
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = AppPaths::resolve(cli.base_dir.clone())?;
    paths.prepare()?;
    if let Err(err) = init_logging(&paths.log_file, cli.verbose) {
        init_logging_stderr(cli.verbose);
        tracing::warn!("file logging unavailable: {err:#}");
    }
    tracing::debug!(base = %paths.base.display(), command = ?cli.command, "starting");

    match cli.command {
        None => {
            print_banner();
            open_session(&paths, cli.assume_yes)?.run_menu()
        }
        Some(Command::Video { url }) => download_one(&paths, cli.assume_yes, &url, MediaFormat::Video),
        Some(Command::Audio { url }) => download_one(&paths, cli.assume_yes, &url, MediaFormat::Audio),
        Some(Command::Batch) => {
            open_session(&paths, cli.assume_yes)?.batch_download()?;
            Ok(())
        }
        Some(Command::Install) => {
            install_globally()?;
            Ok(())
        }
        Some(Command::History { url, json }) => {
            let store = HistoryStore::open(&paths.history_db)?;
            println!("{}", render_history(&store, url.as_deref(), json)?);
            Ok(())
        }
        Some(Command::Config { action }) => {
            println!("{}", apply_config(&paths, action)?);
            Ok(())
        }
    }
}

fn open_session(
    paths: &AppPaths,
    assume_yes: bool,
) -> Result<Session<StdinLock<'static>, SystemRunner>> {
    let history = HistoryStore::open(&paths.history_db)?;
    Ok(Session::new(paths.clone(), history, SystemRunner, io::stdin().lock()).assume_yes(assume_yes))
}

fn download_one(paths: &AppPaths, assume_yes: bool, url: &str, format: MediaFormat) -> Result<()> {
    let outcome = open_session(paths, assume_yes)?.download_media(url, format)?;
    match outcome {
        Outcome::Rejected => bail!("Refusing to download {url}"),
        Outcome::Failed => bail!("Download of {url} failed"),
        Outcome::Downloaded | Outcome::Skipped | Outcome::Cancelled => Ok(()),
    }
}

fn render_history(store: &HistoryStore, url: Option<&str>, json: bool) -> Result<String> {
    if let Some(url) = url {
        let Some(entry) = store.check(url)? else {
            return Ok(format!("{url} is not in the download history"));
        };
        if json {
            return serde_json::to_string_pretty(&entry).context("serializing history entry");
        }
        return Ok(format!(
            "Title: {}\nDate: {}\nPath: {}",
            entry.title,
            entry.date_only(),
            entry.file_path.as_deref().unwrap_or("-"),
        ));
    }

    let entries = store.list()?;
    if json {
        return serde_json::to_string_pretty(&entries).context("serializing history");
    }
    if entries.is_empty() {
        return Ok("No downloads recorded yet".to_string());
    }
    Ok(entries
        .iter()
        .map(|entry| format!("{}  {}  {}", entry.date_only(), entry.title, entry.url))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn apply_config(paths: &AppPaths, action: ConfigAction) -> Result<String> {
    let mut settings = load_settings(&paths.config_file)?;
    match action {
        ConfigAction::Get { key } => match settings.get(&key) {
            Some(value) => Ok(value),
            None => bail!("No setting named {key}"),
        },
        ConfigAction::Set { key, value } => {
            settings.set(&key, value.as_str());
            save_settings(&paths.config_file, &settings)?;
            tracing::info!(key = %key, value = %value, "setting updated");
            Ok(format!("{key} = {value}"))
        }
        ConfigAction::Show => {
            serde_json::to_string_pretty(&settings).context("serializing settings")
        }
    }
}
