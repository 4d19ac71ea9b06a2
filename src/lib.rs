#![forbid(unsafe_code)]

//! Library half of the `utoob` YouTube downloader.
//!
//! URL classification and filename sanitization are pure functions; the rest
//! wraps yt-dlp, the SQLite history and the on-disk settings so the binary
//! stays a thin clap front end.

pub mod classify;
pub mod config;
pub mod downloader;
pub mod history;
pub mod install;
pub mod logging;
pub mod menu;
pub mod sanitize;
