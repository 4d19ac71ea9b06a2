//! Download history persisted in SQLite.
//!
//! One row per URL. The `url` column is UNIQUE so re-adding a URL that was
//! already downloaded is a silent no-op, which keeps batch runs simple.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;

/// What we remember about a previous download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    pub download_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl HistoryEntry {
    /// Calendar day of the download (`YYYY-MM-DD` for RFC 3339 dates).
    pub fn date_only(&self) -> &str {
        match self.download_date.char_indices().nth(10) {
            Some((cut, _)) => &self.download_date[..cut],
            None => &self.download_date,
        }
    }
}

/// Wrapper around the SQLite connection holding the `history` table.
#[derive(Debug)]
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    /// Opens (and if necessary creates) the DB and its schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating history directory {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening history DB {}", path.display()))?;
        let store = Self { conn };
        store.ensure_tables()?;
        tracing::debug!(path = %path.display(), "history store ready");
        Ok(store)
    }

    #[cfg(test)]
    fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.ensure_tables()?;
        Ok(store)
    }

    fn ensure_tables(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS history (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    url TEXT UNIQUE,
                    title TEXT,
                    download_date TEXT,
                    file_path TEXT
                );
                "#,
            )
            .context("creating history table")?;
        Ok(())
    }

    /// Looks up a URL; `None` when it was never downloaded.
    pub fn check(&self, url: &str) -> Result<Option<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT url, title, download_date, file_path
            FROM history
            WHERE url = ?1
            "#,
        )?;
        let entry = stmt
            .query_row([url], row_to_entry)
            .optional()
            .with_context(|| format!("querying history for {url}"))?;
        Ok(entry)
    }

    /// Records a finished download stamped with the current local time.
    /// Returns `false` when the URL was already present.
    pub fn add(&self, url: &str, title: &str, file_path: &str) -> Result<bool> {
        let download_date = Local::now().to_rfc3339();
        let inserted = self
            .conn
            .execute(
                r#"
                INSERT INTO history (url, title, download_date, file_path)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(url) DO NOTHING
                "#,
                params![url, title, download_date, file_path],
            )
            .with_context(|| format!("recording {url} in history"))?;
        if inserted == 0 {
            tracing::debug!(url, "history already contains url");
        }
        Ok(inserted > 0)
    }

    /// All entries, most recent first.
    pub fn list(&self) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT url, title, download_date, file_path
            FROM history
            ORDER BY id DESC
            "#,
        )?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(row_to_entry(row)?);
        }
        Ok(entries)
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<HistoryEntry> {
    Ok(HistoryEntry {
        url: row.get("url")?,
        title: row
            .get::<_, Option<String>>("title")?
            .unwrap_or_default(),
        download_date: row
            .get::<_, Option<String>>("download_date")?
            .unwrap_or_default(),
        file_path: row.get("file_path")?,
    })
}
