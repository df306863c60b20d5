//! Filesystem-backed JSON persistence for the book and its backups.
//!
//! Writes go through a temp file followed by a rename so a failed save never
//! leaves partial state; saving over an existing book first copies it into
//! the backup directory with a bounded retention count.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};

use easybudget_core::{
    storage::{BookBackupInfo, BookStorage, LoadOutcome},
    CoreError,
};
use easybudget_domain::Book;

const BOOK_FILE_STEM: &str = "easybudget";
const FILE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed JSON persistence for one book.
#[derive(Debug, Clone)]
pub struct JsonBookStorage {
    data_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonBookStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        let backups_dir = data_dir.join("backups");
        Self::with_retention(data_dir, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        data_dir: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            data_dir,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn book_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", BOOK_FILE_STEM, FILE_EXTENSION))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn write_backup_file(
        &self,
        book: &Book,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError> {
        fs::create_dir_all(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", BOOK_FILE_STEM, timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let file_name = format!("{}.{}", stem, FILE_EXTENSION);
        let path = self.backups_dir.join(&file_name);
        write_atomic(&path, &serialize_book(book)?)?;
        self.prune_backups()?;
        Ok(BookBackupInfo {
            id: file_name,
            created_at: timestamp,
            path,
        })
    }

    fn backup_existing_file(&self, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!("{}_{}.{}", BOOK_FILE_STEM, timestamp, FILE_EXTENSION);
        fs::copy(path, self.backups_dir.join(file_name))?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        let mut entries = self.list_backups()?;
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }

    /// Moves an unreadable book file aside so fresh initialization never
    /// destroys user data.
    fn quarantine_corrupt_file(&self, path: &Path) -> Result<PathBuf, CoreError> {
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let quarantined = self.data_dir.join(format!(
            "{}.{}.corrupt-{}",
            BOOK_FILE_STEM, FILE_EXTENSION, timestamp
        ));
        fs::rename(path, &quarantined)?;
        Ok(quarantined)
    }
}

impl BookStorage for JsonBookStorage {
    fn save_book(&self, book: &Book) -> Result<(), CoreError> {
        let path = self.book_path();
        self.backup_existing_file(&path)?;
        save_book_to_path(book, &path)
    }

    fn load_book(&self) -> Result<Book, CoreError> {
        load_book_from_path(&self.book_path())
    }

    fn load_or_init(&self) -> Result<(Book, LoadOutcome), CoreError> {
        let path = self.book_path();
        if !path.exists() {
            return Ok((Book::new(), LoadOutcome::Initialized));
        }
        let data = fs::read_to_string(&path)?;
        match serde_json::from_str(&data) {
            Ok(book) => Ok((book, LoadOutcome::Loaded)),
            Err(_) => {
                let quarantined = self.quarantine_corrupt_file(&path)?;
                Ok((Book::new(), LoadOutcome::Quarantined(quarantined)))
            }
        }
    }

    fn backup_book(&self, book: &Book, note: Option<&str>) -> Result<BookBackupInfo, CoreError> {
        self.write_backup_file(book, note)
    }

    fn list_backups(&self) -> Result<Vec<BookBackupInfo>, CoreError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BookBackupInfo {
                    id: file_name.to_string(),
                    created_at: file_name.to_string(),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        Ok(entries)
    }

    fn restore_backup(&self, backup: &BookBackupInfo) -> Result<Book, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let target = self.book_path();
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&backup.path, &target)?;
        load_book_from_path(&target)
    }
}

/// Saves a book to an arbitrary path on disk.
pub fn save_book_to_path(book: &Book, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_book(book)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a book from the provided filesystem path.
pub fn load_book_from_path(path: &Path) -> Result<Book, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", FILE_EXTENSION))?;
    let mut segments = trimmed.split('_').collect::<Vec<_>>();
    if segments.len() < 2 {
        return None;
    }
    let time = segments.pop()?;
    let date = segments.pop()?;
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    let raw = format!("{}{}", date, time);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_book(book: &Book) -> Result<String, CoreError> {
    serde_json::to_string_pretty(book).map_err(|err| CoreError::Serde(err.to_string()))
}
