//! File-backed [`KeyValueStore`]: one JSON document per key under a root directory.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tribudget_core::{
    storage::{BookRepository, KeyValueStore},
    CoreError,
};

const ENTRY_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// On-disk wrapper that remembers the original key, since file names are sanitised.
#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    key: String,
    value: String,
    written_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(key), ENTRY_EXTENSION))
    }

    fn read_entry(&self, path: &Path) -> Result<Option<Entry>, CoreError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let entry = serde_json::from_str(&data)?;
        Ok(Some(entry))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.entry_path(key);
        match self.read_entry(&path)? {
            Some(entry) if entry.key == key => Ok(Some(entry.value)),
            Some(entry) => Err(CoreError::Storage(format!(
                "`{}` holds key `{}`, not `{}`",
                path.display(),
                entry.key,
                key
            ))),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.entry_path(key);
        let entry = Entry {
            key: key.to_string(),
            value: value.to_string(),
            written_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&entry)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        debug!(key, path = %path.display(), "entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            if let Some(entry) = self.read_entry(&path)? {
                keys.push(entry.key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Book repository persisted under `root`.
pub fn open_book_repository(root: PathBuf) -> Result<BookRepository<JsonFileStore>, CoreError> {
    Ok(BookRepository::new(JsonFileStore::new(root)?))
}

fn canonical_name(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "entry".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(format!("{ENTRY_EXTENSION}.{TMP_SUFFIX}"));
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
