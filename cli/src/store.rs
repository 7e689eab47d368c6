//! Directory-backed template store: one pretty-printed `<key>.json` per
//! template.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use designer::doc::TemplateDocument;
use designer::store::{StoreError, TemplateStore, validate_key};

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

/// Write `contents` to a sibling `.tmp` file, then rename it over `path`.
/// The temp file is removed again when either step fails.
fn replace_file(path: &Path, contents: &str) -> io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    let result = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        if let Err(err) = fs::remove_file(&tmp) {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %tmp.display(), error = %err, "could not remove temp file");
            }
        }
    }
    result
}

impl TemplateStore for FileStore {
    fn create(&mut self, key: &str, doc: &TemplateDocument) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let json = doc.to_json_pretty()?;
        fs::create_dir_all(&self.dir)?;
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(key.to_owned()));
            }
            Err(err) => return Err(err.into()),
        };
        writeln!(file, "{json}")?;
        tracing::debug!(path = %path.display(), "template created");
        Ok(())
    }

    fn read(&self, key: &str) -> Result<TemplateDocument, StoreError> {
        let path = self.path_for(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound(key.to_owned())),
            Err(err) => return Err(err.into()),
        };
        Ok(TemplateDocument::from_json(&raw)?)
    }

    /// Replaces the file through [`replace_file`], so a failed write never
    /// leaves a truncated template behind.
    fn update(&mut self, key: &str, doc: &TemplateDocument) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(key.to_owned()));
        }
        replace_file(&path, &format!("{}\n", doc.to_json_pretty()?))?;
        tracing::debug!(path = %path.display(), "template updated");
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_owned());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
