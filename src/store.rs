use crate::statics;
use indexmap::IndexMap;
use std::{fs, io, path::Path};
use thiserror::Error;

// Keys additionally reject the separator; values only reject the line
// terminators, so a value containing `=` is legal and round-trips.
const KEY_RESERVED: &[char] = &['=', '\r', '\n'];
const VALUE_RESERVED: &[char] = &['\r', '\n'];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("key or value contains at least one of the invalid characters '=\\r\\n'")]
    InvalidFormat,
    #[error("line {line}: bad line format: missing '='")]
    Parse { line: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// In-memory string settings, persisted as one `key=value` per line.
/// Entries keep insertion order so repeated saves produce stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsStore {
    entries: IndexMap<String, String>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Inserts or overwrites the mapping for `key`. The new value is visible
    /// to `get` immediately; nothing touches disk until [`Self::save_path`].
    pub fn put(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SettingsError> {
        let key = key.into();
        let value = value.into();
        if key.contains(KEY_RESERVED) || value.contains(VALUE_RESERVED) {
            return Err(SettingsError::InvalidFormat);
        }

        self.entries.insert(key, value);
        Ok(())
    }

    /// Removes `key`, returning its value. Preserves the order of the
    /// remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads `path` and merges its entries over the current contents.
    /// A missing file means "no data yet" and succeeds with the store
    /// unchanged. On a parse error the store is left exactly as it was:
    /// the file is parsed into a scratch map and merged only on success.
    pub fn load_path(&mut self, path: &Path) -> Result<(), SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(SettingsError::Io(e)),
        };

        let parsed = parse_entries(&text)?;
        self.entries.extend(parsed);
        Ok(())
    }

    /// Serializes the store and truncate-writes it to `path`, creating the
    /// containing directory first. Not an atomic replace; a crash mid-write
    /// can leave a partial file.
    pub fn save_path(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_text())?;
        Ok(())
    }

    /// The exact text [`Self::save_path`] writes: `key=value` + LF per entry.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push_str(statics::NL_LF);
        }
        out
    }
}

/// Splits each non-empty line at its first `=`; keys and values are trimmed.
/// Both LF and CRLF terminators are accepted (lines of any length).
fn parse_entries(text: &str) -> Result<IndexMap<String, String>, SettingsError> {
    let mut parsed = IndexMap::new();

    for (i, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(SettingsError::Parse { line: i + 1 });
        };
        parsed.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(parsed)
}
