use std::fs;
use std::path::Path;

use cloudrip_common::error::WordlistError;
use cloudrip_common::wordlist::{WordlistRepository, parse_wordlist};

/// Wordlist stored as a plain text file on disk.
pub struct FileWordlist;

impl WordlistRepository for FileWordlist {
    fn load(&self, path: &Path) -> Result<Vec<String>, WordlistError> {
        let raw = fs::read_to_string(path).map_err(|source| WordlistError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(parse_wordlist(&raw))
    }
}
