use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("save directory missing or not usable: {0}")]
    SaveDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Seed the dedup index from filenames already in the save directory.
///
/// Creates the directory if absent. Names shaped `<32 hex>.<ext>` yield
/// their hex token (lowercased, so mixed-case files still match the
/// lowercase digests written later); anything else is ignored and never
/// touched. Runs once per capture, before the worker starts.
pub fn scan_existing_hashes(dir: &Path) -> Result<HashSet<String>, ScanError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ScanError::SaveDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ScanError::SaveDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| ScanError::SaveDir(e.to_string()))?;
    }

    let mut hashes = HashSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(token) = name.to_str().and_then(hash_token_from_filename) {
            hashes.insert(token);
        }
    }
    Ok(hashes)
}

/// Extract the hash token from a filename of the shape `<32 hex>.<ext>`.
///
/// The extension may be anything non-empty; the stem must be exactly
/// 32 ASCII hex characters.
pub fn hash_token_from_filename(name: &str) -> Option<String> {
    let (stem, ext) = name.split_once('.')?;
    if stem.len() != 32 || ext.is_empty() {
        return None;
    }
    if !stem.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(stem.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::hash_token_from_filename;

    #[test]
    fn matches_32_hex_stem_with_any_extension() {
        let token = hash_token_from_filename("0123456789abcdef0123456789abcdef.png");
        assert_eq!(
            token.as_deref(),
            Some("0123456789abcdef0123456789abcdef")
        );
    }

    #[test]
    fn uppercase_stems_are_lowercased() {
        let token = hash_token_from_filename("0123456789ABCDEF0123456789ABCDEF.jpg");
        assert_eq!(
            token.as_deref(),
            Some("0123456789abcdef0123456789abcdef")
        );
    }

    #[test]
    fn rejects_wrong_length_non_hex_and_missing_extension() {
        assert_eq!(hash_token_from_filename("notahash.png"), None);
        assert_eq!(hash_token_from_filename("0123456789abcdef.jpg"), None);
        assert_eq!(
            hash_token_from_filename("z123456789abcdef0123456789abcdef.jpg"),
            None
        );
        assert_eq!(
            hash_token_from_filename("0123456789abcdef0123456789abcdef"),
            None
        );
        assert_eq!(
            hash_token_from_filename("0123456789abcdef0123456789abcdef."),
            None
        );
    }
}
