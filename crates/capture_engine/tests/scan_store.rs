use std::collections::HashSet;
use std::fs;

use capture_engine::{content_hash, scan_existing_hashes, ImageStore};
use tempfile::TempDir;

#[test]
fn scan_creates_a_missing_directory() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("images");
    assert!(!dir.exists());

    let hashes = scan_existing_hashes(&dir).unwrap();
    assert!(dir.is_dir());
    assert!(hashes.is_empty());
}

#[test]
fn scan_seeds_only_hash_shaped_names() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("0123456789abcdef0123456789abcdef.jpg"),
        b"x",
    )
    .unwrap();
    fs::write(temp.path().join("notahash.png"), b"y").unwrap();
    fs::write(temp.path().join("AABB456789ABCDEF0123456789ABCDEF.png"), b"z").unwrap();

    let hashes = scan_existing_hashes(temp.path()).unwrap();
    assert_eq!(
        hashes,
        HashSet::from([
            "0123456789abcdef0123456789abcdef".to_string(),
            "aabb456789abcdef0123456789abcdef".to_string(),
        ])
    );
}

#[test]
fn scan_fails_when_the_path_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, b"x").unwrap();

    let result = scan_existing_hashes(&file_path);
    assert!(result.is_err());
}

#[test]
fn store_writes_hash_named_jpg_and_records_the_hash() {
    let temp = TempDir::new().unwrap();
    let mut store = ImageStore::new(temp.path().to_path_buf(), HashSet::new());

    let bytes = b"image bytes".to_vec();
    let hash = content_hash(&bytes);
    assert!(!store.contains(&hash));

    let path = store.save(&hash, &bytes).unwrap();
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), format!("{hash}.jpg"));
    assert_eq!(fs::read(&path).unwrap(), bytes);
    assert!(store.contains(&hash));
    assert_eq!(store.len(), 1);
}

#[test]
fn store_honors_seeds_from_a_previous_run() {
    let temp = TempDir::new().unwrap();
    let bytes = b"from an earlier run".to_vec();
    let hash = content_hash(&bytes);
    fs::write(temp.path().join(format!("{hash}.jpg")), &bytes).unwrap();

    let seeds = scan_existing_hashes(temp.path()).unwrap();
    let store = ImageStore::new(temp.path().to_path_buf(), seeds);

    assert!(store.contains(&hash));
}

#[test]
fn store_save_fails_cleanly_in_an_unwritable_location() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone");

    let mut store = ImageStore::new(missing.clone(), HashSet::new());
    let bytes = b"x".to_vec();
    let hash = content_hash(&bytes);

    let result = store.save(&hash, &bytes);
    assert!(result.is_err());
    assert!(!store.contains(&hash));
    assert!(!missing.join(format!("{hash}.jpg")).exists());
}
