use mesh_fs::io;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.xml");

    io::write_atomic(&path, b"<configuration/>\n").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "<configuration/>\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.xml");
    fs::write(&path, "original").unwrap();

    io::write_atomic(&path, b"updated").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_atomic_leaves_no_staging_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.xml");

    io::write_text(&path, "content").unwrap();

    assert!(!io::temp_path(&path).exists(), "staging file should be renamed away");
}

#[test]
fn test_write_atomic_truncates_stale_staging_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.xml");
    fs::write(io::temp_path(&path), "leftover from an interrupted save, much longer").unwrap();

    io::write_text(&path, "short").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "short");
}

#[test]
fn test_write_text_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a").join("b").join("config.xml");

    io::write_text(&path, "deep content").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "deep content");
}

#[test]
fn test_read_text_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.xml");
    fs::write(&path, "hello").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "hello");
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.xml");

    let err = io::read_text(&path).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.path(), path.as_path());
}
