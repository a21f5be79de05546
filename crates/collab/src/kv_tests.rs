use super::*;
use tempfile::tempdir;

#[test]
fn round_trip_write_then_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ckpt.er.er");
    let kv = JsonKvStore::new();

    kv.write_file(&path, &[("STATE", 2)]).unwrap();
    let entries = kv.read_file(&path);
    assert_eq!(entries, vec![("STATE".to_string(), 2)]);
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.er");
    let kv = JsonKvStore::new();
    assert!(kv.read_file(&path).is_empty());
}

#[test]
fn malformed_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.er");
    std::fs::write(&path, b"not json").unwrap();
    let kv = JsonKvStore::new();
    assert!(kv.read_file(&path).is_empty());
}

#[test]
fn remove_missing_file_is_not_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.er");
    let kv = JsonKvStore::new();
    kv.remove_file(&path).unwrap();
}

#[test]
fn remove_deletes_an_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("present.er");
    let kv = JsonKvStore::new();
    kv.write_file(&path, &[("STATE", 1)]).unwrap();
    assert!(path.exists());

    kv.remove_file(&path).unwrap();
    assert!(!path.exists());
}

#[test]
fn overwrite_replaces_previous_contents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ckpt.er.er");
    let kv = JsonKvStore::new();

    kv.write_file(&path, &[("STATE", 1)]).unwrap();
    kv.write_file(&path, &[("STATE", 2)]).unwrap();
    assert_eq!(kv.read_file(&path), vec![("STATE".to_string(), 2)]);
}
