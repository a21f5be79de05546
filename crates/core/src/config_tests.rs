// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn no_path_is_empty() {
    let cfg = ErConfig::load(None);
    assert!(cfg.is_empty());
}

#[test]
fn missing_file_is_empty() {
    let cfg = ErConfig::load(Some(Path::new("/nonexistent/er.toml")));
    assert!(cfg.is_empty());
}

#[test]
fn malformed_toml_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("er.toml");
    std::fs::write(&path, "not valid toml {{{\n").unwrap();
    let cfg = ErConfig::load(Some(&path));
    assert!(cfg.is_empty());
}

#[test]
fn valid_toml_is_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("er.toml");
    std::fs::write(&path, "codec_hint = \"xor\"\n").unwrap();
    let cfg = ErConfig::load(Some(&path));
    assert!(!cfg.is_empty());
    assert_eq!(cfg.get("codec_hint").and_then(|v| v.as_str()), Some("xor"));
}
