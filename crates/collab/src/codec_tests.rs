use super::*;
use crate::group::LocalGroup;
use er_core::collab::Codec;
use tempfile::tempdir;

fn write(path: &std::path::Path, contents: &[u8]) {
    std::fs::write(path, contents).unwrap();
}

fn codec() -> Box<dyn Codec<LocalGroup>> {
    Box::new(ReferenceCodec::new())
}

#[test]
fn single_apply_writes_no_redundancy_file() {
    let dir = tempdir().unwrap();
    let app_file = dir.path().join("ckpt.0");
    write(&app_file, b"payload");
    let redset = dir.path().join("ckpt.er.redset");

    let world = LocalGroup::world(1);
    let codec = codec();
    let desc = codec.create(CodecVariant::Single, &world[0], "node").unwrap();

    codec.apply(&[app_file], &redset, desc).unwrap();
    assert!(!redset.exists());
    assert!(codec.filelist(&redset, desc).unwrap().is_empty());
}

#[test]
fn partner_apply_then_recover_restores_deleted_file_byte_identical() {
    let dir = tempdir().unwrap();
    let app_file = dir.path().join("ckpt.0");
    write(&app_file, b"original contents");
    let redset = dir.path().join("ckpt.er.redset");

    let world = LocalGroup::world(1);
    let codec = codec();
    let desc = codec.create(CodecVariant::Partner, &world[0], "node").unwrap();

    codec.apply(&[app_file.clone()], &redset, desc).unwrap();
    assert!(redset.exists());
    assert_eq!(codec.filelist(&redset, desc).unwrap(), vec![redset.clone()]);

    std::fs::remove_file(&app_file).unwrap();
    assert!(!app_file.exists());

    let recovered = codec.recover(&world[0], &redset).unwrap();
    assert_eq!(std::fs::read(&app_file).unwrap(), b"original contents");

    codec.unapply(&redset, recovered).unwrap();
    assert!(!redset.exists());
}

#[test]
fn xor_apply_then_recover_restores_deleted_file_byte_identical() {
    let dir = tempdir().unwrap();
    let app_file = dir.path().join("ckpt.0");
    write(&app_file, b"xor protected data");
    let redset = dir.path().join("ckpt.er.redset");

    let world = LocalGroup::world(1);
    let codec = codec();
    let desc = codec.create(CodecVariant::Xor, &world[0], "node").unwrap();

    codec.apply(&[app_file.clone()], &redset, desc).unwrap();
    std::fs::remove_file(&app_file).unwrap();

    codec.recover(&world[0], &redset).unwrap();
    assert_eq!(std::fs::read(&app_file).unwrap(), b"xor protected data");
}

#[test]
fn recover_leaves_surviving_files_untouched() {
    let dir = tempdir().unwrap();
    let app_file = dir.path().join("ckpt.0");
    write(&app_file, b"first version");
    let redset = dir.path().join("ckpt.er.redset");

    let world = LocalGroup::world(1);
    let codec = codec();
    let desc = codec.create(CodecVariant::Partner, &world[0], "node").unwrap();
    codec.apply(&[app_file.clone()], &redset, desc).unwrap();

    write(&app_file, b"second version written after apply");
    codec.recover(&world[0], &redset).unwrap();
    assert_eq!(std::fs::read(&app_file).unwrap(), b"second version written after apply");
}

#[test]
fn create_then_delete_round_trips() {
    let world = LocalGroup::world(1);
    let codec = codec();
    let desc = codec.create(CodecVariant::Single, &world[0], "node").unwrap();
    codec.delete(desc).unwrap();
}

#[test]
fn delete_unknown_descriptor_errors() {
    let codec = codec();
    assert!(codec.delete(CodecHandle(9999)).is_err());
}

#[test]
fn apply_with_unknown_descriptor_errors() {
    let dir = tempdir().unwrap();
    let redset = dir.path().join("ckpt.er.redset");
    let codec = codec();
    assert!(codec.apply(&[], &redset, CodecHandle(9999)).is_err());
    assert!(!redset.exists());
}

#[test]
fn recover_with_missing_redundancy_file_errors() {
    let dir = tempdir().unwrap();
    let redset = dir.path().join("never-written.redset");
    let world = LocalGroup::world(1);
    let codec = codec();
    assert!(codec.recover(&world[0], &redset).is_err());
}
