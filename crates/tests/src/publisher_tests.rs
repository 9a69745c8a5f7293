use std::fs;
use std::path::Path;

use bulk_data::export::publisher::swap_archives;
use shared_types::AppErrorKind;
use pretty_assertions::assert_eq;

fn listing(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut out: Vec<(String, Vec<u8>)> = fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (
                e.file_name().to_string_lossy().into_owned(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect();
    out.sort();
    out
}

fn stage(src: &Path) {
    fs::create_dir_all(src.join("ca1")).unwrap();
    fs::write(src.join("ca1.tar.gz"), b"court archive").unwrap();
    fs::write(src.join("all.tar"), b"aggregate").unwrap();
    fs::write(src.join("ca1").join("1.json"), b"{}").unwrap();
    fs::write(src.join("notes.txt"), b"keep me").unwrap();
}

#[test]
fn moves_only_archives() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("tmp/docket");
    let dest = dir.path().join("docket");
    stage(&src);

    let moved = swap_archives(&src, &dest).unwrap();
    assert_eq!(moved, vec!["all.tar", "ca1.tar.gz"]);

    assert!(!src.join("all.tar").exists());
    assert!(src.join("notes.txt").exists());
    assert!(src.join("ca1/1.json").exists());
    assert_eq!(
        listing(&dest),
        vec![
            ("all.tar".to_string(), b"aggregate".to_vec()),
            ("ca1.tar.gz".to_string(), b"court archive".to_vec()),
        ]
    );
}

#[test]
fn overwrites_same_names_and_leaves_unrelated_files() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("tmp/audio");
    let dest = dir.path().join("audio");
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("all.tar"), b"stale").unwrap();
    fs::write(dest.join("README"), b"published by hand").unwrap();
    fs::write(dest.join("ca9.tar.gz"), b"from an earlier court list").unwrap();
    stage(&src);

    swap_archives(&src, &dest).unwrap();

    assert_eq!(fs::read(dest.join("all.tar")).unwrap(), b"aggregate");
    assert_eq!(fs::read(dest.join("README")).unwrap(), b"published by hand");
    assert_eq!(
        fs::read(dest.join("ca9.tar.gz")).unwrap(),
        b"from an earlier court list"
    );
}

#[test]
fn swapping_identical_content_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("tmp/document");
    let dest = dir.path().join("document");

    stage(&src);
    swap_archives(&src, &dest).unwrap();
    let first = listing(&dest);

    stage(&src);
    swap_archives(&src, &dest).unwrap();
    assert_eq!(listing(&dest), first);

    // Nothing left to move.
    assert!(swap_archives(&src, &dest).unwrap().is_empty());
    assert_eq!(listing(&dest), first);
}

#[test]
fn directory_in_the_way_fails_and_keeps_the_archive() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("tmp/docket");
    let dest = dir.path().join("docket");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("all.tar"), b"aggregate").unwrap();
    fs::create_dir_all(dest.join("all.tar").join("stale")).unwrap();

    let err = swap_archives(&src, &dest).unwrap_err();
    assert_eq!(err.kind, AppErrorKind::IoError);
    assert_eq!(fs::read(src.join("all.tar")).unwrap(), b"aggregate");
    assert!(dest.join("all.tar").join("stale").is_dir());
}
