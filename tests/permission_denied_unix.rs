#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;

use assert_fs::prelude::*;
use file_relocator::{MoveRequest, RelocateError, RelocateOptions, Relocator};

fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[test]
fn file_in_readonly_directory_is_recorded_as_failure() {
    if running_as_root() {
        eprintln!("skipping: permissions are not enforced for root");
        return;
    }
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    let dest = temp.child("out");
    search.child("free.txt").write_str("ok").unwrap();
    let locked_dir = search.child("locked");
    locked_dir.child("stuck.txt").write_str("stuck").unwrap();
    fs::set_permissions(locked_dir.path(), fs::Permissions::from_mode(0o555)).unwrap();

    let summary = Relocator::new(RelocateOptions::default())
        .move_all(&MoveRequest::new(
            search.path().to_string_lossy(),
            dest.path().to_string_lossy(),
        ))
        .unwrap();

    fs::set_permissions(locked_dir.path(), fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(summary.total_files(), 2);
    assert_eq!(summary.moved_files(), 1);
    assert_eq!(summary.failed_files(), 1);
    let failure = &summary.failures()[0];
    assert!(failure.source.ends_with("locked/stuck.txt"));
    assert!(!failure.reason.is_empty());
    assert!(dest.child("free.txt").path().exists());
    assert!(locked_dir.child("stuck.txt").path().exists());
}

#[test]
fn unreadable_search_root_fails_before_moving() {
    if running_as_root() {
        eprintln!("skipping: permissions are not enforced for root");
        return;
    }
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    search.child("a.txt").touch().unwrap();
    fs::set_permissions(search.path(), fs::Permissions::from_mode(0o000)).unwrap();

    let result = Relocator::new(RelocateOptions::default()).move_all(&MoveRequest::new(
        search.path().to_string_lossy(),
        temp.path().join("out").to_string_lossy(),
    ));

    fs::set_permissions(search.path(), fs::Permissions::from_mode(0o755)).unwrap();

    let err = result.unwrap_err();
    assert!(matches!(err, RelocateError::Io { .. }), "got {err:?}");
    assert!(search.child("a.txt").path().exists());
}
