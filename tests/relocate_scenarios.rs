use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use assert_fs::prelude::*;
use file_relocator::fs_ops::{FileSystem, StdFileSystem};
use file_relocator::{MoveRequest, RelocateOptions, Relocator};

fn request(search: &Path, dest: &Path) -> MoveRequest {
    MoveRequest::new(search.to_string_lossy(), dest.to_string_lossy())
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Filesystem that refuses to move one named file, as if another process held it.
struct LockedFileFs {
    locked: &'static str,
}

impl FileSystem for LockedFileFs {
    fn is_dir(&self, path: &Path) -> bool {
        StdFileSystem.is_dir(path)
    }
    fn entry_exists(&self, path: &Path) -> bool {
        StdFileSystem.entry_exists(path)
    }
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        StdFileSystem.create_dir_all(path)
    }
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        StdFileSystem.canonicalize(path)
    }
    fn list_files(&self, root: &Path, exclude: Option<&Path>) -> io::Result<Vec<PathBuf>> {
        StdFileSystem.list_files(root, exclude)
    }
    fn move_file(&self, src: &Path, dst: &Path) -> io::Result<()> {
        if src.file_name().is_some_and(|n| n == self.locked) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "the file is being used by another process",
            ));
        }
        StdFileSystem.move_file(src, dst)
    }
}

#[test]
fn flattens_nested_tree_into_destination() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    let dest = temp.child("out");
    search.child("a.txt").write_str("a").unwrap();
    search.child("sub/b.txt").write_str("b").unwrap();
    dest.create_dir_all().unwrap();

    let summary = Relocator::new(RelocateOptions::default())
        .move_all(&request(search.path(), dest.path()))
        .unwrap();

    assert_eq!(summary.total_files(), 2);
    assert_eq!(summary.moved_files(), 2);
    assert_eq!(summary.failed_files(), 0);
    assert!(summary.failures().is_empty());
    assert_eq!(names_in(dest.path()), vec!["a.txt", "b.txt"]);
    assert!(!search.child("sub/b.txt").path().exists());
    // Source directories are left in place, only files move.
    assert!(search.child("sub").path().is_dir());
}

#[test]
fn existing_destination_file_gets_numbered_sibling() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    let dest = temp.child("out");
    search.child("a.txt").write_str("incoming").unwrap();
    dest.child("a.txt").write_str("original").unwrap();

    let summary = Relocator::new(RelocateOptions::default())
        .move_all(&request(search.path(), dest.path()))
        .unwrap();

    assert_eq!(summary.total_files(), 1);
    assert_eq!(summary.moved_files(), 1);
    assert_eq!(summary.failed_files(), 0);
    assert_eq!(fs::read_to_string(dest.child("a.txt").path()).unwrap(), "original");
    assert_eq!(fs::read_to_string(dest.child("a (1).txt").path()).unwrap(), "incoming");
}

#[test]
fn same_named_files_are_numbered_in_encounter_order() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    let dest = temp.child("out");
    search.child("a/report.txt").write_str("first").unwrap();
    search.child("b/report.txt").write_str("second").unwrap();
    search.child("c/report.txt").write_str("third").unwrap();

    let summary = Relocator::new(RelocateOptions::default())
        .move_all(&request(search.path(), dest.path()))
        .unwrap();

    assert_eq!(summary.moved_files(), 3);
    assert_eq!(
        names_in(dest.path()),
        vec!["report (1).txt", "report (2).txt", "report.txt"]
    );
    assert_eq!(fs::read_to_string(dest.child("report.txt").path()).unwrap(), "first");
    assert_eq!(fs::read_to_string(dest.child("report (1).txt").path()).unwrap(), "second");
    assert_eq!(fs::read_to_string(dest.child("report (2).txt").path()).unwrap(), "third");
}

#[test]
fn numbering_skips_names_already_taken() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    let dest = temp.child("out");
    search.child("notes").write_str("new").unwrap();
    dest.child("notes").touch().unwrap();
    dest.child("notes (1)").touch().unwrap();

    Relocator::new(RelocateOptions::default())
        .move_all(&request(search.path(), dest.path()))
        .unwrap();

    assert_eq!(fs::read_to_string(dest.child("notes (2)").path()).unwrap(), "new");
}

#[test]
fn second_run_finds_nothing_to_move() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    let dest = temp.child("out");
    search.child("x/1.bin").write_binary(&[1]).unwrap();
    search.child("2.bin").write_binary(&[2]).unwrap();

    let relocator = Relocator::new(RelocateOptions::default());
    let req = request(search.path(), dest.path());
    let first = relocator.move_all(&req).unwrap();
    assert_eq!(first.total_files(), 2);

    let second = relocator.move_all(&req).unwrap();
    assert_eq!(second.total_files(), 0);
    assert_eq!(second.moved_files(), 0);
    assert_eq!(second.failed_files(), 0);
}

#[test]
fn missing_destination_is_created() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    search.child("a.txt").touch().unwrap();
    let dest = temp.path().join("deep").join("new").join("out");

    let summary = Relocator::new(RelocateOptions::default())
        .move_all(&request(search.path(), &dest))
        .unwrap();

    assert_eq!(summary.moved_files(), 1);
    assert!(dest.join("a.txt").is_file());
}

#[test]
fn empty_search_directory_yields_empty_summary() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    search.child("only/dirs/here").create_dir_all().unwrap();
    let dest = temp.child("out");

    let summary = Relocator::new(RelocateOptions::default())
        .move_all(&request(search.path(), dest.path()))
        .unwrap();

    assert_eq!(summary.total_files(), 0);
    assert!(dest.path().is_dir());
}

#[test]
fn locked_file_is_reported_and_others_still_move() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    let dest = temp.child("out");
    search.child("a.txt").touch().unwrap();
    search.child("busy.db").touch().unwrap();
    search.child("sub/c.txt").touch().unwrap();

    let relocator =
        Relocator::with_filesystem(LockedFileFs { locked: "busy.db" }, RelocateOptions::default());
    let summary = relocator.move_all(&request(search.path(), dest.path())).unwrap();

    assert_eq!(summary.total_files(), 3);
    assert_eq!(summary.moved_files(), 2);
    assert_eq!(summary.failed_files(), 1);
    let failure = &summary.failures()[0];
    assert_eq!(failure.source, search.child("busy.db").path());
    assert_eq!(failure.destination, dest.child("busy.db").path());
    assert!(!failure.reason.is_empty());
    assert!(failure.reason.contains("another process"));

    assert!(search.child("busy.db").path().exists());
    assert_eq!(names_in(dest.path()), vec!["a.txt", "c.txt"]);
}

#[test]
fn totals_always_add_up() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    let dest = temp.child("out");
    for i in 0..5 {
        search.child(format!("d{i}/busy.db")).touch().unwrap();
        search.child(format!("d{i}/ok{i}.txt")).touch().unwrap();
    }

    let relocator =
        Relocator::with_filesystem(LockedFileFs { locked: "busy.db" }, RelocateOptions::default());
    let s = relocator.move_all(&request(search.path(), dest.path())).unwrap();

    assert_eq!(s.total_files(), s.moved_files() + s.failed_files());
    assert_eq!(s.moved_files(), 5);
    assert_eq!(s.failed_files(), 5);
    assert_eq!(s.failures().len(), 5);
}

#[test]
fn destination_inside_search_tree_is_not_reprocessed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    search.child("a.txt").write_str("a").unwrap();
    search.child("sorted/already.txt").write_str("kept").unwrap();
    let dest = search.child("sorted");

    let summary = Relocator::new(RelocateOptions::default())
        .move_all(&request(search.path(), dest.path()))
        .unwrap();

    assert_eq!(summary.total_files(), 1);
    assert_eq!(names_in(dest.path()), vec!["a.txt", "already.txt"]);
}

#[test]
fn messy_input_paths_are_normalized() {
    let temp = assert_fs::TempDir::new().unwrap();
    let search = temp.child("in");
    search.child("sub/a.txt").touch().unwrap();
    let dest = temp.child("out");

    let messy_search = format!("  {}//  ", search.path().display());
    let messy_dest = format!("\t{}\n", dest.path().display());
    let summary = Relocator::new(RelocateOptions::default())
        .move_all(&MoveRequest::new(messy_search, messy_dest))
        .unwrap();

    assert_eq!(summary.moved_files(), 1);
    assert!(dest.child("a.txt").path().is_file());
}
