//! End-to-end tests for propose and commit runs on a real directory tree.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use media_renamer::media_rename::{
    MAPPING_FILE_NAME, MediaRename, MediaRenameConfig, OsFileSystem, REPORT_FILE_NAME, RenameExecutor,
    RenameMapping, RenameStatus, RunMode, read_mapping_file, read_report_file, write_mapping_file,
};

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, b"").expect("Failed to create file");
}

fn media_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = dir.path();
    touch(&root.join("The.Matrix.1999.1080p.BluRay/The.Matrix.1999.1080p.BluRay.x264-GROUP.mkv"));
    touch(&root.join("The.Matrix.1999.1080p.BluRay/The.Matrix.1999.en.srt"));
    touch(&root.join("Some.Show.WEBRip.x264.mkv"));
    touch(&root.join("Arrival (2016).mkv"));
    dir
}

fn canonical_root(dir: &TempDir) -> std::path::PathBuf {
    dunce::canonicalize(dir.path()).expect("Failed to canonicalize temp dir")
}

#[test]
fn propose_then_commit_renames_files() {
    let dir = media_dir();
    let root = canonical_root(&dir);

    MediaRename::new(root.clone(), MediaRenameConfig::default())
        .unwrap()
        .run(RunMode::Propose)
        .unwrap();

    let mapping_file = root.join(MAPPING_FILE_NAME);
    let mappings = read_mapping_file(&mapping_file).unwrap();
    assert_eq!(mappings.len(), 4);
    assert!(root.join("Some.Show.WEBRip.x264.mkv").exists(), "propose must not rename");

    MediaRename::new(root.clone(), MediaRenameConfig::default())
        .unwrap()
        .run(RunMode::Commit)
        .unwrap();

    assert!(root.join("The Matrix (1999)/The Matrix (1999).mkv").is_file());
    assert!(root.join("The Matrix (1999)/The Matrix (1999).en.srt").is_file());
    assert!(root.join("Some Show.mkv").is_file());
    assert!(root.join("Arrival (2016).mkv").is_file());
    assert!(!root.join("The.Matrix.1999.1080p.BluRay").exists());

    let report = read_report_file(&root.join(REPORT_FILE_NAME)).unwrap();
    assert_eq!(report.len(), mappings.len());
    assert!(report.iter().all(|entry| entry.status == RenameStatus::Success));

    let report_text = fs::read_to_string(root.join(REPORT_FILE_NAME)).unwrap();
    assert!(report_text.starts_with("Status|OriginalFullPath|NewFullPath|ErrorMessage"));
    assert_eq!(report_text.lines().count(), mappings.len() + 1);
}

#[test]
fn non_recursive_propose_only_lists_top_level() {
    let dir = media_dir();
    let root = canonical_root(&dir);
    let config = MediaRenameConfig {
        recursive: false,
        ..Default::default()
    };

    MediaRename::new(root.clone(), config).unwrap().run(RunMode::Propose).unwrap();

    let mut originals: Vec<_> = read_mapping_file(&root.join(MAPPING_FILE_NAME))
        .unwrap()
        .into_iter()
        .map(|mapping| mapping.original_name())
        .collect();
    originals.sort();
    assert_eq!(originals, vec!["Some.Show.WEBRip.x264.mkv", "The.Matrix.1999.1080p.BluRay"]);
}

#[test]
fn commit_uses_edited_mapping_file() {
    let dir = media_dir();
    let root = canonical_root(&dir);

    MediaRename::new(root.clone(), MediaRenameConfig::default())
        .unwrap()
        .run(RunMode::Propose)
        .unwrap();

    let mapping_file = root.join(MAPPING_FILE_NAME);
    let edited: Vec<RenameMapping> = read_mapping_file(&mapping_file)
        .unwrap()
        .into_iter()
        .filter(|mapping| mapping.original_name() == "Some.Show.WEBRip.x264.mkv")
        .map(|mapping| RenameMapping::new(mapping.original, root.join("Some Show (2019).mkv")))
        .collect();
    write_mapping_file(&mapping_file, &edited).unwrap();

    MediaRename::new(root.clone(), MediaRenameConfig::default())
        .unwrap()
        .run(RunMode::Commit)
        .unwrap();

    assert!(root.join("Some Show (2019).mkv").is_file());
    assert!(root.join("The.Matrix.1999.1080p.BluRay").is_dir());
    assert_eq!(read_report_file(&root.join(REPORT_FILE_NAME)).unwrap().len(), 1);
}

#[test]
fn commit_without_mapping_file_does_nothing() {
    let dir = media_dir();
    let root = canonical_root(&dir);

    MediaRename::new(root.clone(), MediaRenameConfig::default())
        .unwrap()
        .run(RunMode::Commit)
        .unwrap();

    assert!(!root.join(REPORT_FILE_NAME).exists());
    assert!(root.join("Some.Show.WEBRip.x264.mkv").is_file());
}

#[test]
fn executor_renames_files_before_directories() {
    let dir = media_dir();
    let root = canonical_root(&dir);
    let folder = root.join("The.Matrix.1999.1080p.BluRay");

    let mappings = vec![
        RenameMapping::new(&folder, root.join("The Matrix (1999)")),
        RenameMapping::new(
            folder.join("The.Matrix.1999.1080p.BluRay.x264-GROUP.mkv"),
            folder.join("The Matrix (1999).mkv"),
        ),
    ];

    let mut os_fs = OsFileSystem;
    let report = RenameExecutor::new(&mut os_fs, false).execute(mappings);

    assert!(report.iter().all(|entry| entry.status == RenameStatus::Success));
    assert!(report[0].original.ends_with("The.Matrix.1999.1080p.BluRay.x264-GROUP.mkv"));
    assert_eq!(report[1].original, folder);
    assert!(root.join("The Matrix (1999)/The Matrix (1999).mkv").is_file());
}

#[test]
fn existing_destination_is_reported_as_failure() {
    let dir = media_dir();
    let root = canonical_root(&dir);
    touch(&root.join("Some Show.mkv"));

    let mut os_fs = OsFileSystem;
    let report = RenameExecutor::new(&mut os_fs, false).execute(vec![RenameMapping::new(
        root.join("Some.Show.WEBRip.x264.mkv"),
        root.join("Some Show.mkv"),
    )]);

    assert_eq!(report[0].status, RenameStatus::Failed);
    assert!(report[0].error_message.starts_with("Destination already exists"));
    assert!(root.join("Some.Show.WEBRip.x264.mkv").is_file());
}
