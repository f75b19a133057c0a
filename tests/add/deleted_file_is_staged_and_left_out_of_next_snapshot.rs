use crate::common::command::{
    head_revision, mygit_commit, run_mygit_command, snapshot_store, staged_entries,
};
use crate::common::file::delete_path;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn deleted_file_is_staged_and_left_out_of_next_snapshot(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let first = head_revision(repository_dir.path()).expect("fixture has a commit");

    delete_path(&repository_dir.path().join("a").join("2.txt"));

    run_mygit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    assert_eq!(staged_entries(repository_dir.path()), vec!["D:a/2.txt"]);

    mygit_commit(repository_dir.path(), "Remove 2.txt")
        .assert()
        .success();

    let second = head_revision(repository_dir.path()).expect("commit moved HEAD");
    assert_ne!(first, second);

    let store = snapshot_store(repository_dir.path(), &second);
    assert!(!store.join("a").join("2.txt").exists());
    assert!(store.join("1.txt").is_file());
    assert!(store.join("a").join("b").join("3.txt").is_file());

    // the previous snapshot is untouched
    assert!(
        snapshot_store(repository_dir.path(), &first)
            .join("a")
            .join("2.txt")
            .is_file()
    );

    Ok(())
}
