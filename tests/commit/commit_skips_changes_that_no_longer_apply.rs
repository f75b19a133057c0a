use crate::common::command::{
    branch_activity, mygit_commit, run_mygit_command, snapshot_count, staged_entries,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_skips_changes_that_no_longer_apply(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    let file1 = dir.join("1.txt");

    std::fs::remove_file(&file1)?;
    run_mygit_command(dir, &["add", "1.txt"]).assert().success();
    assert_eq!(staged_entries(dir), vec!["D:1.txt".to_string()]);

    // the deleted file comes back before the commit
    write_file(FileSpec::new(file1.clone(), "one".to_string()));

    mygit_commit(dir, "Delete 1.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing added to commit"));

    assert_eq!(read_file(&file1), "one");
    assert!(staged_entries(dir).is_empty());
    assert_eq!(branch_activity(dir, "stem").len(), 1);
    assert_eq!(snapshot_count(dir), 1);

    Ok(())
}
