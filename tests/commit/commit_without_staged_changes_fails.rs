use crate::common::command::{branch_activity, mygit_commit, snapshot_count};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_without_staged_changes_fails(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    mygit_commit(repository_dir.path(), "Nothing to see")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing added to commit"));

    assert_eq!(branch_activity(repository_dir.path(), "stem").len(), 1);
    assert_eq!(snapshot_count(repository_dir.path()), 1);

    Ok(())
}
