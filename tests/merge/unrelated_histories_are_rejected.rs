use crate::common::command::{
    branch_activity, commit_all, head_revision, metadata_dir, run_mygit_command, snapshot_count,
};
use crate::common::file::{FileSpec, snapshot_tree, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn unrelated_histories_are_rejected(
    #[from(crate::common::command::repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_mygit_command(dir, &["init"]).assert().success();

    // created before the first commit: shares no snapshot with stem
    run_mygit_command(dir, &["branch", "create", "other"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("stem.txt"), "stem\n".to_string()));
    commit_all(dir, "Stem root");

    run_mygit_command(dir, &["checkout", "other"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("other.txt"), "other\n".to_string()));
    commit_all(dir, "Other root");

    run_mygit_command(dir, &["checkout", "stem"])
        .assert()
        .success();

    let tree = snapshot_tree(dir);
    let activity = branch_activity(dir, "stem");
    let head = head_revision(dir);
    let snapshots = snapshot_count(dir);
    let staging = std::fs::read_to_string(metadata_dir(dir).join("STAGING"))?;

    run_mygit_command(dir, &["merge", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "refusing to merge unrelated history of 'other'",
        ));

    assert_eq!(snapshot_tree(dir), tree);
    assert_eq!(branch_activity(dir, "stem"), activity);
    assert_eq!(head_revision(dir), head);
    assert_eq!(snapshot_count(dir), snapshots);
    assert_eq!(
        std::fs::read_to_string(metadata_dir(dir).join("STAGING"))?,
        staging
    );

    Ok(())
}
