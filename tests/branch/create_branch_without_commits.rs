use crate::common::command::{branch_activity, run_mygit_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn create_branch_without_commits(
    #[from(crate::common::command::repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_mygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_mygit_command(repository_dir.path(), &["branch", "create", "early"])
        .assert()
        .success();

    assert!(branch_activity(repository_dir.path(), "early").is_empty());

    Ok(())
}
