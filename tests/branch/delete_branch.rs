use crate::common::command::{branch_token, metadata_dir, run_mygit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn delete_branch(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_mygit_command(repository_dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();
    let token = branch_token(repository_dir.path(), "feature").expect("branch was created");

    run_mygit_command(repository_dir.path(), &["branch", "delete", "feature"])
        .assert()
        .success()
        .stdout("Deleted branch 'feature'\n");

    assert_eq!(branch_token(repository_dir.path(), "feature"), None);
    assert!(
        !metadata_dir(repository_dir.path())
            .join("BRANCH")
            .join(token)
            .exists()
    );

    run_mygit_command(repository_dir.path(), &["branch", "delete", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch 'feature' not found"));

    Ok(())
}
