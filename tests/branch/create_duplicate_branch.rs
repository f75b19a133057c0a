use crate::common::command::run_mygit_command;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn create_duplicate_branch(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_mygit_command(repository_dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();

    run_mygit_command(repository_dir.path(), &["branch", "create", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "a branch named 'feature' already exists",
        ));

    run_mygit_command(repository_dir.path(), &["branch", "create", "stem"])
        .assert()
        .failure();

    Ok(())
}
