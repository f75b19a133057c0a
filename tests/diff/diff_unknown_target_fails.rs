use crate::common::command::run_mygit_command;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn diff_unknown_target_fails(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_mygit_command(repository_dir.path(), &["diff", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("argument 'nowhere' is unknown"));

    Ok(())
}
