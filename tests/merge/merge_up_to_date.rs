use crate::common::command::{branch_activity, run_mygit_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_up_to_date(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let activity = branch_activity(repository_dir.path(), "stem");

    run_mygit_command(repository_dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();

    run_mygit_command(repository_dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout("Already up to date.\n");
    assert_eq!(branch_activity(repository_dir.path(), "stem"), activity);

    Ok(())
}
