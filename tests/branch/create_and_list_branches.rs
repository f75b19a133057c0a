use crate::common::command::{branch_activity, run_mygit_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn create_and_list_branches(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    for name in ["feature", "alpha", "topic/login-form"] {
        run_mygit_command(repository_dir.path(), &["branch", "create", name])
            .assert()
            .success()
            .stdout(format!("Created branch '{}'\n", name));
    }

    run_mygit_command(repository_dir.path(), &["branch", "list"])
        .assert()
        .success()
        .stdout("  alpha\n  feature\n* stem\n  topic/login-form\n");

    // new branches start at the checked-out snapshot
    let stem = branch_activity(repository_dir.path(), "stem");
    assert_eq!(branch_activity(repository_dir.path(), "feature"), stem[..1].to_vec());

    Ok(())
}
